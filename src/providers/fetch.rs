//! Web page fetching with a two-stage extraction strategy.
//!
//! The primary path fetches through a reader proxy that returns the page as
//! clean markdown. When that fails, the fallback fetches the raw page and
//! strips HTML down to plain text. Every failure mode collapses to `None`;
//! per-URL timeouts bound both stages.

use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

use crate::providers::PageFetcher;

const READER_PROXY: &str = "https://r.jina.ai";

/// Fetches readable text from URLs.
pub struct WebFetcher {
    client: reqwest::Client,
}

impl WebFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Primary path: reader proxy, which renders the page and returns
    /// markdown. Handles bot-guarded pages better than a raw GET.
    async fn fetch_via_reader(&self, url: &str, timeout: Duration) -> Option<String> {
        let reader_url = format!("{READER_PROXY}/{url}");
        let response = self
            .client
            .get(&reader_url)
            .timeout(timeout)
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            return None;
        }

        let text = response.text().await.ok()?;
        (!text.trim().is_empty()).then_some(text)
    }

    /// Fallback path: raw GET plus HTML tag stripping.
    async fn fetch_raw(&self, url: &str, timeout: Duration) -> Option<String> {
        let response = self.client.get(url).timeout(timeout).send().await.ok()?;

        if !response.status().is_success() {
            return None;
        }

        let html = response.text().await.ok()?;
        let text = strip_html(&html);
        (!text.trim().is_empty()).then_some(text)
    }
}

impl Default for WebFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for WebFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Option<String> {
        if let Some(text) = self.fetch_via_reader(url, timeout).await {
            return Some(text);
        }
        debug!(url, "reader fetch failed, falling back to raw fetch");
        self.fetch_raw(url, timeout).await
    }
}

fn script_style_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)>")
            .expect("valid script/style pattern")
    })
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"))
}

/// Reduce an HTML document to plain text: drop script/style blocks, strip
/// tags, decode the common entities, collapse whitespace.
fn strip_html(html: &str) -> String {
    let without_blocks = script_style_pattern().replace_all(html, " ");
    let without_tags = tag_pattern().replace_all(&without_blocks, " ");

    let decoded = without_tags
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_collapses_whitespace() {
        let html = "<html><body><h1>Title</h1>\n  <p>Some   text.</p></body></html>";
        assert_eq!(strip_html(html), "Title Some text.");
    }

    #[test]
    fn drops_script_and_style_blocks() {
        let html = "<p>keep</p><script>var x = 1;</script><style>p { color: red }</style><p>this</p>";
        assert_eq!(strip_html(html), "keep this");
    }

    #[test]
    fn decodes_common_entities() {
        let html = "<p>fish &amp; chips &quot;daily&quot;</p>";
        assert_eq!(strip_html(html), "fish & chips \"daily\"");
    }
}
