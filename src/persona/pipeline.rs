//! The two composite persona operations: ingest and answer.
//!
//! [`Pipeline`] owns the content store, the active-persona register, and the
//! three external collaborators (search, fetch, generate). `ingest` runs
//! search → fetch → filter → store → activate; `answer` runs load → rank →
//! prompt → generate. Failures surface as [`PersonaError`] variants so the
//! tool layer reports one consistent message per failure kind.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::MimicConfig;
use crate::persona::rank::{rank, RankConfig};
use crate::persona::state::ActivePersona;
use crate::persona::store::{normalize_name, ContentStore, PersonaStats};
use crate::providers::{prompt, Generator, PageFetcher, SearchProvider};

/// Failure taxonomy for the persona pipeline. Every variant's display string
/// is the user-facing message returned through the tool surface.
#[derive(Debug, Error)]
pub enum PersonaError {
    #[error("no persona is active — run init_persona first")]
    NoActivePersona,
    #[error("persona '{0}' has not been initialized — run init_persona first")]
    NotInitialized(String),
    #[error("no search results found for '{0}' — try a different name")]
    NoSearchResults(String),
    #[error("could not scrape any usable content for '{0}' — the pages may be inaccessible")]
    NoUsableContent(String),
    #[error("no stored content found for '{0}'")]
    NoContent(String),
    #[error("response generation failed: {0}")]
    GenerationFailed(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Outcome summary of a successful ingest.
#[derive(Debug)]
pub struct IngestReport {
    /// Canonical key of the (now active) persona.
    pub persona: String,
    /// URLs attempted (searched, deduplicated, capped).
    pub attempted: usize,
    /// URLs that yielded stored content.
    pub stored: usize,
    /// Total characters stored across all saved documents.
    pub total_chars: usize,
}

/// Search queries issued per persona, each with the quoted name prepended.
const QUERY_TERMS: &[&str] = &["interview", "quotes", "blog", "opinions"];

/// Coordinates the content store, persona state, and external collaborators.
pub struct Pipeline {
    store: Arc<ContentStore>,
    state: Arc<ActivePersona>,
    search: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn PageFetcher>,
    generator: Arc<dyn Generator>,
    config: Arc<MimicConfig>,
}

impl Pipeline {
    pub fn new(
        store: Arc<ContentStore>,
        state: Arc<ActivePersona>,
        search: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn PageFetcher>,
        generator: Arc<dyn Generator>,
        config: Arc<MimicConfig>,
    ) -> Self {
        Self {
            store,
            state,
            search,
            fetcher,
            generator,
            config,
        }
    }

    /// Build a persona's knowledge base: search the web, scrape the top URLs,
    /// store what survives the length filter, and activate the persona.
    ///
    /// Per-URL failures are isolated; the operation fails only when no URL
    /// yields storable content, and a failed ingest never touches the
    /// active-persona register.
    pub async fn ingest(
        &self,
        person_name: &str,
        max_urls: usize,
    ) -> Result<IngestReport, PersonaError> {
        let key = normalize_name(person_name);

        info!(persona = %key, max_urls, "searching for content");
        let urls = self.collect_urls(person_name, max_urls).await;
        if urls.is_empty() {
            return Err(PersonaError::NoSearchResults(person_name.to_string()));
        }

        let urls: Vec<String> = urls.into_iter().take(max_urls).collect();
        info!(persona = %key, count = urls.len(), "scraping URLs");

        let timeout = Duration::from_secs(self.config.ingest.fetch_timeout_secs);
        let bodies = self.fetch_all(&urls, timeout).await;

        let min_chars = self.config.ingest.min_content_chars;
        let mut stored = 0usize;
        let mut total_chars = 0usize;

        for (url, body) in urls.iter().zip(bodies) {
            let Some(content) = body else {
                debug!(url, "skipped (fetch failed or timed out)");
                continue;
            };
            if content.trim().chars().count() <= min_chars {
                debug!(url, "skipped (insufficient content)");
                continue;
            }

            let chars = content.chars().count();
            let store = Arc::clone(&self.store);
            let name = person_name.to_string();
            let url_owned = url.clone();
            tokio::task::spawn_blocking(move || store.save(&name, &url_owned, &content))
                .await
                .map_err(|e| anyhow::anyhow!("store task failed: {e}"))??;

            debug!(url, chars, "saved content");
            stored += 1;
            total_chars += chars;
        }

        if stored == 0 {
            return Err(PersonaError::NoUsableContent(person_name.to_string()));
        }

        self.state.set(&key);
        info!(persona = %key, stored, attempted = urls.len(), total_chars, "persona ready");

        Ok(IngestReport {
            persona: key,
            attempted: urls.len(),
            stored,
            total_chars,
        })
    }

    /// Answer a question as the active persona.
    pub async fn answer(&self, question: &str) -> Result<String, PersonaError> {
        let key = self.state.current().ok_or(PersonaError::NoActivePersona)?;

        if !self.store.exists(&key) {
            return Err(PersonaError::NotInitialized(key));
        }

        info!(persona = %key, "loading stored content");
        let store = Arc::clone(&self.store);
        let key_owned = key.clone();
        let chunks = tokio::task::spawn_blocking(move || store.load_all(&key_owned))
            .await
            .map_err(|e| anyhow::anyhow!("store task failed: {e}"))??;

        if chunks.is_empty() {
            return Err(PersonaError::NoContent(key));
        }

        let rank_config = RankConfig {
            top_k: self.config.retrieval.top_k,
            max_chars: self.config.retrieval.max_context_chars,
            min_partial_chars: self.config.retrieval.min_partial_chars,
        };
        let relevant = rank(question, &chunks, &rank_config);
        info!(persona = %key, candidates = chunks.len(), selected = relevant.len(), "ranked context");

        let system_prompt = prompt::build_system_prompt(&key, &relevant);

        info!(persona = %key, "generating response");
        self.generator
            .generate(&system_prompt, question)
            .await
            .map_err(|e| PersonaError::GenerationFailed(e.to_string()))
    }

    /// Activate an already-initialized persona. State is untouched when the
    /// persona does not exist in the store.
    pub async fn switch(&self, person_name: &str) -> Result<(String, PersonaStats), PersonaError> {
        let key = normalize_name(person_name);

        if !self.store.exists(&key) {
            return Err(PersonaError::NotInitialized(person_name.to_string()));
        }

        let stats = self.store.stats(&key)?;
        self.state.set(&key);
        info!(persona = %key, "switched active persona");

        Ok((key, stats))
    }

    /// The active persona's key and store stats, or `None` when no persona
    /// is active. A stale pointer yields stats with `exists: false`.
    pub fn current_with_stats(&self) -> Result<Option<(String, PersonaStats)>, PersonaError> {
        match self.state.current() {
            Some(key) => {
                let stats = self.store.stats(&key)?;
                Ok(Some((key, stats)))
            }
            None => Ok(None),
        }
    }

    /// Run the four targeted queries, tolerating per-query failures, and
    /// deduplicate result URLs in first-seen order, capped at `max_urls * 2`.
    async fn collect_urls(&self, person_name: &str, max_urls: usize) -> Vec<String> {
        let cap = max_urls * 2;
        let per_query = cap / QUERY_TERMS.len() + 1;

        let mut seen = HashSet::new();
        let mut urls = Vec::new();

        for term in QUERY_TERMS {
            let query = format!("\"{person_name}\" {term}");
            let hits = match self.search.search(&query, per_query).await {
                Ok(hits) => hits,
                Err(e) => {
                    warn!(query = %query, error = %e, "search query failed, continuing");
                    continue;
                }
            };
            for hit in hits {
                if urls.len() >= cap {
                    return urls;
                }
                if seen.insert(hit.url.clone()) {
                    urls.push(hit.url);
                }
            }
        }

        urls
    }

    /// Fetch all URLs concurrently: every task is spawned before any is
    /// awaited, and results are gathered in URL order. A timeout or failure
    /// on one URL never affects its siblings.
    async fn fetch_all(&self, urls: &[String], per_url_timeout: Duration) -> Vec<Option<String>> {
        let handles: Vec<_> = urls
            .iter()
            .map(|url| {
                let fetcher = Arc::clone(&self.fetcher);
                let url = url.clone();
                tokio::spawn(async move {
                    tokio::time::timeout(per_url_timeout, fetcher.fetch(&url, per_url_timeout))
                        .await
                        .ok()
                        .flatten()
                })
            })
            .collect();

        let mut bodies = Vec::with_capacity(handles.len());
        for handle in handles {
            bodies.push(handle.await.unwrap_or(None));
        }
        bodies
    }
}
