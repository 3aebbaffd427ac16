#![allow(dead_code)]

use async_trait::async_trait;
use mimic::config::MimicConfig;
use mimic::persona::pipeline::Pipeline;
use mimic::persona::state::ActivePersona;
use mimic::persona::store::ContentStore;
use mimic::providers::{Generator, PageFetcher, SearchHit, SearchProvider};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// Search mock that returns the same fixed hits for every query.
pub struct MockSearch {
    pub hits: Vec<SearchHit>,
}

#[async_trait]
impl SearchProvider for MockSearch {
    async fn search(&self, _query: &str, _desired: usize) -> anyhow::Result<Vec<SearchHit>> {
        Ok(self.hits.clone())
    }
}

/// Search mock that errors on every query.
pub struct FailingSearch;

#[async_trait]
impl SearchProvider for FailingSearch {
    async fn search(&self, _query: &str, _desired: usize) -> anyhow::Result<Vec<SearchHit>> {
        anyhow::bail!("search provider unavailable")
    }
}

/// Fetcher mock backed by a url -> body map; unknown URLs fail.
pub struct MockFetcher {
    pub pages: HashMap<String, String>,
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Option<String> {
        self.pages.get(url).cloned()
    }
}

/// Generator mock returning a canned reply and recording every system prompt
/// it was called with.
pub struct MockGenerator {
    pub reply: String,
    pub prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, system_prompt: &str, _user_message: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(system_prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Generator mock that errors on every call.
pub struct FailingGenerator;

#[async_trait]
impl Generator for FailingGenerator {
    async fn generate(&self, _system_prompt: &str, _user_message: &str) -> anyhow::Result<String> {
        anyhow::bail!("model overloaded")
    }
}

/// A pipeline wired to mocks and a temp-dir store, with handles to the shared
/// parts so tests can inspect state directly.
pub struct Harness {
    pub dir: TempDir,
    pub store: Arc<ContentStore>,
    pub state: Arc<ActivePersona>,
    pub pipeline: Pipeline,
}

pub fn harness(
    search: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn PageFetcher>,
    generator: Arc<dyn Generator>,
) -> Harness {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(ContentStore::new(dir.path()));
    let state = Arc::new(ActivePersona::new());
    let config = Arc::new(MimicConfig::default());

    let pipeline = Pipeline::new(
        Arc::clone(&store),
        Arc::clone(&state),
        search,
        fetcher,
        generator,
        config,
    );

    Harness {
        dir,
        store,
        state,
        pipeline,
    }
}

pub fn hit(url: &str) -> SearchHit {
    SearchHit {
        url: url.to_string(),
        title: format!("title for {url}"),
        snippet: String::new(),
    }
}

/// A body of exactly `n` characters built from a repeated marker word.
pub fn body_with_marker(marker: &str, n: usize) -> String {
    let mut body = format!("{marker} ");
    while body.chars().count() < n {
        body.push_str("filler text about their life and public work. ");
    }
    body.chars().take(n).collect()
}
