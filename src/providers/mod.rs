//! External collaborator interfaces: web search, page fetching, and text
//! generation.
//!
//! The pipeline depends only on these traits; the shipped implementations
//! ([`SerperClient`], [`WebFetcher`], [`AnthropicClient`]) are thin HTTP
//! wrappers that tests replace with mocks.

pub mod anthropic;
pub mod fetch;
pub mod prompt;
pub mod serper;

pub use anthropic::AnthropicClient;
pub use fetch::WebFetcher;
pub use serper::SerperClient;

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// One web search result.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    pub snippet: String,
}

/// Ranked web search for a single query string.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, desired: usize) -> Result<Vec<SearchHit>>;
}

/// Extracts readable text from a web page. Returns `None` on any failure —
/// per-URL errors are isolated, never propagated.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Option<String>;
}

/// Single-turn text generation against a language model.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, system_prompt: &str, user_message: &str) -> Result<String>;
}
