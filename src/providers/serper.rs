//! Serper web search client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::config::SearchConfig;
use crate::providers::{SearchHit, SearchProvider};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the Serper search API.
pub struct SerperClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl SerperClient {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.serper_api_key.clone(),
            endpoint: config.endpoint.clone(),
        }
    }
}

#[async_trait]
impl SearchProvider for SerperClient {
    async fn search(&self, query: &str, desired: usize) -> Result<Vec<SearchHit>> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&json!({ "q": query, "num": desired }))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .context("search request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("search API returned {status} for query '{query}'");
        }

        let body: serde_json::Value =
            response.json().await.context("invalid search response")?;

        let hits = body["organic"]
            .as_array()
            .map(|results| {
                results
                    .iter()
                    .filter_map(|r| {
                        let url = r["link"].as_str()?.to_string();
                        if url.is_empty() {
                            return None;
                        }
                        Some(SearchHit {
                            url,
                            title: r["title"].as_str().unwrap_or_default().to_string(),
                            snippet: r["snippet"].as_str().unwrap_or_default().to_string(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(hits)
    }
}
