//! Anthropic Messages API client for persona response generation.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::config::LlmConfig;
use crate::providers::Generator;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for the Anthropic Messages API.
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.anthropic_api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }
}

#[async_trait]
impl Generator for AnthropicClient {
    async fn generate(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": system_prompt,
            "messages": [
                { "role": "user", "content": user_message }
            ],
        });

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .context("generation request failed")?;

        let status = response.status();
        let payload: serde_json::Value =
            response.json().await.context("invalid generation response")?;

        if !status.is_success() {
            let detail = payload["error"]["message"]
                .as_str()
                .unwrap_or("unknown error");
            anyhow::bail!("generation API returned {status}: {detail}");
        }

        payload["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .context("generation response contained no text")
    }
}
