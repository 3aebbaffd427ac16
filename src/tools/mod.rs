pub mod ask_persona;
pub mod init_persona;
pub mod switch_persona;

use ask_persona::AskPersonaParams;
use init_persona::InitPersonaParams;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use std::sync::Arc;
use switch_persona::SwitchPersonaParams;

use crate::persona::display_name;
use crate::persona::pipeline::Pipeline;

/// The Mimic MCP tool handler. Holds the persona pipeline (store, state, and
/// collaborators behind `Arc`) and exposes all MCP tools via the
/// `#[tool_router]` macro.
#[derive(Clone)]
pub struct MimicTools {
    tool_router: ToolRouter<Self>,
    pipeline: Arc<Pipeline>,
    default_max_urls: usize,
}

#[tool_router]
impl MimicTools {
    pub fn new(pipeline: Arc<Pipeline>, default_max_urls: usize) -> Self {
        Self {
            tool_router: Self::tool_router(),
            pipeline,
            default_max_urls,
        }
    }

    /// Build a persona's knowledge base from their online content.
    #[tool(description = "Initialize a persona: search the web for a person's content, scrape the top pages, and store them as the persona's knowledge base. The persona becomes active on success.")]
    async fn init_persona(
        &self,
        Parameters(params): Parameters<InitPersonaParams>,
    ) -> Result<String, String> {
        if params.person_name.trim().is_empty() {
            return Err("person_name must not be empty".into());
        }
        let max_urls = params.max_urls.unwrap_or(self.default_max_urls);
        if max_urls == 0 {
            return Err("max_urls must be at least 1".into());
        }

        tracing::info!(person = %params.person_name, max_urls, "init_persona called");

        let report = self
            .pipeline
            .ingest(params.person_name.trim(), max_urls)
            .await
            .map_err(|e| e.to_string())?;

        Ok(format!(
            "{} is ready — scraped {}/{} URLs ({} chars stored)",
            display_name(&report.persona),
            report.stored,
            report.attempted,
            report.total_chars,
        ))
    }

    /// Ask the currently active persona a question.
    #[tool(description = "Ask a question to the currently active persona. Answers in first person, grounded in the persona's stored public statements.")]
    async fn ask_persona(
        &self,
        Parameters(params): Parameters<AskPersonaParams>,
    ) -> Result<String, String> {
        if params.question.trim().is_empty() {
            return Err("question must not be empty".into());
        }

        tracing::info!(question_len = params.question.len(), "ask_persona called");

        self.pipeline
            .answer(&params.question)
            .await
            .map_err(|e| e.to_string())
    }

    /// Report the active persona and its knowledge base statistics.
    #[tool(description = "Get the currently active persona and its knowledge base stats.")]
    async fn get_current_persona(&self) -> Result<String, String> {
        match self.pipeline.current_with_stats().map_err(|e| e.to_string())? {
            Some((key, stats)) if stats.exists => Ok(format!(
                "Current persona: {} — {} documents, {} characters",
                display_name(&key),
                stats.documents,
                stats.total_chars,
            )),
            Some((key, _)) => Ok(format!(
                "Current persona: {} (not initialized — run init_persona)",
                display_name(&key),
            )),
            None => Ok("no persona is currently active — run init_persona first".into()),
        }
    }

    /// Activate a different, already-initialized persona.
    #[tool(description = "Switch to a persona that has already been initialized with init_persona.")]
    async fn switch_persona(
        &self,
        Parameters(params): Parameters<SwitchPersonaParams>,
    ) -> Result<String, String> {
        if params.person_name.trim().is_empty() {
            return Err("person_name must not be empty".into());
        }

        tracing::info!(person = %params.person_name, "switch_persona called");

        let (key, stats) = self
            .pipeline
            .switch(params.person_name.trim())
            .await
            .map_err(|e| e.to_string())?;

        Ok(format!(
            "Switched to {} — {} documents, {} characters",
            display_name(&key),
            stats.documents,
            stats.total_chars,
        ))
    }
}

#[tool_handler]
impl ServerHandler for MimicTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "Mimic creates AI personas from a real person's online content. \
                 Initialize a persona with init_persona, then ask questions with \
                 ask_persona — the persona answers in first person based on their \
                 actual public statements."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
