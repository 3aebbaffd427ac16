//! MCP server initialization for stdio and streamable HTTP transports.
//!
//! Provides [`serve_stdio`] and [`serve_http`] entry points that wire up the
//! content store, persona state, external collaborators, and the MCP tool
//! handler into a running server.

use crate::config::MimicConfig;
use crate::persona::pipeline::Pipeline;
use crate::persona::state::ActivePersona;
use crate::persona::store::ContentStore;
use crate::providers::{AnthropicClient, SerperClient, WebFetcher};
use crate::tools::MimicTools;
use anyhow::{Context, Result};
use rmcp::ServiceExt;
use std::sync::Arc;

/// Shared setup: create the store directory, persona state, collaborator
/// clients, and the pipeline. Returns (pipeline, config) wrapped in Arc.
fn setup_shared_state(config: MimicConfig) -> Result<(Arc<Pipeline>, Arc<MimicConfig>)> {
    let base_dir = config.resolved_base_dir();
    std::fs::create_dir_all(&base_dir)
        .with_context(|| format!("failed to create {}", base_dir.display()))?;
    tracing::info!(base_dir = %base_dir.display(), "knowledge base ready");

    if config.search.serper_api_key.is_empty() {
        tracing::warn!("no Serper API key configured — init_persona will fail (set SERPER_API_KEY)");
    }
    if config.llm.anthropic_api_key.is_empty() {
        tracing::warn!("no Anthropic API key configured — ask_persona will fail (set ANTHROPIC_API_KEY)");
    }

    let store = Arc::new(ContentStore::new(base_dir));
    let state = Arc::new(ActivePersona::new());
    let search = Arc::new(SerperClient::new(&config.search));
    let fetcher = Arc::new(WebFetcher::new());
    let generator = Arc::new(AnthropicClient::new(&config.llm));

    let config = Arc::new(config);
    let pipeline = Arc::new(Pipeline::new(
        store,
        state,
        search,
        fetcher,
        generator,
        Arc::clone(&config),
    ));

    Ok((pipeline, config))
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: MimicConfig) -> Result<()> {
    tracing::info!("starting Mimic MCP server on stdio");

    let (pipeline, config) = setup_shared_state(config)?;

    let tools = MimicTools::new(pipeline, config.ingest.default_max_urls);
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running — waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}

/// Start the MCP server over Streamable HTTP transport.
pub async fn serve_http(config: MimicConfig) -> Result<()> {
    let host = config.server.host.clone();
    let port = config.server.port;
    let bind_addr = format!("{host}:{port}");

    tracing::info!(addr = %bind_addr, "starting Mimic MCP server on HTTP");

    let (pipeline, config) = setup_shared_state(config)?;
    let default_max_urls = config.ingest.default_max_urls;

    let service = rmcp::transport::streamable_http_server::StreamableHttpService::new(
        move || Ok(MimicTools::new(pipeline.clone(), default_max_urls)),
        rmcp::transport::streamable_http_server::session::local::LocalSessionManager::default()
            .into(),
        Default::default(),
    );

    let router = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "MCP server listening at http://{bind_addr}/mcp");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to listen for ctrl-c");
            tracing::info!("shutting down HTTP server");
        })
        .await?;

    Ok(())
}
