//! Retrieval-augmented AI personas from a real person's online content, via MCP.
//!
//! Mimic is an [MCP](https://modelcontextprotocol.io/) server that builds a
//! lightweight persona chatbot: given a person's name it searches the web,
//! scrapes a handful of pages, stores the text on disk, and later answers
//! questions "as" that person with a language model conditioned on the most
//! relevant stored documents.
//!
//! # Architecture
//!
//! - **Storage**: flat files per persona — one text file per scraped URL
//!   (keyed by a hash of the URL) plus a `metadata.json` map
//! - **Retrieval**: literal keyword-frequency ranking over whole documents,
//!   with a character-budgeted context window
//! - **Collaborators**: Serper for web search, a reader-proxy/raw-HTML
//!   fetcher for scraping, and the Anthropic Messages API for generation
//! - **Transport**: MCP over stdio (primary) or Streamable HTTP
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`persona`] — Core pipeline: content store, relevance ranker, active-persona
//!   state, and the ingest/answer orchestrator
//! - [`providers`] — External collaborator traits and their HTTP clients

pub mod config;
pub mod persona;
pub mod providers;
