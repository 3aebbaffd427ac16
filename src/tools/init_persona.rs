//! MCP `init_persona` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `init_persona` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct InitPersonaParams {
    #[schemars(description = "Full name of the person (e.g. \"Ada Lovelace\")")]
    pub person_name: String,

    #[schemars(
        description = "Maximum URLs to scrape. Defaults to the configured value (3); 1-5 recommended."
    )]
    pub max_urls: Option<usize>,
}
