//! MCP `ask_persona` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `ask_persona` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AskPersonaParams {
    #[schemars(description = "The question to ask the active persona")]
    pub question: String,
}
