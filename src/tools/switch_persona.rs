//! MCP `switch_persona` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `switch_persona` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SwitchPersonaParams {
    #[schemars(description = "Name of an already-initialized persona to switch to")]
    pub person_name: String,
}
