//! Parameter types for the execute_command tool

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExecuteCommandParams {
    #[schemars(description = "The shell command to execute")]
    pub command: String,

    #[schemars(
        description = "Working directory (optional, defaults to the server's configured directory)"
    )]
    #[serde(default)]
    pub working_dir: Option<String>,

    #[schemars(
        description = "Timeout in seconds (optional, default 30; non-positive values use the default)"
    )]
    #[serde(default)]
    pub timeout: Option<i64>,
}
