//! MCP server exposing directory-scoped command execution as a tool
//!
//! The gateway validates tool parameters, hands the request to the
//! execution service, and serializes the result envelope back as JSON
//! text content. Execution failures are data for the client, not
//! protocol errors; only malformed parameters are rejected at this
//! layer.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};

use crate::params::ExecuteCommandParams;
use crate::service::ExecutionService;
use crate::types::{Config, ExecutionRequest, ExecutionResult};

/// The exec-dir MCP server
#[derive(Clone)]
pub struct ExecDirServer {
    service: ExecutionService,
    default_dir: String,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ExecDirServer {
    pub fn new(config: Config) -> Self {
        Self {
            service: ExecutionService::new(&config),
            default_dir: config.default_dir.display().to_string(),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Execute a shell command in a whitelisted directory with a bounded timeout"
    )]
    async fn execute_command(
        &self,
        Parameters(params): Parameters<ExecuteCommandParams>,
    ) -> Result<CallToolResult, McpError> {
        if params.command.trim().is_empty() {
            return Err(McpError::invalid_params("command must not be empty", None));
        }

        let result = self
            .service
            .execute(ExecutionRequest {
                command: params.command,
                working_dir: params.working_dir,
                timeout: params.timeout,
            })
            .await;

        envelope(&result)
    }
}

fn envelope(result: &ExecutionResult) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[tool_handler]
impl rmcp::ServerHandler for ExecDirServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(format!(
                "Command execution MCP server. Commands run through the host \
                 shell with a bounded timeout. Default directory: {}. Working \
                 directories are restricted to the configured allow-list.",
                self.default_dir
            )),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_json(result: &CallToolResult) -> serde_json::Value {
        let text = result
            .content
            .iter()
            .find_map(|c| match &c.raw {
                rmcp::model::RawContent::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .expect("tool result should carry text content");
        serde_json::from_str(text).expect("tool result text should be JSON")
    }

    fn server(default_dir: &std::path::Path) -> ExecDirServer {
        ExecDirServer::new(Config {
            default_dir: default_dir.to_path_buf(),
            allowed_dirs: vec![default_dir.to_path_buf()],
        })
    }

    #[tokio::test]
    async fn empty_command_is_invalid_params() {
        let dir = tempfile::tempdir().unwrap();
        let err = server(dir.path())
            .execute_command(Parameters(ExecuteCommandParams {
                command: "   ".to_string(),
                working_dir: None,
                timeout: None,
            }))
            .await
            .unwrap_err();
        assert!(err.message.contains("command must not be empty"));
    }

    #[tokio::test]
    async fn tool_returns_json_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let result = server(dir.path())
            .execute_command(Parameters(ExecuteCommandParams {
                command: "echo hi".to_string(),
                working_dir: None,
                timeout: Some(5),
            }))
            .await
            .unwrap();

        assert!(!result.is_error.unwrap_or(false));
        let value = result_json(&result);
        assert_eq!(value["success"], true);
        assert_eq!(value["stdout"], "hi\n");
        assert_eq!(value["command"], "echo hi");
    }

    #[tokio::test]
    async fn denied_directory_is_a_failure_envelope_not_a_protocol_error() {
        let dir = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let result = server(dir.path())
            .execute_command(Parameters(ExecuteCommandParams {
                command: "ls".to_string(),
                working_dir: Some(other.path().display().to_string()),
                timeout: None,
            }))
            .await
            .unwrap();

        let value = result_json(&result);
        assert_eq!(value["success"], false);
        assert!(value["error"].as_str().unwrap().contains("not in allowed list"));
    }
}
