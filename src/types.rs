//! Type definitions for the exec-dir MCP server

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default timeout applied when a request omits one or supplies a
/// non-positive value.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Configuration Types
// ============================================================================

/// Server configuration, built once from the CLI at startup and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory used when a request does not name one
    pub default_dir: PathBuf,
    /// Directories in which execution is permitted; empty means
    /// every directory on the host is allowed
    pub allowed_dirs: Vec<PathBuf>,
}

impl Config {
    pub fn unrestricted(&self) -> bool {
        self.allowed_dirs.is_empty()
    }
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// One command execution request, built fresh per tool call
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub command: String,
    pub working_dir: Option<String>,
    pub timeout: Option<i64>,
}

impl ExecutionRequest {
    /// Effective timeout in seconds. Missing, zero, and negative values
    /// all fall back to the default.
    pub fn timeout_secs(&self) -> u64 {
        match self.timeout {
            Some(secs) if secs > 0 => secs as u64,
            _ => DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Raw output of a child process that ran to completion
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub returncode: i32,
}

/// Result envelope returned to the client, discriminated by `success`.
///
/// A completed run is a success even when the exit code is non-zero; the
/// failure arm is reserved for commands that never produced a return code
/// (bad directory, spawn failure, timeout).
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExecutionResult {
    Completed(CompletedExecution),
    Failed(FailedExecution),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompletedExecution {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub returncode: i32,
    pub working_dir: String,
    pub command: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FailedExecution {
    pub success: bool,
    pub error: String,
}

impl ExecutionResult {
    pub fn completed(output: CommandOutput, working_dir: &Path, command: &str) -> Self {
        ExecutionResult::Completed(CompletedExecution {
            success: true,
            stdout: output.stdout,
            stderr: output.stderr,
            returncode: output.returncode,
            working_dir: working_dir.display().to_string(),
            command: command.to_string(),
        })
    }

    pub fn failed(error: impl Into<String>) -> Self {
        ExecutionResult::Failed(FailedExecution {
            success: false,
            error: error.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Completed(_))
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("directory does not exist: {0}")]
    DirNotFound(String),

    #[error("path is not a directory: {0}")]
    NotADirectory(String),

    #[error("directory not in allowed list: {0}")]
    DirNotAllowed(String),

    #[error("failed to start command: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("command timed out after {0}s")]
    Timeout(u64),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExecResult<T> = Result<T, ExecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_defaults_when_missing() {
        let request = ExecutionRequest {
            command: "true".to_string(),
            working_dir: None,
            timeout: None,
        };
        assert_eq!(request.timeout_secs(), DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn timeout_coerces_non_positive_values() {
        for bad in [0, -1, -30] {
            let request = ExecutionRequest {
                command: "true".to_string(),
                working_dir: None,
                timeout: Some(bad),
            };
            assert_eq!(request.timeout_secs(), DEFAULT_TIMEOUT_SECS);
        }
    }

    #[test]
    fn timeout_keeps_positive_values() {
        let request = ExecutionRequest {
            command: "true".to_string(),
            working_dir: None,
            timeout: Some(5),
        };
        assert_eq!(request.timeout_secs(), 5);
    }

    #[test]
    fn success_envelope_shape() {
        let result = ExecutionResult::completed(
            CommandOutput {
                stdout: "hi\n".to_string(),
                stderr: String::new(),
                returncode: 0,
            },
            Path::new("/tmp"),
            "echo hi",
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["stdout"], "hi\n");
        assert_eq!(value["returncode"], 0);
        assert_eq!(value["working_dir"], "/tmp");
        assert_eq!(value["command"], "echo hi");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn failure_envelope_carries_no_returncode() {
        let result = ExecutionResult::failed("directory not in allowed list: /etc");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("returncode").is_none());
        assert!(value["error"].as_str().unwrap().contains("/etc"));
    }
}
