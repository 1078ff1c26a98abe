//! Execution pipeline: authorize the directory, run the command, fold
//! every outcome into a result envelope.

use std::time::Duration;

use tracing::{info, warn};

use crate::authorizer::PathAuthorizer;
use crate::runner::ProcessRunner;
use crate::types::{Config, ExecutionRequest, ExecutionResult};

/// Orchestrates one execution request end to end.
///
/// Never fails outward: authorization failures, spawn failures, and
/// timeouts all become failure envelopes, so a single bad request can
/// never take the server down.
#[derive(Debug, Clone)]
pub struct ExecutionService {
    authorizer: PathAuthorizer,
    runner: ProcessRunner,
}

impl ExecutionService {
    pub fn new(config: &Config) -> Self {
        Self {
            authorizer: PathAuthorizer::new(config),
            runner: ProcessRunner::new(),
        }
    }

    pub async fn execute(&self, request: ExecutionRequest) -> ExecutionResult {
        let working_dir = match self.authorizer.authorize(request.working_dir.as_deref()) {
            Ok(dir) => dir,
            Err(err) => {
                warn!("rejected '{}': {}", request.command, err);
                return ExecutionResult::failed(err.to_string());
            }
        };

        info!(
            "executing '{}' in {}",
            request.command,
            working_dir.display()
        );

        let timeout = Duration::from_secs(request.timeout_secs());
        match self.runner.run(&request.command, &working_dir, timeout).await {
            Ok(output) => ExecutionResult::completed(output, &working_dir, &request.command),
            Err(err) => {
                warn!("'{}' failed: {}", request.command, err);
                ExecutionResult::failed(err.to_string())
            }
        }
    }
}
