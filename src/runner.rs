//! Child process execution with timeout enforcement
//!
//! Commands run through the host shell with the validated directory as
//! cwd. Both output pipes are drained concurrently while process exit
//! races a per-request timer; on expiry the child is killed outright.

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};

use crate::types::{CommandOutput, ExecError, ExecResult};

#[cfg(unix)]
const DEFAULT_SHELL: &str = "/bin/sh";
#[cfg(windows)]
const DEFAULT_SHELL: &str = "cmd";

#[cfg(unix)]
const SHELL_FLAG: &str = "-c";
#[cfg(windows)]
const SHELL_FLAG: &str = "/C";

/// Executes shell commands in an already-authorized working directory
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    shell: String,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self {
            shell: DEFAULT_SHELL.to_string(),
        }
    }
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an alternative command interpreter
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    /// Run `command` in `cwd`, bounded by `timeout`.
    ///
    /// A completed run is returned whole, whatever its exit code. On
    /// timeout the shell gets SIGKILL with no grace period; descendants
    /// it spawned are terminated only insofar as they die with their
    /// parent's pipes and session (best effort).
    pub async fn run(
        &self,
        command: &str,
        cwd: &Path,
        timeout: Duration,
    ) -> ExecResult<CommandOutput> {
        let mut child = Command::new(&self.shell)
            .arg(SHELL_FLAG)
            .arg(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(ExecError::Spawn)?;

        // Keep both pipes draining while the race is live so the child
        // can't stall on pipe backpressure.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        let stdout_abort = stdout.abort_handle();
        let stderr_abort = stderr.abort_handle();

        // One deadline bounds the exit wait AND the pipe drains: a
        // backgrounded descendant that inherits the pipes can hold them
        // open long after the shell exits, and must not extend the
        // suspension past the timeout.
        let deadline = Instant::now() + timeout;

        let status = match timeout_at(deadline, child.wait()).await {
            Ok(status) => status?,
            Err(_elapsed) => {
                let _ = child.start_kill();
                let _ = child.wait().await;
                stdout_abort.abort();
                stderr_abort.abort();
                return Err(ExecError::Timeout(timeout.as_secs()));
            }
        };

        match timeout_at(deadline, async { (stdout.await, stderr.await) }).await {
            Ok((stdout, stderr)) => Ok(CommandOutput {
                stdout: stdout.unwrap_or_default(),
                stderr: stderr.unwrap_or_default(),
                returncode: exit_code(status),
            }),
            Err(_elapsed) => {
                // Aborting drops our read ends so no pipe FDs linger
                stdout_abort.abort();
                stderr_abort.abort();
                Err(ExecError::Timeout(timeout.as_secs()))
            }
        }
    }
}

fn drain(pipe: Option<impl AsyncRead + Unpin + Send + 'static>) -> JoinHandle<String> {
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf).await;
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

/// Exit code of a finished child; a signal death on Unix is reported as
/// the negated signal number, matching POSIX shell conventions.
fn exit_code(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    status.code().unwrap_or(-1)
}
