//! SSH gateway implementation
//!
//! Runs telemetry commands on the remote host via the system `ssh` binary.
//! This deliberately uses a separate non-interactive SSH invocation per
//! command rather than a persistent channel, so concurrent battery commands
//! cannot serialize on one another.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::{CommandGateway, ExecError, ExecResult};

/// Default per-command execution timeout (seconds)
pub const DEFAULT_EXEC_TIMEOUT_SECS: u64 = 15;

/// TCP connect timeout passed to ssh itself (seconds)
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Gateway that executes commands over `ssh` in batch mode
#[derive(Debug, Clone)]
pub struct SshGateway {
    host: String,
    port: u16,
    username: Option<String>,
    identity_file: Option<String>,
    timeout: Duration,
}

impl SshGateway {
    /// Creates a gateway for `host` on the standard SSH port
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: None,
            identity_file: None,
            timeout: Duration::from_secs(DEFAULT_EXEC_TIMEOUT_SECS),
        }
    }

    /// Sets the SSH port
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the remote username
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the private key path; `~` is expanded at spawn time
    #[must_use]
    pub fn with_identity_file(mut self, path: impl Into<String>) -> Self {
        self.identity_file = Some(path.into());
        self
    }

    /// Sets the per-command execution timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The `user@host` destination argument
    fn destination(&self) -> String {
        self.username
            .as_ref()
            .map_or_else(|| self.host.clone(), |user| format!("{user}@{}", self.host))
    }

    /// Builds the ssh invocation for one command
    fn build_command(&self, remote_command: &str) -> Command {
        let mut cmd = Command::new("ssh");
        cmd.arg("-o").arg("BatchMode=yes");
        cmd.arg("-o").arg("StrictHostKeyChecking=no");
        cmd.arg("-o")
            .arg(format!("ConnectTimeout={CONNECT_TIMEOUT_SECS}"));

        if self.port != 22 {
            cmd.arg("-p").arg(self.port.to_string());
        }

        if let Some(ref key) = self.identity_file {
            let expanded = shellexpand::tilde(key);
            cmd.arg("-i").arg(expanded.as_ref());
        }

        cmd.arg(self.destination());
        cmd.arg(remote_command);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd
    }
}

#[async_trait]
impl CommandGateway for SshGateway {
    async fn execute(&self, command: &str) -> ExecResult<String> {
        let mut cmd = self.build_command(command);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ExecError::Transport(format!(
                    "failed to spawn ssh: {e}"
                )));
            }
            Err(_) => {
                tracing::debug!(
                    host = %self.host,
                    timeout_secs = self.timeout.as_secs(),
                    "SSH command timed out"
                );
                return Err(ExecError::Timeout(self.timeout.as_secs()));
            }
        };

        if output.status.success() {
            String::from_utf8(output.stdout)
                .map_err(|e| ExecError::InvalidOutput(e.to_string()))
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!(
                host = %self.host,
                status = %output.status,
                "SSH command exited non-zero"
            );
            Err(ExecError::CommandFailed {
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            })
        }
    }
}
