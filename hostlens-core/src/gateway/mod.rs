//! Remote command execution contract
//!
//! The collector is transport-agnostic: anything that can run one shell
//! command string on the target host and hand back stdout satisfies
//! [`CommandGateway`]. The shipped implementation shells out to `ssh`
//! ([`ssh::SshGateway`]); tests substitute scripted mocks.

pub mod ssh;

use async_trait::async_trait;

pub use ssh::SshGateway;

/// Errors surfaced by a gateway when a remote command cannot be executed
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ExecError {
    /// The command ran but exited non-zero
    #[error("Remote command failed (exit {status}): {stderr}")]
    CommandFailed {
        /// Remote exit status description
        status: String,
        /// Trimmed stderr output
        stderr: String,
    },
    /// The transport could not deliver the command at all
    #[error("Transport failure: {0}")]
    Transport(String),
    /// The command exceeded the gateway's execution timeout
    #[error("Remote command timed out after {0}s")]
    Timeout(u64),
    /// The remote produced bytes that are not valid UTF-8
    #[error("Invalid UTF-8 in remote output: {0}")]
    InvalidOutput(String),
}

/// Result type for gateway operations
pub type ExecResult<T> = Result<T, ExecError>;

/// One-operation contract for running shell commands on the remote host.
///
/// Each call is independent; the collector issues many concurrently and
/// never relies on ordering or shared shell state between them.
#[async_trait]
pub trait CommandGateway: Send + Sync {
    /// Runs `command` on the remote host and returns its raw stdout.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError`] on non-zero exit, transport loss, timeout, or
    /// undecodable output. Failures must not be swallowed into empty
    /// output; callers distinguish "ran and printed nothing" from
    /// "did not run".
    async fn execute(&self, command: &str) -> ExecResult<String>;
}
