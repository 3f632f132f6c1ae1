//! CLI error types and exit codes.

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, validation, or other local errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Collection failure - the remote battery could not be completed
    pub const COLLECTION_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Telemetry collection failed
    #[error("Collection failed: {0}")]
    Collect(#[from] hostlens_core::CollectError),

    /// Output serialization failed
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    /// Async runtime could not be created
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    /// Maps the error to a process exit code
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Collect(_) => exit_codes::COLLECTION_FAILURE,
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}
