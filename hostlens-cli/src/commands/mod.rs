//! Command handler modules for the CLI.

mod completions;
mod detail;
mod snapshot;
mod watch;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use hostlens_core::gateway::SshGateway;
use hostlens_core::telemetry::SystemCollector;
use hostlens_core::{
    AppSettings, ConfigManager, TracingConfig, TracingLevel, TracingOutput, init_tracing,
};

use crate::cli::{Commands, TargetArgs};
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(
    config_path: Option<&Path>,
    verbose: u8,
    quiet: bool,
    command: Commands,
) -> Result<(), CliError> {
    // completions need neither configuration nor a runtime
    if let Commands::Completions { shell } = &command {
        completions::cmd_completions(*shell);
        return Ok(());
    }

    let settings = load_settings(config_path)?;
    setup_tracing(&settings, verbose, quiet);

    let runtime = tokio::runtime::Runtime::new().map_err(|e| CliError::Runtime(e.to_string()))?;

    runtime.block_on(async {
        match command {
            Commands::Snapshot { target, format } => {
                snapshot::cmd_snapshot(&settings, &target, format).await
            }
            Commands::Detail {
                target,
                section,
                format,
            } => detail::cmd_detail(&settings, &target, section, format).await,
            Commands::Watch {
                target,
                interval,
                cycles,
            } => watch::cmd_watch(&settings, &target, interval, cycles).await,
            Commands::Completions { .. } => unreachable!("handled above"),
        }
    })
}

/// Loads settings from the explicit directory or the platform default
fn load_settings(config_path: Option<&Path>) -> Result<AppSettings, CliError> {
    let manager = match config_path {
        Some(dir) => ConfigManager::with_dir(dir),
        None => ConfigManager::new().map_err(|e| CliError::Config(e.to_string()))?,
    };
    manager.load().map_err(|e| CliError::Config(e.to_string()))
}

/// Initializes tracing from verbosity flags, falling back to the
/// configured level. A second initialization (tests) is ignored.
fn setup_tracing(settings: &AppSettings, verbose: u8, quiet: bool) {
    let level = if quiet {
        TracingLevel::Error
    } else {
        match verbose {
            0 => settings
                .logging
                .level
                .parse()
                .unwrap_or(TracingLevel::Info),
            1 => TracingLevel::Info,
            2 => TracingLevel::Debug,
            _ => TracingLevel::Trace,
        }
    };

    let mut config = TracingConfig::new().with_level(level);
    if let Some(ref file) = settings.logging.file {
        config = config.with_output(TracingOutput::File(file.into()));
    }
    let _ = init_tracing(&config);
}

/// Builds the collector stack for one remote target
pub(crate) fn build_collector(
    settings: &AppSettings,
    target: &TargetArgs,
) -> Arc<SystemCollector> {
    let mut gateway = SshGateway::new(target.host.clone())
        .with_port(target.port)
        .with_timeout(Duration::from_secs(target.timeout));

    if let Some(ref user) = target.user {
        gateway = gateway.with_username(user.clone());
    }
    if let Some(ref identity) = target.identity {
        gateway = gateway.with_identity_file(identity.clone());
    }

    Arc::new(SystemCollector::with_settings(
        Arc::new(gateway),
        settings.collector.clone(),
    ))
}
