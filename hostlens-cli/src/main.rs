//! HostLens CLI - remote system telemetry from the command line
//!
//! Provides commands for collecting a one-shot snapshot, fetching the
//! detailed telemetry block, watching a host on an interval, and
//! generating shell completions.

mod cli;
mod commands;
mod error;
mod format;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = commands::dispatch(config_path, cli.verbose, cli.quiet, cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
