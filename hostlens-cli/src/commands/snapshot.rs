//! One-shot snapshot command.

use hostlens_core::AppSettings;

use crate::cli::{OutputFormat, TargetArgs};
use crate::error::CliError;
use crate::format;

/// Collect a snapshot and print it
pub async fn cmd_snapshot(
    settings: &AppSettings,
    target: &TargetArgs,
    output: OutputFormat,
) -> Result<(), CliError> {
    let collector = super::build_collector(settings, target);
    let snapshot = collector.collect().await?;

    match output {
        OutputFormat::Table => print!("{}", format::render_snapshot(&snapshot)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
    }
    Ok(())
}
