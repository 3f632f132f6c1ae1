//! Detailed telemetry command.

use hostlens_core::AppSettings;

use crate::cli::{DetailSection, OutputFormat, TargetArgs};
use crate::error::CliError;
use crate::format;

/// Fetch the detail block and print the selected section(s)
pub async fn cmd_detail(
    settings: &AppSettings,
    target: &TargetArgs,
    section: DetailSection,
    output: OutputFormat,
) -> Result<(), CliError> {
    let collector = super::build_collector(settings, target);
    let detail = collector.detailed().await?;

    match output {
        OutputFormat::Table => print!("{}", format::render_detail(&detail, section)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&detail)?),
    }
    Ok(())
}
