//! Interval watch command.

use std::time::Duration;

use hostlens_core::AppSettings;

use crate::cli::TargetArgs;
use crate::error::CliError;
use crate::format;

/// Re-collect on a fixed interval, printing one summary line per cycle.
///
/// Interval precedence: the `-n` flag, then the per-host override from the
/// configuration, then the global collector setting. Failed cycles are
/// reported and the loop keeps going, mirroring the auto-refresh policy.
pub async fn cmd_watch(
    settings: &AppSettings,
    target: &TargetArgs,
    interval: Option<u64>,
    cycles: Option<u32>,
) -> Result<(), CliError> {
    let interval_secs = interval.unwrap_or_else(|| {
        settings.hosts.get(&target.host).map_or_else(
            || settings.collector.effective_interval_secs(),
            |over| over.effective_interval_secs(&settings.collector),
        )
    });
    let collector = super::build_collector(settings, target);

    tracing::info!(
        host = %target.host,
        interval_secs,
        "watching host"
    );

    let mut completed: u32 = 0;
    loop {
        match collector.collect().await {
            Ok(snapshot) => println!("{}", format::render_summary_line(&snapshot)),
            Err(err) => eprintln!("collection failed: {err}"),
        }

        completed += 1;
        if let Some(limit) = cycles
            && completed >= limit
        {
            break;
        }
        tokio::time::sleep(Duration::from_secs(interval_secs)).await;
    }
    Ok(())
}
