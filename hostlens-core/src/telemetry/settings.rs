//! Collector settings
//!
//! Global settings live in `AppSettings.collector` and control defaults.
//! Per-host overrides use [`HostOverride`] with `Option` fields falling
//! back to the global values.

use serde::{Deserialize, Serialize};

/// Refresh interval bounds (seconds)
const MIN_INTERVAL_SECS: u64 = 1;
const MAX_INTERVAL_SECS: u64 = 3600;

/// Global collector settings (stored in `config.toml` under `[collector]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorSettings {
    /// Whether auto-refresh is armed on startup (default: false)
    #[serde(default)]
    pub auto_refresh: bool,
    /// Refresh interval in seconds (1–3600, default: 30)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Maximum process rows requested from the remote host
    #[serde(default = "default_process_rows")]
    pub process_rows: u32,
    /// Maximum service rows requested from the remote host
    #[serde(default = "default_service_rows")]
    pub service_rows: u32,
}

const fn default_interval_secs() -> u64 {
    30
}

const fn default_process_rows() -> u32 {
    20
}

const fn default_service_rows() -> u32 {
    40
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            auto_refresh: false,
            interval_secs: default_interval_secs(),
            process_rows: default_process_rows(),
            service_rows: default_service_rows(),
        }
    }
}

impl CollectorSettings {
    /// Returns the interval clamped to the valid range
    #[must_use]
    pub const fn effective_interval_secs(&self) -> u64 {
        if self.interval_secs < MIN_INTERVAL_SECS {
            MIN_INTERVAL_SECS
        } else if self.interval_secs > MAX_INTERVAL_SECS {
            MAX_INTERVAL_SECS
        } else {
            self.interval_secs
        }
    }
}

/// Per-host override (keyed by host in the config file)
///
/// `None` fields fall back to the global [`CollectorSettings`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostOverride {
    /// Override the auto-refresh flag for this host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_refresh: Option<bool>,
    /// Override the refresh interval for this host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<u64>,
}

impl HostOverride {
    /// Whether auto-refresh applies, falling back to the global setting
    #[must_use]
    pub fn is_auto_refresh(&self, global: &CollectorSettings) -> bool {
        self.auto_refresh.unwrap_or(global.auto_refresh)
    }

    /// Effective interval, falling back to the global setting
    #[must_use]
    pub fn effective_interval_secs(&self, global: &CollectorSettings) -> u64 {
        self.interval_secs
            .unwrap_or_else(|| global.effective_interval_secs())
            .clamp(MIN_INTERVAL_SECS, MAX_INTERVAL_SECS)
    }
}
