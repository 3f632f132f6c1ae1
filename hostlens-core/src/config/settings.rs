//! Application settings persisted in `config.toml`

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::telemetry::{CollectorSettings, HostOverride};

/// Root settings document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Collector defaults (`[collector]`)
    #[serde(default)]
    pub collector: CollectorSettings,
    /// Logging setup (`[logging]`)
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Per-host collector overrides (`[hosts.<name>]`)
    #[serde(default)]
    pub hosts: HashMap<String, HostOverride>,
}

/// Logging settings (`[logging]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level name (error/warn/info/debug/trace)
    #[serde(default = "default_level")]
    pub level: String,
    /// Optional log file path; stderr when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.logging.level, "info");
        assert!(settings.logging.file.is_none());
        assert!(settings.hosts.is_empty());
        assert_eq!(settings.collector.interval_secs, 30);
    }

    #[test]
    fn test_toml_roundtrip_with_host_override() {
        let doc = r#"
[collector]
interval_secs = 15

[logging]
level = "debug"

[hosts."db01.example.com"]
interval_secs = 5
"#;
        let settings: AppSettings = toml::from_str(doc).unwrap();
        assert_eq!(settings.collector.interval_secs, 15);
        assert_eq!(settings.logging.level, "debug");

        let over = &settings.hosts["db01.example.com"];
        assert_eq!(over.effective_interval_secs(&settings.collector), 5);

        let serialized = toml::to_string(&settings).unwrap();
        let back: AppSettings = toml::from_str(&serialized).unwrap();
        assert_eq!(settings, back);
    }

    #[test]
    fn test_empty_document_is_all_defaults() {
        let settings: AppSettings = toml::from_str("").unwrap();
        assert_eq!(settings, AppSettings::default());
    }
}
