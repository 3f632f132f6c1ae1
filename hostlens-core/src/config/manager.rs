//! TOML configuration persistence

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::settings::AppSettings;

/// Configuration file name inside the config directory
const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No usable configuration directory could be determined
    #[error("Could not determine a configuration directory")]
    NoConfigDir,
    /// Filesystem error while reading or writing
    #[error("Configuration I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid TOML
    #[error("Invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Settings could not be serialized
    #[error("Could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Loads and saves [`AppSettings`] under a configuration directory
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a manager over the platform default directory
    /// (`$XDG_CONFIG_HOME/hostlens` on Linux)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] when the platform reports no
    /// configuration directory.
    pub fn new() -> ConfigResult<Self> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self {
            config_dir: base.join("hostlens"),
        })
    }

    /// Creates a manager over an explicit directory (tests, `--config`)
    #[must_use]
    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// The directory this manager reads from and writes to
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Loads settings; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(&self) -> ConfigResult<AppSettings> {
        let path = self.config_dir.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(AppSettings::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves settings, creating the directory if needed. The file is
    /// written to a temporary sibling first and renamed into place so a
    /// crash mid-write cannot truncate an existing config.
    ///
    /// # Errors
    ///
    /// Returns an error on serialization or filesystem failure.
    pub fn save(&self, settings: &AppSettings) -> ConfigResult<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        let path = self.config_dir.join(CONFIG_FILE);
        let tmp = self.config_dir.join(format!("{CONFIG_FILE}.tmp"));

        let content = toml::to_string_pretty(settings)?;
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &path)?;
        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }
}
