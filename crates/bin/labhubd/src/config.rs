//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `labhub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Automation scheduler settings.
    pub automation: AutomationConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Instrument adapter toggles.
    pub instruments: InstrumentsConfig,
}

/// Automation scheduler configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AutomationConfig {
    /// Seconds between due-checks while a script runs.
    pub poll_interval_secs: u64,
    /// Script to load and run at startup, if any.
    pub script: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Per-adapter toggles.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct InstrumentsConfig {
    /// Register the emulated bench instruments.
    pub virtual_enabled: bool,
}

impl Config {
    /// Load configuration from `labhub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if
    /// the result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("labhub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("LABHUB_SCRIPT") {
            self.automation.script = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("LABHUB_POLL_INTERVAL") {
            if let Ok(secs) = val.parse() {
                self.automation.poll_interval_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("LABHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.automation.poll_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "poll interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The polling interval as a [`Duration`].
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.automation.poll_interval_secs)
    }
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 1,
            script: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "labhubd=info,labhub=info".to_string(),
        }
    }
}

impl Default for InstrumentsConfig {
    fn default() -> Self {
        Self {
            virtual_enabled: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
