//! Configuration management
//!
//! Pipeline settings loaded from a TOML file. Every section and field has a
//! default, so a partial file is enough.

use crate::error::{Error, Result};
use crate::sentiment::BatchConfig;
use crate::validation::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub batch: BatchConfig,
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file or use default
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path.as_ref()).unwrap_or_else(|e| {
            warn!("Using default configuration ({})", e);
            Self::default()
        })
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        self.batch.validate()?;
        if self.validation.sample_size == 0 {
            return Err(Error::Config("validation.sample_size must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.validation.anomaly_warn_rate) {
            return Err(Error::Config(
                "validation.anomaly_warn_rate must lie in [0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.batch.batch_size, 10_000);
        assert_eq!(config.batch.progress_every, 10);
        assert_eq!(config.batch.reclaim_every, 50);
        assert_eq!(config.validation.sample_size, 1000);
        assert_eq!(config.validation.seed, 42);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let config: Config = toml::from_str("[batch]\nbatch_size = 500\n").unwrap();
        assert_eq!(config.batch.batch_size, 500);
        assert_eq!(config.batch.progress_every, 10);
        assert_eq!(config.validation, ValidationConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.validation.seed = 7;

        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[validation]\nsample_size = 0\n").unwrap();

        assert!(matches!(Config::load(&path), Err(Error::Config(_))));
        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn test_anomaly_warn_rate_range() {
        let mut config = Config::default();
        config.validation.anomaly_warn_rate = 1.5;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.validation.anomaly_warn_rate = -0.1;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.validation.anomaly_warn_rate = 1.0;
        assert!(config.validate().is_ok());
    }
}
