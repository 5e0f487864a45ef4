//! Forecaster configuration loaded from YAML

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::epoch::WEATHER_PERIOD_SECONDS;
use crate::forecast::ForecastOptions;
use crate::language::Language;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecasterConfig {
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_step_seconds")]
    pub step_seconds: i64,
    #[serde(default)]
    pub offset_seconds: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_store_dir() -> PathBuf {
    PathBuf::from("store")
}

fn default_count() -> usize {
    15
}

fn default_step_seconds() -> i64 {
    WEATHER_PERIOD_SECONDS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ForecasterConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            language: Language::default(),
            forecast: ForecastConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            step_seconds: default_step_seconds(),
            offset_seconds: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ForecastConfig {
    pub fn options(&self) -> ForecastOptions {
        ForecastOptions {
            count: self.count,
            step_seconds: self.step_seconds,
            offset_seconds: self.offset_seconds,
        }
    }
}

impl ForecasterConfig {
    /// Load configuration from YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: ForecasterConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: ForecasterConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, ForecasterConfig::default());
        assert_eq!(config.forecast.step_seconds, 1_400);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_document_overrides_fields() {
        let yaml = "language: fr\nforecast:\n  count: 3\n  offset_seconds: -600\n";
        let config: ForecasterConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.language, Language::Fr);
        let options = config.forecast.options();
        assert_eq!(options.count, 3);
        assert_eq!(options.offset_seconds, -600);
        assert_eq!(options.step_seconds, 1_400);
    }

    #[test]
    fn config_round_trips_through_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("forecaster.yaml");
        let mut config = ForecasterConfig::default();
        config.language = Language::Ja;
        config.forecast.count = 4;

        config.to_yaml(&path).unwrap();
        let loaded = ForecasterConfig::from_yaml(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
