//! Serializable analysis configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! [signals]
//! rsi_overbought = 70.0
//! rsi_oversold = 30.0
//!
//! [data]
//! lookback_days = 365
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::signals::SignalThresholds;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub signals: SignalThresholds,
    pub data: DataConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Calendar days of history requested when no start date is given.
    pub lookback_days: u32,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { lookback_days: 365 }
    }
}

impl AnalysisConfig {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let SignalThresholds {
            rsi_overbought,
            rsi_oversold,
        } = self.signals;
        let checks = [("rsi_overbought", rsi_overbought), ("rsi_oversold", rsi_oversold)];
        for (name, value) in checks {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within 0..=100, got {value}"
                )));
            }
        }
        if rsi_oversold >= rsi_overbought {
            return Err(ConfigError::Invalid(format!(
                "rsi_oversold ({rsi_oversold}) must be below rsi_overbought ({rsi_overbought})"
            )));
        }
        if self.data.lookback_days == 0 {
            return Err(ConfigError::Invalid("lookback_days must be positive".into()));
        }
        Ok(())
    }
}
