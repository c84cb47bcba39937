//! Calculator configuration
//!
//! Loaded from YAML (`calcpad.yaml`); every field is optional and falls back
//! to the defaults shown by `calcpad config`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::NumberFormat;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "calcpad.yaml";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid YAML for this schema
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A value is out of range
    #[error("Invalid value for '{field}': {reason}")]
    Invalid {
        /// Dotted field path
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Terminal front-end settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Show the key help line under the keypad
    pub show_help: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { show_help: true }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Result formatting
    pub format: NumberFormat,
    /// Terminal front-end
    pub tui: TuiConfig,
}

impl CalcConfig {
    /// Parses and validates YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Loads a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded configuration");
        Self::from_yaml(&yaml)
    }

    /// Loads `explicit` if given, else `calcpad.yaml` in `dir` if present,
    /// else the defaults
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = Self::default_path(dir);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            debug!("no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Path of the default configuration file inside `dir`
    #[must_use]
    pub fn default_path(dir: &Path) -> PathBuf {
        dir.join(DEFAULT_CONFIG_FILE)
    }

    /// Writes this configuration as YAML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let yaml = self.to_yaml()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Checks value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let format = &self.format;
        if format.decimal_places > NumberFormat::MAX_DECIMAL_PLACES {
            return Err(ConfigError::invalid(
                "format.decimal_places",
                format!("must be at most {}", NumberFormat::MAX_DECIMAL_PLACES),
            ));
        }
        if format.exponent_digits > NumberFormat::MAX_EXPONENT_DIGITS {
            return Err(ConfigError::invalid(
                "format.exponent_digits",
                format!("must be at most {}", NumberFormat::MAX_EXPONENT_DIGITS),
            ));
        }
        if !format.scientific_threshold.is_finite() || format.scientific_threshold <= 0.0 {
            return Err(ConfigError::invalid(
                "format.scientific_threshold",
                "must be a finite positive number",
            ));
        }
        Ok(())
    }
}
