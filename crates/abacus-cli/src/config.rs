use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::ConfigError;

/// Configuration file used when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "abacus.toml";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter(), json: false }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct DisplayConfig {
    /// Digits after the decimal point; `None` uses the shortest exact form.
    #[serde(default)]
    pub precision: Option<usize>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct SessionConfig {
    /// Print the display after every key instead of once per line.
    #[serde(default)]
    pub trace: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AbacusConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Where the configuration came from; logged once tracing is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults { missing: PathBuf },
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!(path = %path.display(), "loaded configuration"),
            ConfigSource::Defaults { missing } => warn!(
                "Configuration file '{}' not found. Using default configuration.",
                missing.display()
            ),
        }
    }
}

impl AbacusConfig {
    /// Loads the configuration file.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_PATH`] is
    /// tried and a missing file falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                return Ok((Self::default(), ConfigSource::Defaults { missing: path }));
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let config = Self::from_toml_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
        Ok((config, ConfigSource::File(path)))
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Applies `ABACUS_*` environment overrides.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up by variable name.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(filter) = lookup("ABACUS_LOG") {
            self.logging.filter = filter;
        }
        if let Some(json) = lookup("ABACUS_LOG_JSON") {
            self.logging.json = parse_bool(&json)
                .ok_or(ConfigError::InvalidOverride { setting: "ABACUS_LOG_JSON", value: json })?;
        }
        if let Some(precision) = lookup("ABACUS_PRECISION") {
            let parsed = precision.parse::<usize>().map_err(|_| ConfigError::InvalidOverride {
                setting: "ABACUS_PRECISION",
                value: precision.clone(),
            })?;
            self.display.precision = Some(parsed);
        }
        Ok(self)
    }
}

fn default_log_filter() -> String {
    "abacus_calculator=info,abacus_cli=info".to_string()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
