//! Error types for the command line front end.

use std::path::PathBuf;
use thiserror::Error;

use abacus_types::InputError;

/// Configuration loading failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value '{value}' for {setting}")]
    InvalidOverride { setting: &'static str, value: String },
}

/// Failures while running a key session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

impl SessionError {
    /// Category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            SessionError::Input(_) => "input",
            SessionError::Io(_) => "io",
            SessionError::Json(_) => "serialization",
        }
    }
}
