//! Error types for configuration loading and persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by [`crate::ConfigStore`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file(s) were specified at construction.
    #[error("no configuration file(s) specified")]
    NoFiles,

    /// A required configuration file is missing from disk.
    #[error("configuration file {} does not exist", path.display())]
    NonExistent { path: PathBuf },

    /// A configuration file could not be parsed as YAML.
    #[error("error in configuration file {}: {source}", path.display())]
    Syntax {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A configuration file could not be read or written.
    #[error("failed to access configuration file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persist tree could not be serialized to YAML.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
