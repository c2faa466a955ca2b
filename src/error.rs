//! Error types for grouping, storage and configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the grouping core.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupingError {
    /// The list has fewer members than one group needs.
    #[error("List must be at least {required} elements long (got {actual})")]
    ListTooShort {
        /// Minimum group size that was requested
        required: usize,
        /// Length of the list that was supplied
        actual: usize,
    },

    /// A minimum group size of zero cannot be sliced.
    #[error("Minimum group size must be at least 1")]
    ZeroGroupSize,

    /// The search was asked to run no trials at all.
    #[error("Number of runs must be at least 1")]
    ZeroRuns,
}

impl GroupingError {
    /// Create a ListTooShort error.
    pub fn list_too_short(required: usize, actual: usize) -> Self {
        Self::ListTooShort { required, actual }
    }
}

/// Errors raised while reading or writing lists and groupings on disk.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("YAML error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn yaml(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::Yaml {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    /// Create an Invalid error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors that end an interactive session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Grouping(#[from] GroupingError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Prompt I/O failed: {0}")]
    Prompt(#[from] io::Error),
}
