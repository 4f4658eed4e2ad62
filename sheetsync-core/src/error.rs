//! Error types for sheetsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the pure domain functions.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A spreadsheet URL or identifier that cannot be reduced to an id.
    #[error("invalid spreadsheet identifier '{input}': {reason}")]
    InvalidIdentifier { input: String, reason: &'static str },

    /// Column numbers are 1-based; zero has no letter.
    #[error("column number must be at least 1")]
    ZeroColumn,

    /// Column letters must be non-empty and ASCII alphabetic.
    #[error("invalid column letters '{0}'")]
    InvalidColumnLetters(String),

    /// The input document was valid JSON but not an array of objects.
    #[error("record #{index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("input must be a JSON array of objects")]
    NotAnArray,

    /// Records are flat: arrays and objects are rejected as field values.
    #[error("record #{index} field '{field}' holds a nested value; only scalars are allowed")]
    NestedValue { index: usize, field: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading `config.yaml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config file named explicitly does not exist.
    #[error("config file {path} does not exist")]
    Missing { path: PathBuf },

    /// YAML parse error on load, with the file path.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`, so there is no `~/.sheetsync/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
