//! Per-user configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.sheetsync/
//!   config.yaml          (optional, every key has a default)
//!   client_secret.json   (OAuth client downloaded from the cloud console)
//!   token.json           (authorized-user token, mode 0600, written by sheetsync)
//! ```
//!
//! # API pattern
//!
//! Loading takes the home directory explicitly ([`load_at`]); tests pass a
//! `TempDir`, the binary passes [`home`].

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{io_err, ConfigError};

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4/";
pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.sheetsync/`
pub fn sheetsync_root(home: &Path) -> PathBuf {
    home.join(".sheetsync")
}

/// `<home>/.sheetsync/config.yaml`
pub fn config_path_at(home: &Path) -> PathBuf {
    sheetsync_root(home).join("config.yaml")
}

// ---------------------------------------------------------------------------
// 2. Config document
// ---------------------------------------------------------------------------

/// Contents of `config.yaml`. Absent keys fall back to the defaults, which
/// are resolved against the home directory by [`Config::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    pub client_secret: Option<PathBuf>,
    pub token_file: Option<PathBuf>,
    pub api_base: Option<String>,
    pub oauth_scope: Option<String>,
    pub timeout_secs: Option<u64>,
    pub default_sheet_name: Option<String>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub client_secret: PathBuf,
    pub token_file: PathBuf,
    pub api_base: String,
    pub oauth_scope: String,
    pub timeout_secs: u64,
    pub default_sheet_name: String,
}

impl Config {
    /// Fill every absent key of `file` with its default under `home`.
    pub fn resolve(home: &Path, file: ConfigFile) -> Self {
        let root = sheetsync_root(home);
        Self {
            client_secret: file
                .client_secret
                .unwrap_or_else(|| root.join("client_secret.json")),
            token_file: file.token_file.unwrap_or_else(|| root.join("token.json")),
            api_base: file
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            oauth_scope: file.oauth_scope.unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            timeout_secs: file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            default_sheet_name: file
                .default_sheet_name
                .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Load
// ---------------------------------------------------------------------------

/// Read a config document from `path`. A missing file is an empty document.
pub fn load_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the config and resolve defaults against `home`.
///
/// `explicit` names a config file that must exist; without it
/// `<home>/.sheetsync/config.yaml` is read if present.
pub fn load_at(home: &Path, explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match explicit {
        Some(path) if !path.exists() => {
            return Err(ConfigError::Missing {
                path: path.to_path_buf(),
            })
        }
        Some(path) => load_file(path)?,
        None => load_file(&config_path_at(home))?,
    };
    Ok(Config::resolve(home, file))
}

/// The current user's home directory.
pub fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
