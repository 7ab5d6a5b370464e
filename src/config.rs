//! App configuration.
//!
//! Every field has a default, so a config file only needs the settings it
//! changes:
//!
//! ```toml
//! port = 80
//! actions_folder = "src/actions"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Settings read once at startup.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Port served in [`Mode::Production`].
    pub port: u16,

    /// Port served in [`Mode::Development`].
    pub dev_port: u16,

    /// Folder scanned for action files.
    pub actions_folder: PathBuf,

    /// Path name of the action mounted at `/`.
    pub actions_index_file: String,

    /// Extension of action files, with or without the leading dot.
    pub actions_file_ext: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            dev_port: 3000,
            actions_folder: PathBuf::from("actions"),
            actions_index_file: "index".to_owned(),
            actions_file_ext: ".rs".to_owned(),
        }
    }
}

impl Config {
    /// Loads a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// The port to listen on in `mode`.
    pub fn port_for(&self, mode: Mode) -> u16 {
        match mode {
            Mode::Development => self.dev_port,
            Mode::Production => self.port,
        }
    }
}

/// Whether the app runs for development or production. Chosen once by the
/// caller and passed to [`App::run`](crate::App::run).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Serves on `dev_port` and logs the route listing at startup.
    Development,
    Production,
}

impl Mode {
    /// `"production"` selects [`Mode::Production`]; anything else, including
    /// nothing, is development.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(name) if name.eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
        })
    }
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(std::io::Error),

    #[error("parse error: {0}")]
    Parse(toml::de::Error),
}
