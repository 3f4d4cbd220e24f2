//! Embedding configuration, loadable from TOML
//!
//! ```toml
//! [state]
//! open_stdlib = false
//!
//! [logging]
//! level = "debug"
//! json_format = true
//! ```

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::logging::LogConfig;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub state: StateConfig,

    #[serde(default)]
    pub logging: LogConfig,
}

/// How `State::with_config` prepares a fresh state
#[derive(Debug, Clone, Deserialize)]
pub struct StateConfig {
    /// Open the standard libraries (`string`, `math`, ...)
    #[serde(default = "default_true")]
    pub open_stdlib: bool,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self { open_stdlib: true }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(ConfigError::Parse)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// An environment variable held a value that cannot be used
    Env { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "Failed to read config: {}", err),
            Self::Parse(err) => write!(f, "Failed to parse config: {}", err),
            Self::Env { var, value } => write!(f, "Invalid value for {}: '{}'", var, value),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Env { .. } => None,
        }
    }
}
