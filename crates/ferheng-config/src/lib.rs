use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::log::LogConfig;
use self::schema::SchemaConfig;
use self::store::StoreConfig;

pub mod log;
pub mod schema;
pub mod store;

pub use log::LogFormat;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub schema: SchemaConfig,
    pub log: LogConfig,

    /// Skip the delete confirmation prompt
    pub assume_yes: bool,
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env(|name: &str| env::var(name).ok());
        config
    }

    /// Load a JSON file, then let environment variables override it.
    /// Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env(|name: &str| env::var(name).ok());
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply every `FERHENG_*` style variable that `var` reports as set
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        self.store.apply_env(&var);
        self.schema.apply_env(&var);
        self.log.apply_env(&var);
    }
}
