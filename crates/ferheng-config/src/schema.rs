use std::fs;
use std::path::PathBuf;

use ferheng_types::EntrySchema;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_catalog() -> String {
    "sorani".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Name of a built-in field catalog
    #[serde(default = "default_catalog")]
    pub catalog: String,
    /// JSON file with a custom field catalog, takes precedence over `catalog`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl SchemaConfig {
    pub fn apply_env(&mut self, var: &impl Fn(&str) -> Option<String>) {
        if let Some(catalog) = var("FERHENG_CATALOG") {
            self.catalog = catalog;
        }
        if let Some(path) = var("FERHENG_SCHEMA_PATH") {
            self.path = Some(PathBuf::from(path));
        }
    }

    /// Load the custom catalog, if one is configured
    pub fn load_custom(&self) -> Result<Option<EntrySchema>, ConfigError> {
        let Some(path) = &self.path else {
            return Ok(None);
        };

        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let schema = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        Ok(Some(schema))
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            path: None,
        }
    }
}
