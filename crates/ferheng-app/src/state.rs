use std::sync::Arc;

use anyhow::Context;
use ferheng_config::Config;
use ferheng_types::EntrySchema;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub schema: Arc<EntrySchema>,
}

impl AppState {
    pub fn new(config: Config, schema: Arc<EntrySchema>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            schema,
        }
    }
}

/// Custom schema file if configured, otherwise the named built-in catalog
pub fn resolve_schema(config: &Config) -> anyhow::Result<EntrySchema> {
    if let Some(schema) = config.schema.load_custom()? {
        tracing::info!("Using field catalog from {:?}", config.schema.path);
        return Ok(schema);
    }

    let schema = ferheng_lang_kurdish::by_name(&config.schema.catalog).with_context(|| {
        format!(
            "Unknown field catalog '{}', expected one of {:?}",
            config.schema.catalog,
            ferheng_lang_kurdish::CATALOG_NAMES
        )
    })?;

    tracing::info!(
        "Using built-in '{}' catalog ({} fields)",
        config.schema.catalog,
        schema.fields().len()
    );
    Ok(schema)
}
