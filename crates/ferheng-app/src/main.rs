use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use ferheng_config::{Config, LogFormat};
use ferheng_store::{EntryStore, RemoteEntryClient};
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod console;
pub mod controller;
pub mod events;
pub mod io;
pub mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::{AppState, resolve_schema};

#[derive(Parser)]
#[command(name = "ferheng")]
#[command(version)]
#[command(about = "Add, edit and delete words in a multilingual dictionary over its REST API")]
struct Cli {
    /// JSON config file (environment variables are used when absent)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Base URL of the entry store
    #[arg(long)]
    api_url: Option<String>,

    /// Built-in field catalog: sorani or compact
    #[arg(long)]
    catalog: Option<String>,

    /// JSON file with a custom field catalog
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Delete without asking for confirmation
    #[arg(long, short = 'y')]
    yes: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_tracing(&config);

    let schema = Arc::new(resolve_schema(&config)?);
    let store: Arc<dyn EntryStore> = Arc::new(
        RemoteEntryClient::new(
            &config.store.api_url,
            schema.clone(),
            Duration::from_secs(config.store.timeout_seconds),
        )
        .context("Failed to set up the entry store client")?,
    );
    tracing::info!("Entry store at {}", config.store.api_url);

    let state = Arc::new(AppState::new(config, schema));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(store);

    tokio::select! {
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("failed to listen for ctrl+c: {e}");
            }
            tracing::info!("Shutdown requested");
            controller.shutdown();
            tasks.shutdown().await;
        }
        _ = controller.join(&mut tasks) => {
            tracing::info!("All tasks finished");
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::new(),
    };

    if let Some(url) = &cli.api_url {
        config.store.api_url = url.clone();
    }
    if let Some(catalog) = &cli.catalog {
        config.schema.catalog = catalog.clone();
    }
    if let Some(path) = &cli.schema {
        config.schema.path = Some(path.clone());
    }
    if cli.yes {
        config.assume_yes = true;
    }
    if cli.json_logs {
        config.log.format = LogFormat::Json;
    }

    Ok(config)
}

/// Logs go to stderr so they stay out of the console output
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
