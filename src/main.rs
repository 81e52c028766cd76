//! Car catalog proxy.
//!
//! Serves rewritten bimmercode.app catalog pages under local routes and
//! learns the brand → model → generation tree from the pages it serves.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request          ┌──────────────────────────────────────────────┐
//!     ────────────────────────┼─▶ http server ──▶ routing ──▶ catalog gate  │
//!                             │                                  │           │
//!                             │                                  ▼           │
//!                             │                           upstream fetch ────┼───▶ bimmercode.app
//!                             │                                  │           │
//!                             │                                  ▼           │
//!     Client Response         │                           HTML rewrite       │
//!     ◀───────────────────────┼── harvest links into catalog ◀───┘           │
//!                             └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use car_catalog_proxy::config::{load_config, validation::validate_config, AppConfig, ConfigError};
use car_catalog_proxy::lifecycle::startup;
use car_catalog_proxy::observability::logging;

#[derive(Parser)]
#[command(name = "car-catalog-proxy")]
#[command(about = "Rewriting proxy for the bimmercode.app car catalog", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

fn load(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    if let Some(bind) = &cli.bind {
        config.server.bind_address = bind.clone();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    logging::init_logging(&config.observability);
    tracing::info!("car-catalog-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
