//! Resource Service
//!
//! CRUD service for bookable campus resources (rooms, labs, equipment),
//! built with Tokio, Axum and SQLite.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http server ──▶ security ──▶ api handlers ──▶ resource service
//!                     (request id,    (role        (extract,        (validate, merge,
//!                      trace, limits)  filter)      map errors)      timestamps)
//!                                                                        │
//!                                                                        ▼
//!     Client Response                                               resource store
//!     ◀────────────── response.rs ◀──────────────────────────────── (sqlx / SQLite)
//!
//!     Cross-cutting: config, observability (logs, metrics), lifecycle
//! ```

use std::path::PathBuf;

use clap::Parser;

use resource_service::config;
use resource_service::lifecycle::{self, Shutdown, Started};
use resource_service::observability::{init_logging, init_metrics};

#[derive(Parser)]
#[command(name = "resource-service")]
#[command(about = "Campus resource management service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "RESOURCE_SERVICE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = config::load(args.config.as_deref())?;

    init_logging(&config.observability);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_path = ?args.config,
        "resource-service starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let Started { server, listener } = lifecycle::start(config).await?;

    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
