//! Startup orchestration.
//!
//! Ordered: store first (connect, then schema), then the service, then the
//! listener. Any failure is fatal.

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{DatabaseConfig, ServiceConfig};
use crate::http::HttpServer;
use crate::resources::store::run_migrations;
use crate::resources::{ResourceService, SqliteResourceStore, StoreError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("store initialization failed: {0}")]
    Store(#[from] StoreError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Connect to the database and apply the schema.
pub async fn open_store(config: &DatabaseConfig) -> Result<SqliteResourceStore, StartupError> {
    let store = SqliteResourceStore::connect(config).await?;
    run_migrations(store.pool()).await?;
    Ok(store)
}

/// Everything `main` needs to start serving.
pub struct Started {
    pub server: HttpServer,
    pub listener: TcpListener,
}

pub async fn start(config: ServiceConfig) -> Result<Started, StartupError> {
    let store = open_store(&config.database).await?;
    let service = Arc::new(ResourceService::new(store));

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        database_url = %config.database.url,
        request_timeout_secs = config.timeouts.request_secs,
        "Service initialized"
    );

    Ok(Started {
        server: HttpServer::new(&config, service),
        listener,
    })
}
