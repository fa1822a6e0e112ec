//! Shared utilities for integration testing.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use resource_service::config::{DatabaseConfig, ServiceConfig};
use resource_service::lifecycle::{open_store, Shutdown};
use resource_service::resources::{
    CreateResourceRequest, ResourceService, ResourceType, SqliteResourceStore,
};
use resource_service::HttpServer;

/// Fresh, private in-memory store with the schema applied.
pub async fn memory_store() -> SqliteResourceStore {
    open_store(&DatabaseConfig::in_memory()).await.unwrap()
}

pub async fn memory_service() -> Arc<ResourceService<SqliteResourceStore>> {
    Arc::new(ResourceService::new(memory_store().await))
}

/// Store over a database file in a temporary directory, with a real pool.
/// The directory is removed when the returned guard drops.
pub async fn file_store(max_connections: u32) -> (SqliteResourceStore, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("resources.db").display()),
        max_connections,
        ..DatabaseConfig::default()
    };
    let store = open_store(&config).await.unwrap();
    (store, dir)
}

pub fn test_config() -> ServiceConfig {
    let mut config = ServiceConfig {
        database: DatabaseConfig::in_memory(),
        ..ServiceConfig::default()
    };
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config
}

pub fn create_request(name: &str, resource_type: ResourceType, owner: &str) -> CreateResourceRequest {
    CreateResourceRequest {
        name: Some(name.to_string()),
        resource_type: Some(resource_type),
        owner_id: Some(owner.to_string()),
        ..Default::default()
    }
}

/// A server on an ephemeral port, stopped when dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(test_config()).await
    }

    pub async fn start_with(config: ServiceConfig) -> Self {
        let service = memory_service().await;
        let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        let server = HttpServer::new(&config, service);
        let handle = tokio::spawn(async move {
            server.run(listener, rx).await.unwrap();
        });

        Self {
            addr,
            client: reqwest::Client::new(),
            shutdown,
            handle: Some(handle),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger graceful shutdown and wait for the server task to finish.
    pub async fn stop(mut self) {
        self.shutdown.trigger();
        if let Some(handle) = self.handle.take() {
            handle.await.unwrap();
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}
