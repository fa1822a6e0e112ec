//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the resource and health routes
//! - Wire up middleware (tracing, limits, request ID, metrics, headers)
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::DefaultBodyLimit, middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::api::{setup_health_router, setup_resource_router};
use crate::config::ServiceConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::{request_span, track_metrics};
use crate::resources::{ResourceService, ResourceStore};
use crate::security::headers::with_security_headers;

/// Application state injected into handlers.
pub struct AppState<S> {
    pub service: Arc<ResourceService<S>>,
}

impl<S> AppState<S> {
    pub fn new(service: Arc<ResourceService<S>>) -> Self {
        Self { service }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

/// HTTP server for the resource service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new<S: ResourceStore>(config: &ServiceConfig, service: Arc<ResourceService<S>>) -> Self {
        Self {
            router: build_router(config, AppState::new(service)),
        }
    }

    /// Run the server, accepting connections on the given listener, until
    /// an OS signal arrives or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers. The last layer added
/// runs first on the way in.
#[allow(deprecated)]
pub fn build_router<S: ResourceStore>(config: &ServiceConfig, state: AppState<S>) -> Router {
    let router = setup_resource_router(state.clone())
        .merge(setup_health_router(state))
        .layer(middleware::from_fn(track_metrics))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.timeouts.request_secs,
        )));

    let router = if config.security.enable_headers {
        with_security_headers(router)
    } else {
        router
    };

    router
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(set_request_id_layer())
}
