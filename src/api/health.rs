use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;
use crate::resources::ResourceStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

impl HealthStatus {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// `UP` while the store answers a ping, `DOWN` (503) otherwise.
pub async fn get_health<S: ResourceStore>(
    State(state): State<AppState<S>>,
) -> (StatusCode, Json<HealthStatus>) {
    match state.service.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthStatus::new("UP"))),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus::new("DOWN")),
            )
        }
    }
}
