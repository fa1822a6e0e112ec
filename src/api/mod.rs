//! Resource HTTP API.
//!
//! Every route under `/resources` sits behind the role authorization filter;
//! `/health` does not.

pub mod handlers;
pub mod health;

use axum::{
    middleware,
    routing::{get, patch},
    Router,
};

use self::handlers::*;
use self::health::get_health;
use crate::http::server::AppState;
use crate::resources::ResourceStore;
use crate::security::role_authorization_middleware;

pub fn setup_resource_router<S: ResourceStore>(state: AppState<S>) -> Router {
    Router::new()
        .route(
            "/resources",
            get(list_resources::<S>).post(create_resource::<S>),
        )
        .route("/resources/available", get(list_available_resources::<S>))
        .route("/resources/type/{type}", get(list_resources_by_type::<S>))
        .route(
            "/resources/owner/{owner_id}",
            get(list_resources_by_owner::<S>),
        )
        .route(
            "/resources/{id}",
            get(get_resource::<S>)
                .put(update_resource::<S>)
                .delete(delete_resource::<S>),
        )
        .route(
            "/resources/{id}/status",
            patch(update_resource_status::<S>),
        )
        .layer(middleware::from_fn(role_authorization_middleware))
        .with_state(state)
}

pub fn setup_health_router<S: ResourceStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(get_health::<S>))
        .with_state(state)
}
