//! Role authorization middleware.
//! Gates management requests on the caller-supplied role header.
//!
//! The role label is not authenticated; this is a coarse filter, not a
//! security boundary.

use axum::{
    body::Body,
    http::{HeaderValue, Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::warn;

use super::role::UserRole;
use crate::http::response::ApiError;

/// Header carrying the caller's role label.
pub const ROLE_HEADER: &str = "x-user-role";

/// Path fragment that marks a management request regardless of method.
pub const MANAGEMENT_PATH: &str = "/resources/manage";

pub const INSUFFICIENT_PERMISSIONS: &str = "Insufficient permissions to manage resources";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    #[error("missing role header")]
    MissingRole,

    #[error("invalid role label '{0}'")]
    InvalidRole(String),

    #[error("role {0} cannot manage resources")]
    InsufficientRole(UserRole),
}

impl From<AuthorizationError> for ApiError {
    fn from(err: AuthorizationError) -> Self {
        match err {
            AuthorizationError::MissingRole => ApiError::Unauthorized,
            AuthorizationError::InvalidRole(_) => ApiError::Forbidden(None),
            AuthorizationError::InsufficientRole(_) => {
                ApiError::Forbidden(Some(INSUFFICIENT_PERMISSIONS.to_string()))
            }
        }
    }
}

/// POST, PUT and DELETE are management requests, as is anything under the
/// management path. GET and PATCH are not.
pub fn is_management_request(method: &Method, path: &str) -> bool {
    path.contains(MANAGEMENT_PATH)
        || *method == Method::POST
        || *method == Method::PUT
        || *method == Method::DELETE
}

/// Decide whether a management request may proceed, given its role header.
pub fn authorize(header: Option<&HeaderValue>) -> Result<UserRole, AuthorizationError> {
    let header = header.ok_or(AuthorizationError::MissingRole)?;
    let label = header.to_str().map_err(|_| {
        AuthorizationError::InvalidRole(String::from_utf8_lossy(header.as_bytes()).into_owned())
    })?;
    let role: UserRole = label
        .parse()
        .map_err(|_| AuthorizationError::InvalidRole(label.to_string()))?;

    if role.can_manage_resources() {
        Ok(role)
    } else {
        Err(AuthorizationError::InsufficientRole(role))
    }
}

pub async fn role_authorization_middleware(mut request: Request<Body>, next: Next) -> Response {
    if !is_management_request(request.method(), request.uri().path()) {
        return next.run(request).await;
    }

    match authorize(request.headers().get(ROLE_HEADER)) {
        Ok(role) => {
            request.extensions_mut().insert(role);
            next.run(request).await
        }
        Err(err) => {
            warn!(
                method = %request.method(),
                path = %request.uri().path(),
                reason = %err,
                "Management request blocked"
            );
            ApiError::from(err).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, middleware, routing::any, Router};
    use tower::ServiceExt;

    #[test]
    fn test_management_classification() {
        assert!(is_management_request(&Method::POST, "/resources"));
        assert!(is_management_request(&Method::PUT, "/resources/1"));
        assert!(is_management_request(&Method::DELETE, "/resources/1"));
        assert!(is_management_request(&Method::GET, "/resources/manage/all"));
        assert!(!is_management_request(&Method::GET, "/resources"));
        assert!(!is_management_request(&Method::PATCH, "/resources/1/status"));
    }

    #[test]
    fn test_authorize_decisions() {
        assert_eq!(authorize(None), Err(AuthorizationError::MissingRole));
        assert_eq!(
            authorize(Some(&HeaderValue::from_static("USER"))),
            Err(AuthorizationError::InsufficientRole(UserRole::User))
        );
        assert_eq!(
            authorize(Some(&HeaderValue::from_static("janitor"))),
            Err(AuthorizationError::InvalidRole("janitor".into()))
        );
        assert_eq!(
            authorize(Some(&HeaderValue::from_static("admin"))),
            Ok(UserRole::Admin)
        );
        assert_eq!(
            authorize(Some(&HeaderValue::from_static("RESOURCE_MANAGER"))),
            Ok(UserRole::ResourceManager)
        );
    }

    #[test]
    fn test_non_utf8_header_is_invalid() {
        let header = HeaderValue::from_bytes(&[0xFF, 0xFE]).unwrap();
        assert!(matches!(
            authorize(Some(&header)),
            Err(AuthorizationError::InvalidRole(_))
        ));
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/resources",
                any(|request: Request<Body>| async move {
                    let role = request.extensions().get::<UserRole>().copied();
                    role.map(|r| r.to_string()).unwrap_or_else(|| "none".into())
                }),
            )
            .layer(middleware::from_fn(role_authorization_middleware))
    }

    async fn send(method: Method, role: Option<&str>) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri("/resources");
        if let Some(role) = role {
            builder = builder.header(ROLE_HEADER, role);
        }
        let response = app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_missing_role_is_unauthorized_without_body() {
        let (status, body) = send(Method::POST, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_role_is_forbidden_without_body() {
        let (status, body) = send(Method::DELETE, Some("GUEST")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_user_role_is_forbidden_with_message() {
        let (status, body) = send(Method::POST, Some("USER")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body.contains(INSUFFICIENT_PERMISSIONS));
    }

    #[tokio::test]
    async fn test_admin_passes_with_role_attached() {
        let (status, body) = send(Method::POST, Some("ADMIN")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ADMIN");
    }

    #[tokio::test]
    async fn test_reads_pass_without_role() {
        let (status, body) = send(Method::GET, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "none");
    }
}
