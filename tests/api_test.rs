//! End-to-end HTTP behavior through a real listener.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};
use tower::ServiceExt;

use resource_service::http::{build_router, AppState};
use resource_service::resources::{ResourceResponse, ResourceStatus};
use resource_service::security::ROLE_HEADER;

use common::TestServer;

async fn create_room(server: &TestServer, name: &str) -> ResourceResponse {
    let res = server
        .client
        .post(server.url("/resources"))
        .header(ROLE_HEADER, "ADMIN")
        .json(&json!({ "name": name, "type": "ROOM", "ownerId": "u1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn test_resource_lifecycle() {
    let server = TestServer::start().await;

    let created = create_room(&server, "Room A").await;
    assert_eq!(created.status, ResourceStatus::Available);

    let res = server
        .client
        .patch(server.url(&format!("/resources/{}/status?status=BOOKED", created.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Resource status updated successfully");

    let res = server
        .client
        .get(server.url(&format!("/resources/{}", created.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: ResourceResponse = res.json().await.unwrap();
    assert_eq!(fetched.status, ResourceStatus::Booked);
    assert!(fetched.updated_at > created.updated_at);

    let res = server
        .client
        .delete(server.url(&format!("/resources/{}", created.id)))
        .header(ROLE_HEADER, "ADMIN")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Resource deleted successfully");

    let res = server
        .client
        .get(server.url(&format!("/resources/{}", created.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.text().await.unwrap().is_empty());

    server.stop().await;
}

#[tokio::test]
async fn test_create_requires_managing_role() {
    let server = TestServer::start().await;
    let payload = json!({ "name": "Room A", "type": "ROOM", "ownerId": "u1" });

    let res = server
        .client
        .post(server.url("/resources"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.text().await.unwrap().is_empty());

    let res = server
        .client
        .post(server.url("/resources"))
        .header(ROLE_HEADER, "USER")
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Insufficient permissions to manage resources");

    let res = server
        .client
        .post(server.url("/resources"))
        .header(ROLE_HEADER, "janitor")
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert!(res.text().await.unwrap().is_empty());

    let res = server
        .client
        .post(server.url("/resources"))
        .header(ROLE_HEADER, "ADMIN")
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    server.stop().await;
}

#[tokio::test]
async fn test_managers_may_update_and_delete() {
    let server = TestServer::start().await;
    let created = create_room(&server, "Seminar").await;

    let res = server
        .client
        .put(server.url(&format!("/resources/{}", created.id)))
        .header(ROLE_HEADER, "resource_manager")
        .json(&json!({ "capacity": 30, "location": "Block C" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: ResourceResponse = res.json().await.unwrap();
    assert_eq!(updated.capacity, Some(30));
    assert_eq!(updated.location.as_deref(), Some("Block C"));
    assert_eq!(updated.name, "Seminar");

    let res = server
        .client
        .delete(server.url(&format!("/resources/{}", created.id)))
        .header(ROLE_HEADER, "FACILITY_MANAGER")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    server.stop().await;
}

#[tokio::test]
async fn test_missing_targets_are_not_found() {
    let server = TestServer::start().await;

    let res = server
        .client
        .put(server.url("/resources/missing"))
        .header(ROLE_HEADER, "ADMIN")
        .json(&json!({ "name": "Ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server
        .client
        .put(server.url("/resources/missing"))
        .header(ROLE_HEADER, "ADMIN")
        .json(&json!({ "name": " ", "capacity": -1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server
        .client
        .patch(server.url("/resources/missing/status?status=BOOKED"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server
        .client
        .delete(server.url("/resources/missing"))
        .header(ROLE_HEADER, "ADMIN")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.stop().await;
}

#[tokio::test]
async fn test_validation_failures_list_fields() {
    let server = TestServer::start().await;

    let res = server
        .client
        .post(server.url("/resources"))
        .header(ROLE_HEADER, "ADMIN")
        .json(&json!({ "type": "LAB", "capacity": -5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Validation failed");
    let fields: Vec<_> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect();
    assert!(fields.contains(&"name".to_string()));
    assert!(fields.contains(&"ownerId".to_string()));
    assert!(fields.contains(&"capacity".to_string()));

    let listing: Value = server
        .client
        .get(server.url("/resources"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listing["totalElements"], 0);

    server.stop().await;
}

#[tokio::test]
async fn test_malformed_requests_are_rejected() {
    let server = TestServer::start().await;

    let res = server
        .client
        .post(server.url("/resources"))
        .header(ROLE_HEADER, "ADMIN")
        .header(CONTENT_TYPE, "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .client
        .post(server.url("/resources"))
        .header(ROLE_HEADER, "ADMIN")
        .header(CONTENT_TYPE, "text/plain")
        .body("name=Room")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let res = server
        .client
        .get(server.url("/resources/type/SPACESHIP"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .client
        .get(server.url("/resources?page=-1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .client
        .get(server.url("/resources?size=0"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .client
        .patch(server.url("/resources/any/status"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    server.stop().await;
}

#[tokio::test]
async fn test_listings() {
    let server = TestServer::start().await;
    for i in 0..3 {
        create_room(&server, &format!("Room {i}")).await;
    }
    let res = server
        .client
        .post(server.url("/resources"))
        .header(ROLE_HEADER, "ADMIN")
        .json(&json!({ "name": "Lab", "type": "LAB", "ownerId": "u2" }))
        .send()
        .await
        .unwrap();
    let lab: ResourceResponse = res.json().await.unwrap();
    server
        .client
        .patch(server.url(&format!("/resources/{}/status?status=MAINTENANCE", lab.id)))
        .send()
        .await
        .unwrap();

    let page: Value = server
        .client
        .get(server.url("/resources?page=1&size=2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["page"], 1);
    assert_eq!(page["size"], 2);
    assert_eq!(page["totalElements"], 4);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["last"], true);
    assert_eq!(page["content"].as_array().unwrap().len(), 2);

    let rooms: Value = server
        .client
        .get(server.url("/resources/type/ROOM"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(rooms["totalElements"], 3);
    assert_eq!(rooms["size"], 10);

    let available: Value = server
        .client
        .get(server.url("/resources/available"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(available["totalElements"], 3);

    let owned: Vec<ResourceResponse> = server
        .client
        .get(server.url("/resources/owner/u2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].status, ResourceStatus::Maintenance);

    let nobody: Vec<ResourceResponse> = server
        .client
        .get(server.url("/resources/owner/nobody"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(nobody.is_empty());

    server.stop().await;
}

#[tokio::test]
async fn test_response_headers() {
    let server = TestServer::start().await;

    let res = server
        .client
        .get(server.url("/resources"))
        .send()
        .await
        .unwrap();
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.headers()["x-content-type-options"], "nosniff");
    assert_eq!(res.headers()["x-frame-options"], "DENY");

    let res = server
        .client
        .get(server.url("/resources"))
        .header("x-request-id", "caller-supplied")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "caller-supplied");

    server.stop().await;
}

#[tokio::test]
async fn test_health_is_outside_the_filter() {
    let server = TestServer::start().await;

    let res = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "UP");

    server.stop().await;
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut config = common::test_config();
    config.security.max_body_size = 64;
    let router = build_router(&config, AppState::new(common::memory_service().await));

    let payload = json!({
        "name": "x".repeat(200),
        "type": "ROOM",
        "ownerId": "u1",
    });
    let request = Request::builder()
        .method("POST")
        .uri("/resources")
        .header(ROLE_HEADER, "ADMIN")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_health_reports_down_when_store_is_closed() {
    let service = common::memory_service().await;
    service.store().pool().close().await;
    let router = build_router(&common::test_config(), AppState::new(Arc::clone(&service)));

    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
