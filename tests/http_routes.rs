//! Router behaviour that must hold without any database round trip

mod common;

use axum::body::Body;
use axum::http::Request;
use common::{get, json_body, offline_config, send_json};
use portfolio_api::{create_router, AppState};
use serde_json::json;
use tower::ServiceExt;

fn offline_state() -> AppState {
    AppState::from_config(&offline_config()).expect("state")
}

#[tokio::test]
async fn health_ok() {
    let app = create_router(offline_state());

    let res = app.oneshot(get("/health", None)).await.unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(json_body(res).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = create_router(offline_state());

    let res = app.oneshot(get("/api/nope", Some("site_a"))).await.unwrap();

    assert_eq!(res.status().as_u16(), 404);
    assert_eq!(json_body(res).await["error"], "not_found");
}

#[tokio::test]
async fn missing_tenant_is_rejected_before_any_database_call() {
    let state = offline_state();
    let pool = state.executor.pool().clone();
    let app = create_router(state);

    let res = app.oneshot(get("/api/projects?featured=true", None)).await.unwrap();

    assert_eq!(res.status().as_u16(), 400);
    let body = json_body(res).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "tenant_missing");
    assert!(body["message"].as_str().unwrap().contains("X-Client-Key"));
    assert_eq!(pool.size(), 0);
}

#[tokio::test]
async fn blank_tenant_header_counts_as_missing() {
    let app = create_router(offline_state());

    for uri in ["/api/projects/categories", "/api/projects/some-slug", "/settings/theme"] {
        let res = app.clone().oneshot(get(uri, Some("   "))).await.unwrap();
        assert_eq!(res.status().as_u16(), 400, "{}", uri);
        assert_eq!(json_body(res).await["error"], "tenant_missing", "{}", uri);
    }
}

#[tokio::test]
async fn configured_header_name_replaces_default() {
    let mut config = offline_config();
    config.tenant.header_name = "X-Site".to_string();
    let app = create_router(AppState::from_config(&config).expect("state"));

    let res = app.oneshot(get("/api/projects", Some("site_a"))).await.unwrap();

    assert_eq!(res.status().as_u16(), 400);
    let body = json_body(res).await;
    assert_eq!(body["error"], "tenant_missing");
    assert_eq!(body["message"], "Missing tenant. Send the X-Site header.");
}

#[tokio::test]
async fn whatsapp_without_phone_is_a_validation_error() {
    let state = offline_state();
    let pool = state.executor.pool().clone();
    let app = create_router(state);

    let body = json!({
        "name": "Ana",
        "email": "ana@example.com",
        "message": "Hello",
        "contact_method": "whatsapp",
    });
    let res = app.oneshot(send_json("POST", "/api/contact", Some("site_a"), &body)).await.unwrap();

    assert_eq!(res.status().as_u16(), 400);
    let body = json_body(res).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "Please enter your WhatsApp number.");
    assert_eq!(pool.size(), 0);
}

#[tokio::test]
async fn contact_without_tenant_reports_tenant_first() {
    let app = create_router(offline_state());

    let res = app
        .oneshot(send_json("POST", "/api/contact", None, &json!({})))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 400);
    assert_eq!(json_body(res).await["error"], "tenant_missing");
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = create_router(offline_state());

    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/contact")
                .header("content-type", "application/json")
                .header("X-Client-Key", "site_a")
                .body(Body::from("{\"name\":\"x\""))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 400);
    assert_eq!(json_body(res).await["error"], "validation_error");
}

#[tokio::test]
async fn setting_value_must_be_a_string() {
    let app = create_router(offline_state());

    let res = app
        .oneshot(send_json("PUT", "/settings/theme", Some("site_a"), &json!({ "value": 42 })))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 400);
    let body = json_body(res).await;
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "Setting value must be a string.");
}

#[tokio::test]
async fn blank_setting_key_is_a_validation_error() {
    let app = create_router(offline_state());

    let res = app.oneshot(get("/settings/%20%20", Some("site_a"))).await.unwrap();

    assert_eq!(res.status().as_u16(), 400);
    assert_eq!(json_body(res).await["error"], "validation_error");
}

#[tokio::test]
async fn database_failure_is_opaque_internal_error() {
    let app = create_router(offline_state());

    let res = app.oneshot(get("/api/projects", Some("site_a"))).await.unwrap();

    assert_eq!(res.status().as_u16(), 500);
    let body = json_body(res).await;
    assert_eq!(body["error"], "internal_error");
    assert_eq!(body["message"], "Something went wrong. Please try again.");
}

#[tokio::test]
async fn cors_preflight_allows_tenant_header() {
    let app = create_router(offline_state());

    let res = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/projects")
                .header("origin", "http://localhost:5173")
                .header("access-control-request-method", "GET")
                .header("access-control-request-headers", "x-client-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(res.status().is_success());
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    let allowed = res.headers()["access-control-allow-headers"].to_str().unwrap().to_lowercase();
    assert!(allowed.contains("x-client-key"));
}
