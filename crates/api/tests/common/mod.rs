#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use hygiene_api::config::ServerConfig;
use hygiene_api::router::build_app_router;
use hygiene_api::state::AppState;
use hygiene_core::evaluation::DEFAULT_OUTDATED_THRESHOLD_DAYS;
use hygiene_store::{Collection, MemoryStore};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_base_url: "http://127.0.0.1:1/tables".to_string(),
        store_timeout_secs: 1,
        outdated_threshold_days: DEFAULT_OUTDATED_THRESHOLD_DAYS,
    }
}

/// Build the full application router over `store`, with the same middleware
/// stack production uses. Mail delivery is disabled.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        mailer: None,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri, None).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn project_record(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "projectCode": format!("PRJ-{id}"),
        "projectName": name,
        "projectManager": "Dana Reyes",
        "pmEmail": "dana@example.com",
        "projectStatus": "active",
        "description": "Ledger consolidation"
    })
}

pub fn rule_record(id: &str, condition: &str, target_field: &str, severity: &str) -> Value {
    json!({
        "id": id,
        "ruleName": format!("Rule {id}"),
        "ruleCategory": "data_quality",
        "ruleSeverity": severity,
        "ruleCondition": condition,
        "targetField": target_field,
        "correctionAction": "Fill in the field",
        "enabled": true
    })
}

/// Actions of every audit entry, in append order.
pub async fn audit_actions(store: &MemoryStore) -> Vec<String> {
    use hygiene_store::RecordStore;

    store
        .list(Collection::AuditLog)
        .await
        .unwrap()
        .iter()
        .filter_map(|e| e["action"].as_str().map(str::to_string))
        .collect()
}
