//! The hygiene service router.
//!
//! `/health` sits at the root; every resource (projects, rules, issues,
//! hygiene checks, notifications, audit log, dashboard) is nested under
//! `/api/v1` by [`routes::api_routes`]. The binary and the integration tests
//! both build through [`build_app_router`].

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Build the hygiene [`Router`] over `state`.
///
/// Outermost first: CORS, request id, tracing, request id echo, timeout
/// (see [`request_timeout`]), panic recovery.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = build_cors_layer(config);
    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout(config),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Per-request deadline.
///
/// A check run makes one store call per list plus several writes per
/// detection, so the deadline is never shorter than a few store round trips.
/// Otherwise a slow store would cut a run off between detections, where its
/// writes are only partially applied.
pub fn request_timeout(config: &ServerConfig) -> Duration {
    let floor = config.store_timeout_secs.saturating_mul(MIN_STORE_CALLS_PER_REQUEST);
    Duration::from_secs(config.request_timeout_secs.max(floor))
}

/// Store round trips a request must be able to outlast.
const MIN_STORE_CALLS_PER_REQUEST: u64 = 3;

/// Build the CORS layer for the dashboard origins in `CORS_ORIGINS`.
///
/// Panics at startup if any configured origin is invalid.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(request_timeout_secs: u64, store_timeout_secs: u64) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origins: vec!["http://localhost:5173".into()],
            request_timeout_secs,
            store_base_url: "http://localhost:8080/tables".into(),
            store_timeout_secs,
            outdated_threshold_days: 30,
        }
    }

    #[test]
    fn request_timeout_uses_configured_value_when_long_enough() {
        assert_eq!(request_timeout(&config(30, 5)), Duration::from_secs(30));
    }

    #[test]
    fn request_timeout_outlasts_slow_store() {
        assert_eq!(request_timeout(&config(10, 20)), Duration::from_secs(60));
    }
}
