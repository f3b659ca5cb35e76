//! Route definitions for the `/rules` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::rule;
use crate::state::AppState;

/// Routes mounted at `/rules`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /stats           -> stats
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// POST   /{id}/toggle     -> toggle
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rule::list).post(rule::create))
        .route("/stats", get(rule::stats))
        .route(
            "/{id}",
            get(rule::get_by_id).put(rule::update).delete(rule::delete),
        )
        .route("/{id}/toggle", post(rule::toggle))
}
