//! Route definitions for the `/issues` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::issue;
use crate::state::AppState;

/// Routes mounted at `/issues`.
///
/// ```text
/// GET    /                -> list
/// GET    /{id}            -> get_by_id
/// DELETE /{id}            -> delete
/// POST   /{id}/resolve    -> resolve
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(issue::list))
        .route("/{id}", get(issue::get_by_id).delete(issue::delete))
        .route("/{id}/resolve", post(issue::resolve))
}
