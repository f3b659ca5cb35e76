use axum::routing::post;
use axum::Router;

use crate::handlers::hygiene;
use crate::state::AppState;

/// Routes mounted at `/hygiene`.
///
/// ```text
/// POST   /check           -> run_check
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/check", post(hygiene::run_check))
}
