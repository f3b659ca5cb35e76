use axum::routing::get;
use axum::Router;

use crate::handlers::audit;
use crate::state::AppState;

/// Routes mounted at `/audit-log`.
///
/// ```text
/// GET    /                -> list
/// GET    /stats           -> stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(audit::list))
        .route("/stats", get(audit::stats))
}
