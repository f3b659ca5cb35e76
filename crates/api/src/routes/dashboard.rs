use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET    /summary         -> summary
/// GET    /trend           -> trend
/// GET    /categories      -> categories
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(dashboard::summary))
        .route("/trend", get(dashboard::trend))
        .route("/categories", get(dashboard::categories))
}
