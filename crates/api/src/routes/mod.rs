pub mod audit;
pub mod dashboard;
pub mod health;
pub mod hygiene;
pub mod issue;
pub mod notification;
pub mod project;
pub mod rule;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                       list, create
/// /projects/stats                 project statistics
/// /projects/{id}                  get, replace, delete
///
/// /rules                          list, create
/// /rules/stats                    rule statistics
/// /rules/{id}                     get, replace, delete
/// /rules/{id}/toggle              flip enabled (POST)
///
/// /issues                         list
/// /issues/{id}                    get, delete
/// /issues/{id}/resolve            resolve (POST)
///
/// /hygiene/check                  run a hygiene check (POST)
///
/// /notifications                  list
/// /notifications/stats            notification statistics
/// /notifications/test             send a test reminder (POST)
///
/// /audit-log                      list
/// /audit-log/stats                audit statistics
///
/// /dashboard/summary              issue KPIs and compliance rate
/// /dashboard/trend                detected/resolved per day (?days=N)
/// /dashboard/categories           issue count per category
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/rules", rule::router())
        .nest("/issues", issue::router())
        .nest("/hygiene", hygiene::router())
        .nest("/notifications", notification::router())
        .nest("/audit-log", audit::router())
        .nest("/dashboard", dashboard::router())
}
