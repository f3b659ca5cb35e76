//! Handlers for the `/audit-log` resource. The log is read-only over HTTP.

use axum::extract::{Query, State};
use axum::Json;
use hygiene_core::audit::AuditLogEntry;
use hygiene_core::metrics::{self, AuditStats};
use hygiene_core::search::filter_records;
use hygiene_store::repositories::AuditLogRepo;

use crate::error::AppResult;
use crate::query::AuditListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/audit-log
///
/// Newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<AuditListParams>,
) -> AppResult<Json<DataResponse<Vec<AuditLogEntry>>>> {
    let entries = AuditLogRepo::list(state.store()).await?;
    let data = filter_records(entries, params.search.as_deref(), &params.filters());
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/audit-log/stats
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<DataResponse<AuditStats>>> {
    let entries = AuditLogRepo::list(state.store()).await?;
    Ok(Json(DataResponse {
        data: metrics::audit_stats(&entries, chrono::Utc::now().date_naive()),
    }))
}
