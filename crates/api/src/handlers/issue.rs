//! Handlers for the `/issues` resource.
//!
//! Issues are created only by check runs; operators list, inspect, resolve
//! and delete them.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hygiene_core::audit::{entity_types, AuditAction, AuditLogEntry};
use hygiene_core::issue::HygieneIssue;
use hygiene_core::search::filter_records;
use hygiene_store::repositories::IssueRepo;

use super::record_audit;
use crate::engine::resolution::{resolve_issue, Resolved};
use crate::error::{AppError, AppResult};
use crate::query::IssueListParams;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "Issue";

/// GET /api/v1/issues
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<IssueListParams>,
) -> AppResult<Json<DataResponse<Vec<HygieneIssue>>>> {
    let issues = IssueRepo::list(state.store()).await?;
    let data = filter_records(issues, params.search.as_deref(), &params.filters());
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/issues/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<HygieneIssue>>> {
    let issue = IssueRepo::find_by_id(state.store(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, &id))?;
    Ok(Json(DataResponse { data: issue }))
}

/// POST /api/v1/issues/{id}/resolve
///
/// Resolving an already-resolved issue returns it unchanged.
pub async fn resolve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<HygieneIssue>>> {
    let resolved = resolve_issue(state.store(), state.mailer(), &id, chrono::Utc::now()).await?;
    if let Resolved::Already(_) = resolved {
        tracing::info!(issue_id = %id, "Resolve requested for an already resolved issue");
    }
    Ok(Json(DataResponse {
        data: resolved.into_issue(),
    }))
}

/// DELETE /api/v1/issues/{id}
///
/// Operator removal outside the issue lifecycle; logged as `issue_deleted`.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    let issue = IssueRepo::find_by_id(state.store(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, &id))?;
    IssueRepo::delete(state.store(), &id).await?;
    record_audit(
        &state,
        AuditLogEntry::new(
            AuditAction::IssueDeleted,
            entity_types::ISSUE,
            id,
            format!(
                "Issue deleted: {} for {}",
                issue.rule_name,
                issue.display_project_name()
            ),
            chrono::Utc::now(),
        ),
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
