//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hygiene_core::audit::{entity_types, AuditAction, AuditLogEntry};
use hygiene_core::metrics::{self, ProjectStats};
use hygiene_core::project::{Project, ProjectInput, ProjectWithHealth};
use hygiene_core::search::filter_records;
use hygiene_core::types::new_record_id;
use hygiene_store::repositories::{IssueRepo, ProjectRepo};
use validator::Validate;

use super::record_audit;
use crate::error::{AppError, AppResult};
use crate::query::ProjectListParams;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "Project";

/// GET /api/v1/projects
///
/// Each project carries its derived `healthStatus`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<DataResponse<Vec<ProjectWithHealth>>>> {
    let projects = ProjectRepo::list(state.store()).await?;
    let issues = IssueRepo::list(state.store()).await?;
    let annotated = metrics::with_health(projects, &issues);
    let data = filter_records(annotated, params.search.as_deref(), &params.filters());
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/projects/stats
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<DataResponse<ProjectStats>>> {
    let projects = ProjectRepo::list(state.store()).await?;
    let issues = IssueRepo::list(state.store()).await?;
    Ok(Json(DataResponse {
        data: metrics::project_stats(&projects, &issues),
    }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<ProjectWithHealth>>> {
    let project = ProjectRepo::find_by_id(state.store(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, &id))?;
    let issues = IssueRepo::list(state.store()).await?;
    let health_status =
        metrics::derive_health_status(issues.iter().filter(|i| i.project_id == project.id));
    Ok(Json(DataResponse {
        data: ProjectWithHealth {
            project,
            health_status,
        },
    }))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ProjectInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let input = input.normalized();
    input.validate()?;

    let project = ProjectRepo::create(state.store(), &input.into_project(new_record_id())).await?;
    record_audit(
        &state,
        AuditLogEntry::new(
            AuditAction::ProjectCreated,
            entity_types::PROJECT,
            project.id.clone(),
            format!("Project created: {}", project.display_name()),
            chrono::Utc::now(),
        ),
    )
    .await?;

    tracing::info!(project_id = %project.id, "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ProjectInput>,
) -> AppResult<Json<DataResponse<Project>>> {
    let input = input.normalized();
    input.validate()?;

    if ProjectRepo::find_by_id(state.store(), &id).await?.is_none() {
        return Err(AppError::not_found(ENTITY, id));
    }
    let project = ProjectRepo::replace(state.store(), &id, &input.into_project(id.clone())).await?;
    record_audit(
        &state,
        AuditLogEntry::new(
            AuditAction::ProjectUpdated,
            entity_types::PROJECT,
            id,
            format!("Project updated: {}", project.display_name()),
            chrono::Utc::now(),
        ),
    )
    .await?;

    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
///
/// Issues and notifications that reference the project are left in place.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    let project = ProjectRepo::find_by_id(state.store(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, &id))?;
    ProjectRepo::delete(state.store(), &id).await?;
    record_audit(
        &state,
        AuditLogEntry::new(
            AuditAction::ProjectDeleted,
            entity_types::PROJECT,
            id,
            format!("Project deleted: {}", project.display_name()),
            chrono::Utc::now(),
        ),
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
