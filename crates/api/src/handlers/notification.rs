//! Handlers for the `/notifications` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use hygiene_core::audit::{entity_types, AuditAction, AuditLogEntry};
use hygiene_core::error::CoreError;
use hygiene_core::metrics::{self, NotificationStats};
use hygiene_core::notification::Notification;
use hygiene_core::search::filter_records;
use hygiene_store::repositories::{NotificationRepo, ProjectRepo};

use super::record_audit;
use crate::engine::deliver_best_effort;
use crate::error::AppResult;
use crate::query::NotificationListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/notifications
///
/// Newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<NotificationListParams>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let notifications = NotificationRepo::list(state.store()).await?;
    let data = filter_records(notifications, params.search.as_deref(), &params.filters());
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/notifications/stats
pub async fn stats(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<NotificationStats>>> {
    let notifications = NotificationRepo::list(state.store()).await?;
    let today = chrono::Utc::now().date_naive();
    Ok(Json(DataResponse {
        data: metrics::notification_stats(&notifications, today),
    }))
}

/// POST /api/v1/notifications/test
///
/// Sends a reminder to the manager of the first project on record.
pub async fn send_test(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<DataResponse<Notification>>)> {
    let projects = ProjectRepo::list(state.store()).await?;
    let project = projects.first().ok_or_else(|| {
        CoreError::Conflict("No projects available. Please create a project first.".into())
    })?;

    let now = chrono::Utc::now();
    let notification =
        NotificationRepo::create(state.store(), &Notification::reminder(project, now)).await?;
    record_audit(
        &state,
        AuditLogEntry::new(
            AuditAction::NotificationSent,
            entity_types::NOTIFICATION,
            notification.id.clone(),
            "Test notification sent",
            now,
        ),
    )
    .await?;
    deliver_best_effort(state.mailer(), &notification).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: notification })))
}
