//! Handlers for the dashboard read models.

use axum::extract::{Query, State};
use axum::Json;
use hygiene_core::metrics::{self, CategoryCount, IssueKpis, TrendPoint};
use hygiene_store::repositories::{IssueRepo, ProjectRepo};

use crate::error::AppResult;
use crate::query::TrendParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/summary
///
/// Issue totals and the compliance rate.
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<DataResponse<IssueKpis>>> {
    let projects = ProjectRepo::list(state.store()).await?;
    let issues = IssueRepo::list(state.store()).await?;
    let today = chrono::Utc::now().date_naive();
    Ok(Json(DataResponse {
        data: metrics::issue_kpis(&projects, &issues, today),
    }))
}

/// GET /api/v1/dashboard/trend?days=N
pub async fn trend(
    State(state): State<AppState>,
    Query(params): Query<TrendParams>,
) -> AppResult<Json<DataResponse<Vec<TrendPoint>>>> {
    let issues = IssueRepo::list(state.store()).await?;
    let today = chrono::Utc::now().date_naive();
    Ok(Json(DataResponse {
        data: metrics::issue_trend(&issues, today, params.days()),
    }))
}

/// GET /api/v1/dashboard/categories
pub async fn categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategoryCount>>>> {
    let issues = IssueRepo::list(state.store()).await?;
    Ok(Json(DataResponse {
        data: metrics::issues_by_category(&issues),
    }))
}
