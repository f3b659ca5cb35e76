//! Handler for triggering a hygiene check run.

use axum::extract::State;
use axum::Json;

use crate::engine::hygiene_check::{self, CheckOutcome};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/hygiene/check
///
/// Runs one check synchronously. Detections whose writes failed are listed
/// in `failures`; re-running the check picks them up again.
pub async fn run_check(State(state): State<AppState>) -> AppResult<Json<DataResponse<CheckOutcome>>> {
    let ctx = state.evaluation_context(chrono::Utc::now());
    let outcome = hygiene_check::run(state.store(), state.mailer(), &ctx).await?;
    Ok(Json(DataResponse { data: outcome }))
}
