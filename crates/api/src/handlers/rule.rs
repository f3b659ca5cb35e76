//! Handlers for the `/rules` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hygiene_core::audit::{entity_types, AuditAction, AuditLogEntry};
use hygiene_core::metrics::{self, RuleStats};
use hygiene_core::rule::{HygieneRule, RuleInput};
use hygiene_core::search::filter_records;
use hygiene_core::types::new_record_id;
use hygiene_store::repositories::{IssueRepo, RuleRepo};

use super::record_audit;
use crate::error::{AppError, AppResult};
use crate::query::RuleListParams;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "Rule";

fn rule_audit(action: AuditAction, rule: &HygieneRule, description: String) -> AuditLogEntry {
    AuditLogEntry::new(
        action,
        entity_types::RULE,
        rule.id.clone(),
        description,
        chrono::Utc::now(),
    )
}

/// GET /api/v1/rules
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<RuleListParams>,
) -> AppResult<Json<DataResponse<Vec<HygieneRule>>>> {
    let rules = RuleRepo::list(state.store()).await?;
    let data = filter_records(rules, params.search.as_deref(), &params.filters());
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/rules/stats
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<DataResponse<RuleStats>>> {
    let rules = RuleRepo::list(state.store()).await?;
    let issues = IssueRepo::list(state.store()).await?;
    let today = chrono::Utc::now().date_naive();
    Ok(Json(DataResponse {
        data: metrics::rule_stats(&rules, &issues, today),
    }))
}

/// GET /api/v1/rules/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<HygieneRule>>> {
    let rule = RuleRepo::find_by_id(state.store(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, &id))?;
    Ok(Json(DataResponse { data: rule }))
}

/// POST /api/v1/rules
///
/// Rejects unknown conditions and blank `targetField`s; `enabled` defaults
/// to true.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<RuleInput>,
) -> AppResult<(StatusCode, Json<DataResponse<HygieneRule>>)> {
    let rule = input.into_rule(new_record_id())?;
    let rule = RuleRepo::create(state.store(), &rule).await?;
    record_audit(
        &state,
        rule_audit(
            AuditAction::RuleCreated,
            &rule,
            format!("Rule created: {}", rule.rule_name),
        ),
    )
    .await?;

    tracing::info!(rule_id = %rule.id, condition = rule.rule_condition.as_str(), "Rule created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: rule })))
}

/// PUT /api/v1/rules/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<RuleInput>,
) -> AppResult<Json<DataResponse<HygieneRule>>> {
    let rule = input.into_rule(id.clone())?;
    if RuleRepo::find_by_id(state.store(), &id).await?.is_none() {
        return Err(AppError::not_found(ENTITY, id));
    }
    let rule = RuleRepo::replace(state.store(), &id, &rule).await?;
    record_audit(
        &state,
        rule_audit(
            AuditAction::RuleUpdated,
            &rule,
            format!("Rule updated: {}", rule.rule_name),
        ),
    )
    .await?;

    Ok(Json(DataResponse { data: rule }))
}

/// POST /api/v1/rules/{id}/toggle
///
/// Flips `enabled` and logs `rule_updated`.
pub async fn toggle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<HygieneRule>>> {
    let current = RuleRepo::find_by_id(state.store(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, &id))?;
    let rule = RuleRepo::set_enabled(state.store(), &id, !current.enabled).await?;

    let verb = if rule.enabled { "enabled" } else { "disabled" };
    record_audit(
        &state,
        rule_audit(
            AuditAction::RuleUpdated,
            &rule,
            format!("Rule {verb}: {}", rule.rule_name),
        ),
    )
    .await?;

    Ok(Json(DataResponse { data: rule }))
}

/// DELETE /api/v1/rules/{id}
///
/// Issues opened by the rule keep their snapshot and stay in place.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    let rule = RuleRepo::find_by_id(state.store(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, &id))?;
    RuleRepo::delete(state.store(), &id).await?;
    record_audit(
        &state,
        rule_audit(
            AuditAction::RuleDeleted,
            &rule,
            format!("Rule deleted: {}", rule.rule_name),
        ),
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
