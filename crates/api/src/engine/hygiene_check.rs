//! Check-run executor.
//!
//! Loads a snapshot, asks [`hygiene_core::reconciliation::run_check_against`]
//! for the detections, then applies each detection's writes in order: issue,
//! notification, `notification_sent`, `issue_detected`. A failed write stops
//! the remaining writes of that detection only; the run carries on with the
//! next one and closes with a `hygiene_check` summary entry.
//!
//! The dedup set is read from the raw issue records, so a stored issue that
//! no longer decodes still blocks a duplicate. Projects and rules that do not
//! decode are left out of the run and reported in the outcome.

use hygiene_core::audit::AuditLogEntry;
use hygiene_core::evaluation::EvaluationContext;
use hygiene_core::reconciliation::{run_check_against, Detection};
use hygiene_events::EmailDelivery;
use hygiene_store::repositories::{
    AuditLogRepo, IssueRepo, NotificationRepo, ProjectRepo, RuleRepo, SkippedRecord,
};
use hygiene_store::{RecordStore, StoreError};
use serde::Serialize;

/// The write a detection was on when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteStage {
    Issue,
    Notification,
    AuditEntry,
}

/// One detection whose writes did not all complete.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionFailure {
    pub project_id: String,
    pub rule_id: String,
    pub stage: WriteStage,
    pub error: String,
}

/// Result of one check run as reported to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutcome {
    /// Detections whose writes all completed.
    pub issues_detected: usize,
    /// Detections attempted (completed + failed).
    pub attempted: usize,
    pub pairs_evaluated: usize,
    pub failures: Vec<DetectionFailure>,
    /// Project and rule records left out because they did not decode.
    pub skipped_records: Vec<SkippedRecord>,
}

impl CheckOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.skipped_records.is_empty()
    }
}

/// Run one hygiene check against `store`.
///
/// Errors only when the initial snapshot cannot be read or the closing
/// summary entry cannot be written; per-detection failures are reported in
/// the outcome.
pub async fn run(
    store: &dyn RecordStore,
    mailer: Option<&EmailDelivery>,
    ctx: &EvaluationContext,
) -> Result<CheckOutcome, StoreError> {
    let projects = ProjectRepo::list_decoded(store).await?;
    let rules = RuleRepo::list_decoded(store).await?;
    let open_keys = IssueRepo::open_keys(store).await?;
    tracing::info!(
        projects = projects.records.len(),
        rules = rules.records.len(),
        open_issues = open_keys.len(),
        "Starting hygiene check"
    );

    let mut skipped_records = projects.skipped;
    skipped_records.extend(rules.skipped);
    if !skipped_records.is_empty() {
        tracing::warn!(
            skipped = skipped_records.len(),
            "Hygiene check ran without undecodable project or rule records"
        );
    }

    let report = run_check_against(&projects.records, &rules.records, open_keys, ctx);

    let mut completed = 0;
    let mut failures = Vec::new();
    for detection in &report.detections {
        match apply_detection(store, detection).await {
            Ok(()) => {
                completed += 1;
                super::deliver_best_effort(mailer, &detection.notification).await;
            }
            Err((stage, e)) => {
                tracing::warn!(
                    project_id = %detection.issue.project_id,
                    rule_id = %detection.issue.rule_id,
                    ?stage,
                    error = %e,
                    "Detection writes incomplete"
                );
                failures.push(DetectionFailure {
                    project_id: detection.issue.project_id.clone(),
                    rule_id: detection.issue.rule_id.clone(),
                    stage,
                    error: e.to_string(),
                });
            }
        }
    }

    let summary = AuditLogEntry::hygiene_check(completed, failures.len(), ctx.now);
    AuditLogRepo::append(store, &summary).await?;

    tracing::info!(
        issues_detected = completed,
        failed = failures.len(),
        pairs_evaluated = report.pairs_evaluated,
        "Hygiene check finished"
    );

    Ok(CheckOutcome {
        issues_detected: completed,
        attempted: report.detections.len(),
        pairs_evaluated: report.pairs_evaluated,
        failures,
        skipped_records,
    })
}

async fn apply_detection(
    store: &dyn RecordStore,
    detection: &Detection,
) -> Result<(), (WriteStage, StoreError)> {
    IssueRepo::create(store, &detection.issue)
        .await
        .map_err(|e| (WriteStage::Issue, e))?;
    NotificationRepo::create(store, &detection.notification)
        .await
        .map_err(|e| (WriteStage::Notification, e))?;
    for entry in &detection.audit_entries {
        AuditLogRepo::append(store, entry)
            .await
            .map_err(|e| (WriteStage::AuditEntry, e))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use hygiene_core::audit::AuditAction;
    use hygiene_store::{Collection, MemoryStore};
    use serde_json::json;

    fn ctx() -> EvaluationContext {
        EvaluationContext::new(chrono::Utc::now())
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .seed(
                Collection::Projects,
                [
                    json!({"id": "P1", "projectName": "Alpha", "pmEmail": "a@example.com"}),
                    json!({"id": "P2", "projectName": "Beta", "pmEmail": "b@example.com"}),
                ],
            )
            .await;
        store
            .seed(
                Collection::HygieneRules,
                [json!({
                    "id": "R1",
                    "ruleName": "Description present",
                    "ruleCategory": "data_quality",
                    "ruleSeverity": "high",
                    "ruleCondition": "field_empty",
                    "targetField": "description",
                    "enabled": true
                })],
            )
            .await;
        store
    }

    async fn actions(store: &MemoryStore) -> Vec<AuditAction> {
        store
            .list(Collection::AuditLog)
            .await
            .unwrap()
            .iter()
            .map(|e| serde_json::from_value(e["action"].clone()).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn writes_follow_detection_order() {
        let store = seeded().await;
        let outcome = run(&store, None, &ctx()).await.unwrap();

        assert_eq!(outcome.issues_detected, 2);
        assert!(outcome.is_complete());
        assert_eq!(store.list(Collection::HygieneIssues).await.unwrap().len(), 2);
        assert_eq!(store.list(Collection::Notifications).await.unwrap().len(), 2);
        assert_eq!(
            actions(&store).await,
            vec![
                AuditAction::NotificationSent,
                AuditAction::IssueDetected,
                AuditAction::NotificationSent,
                AuditAction::IssueDetected,
                AuditAction::HygieneCheck,
            ]
        );
    }

    #[tokio::test]
    async fn failed_notification_skips_rest_of_detection_only() {
        let store = seeded().await;
        store.fail_writes_after(Collection::Notifications, 0).await;

        let outcome = run(&store, None, &ctx()).await.unwrap();

        assert_eq!(outcome.issues_detected, 0);
        assert_eq!(outcome.attempted, 2);
        assert_eq!(outcome.failures.len(), 2);
        assert!(outcome.failures.iter().all(|f| f.stage == WriteStage::Notification));
        // Issues were written before the failing step.
        assert_eq!(store.list(Collection::HygieneIssues).await.unwrap().len(), 2);
        assert_eq!(actions(&store).await, vec![AuditAction::HygieneCheck]);

        let summary = &store.list(Collection::AuditLog).await.unwrap()[0];
        assert_eq!(
            summary["description"],
            "Hygiene check completed with errors. 0 of 2 checks completed."
        );
    }

    #[tokio::test]
    async fn failed_issue_write_is_retried_by_next_run() {
        let store = seeded().await;
        store.fail_writes_after(Collection::HygieneIssues, 1).await;

        let first = run(&store, None, &ctx()).await.unwrap();
        assert_eq!(first.issues_detected, 1);
        assert_eq!(first.failures[0].stage, WriteStage::Issue);
        assert_eq!(first.failures[0].project_id, "P2");

        store.heal(Collection::HygieneIssues).await;
        let second = run(&store, None, &ctx()).await.unwrap();
        assert_eq!(second.issues_detected, 1);
        assert!(second.is_complete());

        let third = run(&store, None, &ctx()).await.unwrap();
        assert_eq!(third.issues_detected, 0);
    }

    #[tokio::test]
    async fn undecodable_open_issue_still_blocks_duplicate() {
        let store = seeded().await;
        store
            .seed(
                Collection::HygieneIssues,
                [json!({
                    "id": "i-legacy",
                    "projectId": "P1",
                    "ruleId": "R1",
                    "severity": "catastrophic",
                    "detectedDate": "2026-03-14T09:30:00Z",
                    "status": "open"
                })],
            )
            .await;

        let first = run(&store, None, &ctx()).await.unwrap();
        let second = run(&store, None, &ctx()).await.unwrap();

        assert_eq!(first.issues_detected, 1);
        assert_eq!(second.issues_detected, 0);
        let open_for_p1: Vec<_> = store
            .list(Collection::HygieneIssues)
            .await
            .unwrap()
            .into_iter()
            .filter(|i| i["projectId"] == "P1" && i["status"] != "resolved")
            .collect();
        assert_eq!(open_for_p1.len(), 1);
        assert_eq!(store.list(Collection::Notifications).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn undecodable_rule_is_reported_as_skipped() {
        let store = seeded().await;
        store
            .seed(
                Collection::HygieneRules,
                [json!({"id": "R9", "ruleSeverity": "catastrophic", "enabled": true})],
            )
            .await;

        let outcome = run(&store, None, &ctx()).await.unwrap();

        assert_eq!(outcome.issues_detected, 2);
        assert!(!outcome.is_complete());
        assert_eq!(outcome.skipped_records.len(), 1);
        assert_eq!(outcome.skipped_records[0].collection, "hygiene_rules");
        assert_eq!(outcome.skipped_records[0].id.as_deref(), Some("R9"));
    }
}
