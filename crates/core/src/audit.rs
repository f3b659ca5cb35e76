//! Audit trail entries and the stable action taxonomy.
//!
//! Entries are append-only. Every mutating operation builds one (or more)
//! here and hands it to the caller, which persists it through the audit
//! recorder in the store crate.

use serde::{Deserialize, Serialize};

use crate::types::{new_record_id, RecordId, Timestamp};

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Stable action identifiers recorded in the `audit_log` collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    HygieneCheck,
    IssueDetected,
    IssueResolved,
    IssueDeleted,
    NotificationSent,
    ProjectCreated,
    ProjectUpdated,
    ProjectDeleted,
    RuleCreated,
    RuleUpdated,
    RuleDeleted,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HygieneCheck => "hygiene_check",
            Self::IssueDetected => "issue_detected",
            Self::IssueResolved => "issue_resolved",
            Self::IssueDeleted => "issue_deleted",
            Self::NotificationSent => "notification_sent",
            Self::ProjectCreated => "project_created",
            Self::ProjectUpdated => "project_updated",
            Self::ProjectDeleted => "project_deleted",
            Self::RuleCreated => "rule_created",
            Self::RuleUpdated => "rule_updated",
            Self::RuleDeleted => "rule_deleted",
        }
    }
}

// ---------------------------------------------------------------------------
// Entity type constants
// ---------------------------------------------------------------------------

/// Known `entityType` values.
pub mod entity_types {
    pub const SYSTEM: &str = "system";
    pub const ISSUE: &str = "issue";
    pub const NOTIFICATION: &str = "notification";
    pub const PROJECT: &str = "project";
    pub const RULE: &str = "rule";
}

/// `entityId` recorded for check-run summaries.
pub const HYGIENE_CHECK_ENTITY_ID: &str = "hygiene_check";

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// A single audit log record. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: RecordId,
    pub timestamp: Timestamp,
    pub action: AuditAction,
    pub entity_type: String,
    pub entity_id: String,
    pub description: String,
    /// JSON-serialized free-form payload (`"{}"` when there is none).
    #[serde(default = "empty_details")]
    pub details: String,
}

fn empty_details() -> String {
    "{}".to_string()
}

impl AuditLogEntry {
    pub fn new(
        action: AuditAction,
        entity_type: &str,
        entity_id: impl Into<String>,
        description: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id: new_record_id(),
            timestamp: now,
            action,
            entity_type: entity_type.to_string(),
            entity_id: entity_id.into(),
            description: description.into(),
            details: empty_details(),
        }
    }

    /// Attach a structured payload, stored in its serialized form.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details.to_string();
        self
    }

    /// The summary entry closing a check run.
    ///
    /// `detected` counts detections that were fully recorded; `failed` counts
    /// detections whose writes did not all complete.
    pub fn hygiene_check(detected: usize, failed: usize, now: Timestamp) -> Self {
        let description = if failed == 0 {
            format!("Hygiene check completed. {detected} issues detected.")
        } else {
            format!(
                "Hygiene check completed with errors. {detected} of {} checks completed.",
                detected + failed
            )
        };
        Self::new(
            AuditAction::HygieneCheck,
            entity_types::SYSTEM,
            HYGIENE_CHECK_ENTITY_ID,
            description,
            now,
        )
        .with_details(serde_json::json!({
            "issuesDetected": detected,
            "failed": failed,
        }))
    }

    /// Parse the stored details back into JSON, if they are valid JSON.
    pub fn details_json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.details).ok()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> Timestamp {
        chrono::Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn action_wire_names_match_taxonomy() {
        let actions = [
            (AuditAction::HygieneCheck, "hygiene_check"),
            (AuditAction::IssueDetected, "issue_detected"),
            (AuditAction::IssueResolved, "issue_resolved"),
            (AuditAction::IssueDeleted, "issue_deleted"),
            (AuditAction::NotificationSent, "notification_sent"),
            (AuditAction::ProjectCreated, "project_created"),
            (AuditAction::ProjectUpdated, "project_updated"),
            (AuditAction::ProjectDeleted, "project_deleted"),
            (AuditAction::RuleCreated, "rule_created"),
            (AuditAction::RuleUpdated, "rule_updated"),
            (AuditAction::RuleDeleted, "rule_deleted"),
        ];
        for (action, name) in actions {
            assert_eq!(action.as_str(), name);
            assert_eq!(serde_json::to_value(action).unwrap(), name);
        }
    }

    #[test]
    fn new_entry_has_empty_details() {
        let entry = AuditLogEntry::new(
            AuditAction::RuleDeleted,
            entity_types::RULE,
            "r-1",
            "Rule deleted: Stale dates",
            now(),
        );
        assert_eq!(entry.details, "{}");
        assert_eq!(entry.entity_type, "rule");
        assert_eq!(entry.timestamp, now());
    }

    #[test]
    fn details_are_stored_serialized() {
        let entry = AuditLogEntry::new(
            AuditAction::IssueDetected,
            entity_types::ISSUE,
            "i-1",
            "Issue detected",
            now(),
        )
        .with_details(serde_json::json!({"ruleId": "r-1"}));
        assert_eq!(entry.details_json().unwrap()["ruleId"], "r-1");
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json["details"].is_string());
    }

    #[test]
    fn hygiene_check_summary_with_zero_detections() {
        let entry = AuditLogEntry::hygiene_check(0, 0, now());
        assert_eq!(entry.action, AuditAction::HygieneCheck);
        assert_eq!(entry.entity_id, HYGIENE_CHECK_ENTITY_ID);
        assert_eq!(entry.description, "Hygiene check completed. 0 issues detected.");
    }

    #[test]
    fn hygiene_check_summary_reports_partial_runs() {
        let entry = AuditLogEntry::hygiene_check(2, 1, now());
        assert_eq!(
            entry.description,
            "Hygiene check completed with errors. 2 of 3 checks completed."
        );
        assert_eq!(entry.details_json().unwrap()["failed"], 1);
    }
}
