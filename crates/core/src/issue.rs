//! Hygiene issues: one recorded violation of one rule by one project.
//!
//! Issues carry a snapshot of the project and rule as they were when the
//! violation was detected, so later edits to either do not rewrite history.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::evaluation::parse_date;
use crate::project::Project;
use crate::rule::{HygieneRule, Severity};
use crate::types::{new_record_id, Date, RecordId};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of an issue.
///
/// The engine only ever assigns `Open` and `Resolved`. `InProgress` is a
/// valid stored value that is treated as non-resolved everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Open,
    InProgress,
    Resolved,
}

impl IssueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
        }
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// An issue as stored in the `hygiene_issues` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HygieneIssue {
    pub id: RecordId,
    pub project_id: RecordId,
    pub rule_id: RecordId,
    #[serde(default)]
    pub project_code: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub project_manager: Option<String>,
    #[serde(default)]
    pub pm_email: Option<String>,
    #[serde(default)]
    pub rule_name: String,
    #[serde(default)]
    pub issue_type: String,
    pub severity: Severity,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub correction_action: Option<String>,
    /// Stored as `YYYY-MM-DD`; full timestamps are read as their UTC date.
    #[serde(deserialize_with = "lenient_date")]
    pub detected_date: Date,
    pub status: IssueStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_date: Option<Date>,
}

/// The dedup identity of an issue: at most one non-resolved issue may exist
/// per key.
pub type IssueKey = (RecordId, RecordId);

impl HygieneIssue {
    /// Snapshot a freshly detected violation as an open issue.
    pub fn detected(project: &Project, rule: &HygieneRule, today: Date) -> Self {
        Self {
            id: new_record_id(),
            project_id: project.id.clone(),
            rule_id: rule.id.clone(),
            project_code: project.project_code.clone(),
            project_name: project.project_name.clone(),
            project_manager: project.project_manager.clone(),
            pm_email: project.pm_email.clone(),
            rule_name: rule.rule_name.clone(),
            issue_type: rule.rule_category.clone(),
            severity: rule.rule_severity,
            description: rule.rule_description.clone(),
            correction_action: rule.correction_action.clone(),
            detected_date: today,
            status: IssueStatus::Open,
            resolved_date: None,
        }
    }

    /// Anything not resolved counts as open for dedup, health and metrics.
    pub fn is_unresolved(&self) -> bool {
        self.status != IssueStatus::Resolved
    }

    pub fn key(&self) -> IssueKey {
        (self.project_id.clone(), self.rule_id.clone())
    }

    pub fn display_project_name(&self) -> &str {
        self.project_name.as_deref().unwrap_or("")
    }
}

/// The dedup key of a raw stored issue, or `None` once it is resolved.
///
/// Reads only `projectId`, `ruleId` and `status`, so a record whose other
/// fields no longer decode as a [`HygieneIssue`] still blocks a duplicate.
/// Any status other than `resolved` counts as open.
pub fn open_key_of(record: &Value) -> Option<IssueKey> {
    if record.get("status").and_then(Value::as_str) == Some(IssueStatus::Resolved.as_str()) {
        return None;
    }
    let id = |field: &str| -> Option<RecordId> {
        match record.get(field)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    };
    Some((id("projectId")?, id("ruleId")?))
}

fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw)
        .map(|ts| ts.date_naive())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
}

/// Partial update applied to an issue when it is resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueResolutionPatch {
    pub status: IssueStatus,
    pub resolved_date: Date,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleCondition;

    fn rule() -> HygieneRule {
        HygieneRule {
            id: "r-1".into(),
            rule_name: "Description present".into(),
            rule_category: "data_quality".into(),
            rule_severity: Severity::High,
            rule_description: Some("Project description is empty".into()),
            rule_condition: RuleCondition::FieldEmpty,
            target_field: "description".into(),
            expected_value: None,
            correction_action: Some("Fill in the description".into()),
            enabled: true,
        }
    }

    fn project() -> Project {
        Project {
            id: "p-1".into(),
            project_code: Some("FDO-001".into()),
            project_name: Some("Ledger Migration".into()),
            project_manager: Some("Dana Reyes".into()),
            pm_email: Some("dana@example.com".into()),
            ..Default::default()
        }
    }

    #[test]
    fn detected_snapshots_project_and_rule() {
        let today = Date::from_ymd_opt(2026, 3, 14).unwrap();
        let issue = HygieneIssue::detected(&project(), &rule(), today);
        assert_eq!(issue.project_id, "p-1");
        assert_eq!(issue.rule_id, "r-1");
        assert_eq!(issue.issue_type, "data_quality");
        assert_eq!(issue.severity, Severity::High);
        assert_eq!(issue.description.as_deref(), Some("Project description is empty"));
        assert_eq!(issue.pm_email.as_deref(), Some("dana@example.com"));
        assert_eq!(issue.status, IssueStatus::Open);
        assert_eq!(issue.detected_date, today);
        assert!(issue.resolved_date.is_none());
        assert!(!issue.id.is_empty());
    }

    #[test]
    fn in_progress_counts_as_unresolved() {
        let mut issue = HygieneIssue::detected(&project(), &rule(), Date::MIN);
        issue.status = IssueStatus::InProgress;
        assert!(issue.is_unresolved());
        issue.status = IssueStatus::Resolved;
        assert!(!issue.is_unresolved());
    }

    #[test]
    fn serializes_with_wire_names() {
        let today = Date::from_ymd_opt(2026, 3, 14).unwrap();
        let json = serde_json::to_value(HygieneIssue::detected(&project(), &rule(), today)).unwrap();
        assert_eq!(json["projectId"], "p-1");
        assert_eq!(json["detectedDate"], "2026-03-14");
        assert_eq!(json["status"], "open");
        assert!(json.get("resolvedDate").is_none());
    }

    #[test]
    fn timestamp_detected_date_reads_as_utc_date() {
        let issue: HygieneIssue = serde_json::from_value(serde_json::json!({
            "id": "i-1",
            "projectId": "p-1",
            "ruleId": "r-1",
            "severity": "high",
            "detectedDate": "2026-03-14T09:30:00Z",
            "status": "open"
        }))
        .unwrap();
        assert_eq!(issue.detected_date, Date::from_ymd_opt(2026, 3, 14).unwrap());
    }

    #[test]
    fn open_key_ignores_undecodable_fields() {
        let record = serde_json::json!({
            "projectId": "p-1",
            "ruleId": "r-1",
            "severity": "catastrophic",
            "detectedDate": "last tuesday",
            "status": "escalated"
        });
        assert_eq!(open_key_of(&record), Some(("p-1".to_string(), "r-1".to_string())));
    }

    #[test]
    fn open_key_skips_resolved_and_keyless_records() {
        let resolved = serde_json::json!({"projectId": "p-1", "ruleId": "r-1", "status": "resolved"});
        let keyless = serde_json::json!({"projectId": "p-1", "status": "open"});
        assert_eq!(open_key_of(&resolved), None);
        assert_eq!(open_key_of(&keyless), None);
    }

    #[test]
    fn missing_status_counts_as_open() {
        let record = serde_json::json!({"projectId": 7, "ruleId": "r-1"});
        assert_eq!(open_key_of(&record), Some(("7".to_string(), "r-1".to_string())));
    }
}
