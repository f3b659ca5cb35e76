//! Query parameter types for list endpoints.
//!
//! Every list endpoint accepts `?search=` (case-insensitive substring over
//! all fields) plus a few exact-match filters, each mapped onto the record's
//! wire field name.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ProjectListParams {
    pub search: Option<String>,
    /// Matches `projectStatus`.
    pub status: Option<String>,
}

impl ProjectListParams {
    pub fn filters(&self) -> [(&str, Option<&str>); 1] {
        [("projectStatus", self.status.as_deref())]
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RuleListParams {
    pub search: Option<String>,
    /// Matches `ruleCategory`.
    pub category: Option<String>,
    /// Matches `ruleSeverity`.
    pub severity: Option<String>,
}

impl RuleListParams {
    pub fn filters(&self) -> [(&str, Option<&str>); 2] {
        [
            ("ruleCategory", self.category.as_deref()),
            ("ruleSeverity", self.severity.as_deref()),
        ]
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct IssueListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub severity: Option<String>,
    pub project_id: Option<String>,
}

impl IssueListParams {
    pub fn filters(&self) -> [(&str, Option<&str>); 3] {
        [
            ("status", self.status.as_deref()),
            ("severity", self.severity.as_deref()),
            ("projectId", self.project_id.as_deref()),
        ]
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NotificationListParams {
    pub search: Option<String>,
    /// Matches `notificationType`.
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
}

impl NotificationListParams {
    pub fn filters(&self) -> [(&str, Option<&str>); 1] {
        [("notificationType", self.notification_type.as_deref())]
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AuditListParams {
    pub search: Option<String>,
    pub action: Option<String>,
    /// Matches `entityType`.
    pub entity_type: Option<String>,
}

impl AuditListParams {
    pub fn filters(&self) -> [(&str, Option<&str>); 2] {
        [
            ("action", self.action.as_deref()),
            ("entityType", self.entity_type.as_deref()),
        ]
    }
}

/// `?days=` for the dashboard trend (default 7, capped at 90).
#[derive(Debug, Default, Deserialize)]
pub struct TrendParams {
    pub days: Option<u32>,
}

/// Upper bound on the trend window.
pub const MAX_TREND_DAYS: u32 = 90;

impl TrendParams {
    pub fn days(&self) -> u32 {
        self.days
            .unwrap_or(hygiene_core::metrics::DEFAULT_TREND_DAYS)
            .clamp(1, MAX_TREND_DAYS)
    }
}
