//! Notification records and their message templates.
//!
//! Builders here are pure and infallible. Persisting the record, appending
//! the `notification_sent` audit entry and any outbound delivery are the
//! caller's next steps.

use serde::{Deserialize, Serialize};

use crate::issue::HygieneIssue;
use crate::project::Project;
use crate::types::{new_record_id, Date, RecordId, Timestamp};

/// The only status the service ever records.
pub const STATUS_SENT: &str = "sent";

/// Signature line and product name used in every message.
const SYSTEM_NAME: &str = "FDO Hygiene Monitoring System";

/// Fallback greeting when a project has no manager on record.
const DEFAULT_RECIPIENT: &str = "Project Manager";

// ---------------------------------------------------------------------------
// Type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    IssueDetected,
    IssueResolved,
    Reminder,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IssueDetected => "issue_detected",
            Self::IssueResolved => "issue_resolved",
            Self::Reminder => "reminder",
        }
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A notification as stored in the `notifications` collection.
///
/// `issue_ids` holds the id of the single issue that triggered it (empty for
/// reminders); one notification is emitted per lifecycle transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: RecordId,
    pub notification_type: NotificationType,
    pub project_id: RecordId,
    #[serde(default)]
    pub project_code: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub recipient_email: Option<String>,
    pub subject: String,
    pub body: String,
    pub sent_date: Timestamp,
    pub status: String,
    #[serde(default)]
    pub issue_ids: String,
}

impl Notification {
    /// Alert the project manager that a violation was detected.
    pub fn detection(issue: &HygieneIssue, now: Timestamp) -> Self {
        Self::for_issue(
            issue,
            NotificationType::IssueDetected,
            format!("⚠️ Hygiene Issue Detected - {}", issue.display_project_name()),
            detection_body(issue),
            now,
        )
    }

    /// Confirm to the project manager that an issue was resolved.
    ///
    /// `issue` must already carry its resolution date.
    pub fn resolution(issue: &HygieneIssue, now: Timestamp) -> Self {
        Self::for_issue(
            issue,
            NotificationType::IssueResolved,
            format!("✅ Hygiene Issue Resolved - {}", issue.display_project_name()),
            resolution_body(issue),
            now,
        )
    }

    /// A test message addressed to a project's manager.
    pub fn reminder(project: &Project, now: Timestamp) -> Self {
        Self {
            id: new_record_id(),
            notification_type: NotificationType::Reminder,
            project_id: project.id.clone(),
            project_code: project.project_code.clone(),
            project_name: project.project_name.clone(),
            recipient: Some(
                project
                    .project_manager
                    .clone()
                    .unwrap_or_else(|| "Test User".to_string()),
            ),
            recipient_email: Some(
                project
                    .pm_email
                    .clone()
                    .unwrap_or_else(|| "test@example.com".to_string()),
            ),
            subject: "🔔 Test Notification - FDO Hygiene Monitoring".to_string(),
            body: reminder_body(project, now),
            sent_date: now,
            status: STATUS_SENT.to_string(),
            issue_ids: String::new(),
        }
    }

    fn for_issue(
        issue: &HygieneIssue,
        notification_type: NotificationType,
        subject: String,
        body: String,
        now: Timestamp,
    ) -> Self {
        Self {
            id: new_record_id(),
            notification_type,
            project_id: issue.project_id.clone(),
            project_code: issue.project_code.clone(),
            project_name: issue.project_name.clone(),
            recipient: issue.project_manager.clone(),
            recipient_email: issue.pm_email.clone(),
            subject,
            body,
            sent_date: now,
            status: STATUS_SENT.to_string(),
            issue_ids: issue.id.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// Render a calendar day the way the dashboard shows it, e.g. `Mar 14, 2026`.
pub fn format_date(date: Date) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn text(value: Option<&str>) -> String {
    escape_html(value.unwrap_or("N/A"))
}

/// Wrap a message in the shared layout: coloured header, greeting, content
/// and signature.
fn layout(accent: &str, heading: &str, recipient: &str, content: &str) -> String {
    format!(
        "<html>\n<body style=\"font-family: Arial, sans-serif; line-height: 1.6; color: #333;\">\n\
         <div style=\"max-width: 600px; margin: 0 auto; padding: 20px;\">\n\
         <div style=\"background: {accent}; color: white; padding: 20px; text-align: center;\"><h2>{heading}</h2></div>\n\
         <div style=\"background: white; padding: 30px;\">\n\
         <p>Dear {recipient},</p>\n\
         {content}\n\
         <p style=\"margin-top: 30px;\">Best regards,<br>{SYSTEM_NAME}</p>\n\
         </div>\n</div>\n</body>\n</html>\n",
        recipient = escape_html(recipient),
    )
}

fn project_line(issue: &HygieneIssue) -> String {
    format!(
        "<p><strong>Project:</strong> {} ({})</p>",
        text(issue.project_name.as_deref()),
        text(issue.project_code.as_deref()),
    )
}

fn detection_body(issue: &HygieneIssue) -> String {
    let content = format!(
        "<p>A hygiene issue has been detected for your project during the FDO health check.</p>\n\
         <div style=\"border-left: 4px solid #ef4444; padding: 15px;\">\n\
         <h3>Issue Details</h3>\n\
         {project}\n\
         <p><strong>Issue Type:</strong> {issue_type}</p>\n\
         <p><strong>Severity:</strong> {severity}</p>\n\
         <p><strong>Description:</strong> {description}</p>\n\
         <p><strong>Detected:</strong> {detected}</p>\n\
         </div>\n\
         <div style=\"border-left: 4px solid #3b82f6; padding: 15px;\">\n\
         <h3>Required Action</h3>\n\
         <p>{action}</p>\n\
         </div>\n\
         <p>This issue affects your project's compliance with FDO governance standards. \
         Please address it at your earliest convenience; you will receive a confirmation once it is resolved.</p>",
        project = project_line(issue),
        issue_type = escape_html(&issue.issue_type),
        severity = issue.severity.as_str().to_uppercase(),
        description = text(issue.description.as_deref()),
        detected = format_date(issue.detected_date),
        action = text(issue.correction_action.as_deref()),
    );
    layout(
        "#ef4444",
        "⚠️ Hygiene Issue Detected",
        issue.project_manager.as_deref().unwrap_or(DEFAULT_RECIPIENT),
        &content,
    )
}

fn resolution_body(issue: &HygieneIssue) -> String {
    let resolved = issue
        .resolved_date
        .map(format_date)
        .unwrap_or_else(|| "N/A".to_string());
    let content = format!(
        "<p>The hygiene issue for your project has been resolved.</p>\n\
         <div style=\"border-left: 4px solid #10b981; padding: 15px;\">\n\
         <h3>Resolved Issue Details</h3>\n\
         {project}\n\
         <p><strong>Issue Type:</strong> {issue_type}</p>\n\
         <p><strong>Severity:</strong> {severity}</p>\n\
         <p><strong>Detected:</strong> {detected}</p>\n\
         <p><strong>Resolved:</strong> {resolved}</p>\n\
         </div>\n\
         <p>Thank you for addressing this issue. Your project is now compliant with FDO governance standards.</p>",
        project = project_line(issue),
        issue_type = escape_html(&issue.issue_type),
        severity = issue.severity.as_str(),
        detected = format_date(issue.detected_date),
    );
    layout(
        "#10b981",
        "✅ Hygiene Issue Resolved",
        issue.project_manager.as_deref().unwrap_or(DEFAULT_RECIPIENT),
        &content,
    )
}

fn reminder_body(project: &Project, now: Timestamp) -> String {
    let content = format!(
        "<p>This is a test notification from the {SYSTEM_NAME}.</p>\n\
         <div style=\"border-left: 4px solid #3b82f6; padding: 15px;\">\n\
         <h3>Test Details</h3>\n\
         <p><strong>Project:</strong> {name} ({code})</p>\n\
         <p><strong>Sent:</strong> {sent}</p>\n\
         <p><strong>Status:</strong> System is operational</p>\n\
         </div>\n\
         <p>You will receive automated alerts when hygiene issues are detected or resolved.</p>",
        name = text(project.project_name.as_deref()),
        code = text(project.project_code.as_deref()),
        sent = now.format("%b %-d, %Y %H:%M UTC"),
    );
    layout(
        "#3b82f6",
        "🔔 Test Notification",
        project.project_manager.as_deref().unwrap_or(DEFAULT_RECIPIENT),
        &content,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueStatus;
    use crate::rule::Severity;
    use chrono::TimeZone;

    fn now() -> Timestamp {
        chrono::Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    fn issue() -> HygieneIssue {
        HygieneIssue {
            id: "i-1".into(),
            project_id: "p-1".into(),
            rule_id: "r-1".into(),
            project_code: Some("FDO-001".into()),
            project_name: Some("Ledger <Migration>".into()),
            project_manager: Some("Dana Reyes".into()),
            pm_email: Some("dana@example.com".into()),
            rule_name: "Description present".into(),
            issue_type: "data_quality".into(),
            severity: Severity::Critical,
            description: Some("Project description is empty".into()),
            correction_action: Some("Fill in the description".into()),
            detected_date: Date::from_ymd_opt(2026, 3, 1).unwrap(),
            status: IssueStatus::Open,
            resolved_date: None,
        }
    }

    #[test]
    fn detection_addresses_project_manager() {
        let n = Notification::detection(&issue(), now());
        assert_eq!(n.notification_type, NotificationType::IssueDetected);
        assert_eq!(n.recipient.as_deref(), Some("Dana Reyes"));
        assert_eq!(n.recipient_email.as_deref(), Some("dana@example.com"));
        assert_eq!(n.issue_ids, "i-1");
        assert_eq!(n.status, STATUS_SENT);
        assert_eq!(n.sent_date, now());
        assert_eq!(n.subject, "⚠️ Hygiene Issue Detected - Ledger <Migration>");
    }

    #[test]
    fn detection_body_carries_snapshot_and_escapes_html() {
        let body = Notification::detection(&issue(), now()).body;
        assert!(body.contains("Dear Dana Reyes"));
        assert!(body.contains("Ledger &lt;Migration&gt; (FDO-001)"));
        assert!(body.contains("CRITICAL"));
        assert!(body.contains("Fill in the description"));
        assert!(body.contains("Mar 1, 2026"));
    }

    #[test]
    fn resolution_body_shows_resolved_date() {
        let mut resolved = issue();
        resolved.status = IssueStatus::Resolved;
        resolved.resolved_date = Some(Date::from_ymd_opt(2026, 3, 14).unwrap());
        let n = Notification::resolution(&resolved, now());
        assert_eq!(n.notification_type, NotificationType::IssueResolved);
        assert!(n.subject.starts_with("✅ Hygiene Issue Resolved"));
        assert!(n.body.contains("Mar 14, 2026"));
    }

    #[test]
    fn missing_manager_falls_back_in_greeting() {
        let mut i = issue();
        i.project_manager = None;
        let n = Notification::detection(&i, now());
        assert!(n.recipient.is_none());
        assert!(n.body.contains("Dear Project Manager"));
    }

    #[test]
    fn reminder_uses_placeholders_for_missing_contact() {
        let project = Project {
            id: "p-7".into(),
            project_name: Some("Archive".into()),
            ..Default::default()
        };
        let n = Notification::reminder(&project, now());
        assert_eq!(n.notification_type, NotificationType::Reminder);
        assert_eq!(n.recipient.as_deref(), Some("Test User"));
        assert_eq!(n.recipient_email.as_deref(), Some("test@example.com"));
        assert!(n.issue_ids.is_empty());
    }

    #[test]
    fn type_wire_names() {
        assert_eq!(serde_json::to_value(NotificationType::IssueResolved).unwrap(), "issue_resolved");
        assert_eq!(NotificationType::Reminder.as_str(), "reminder");
    }
}
