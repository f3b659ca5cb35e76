//! Resolving a single issue.
//!
//! Resolving an issue that is already resolved is a no-op: no notification,
//! no audit entry, and the issue comes back unchanged.

use crate::audit::{entity_types, AuditAction, AuditLogEntry};
use crate::issue::{HygieneIssue, IssueResolutionPatch, IssueStatus};
use crate::notification::Notification;
use crate::types::{Date, Timestamp};

/// The records a resolution produces, in application order.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub issue: HygieneIssue,
    /// Partial update to send to the store for `issue`.
    pub patch: IssueResolutionPatch,
    pub notification: Notification,
    /// `notification_sent` followed by `issue_resolved`.
    pub audit_entries: Vec<AuditLogEntry>,
}

#[derive(Debug, Clone)]
pub enum ResolveOutcome {
    Resolved(Box<Resolution>),
    AlreadyResolved(HygieneIssue),
}

/// Transition `issue` to resolved on `today`.
pub fn resolve(issue: HygieneIssue, today: Date, now: Timestamp) -> ResolveOutcome {
    if !issue.is_unresolved() {
        return ResolveOutcome::AlreadyResolved(issue);
    }

    let mut issue = issue;
    issue.status = IssueStatus::Resolved;
    issue.resolved_date = Some(today);

    let notification = Notification::resolution(&issue, now);

    let sent = AuditLogEntry::new(
        AuditAction::NotificationSent,
        entity_types::NOTIFICATION,
        notification.id.clone(),
        "Resolution confirmation sent",
        now,
    )
    .with_details(serde_json::json!({
        "issueId": issue.id,
        "recipientEmail": notification.recipient_email,
    }));

    let resolved = AuditLogEntry::new(
        AuditAction::IssueResolved,
        entity_types::ISSUE,
        issue.id.clone(),
        format!("Issue resolved: {}", issue.rule_name),
        now,
    )
    .with_details(serde_json::json!({
        "projectId": issue.project_id,
        "ruleId": issue.rule_id,
        "resolvedDate": today,
    }));

    ResolveOutcome::Resolved(Box::new(Resolution {
        patch: IssueResolutionPatch {
            status: IssueStatus::Resolved,
            resolved_date: today,
        },
        issue,
        notification,
        audit_entries: vec![sent, resolved],
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NotificationType;
    use crate::rule::Severity;
    use chrono::TimeZone;

    fn now() -> Timestamp {
        chrono::Utc.with_ymd_and_hms(2026, 3, 20, 16, 0, 0).unwrap()
    }

    fn today() -> Date {
        Date::from_ymd_opt(2026, 3, 20).unwrap()
    }

    fn open_issue() -> HygieneIssue {
        HygieneIssue {
            id: "i-1".into(),
            project_id: "p-1".into(),
            rule_id: "r-1".into(),
            project_code: Some("FDO-001".into()),
            project_name: Some("Ledger Migration".into()),
            project_manager: Some("Dana Reyes".into()),
            pm_email: Some("dana@example.com".into()),
            rule_name: "Description present".into(),
            issue_type: "data_quality".into(),
            severity: Severity::High,
            description: None,
            correction_action: None,
            detected_date: Date::from_ymd_opt(2026, 3, 14).unwrap(),
            status: IssueStatus::Open,
            resolved_date: None,
        }
    }

    #[test]
    fn resolving_open_issue_stamps_status_and_date() {
        let ResolveOutcome::Resolved(res) = resolve(open_issue(), today(), now()) else {
            panic!("expected Resolved");
        };
        assert_eq!(res.issue.status, IssueStatus::Resolved);
        assert_eq!(res.issue.resolved_date, Some(today()));
        assert_eq!(res.patch.resolved_date, today());
        assert_eq!(res.issue.detected_date, Date::from_ymd_opt(2026, 3, 14).unwrap());
    }

    #[test]
    fn resolving_emits_one_notification_and_one_resolved_entry() {
        let ResolveOutcome::Resolved(res) = resolve(open_issue(), today(), now()) else {
            panic!("expected Resolved");
        };
        assert_eq!(res.notification.notification_type, NotificationType::IssueResolved);
        assert_eq!(res.notification.recipient_email.as_deref(), Some("dana@example.com"));
        assert_eq!(res.notification.issue_ids, "i-1");

        let resolved: Vec<_> = res
            .audit_entries
            .iter()
            .filter(|e| e.action == AuditAction::IssueResolved)
            .collect();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].entity_id, "i-1");
        assert_eq!(resolved[0].description, "Issue resolved: Description present");
        assert_eq!(res.audit_entries[0].action, AuditAction::NotificationSent);
    }

    #[test]
    fn in_progress_issue_can_be_resolved() {
        let mut issue = open_issue();
        issue.status = IssueStatus::InProgress;
        assert!(matches!(
            resolve(issue, today(), now()),
            ResolveOutcome::Resolved(_)
        ));
    }

    #[test]
    fn re_resolving_is_a_no_op() {
        let mut issue = open_issue();
        issue.status = IssueStatus::Resolved;
        issue.resolved_date = Some(Date::from_ymd_opt(2026, 3, 15).unwrap());

        let ResolveOutcome::AlreadyResolved(unchanged) = resolve(issue.clone(), today(), now())
        else {
            panic!("expected AlreadyResolved");
        };
        assert_eq!(unchanged, issue);
    }

    #[test]
    fn patch_serializes_wire_fields_only() {
        let ResolveOutcome::Resolved(res) = resolve(open_issue(), today(), now()) else {
            panic!("expected Resolved");
        };
        let json = serde_json::to_value(&res.patch).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "resolved", "resolvedDate": "2026-03-20"})
        );
    }
}
