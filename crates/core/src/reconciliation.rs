//! The hygiene check batch: evaluate every project against every enabled
//! rule and decide which new issues to open.
//!
//! [`run_check`] makes no writes. It returns a [`CheckReport`] listing, in
//! the order they must be applied, the records each detection produces. The
//! API crate's executor persists them. Because the dedup set includes every
//! non-resolved issue already stored, re-running the batch after a partial
//! failure only produces the detections that were not persisted.

use std::collections::HashSet;

use crate::audit::{entity_types, AuditAction, AuditLogEntry};
use crate::evaluation::{evaluate, EvaluationContext};
use crate::issue::{HygieneIssue, IssueKey};
use crate::notification::Notification;
use crate::project::Project;
use crate::rule::HygieneRule;

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Everything one detected violation produces, in application order:
/// the issue, its notification, then the audit entries.
#[derive(Debug, Clone)]
pub struct Detection {
    pub issue: HygieneIssue,
    pub notification: Notification,
    /// `notification_sent` followed by `issue_detected`.
    pub audit_entries: Vec<AuditLogEntry>,
}

/// Outcome of one check run.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Detections in evaluation order (projects outer, rules inner).
    pub detections: Vec<Detection>,
    /// Number of new issues; equals `detections.len()`.
    pub issues_detected: usize,
    /// Number of (project, rule) pairs evaluated.
    pub pairs_evaluated: usize,
    /// The closing `hygiene_check` entry, assuming every detection persists.
    pub summary: AuditLogEntry,
}

impl CheckReport {
    pub fn created_issues(&self) -> impl Iterator<Item = &HygieneIssue> {
        self.detections.iter().map(|d| &d.issue)
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.detections.iter().map(|d| &d.notification)
    }

    /// All audit entries in application order, summary last.
    pub fn audit_entries(&self) -> impl Iterator<Item = &AuditLogEntry> {
        self.detections
            .iter()
            .flat_map(|d| d.audit_entries.iter())
            .chain(std::iter::once(&self.summary))
    }
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// Run one hygiene check over the given snapshot.
///
/// Disabled rules are skipped. A violation opens a new issue only when no
/// non-resolved issue exists for the same `(projectId, ruleId)`, counting
/// issues opened earlier in this same run.
pub fn run_check(
    projects: &[Project],
    rules: &[HygieneRule],
    existing_issues: &[HygieneIssue],
    ctx: &EvaluationContext,
) -> CheckReport {
    let open_keys = existing_issues
        .iter()
        .filter(|i| i.is_unresolved())
        .map(HygieneIssue::key)
        .collect();
    run_check_against(projects, rules, open_keys, ctx)
}

/// [`run_check`] with the dedup set given directly as the keys of every
/// non-resolved stored issue.
///
/// The executor builds `open_keys` from raw records with
/// [`crate::issue::open_key_of`], so stored issues that no longer decode
/// still block duplicates.
pub fn run_check_against(
    projects: &[Project],
    rules: &[HygieneRule],
    mut open_keys: HashSet<IssueKey>,
    ctx: &EvaluationContext,
) -> CheckReport {
    let active_rules: Vec<&HygieneRule> = rules.iter().filter(|r| r.enabled).collect();

    let mut detections = Vec::new();
    let mut pairs_evaluated = 0;

    for project in projects {
        for rule in &active_rules {
            pairs_evaluated += 1;
            if !evaluate(project, rule, ctx) {
                continue;
            }
            let key = (project.id.clone(), rule.id.clone());
            if open_keys.contains(&key) {
                continue;
            }
            open_keys.insert(key);
            detections.push(detect(project, rule, ctx));
        }
    }

    let issues_detected = detections.len();
    CheckReport {
        detections,
        issues_detected,
        pairs_evaluated,
        summary: AuditLogEntry::hygiene_check(issues_detected, 0, ctx.now),
    }
}

fn detect(project: &Project, rule: &HygieneRule, ctx: &EvaluationContext) -> Detection {
    let issue = HygieneIssue::detected(project, rule, ctx.today());
    let notification = Notification::detection(&issue, ctx.now);

    let sent = AuditLogEntry::new(
        AuditAction::NotificationSent,
        entity_types::NOTIFICATION,
        notification.id.clone(),
        "Issue notification sent",
        ctx.now,
    )
    .with_details(serde_json::json!({
        "issueId": issue.id,
        "recipientEmail": notification.recipient_email,
    }));

    let detected = AuditLogEntry::new(
        AuditAction::IssueDetected,
        entity_types::ISSUE,
        issue.id.clone(),
        format!(
            "Issue detected: {} for {}",
            rule.rule_name,
            project.display_name()
        ),
        ctx.now,
    )
    .with_details(serde_json::json!({
        "projectId": project.id,
        "ruleId": rule.id,
        "severity": rule.rule_severity,
    }));

    Detection {
        issue,
        notification,
        audit_entries: vec![sent, detected],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
