//! Compliance rate, project health and dashboard statistics.
//!
//! All functions are pure and take already-loaded records.

use std::collections::HashSet;

use serde::Serialize;

use crate::audit::{AuditAction, AuditLogEntry};
use crate::issue::{HygieneIssue, IssueStatus};
use crate::notification::{Notification, NotificationType};
use crate::project::{HealthStatus, Project, ProjectWithHealth};
use crate::rule::{HygieneRule, Severity};
use crate::types::Date;

/// Non-resolved issue count at which a project is flagged as `warning`.
pub const WARNING_ISSUE_COUNT: usize = 3;

/// Default window of the detected/resolved trend.
pub const DEFAULT_TREND_DAYS: u32 = 7;

/// Label for issues whose category is blank.
const UNKNOWN_CATEGORY: &str = "Unknown";

// ---------------------------------------------------------------------------
// Compliance
// ---------------------------------------------------------------------------

/// Percentage of projects without open issues, rounded half up.
///
/// Returns 0 when there are no projects.
pub fn compliance_rate(total_projects: usize, projects_with_open_issues: usize) -> u32 {
    if total_projects == 0 {
        return 0;
    }
    let total = total_projects as u64;
    let healthy = total.saturating_sub(projects_with_open_issues as u64);
    ((200 * healthy + total) / (2 * total)) as u32
}

/// Distinct projects (among `projects`) with at least one non-resolved issue.
///
/// Issues pointing at projects that no longer exist are not counted.
pub fn projects_with_open_issues(projects: &[Project], issues: &[HygieneIssue]) -> usize {
    let known: HashSet<&str> = projects.iter().map(|p| p.id.as_str()).collect();
    issues
        .iter()
        .filter(|i| i.is_unresolved() && known.contains(i.project_id.as_str()))
        .map(|i| i.project_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Derive a project's health from its issues (resolved ones are ignored).
pub fn derive_health_status<'a, I>(project_issues: I) -> HealthStatus
where
    I: IntoIterator<Item = &'a HygieneIssue>,
{
    let mut open = 0;
    let mut has_high = false;
    for issue in project_issues.into_iter().filter(|i| i.is_unresolved()) {
        match issue.severity {
            Severity::Critical => return HealthStatus::Critical,
            Severity::High => has_high = true,
            Severity::Medium | Severity::Low => {}
        }
        open += 1;
    }

    if has_high || open >= WARNING_ISSUE_COUNT {
        HealthStatus::Warning
    } else {
        HealthStatus::Healthy
    }
}

/// Annotate each project with its derived health.
pub fn with_health(projects: Vec<Project>, issues: &[HygieneIssue]) -> Vec<ProjectWithHealth> {
    projects
        .into_iter()
        .map(|project| {
            let health_status =
                derive_health_status(issues.iter().filter(|i| i.project_id == project.id));
            ProjectWithHealth {
                project,
                health_status,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Dashboard statistics
// ---------------------------------------------------------------------------

/// Headline figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueKpis {
    pub total_issues: usize,
    pub pending_issues: usize,
    pub resolved_today: usize,
    pub compliance_rate: u32,
}

pub fn issue_kpis(projects: &[Project], issues: &[HygieneIssue], today: Date) -> IssueKpis {
    IssueKpis {
        total_issues: issues.len(),
        pending_issues: issues.iter().filter(|i| i.is_unresolved()).count(),
        resolved_today: issues
            .iter()
            .filter(|i| i.status == IssueStatus::Resolved && i.resolved_date == Some(today))
            .count(),
        compliance_rate: compliance_rate(
            projects.len(),
            projects_with_open_issues(projects, issues),
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_projects: usize,
    pub active_projects: usize,
    pub projects_with_issues: usize,
    pub healthy_projects: usize,
}

pub fn project_stats(projects: &[Project], issues: &[HygieneIssue]) -> ProjectStats {
    let with_issues = projects_with_open_issues(projects, issues);
    ProjectStats {
        total_projects: projects.len(),
        active_projects: projects.iter().filter(|p| p.is_active()).count(),
        projects_with_issues: with_issues,
        healthy_projects: projects.len() - with_issues,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleStats {
    pub total_rules: usize,
    pub active_rules: usize,
    pub critical_rules: usize,
    /// Distinct rules with an issue detected today.
    pub triggered_today: usize,
}

pub fn rule_stats(rules: &[HygieneRule], issues: &[HygieneIssue], today: Date) -> RuleStats {
    RuleStats {
        total_rules: rules.len(),
        active_rules: rules.iter().filter(|r| r.enabled).count(),
        critical_rules: rules
            .iter()
            .filter(|r| r.rule_severity == Severity::Critical)
            .count(),
        triggered_today: issues
            .iter()
            .filter(|i| i.detected_date == today)
            .map(|i| i.rule_id.as_str())
            .collect::<HashSet<_>>()
            .len(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationStats {
    pub total_notifications: usize,
    pub issue_notifications: usize,
    pub resolution_notifications: usize,
    pub sent_today: usize,
}

pub fn notification_stats(notifications: &[Notification], today: Date) -> NotificationStats {
    let of_type = |t: NotificationType| {
        notifications
            .iter()
            .filter(|n| n.notification_type == t)
            .count()
    };
    NotificationStats {
        total_notifications: notifications.len(),
        issue_notifications: of_type(NotificationType::IssueDetected),
        resolution_notifications: of_type(NotificationType::IssueResolved),
        sent_today: notifications
            .iter()
            .filter(|n| n.sent_date.date_naive() == today)
            .count(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStats {
    pub total_events: usize,
    pub today_events: usize,
    pub hygiene_checks: usize,
    pub resolution_events: usize,
}

pub fn audit_stats(entries: &[AuditLogEntry], today: Date) -> AuditStats {
    let of_action = |a: AuditAction| entries.iter().filter(|e| e.action == a).count();
    AuditStats {
        total_events: entries.len(),
        today_events: entries
            .iter()
            .filter(|e| e.timestamp.date_naive() == today)
            .count(),
        hygiene_checks: of_action(AuditAction::HygieneCheck),
        resolution_events: of_action(AuditAction::IssueResolved),
    }
}

/// Issues detected and resolved on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: Date,
    pub detected: usize,
    pub resolved: usize,
}

/// Daily detected/resolved counts for the `days` days ending `today`,
/// oldest first.
pub fn issue_trend(issues: &[HygieneIssue], today: Date, days: u32) -> Vec<TrendPoint> {
    (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(chrono::Days::new(u64::from(offset))))
        .map(|date| TrendPoint {
            date,
            detected: issues.iter().filter(|i| i.detected_date == date).count(),
            resolved: issues
                .iter()
                .filter(|i| i.resolved_date == Some(date))
                .count(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Issue counts per category, in order of first appearance.
pub fn issues_by_category(issues: &[HygieneIssue]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for issue in issues {
        let category = if issue.issue_type.trim().is_empty() {
            UNKNOWN_CATEGORY
        } else {
            issue.issue_type.as_str()
        };
        match counts.iter_mut().find(|c| c.category == category) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                category: category.to_string(),
                count: 1,
            }),
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> Date {
        Date::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn issue(project: &str, severity: Severity, status: IssueStatus) -> HygieneIssue {
        HygieneIssue {
            id: format!("i-{project}-{}", severity.as_str()),
            project_id: project.into(),
            rule_id: "r-1".into(),
            project_code: None,
            project_name: None,
            project_manager: None,
            pm_email: None,
            rule_name: "rule".into(),
            issue_type: "data_quality".into(),
            severity,
            description: None,
            correction_action: None,
            detected_date: day(14),
            status,
            resolved_date: None,
        }
    }

    fn project(id: &str) -> Project {
        Project {
            id: id.into(),
            ..Default::default()
        }
    }

    // -----------------------------------------------------------------------
    // compliance_rate
    // -----------------------------------------------------------------------

    #[test]
    fn compliance_ten_projects_three_with_issues() {
        assert_eq!(compliance_rate(10, 3), 70);
    }

    #[test]
    fn compliance_no_projects_is_zero() {
        assert_eq!(compliance_rate(0, 0), 0);
    }

    #[test]
    fn compliance_all_projects_with_issues_is_zero() {
        assert_eq!(compliance_rate(5, 5), 0);
    }

    #[test]
    fn compliance_rounds_half_up() {
        assert_eq!(compliance_rate(8, 1), 88);
        assert_eq!(compliance_rate(3, 1), 67);
        assert_eq!(compliance_rate(3, 2), 33);
        assert_eq!(compliance_rate(200, 1), 100);
    }

    #[test]
    fn compliance_never_negative() {
        assert_eq!(compliance_rate(2, 5), 0);
    }

    #[test]
    fn open_project_count_is_distinct_and_ignores_resolved() {
        let projects = vec![project("a"), project("b"), project("c")];
        let issues = vec![
            issue("a", Severity::Low, IssueStatus::Open),
            issue("a", Severity::High, IssueStatus::Open),
            issue("b", Severity::Low, IssueStatus::Resolved),
            issue("c", Severity::Low, IssueStatus::InProgress),
            issue("deleted", Severity::Low, IssueStatus::Open),
        ];
        assert_eq!(projects_with_open_issues(&projects, &issues), 2);
    }

    // -----------------------------------------------------------------------
    // Health
    // -----------------------------------------------------------------------

    #[test]
    fn no_issues_is_healthy() {
        let none: [HygieneIssue; 0] = [];
        assert_eq!(derive_health_status(&none), HealthStatus::Healthy);
    }

    #[test]
    fn any_critical_is_critical() {
        let issues = [
            issue("a", Severity::Low, IssueStatus::Open),
            issue("a", Severity::Critical, IssueStatus::Open),
        ];
        assert_eq!(derive_health_status(&issues), HealthStatus::Critical);
    }

    #[test]
    fn high_is_warning() {
        let issues = [issue("a", Severity::High, IssueStatus::Open)];
        assert_eq!(derive_health_status(&issues), HealthStatus::Warning);
    }

    #[test]
    fn three_low_issues_is_warning() {
        let issues = [
            issue("a", Severity::Low, IssueStatus::Open),
            issue("a", Severity::Medium, IssueStatus::Open),
            issue("a", Severity::Low, IssueStatus::InProgress),
        ];
        assert_eq!(derive_health_status(&issues), HealthStatus::Warning);
    }

    #[test]
    fn two_low_issues_is_healthy() {
        let issues = [
            issue("a", Severity::Low, IssueStatus::Open),
            issue("a", Severity::Medium, IssueStatus::Open),
        ];
        assert_eq!(derive_health_status(&issues), HealthStatus::Healthy);
    }

    #[test]
    fn resolved_critical_is_ignored() {
        let issues = [issue("a", Severity::Critical, IssueStatus::Resolved)];
        assert_eq!(derive_health_status(&issues), HealthStatus::Healthy);
    }

    #[test]
    fn with_health_matches_issues_by_project() {
        let issues = vec![issue("b", Severity::Critical, IssueStatus::Open)];
        let annotated = with_health(vec![project("a"), project("b")], &issues);
        assert_eq!(annotated[0].health_status, HealthStatus::Healthy);
        assert_eq!(annotated[1].health_status, HealthStatus::Critical);
    }

    // -----------------------------------------------------------------------
    // Dashboard statistics
    // -----------------------------------------------------------------------

    #[test]
    fn kpis_count_pending_and_resolved_today() {
        let projects = vec![project("a"), project("b")];
        let mut done = issue("b", Severity::Low, IssueStatus::Resolved);
        done.resolved_date = Some(day(14));
        let issues = vec![issue("a", Severity::Low, IssueStatus::Open), done];

        let kpis = issue_kpis(&projects, &issues, day(14));
        assert_eq!(
            kpis,
            IssueKpis {
                total_issues: 2,
                pending_issues: 1,
                resolved_today: 1,
                compliance_rate: 50,
            }
        );
    }

    #[test]
    fn project_stats_count_active_statuses() {
        let mut active = project("a");
        active.project_status = Some("active".into());
        let mut exec = project("b");
        exec.project_status = Some("execution".into());
        let closed = project("c");
        let issues = vec![issue("c", Severity::Low, IssueStatus::Open)];

        let stats = project_stats(&[active, exec, closed], &issues);
        assert_eq!(stats.active_projects, 2);
        assert_eq!(stats.projects_with_issues, 1);
        assert_eq!(stats.healthy_projects, 2);
    }

    #[test]
    fn rule_stats_count_distinct_triggered_rules() {
        let rule: HygieneRule = serde_json::from_value(serde_json::json!({
            "id": "r-1", "ruleSeverity": "critical", "enabled": true
        }))
        .unwrap();
        let mut old = issue("b", Severity::Low, IssueStatus::Open);
        old.detected_date = day(1);
        old.rule_id = "r-2".into();
        let issues = vec![
            issue("a", Severity::Low, IssueStatus::Open),
            issue("b", Severity::Low, IssueStatus::Open),
            old,
        ];
        let stats = rule_stats(&[rule], &issues, day(14));
        assert_eq!(stats.total_rules, 1);
        assert_eq!(stats.active_rules, 1);
        assert_eq!(stats.critical_rules, 1);
        assert_eq!(stats.triggered_today, 1);
    }

    #[test]
    fn audit_stats_count_by_action_and_day() {
        let now = chrono::Utc.with_ymd_and_hms(2026, 3, 14, 8, 0, 0).unwrap();
        let yesterday = chrono::Utc.with_ymd_and_hms(2026, 3, 13, 8, 0, 0).unwrap();
        let entries = vec![
            AuditLogEntry::hygiene_check(0, 0, now),
            AuditLogEntry::hygiene_check(1, 0, yesterday),
            AuditLogEntry::new(AuditAction::IssueResolved, "issue", "i", "x", now),
        ];
        let stats = audit_stats(&entries, day(14));
        assert_eq!(stats.total_events, 3);
        assert_eq!(stats.today_events, 2);
        assert_eq!(stats.hygiene_checks, 2);
        assert_eq!(stats.resolution_events, 1);
    }

    #[test]
    fn trend_covers_window_oldest_first() {
        let mut resolved = issue("a", Severity::Low, IssueStatus::Resolved);
        resolved.detected_date = day(10);
        resolved.resolved_date = Some(day(13));
        let issues = vec![issue("b", Severity::Low, IssueStatus::Open), resolved];

        let trend = issue_trend(&issues, day(14), 7);
        assert_eq!(trend.len(), 7);
        assert_eq!(trend[0].date, day(8));
        assert_eq!(trend[6].date, day(14));
        assert_eq!(trend[2].detected, 1);
        assert_eq!(trend[5].resolved, 1);
        assert_eq!(trend[6].detected, 1);
    }

    #[test]
    fn categories_keep_first_seen_order_and_label_blank() {
        let mut blank = issue("a", Severity::Low, IssueStatus::Open);
        blank.issue_type = String::new();
        let mut other = issue("b", Severity::Low, IssueStatus::Open);
        other.issue_type = "timeliness".into();
        let issues = vec![
            issue("a", Severity::Low, IssueStatus::Open),
            other,
            blank,
            issue("c", Severity::Low, IssueStatus::Open),
        ];
        let counts = issues_by_category(&issues);
        assert_eq!(
            counts,
            vec![
                CategoryCount { category: "data_quality".into(), count: 2 },
                CategoryCount { category: "timeliness".into(), count: 1 },
                CategoryCount { category: "Unknown".into(), count: 1 },
            ]
        );
    }
}
