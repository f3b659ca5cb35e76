//! Resolve executor.
//!
//! Writes, in order: the issue patch, the resolution notification, then the
//! `notification_sent` and `issue_resolved` audit entries. Resolving an
//! already-resolved issue writes nothing.

use hygiene_core::issue::HygieneIssue;
use hygiene_core::resolution::{resolve, ResolveOutcome};
use hygiene_core::types::Timestamp;
use hygiene_events::EmailDelivery;
use hygiene_store::repositories::{AuditLogRepo, IssueRepo, NotificationRepo};
use hygiene_store::{Collection, RecordStore};

use crate::error::{AppError, AppResult};

/// Whether the call changed anything.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Now(HygieneIssue),
    Already(HygieneIssue),
}

impl Resolved {
    pub fn into_issue(self) -> HygieneIssue {
        match self {
            Resolved::Now(issue) | Resolved::Already(issue) => issue,
        }
    }
}

/// Resolve the issue `id` as of `now`.
pub async fn resolve_issue(
    store: &dyn RecordStore,
    mailer: Option<&EmailDelivery>,
    id: &str,
    now: Timestamp,
) -> AppResult<Resolved> {
    let issue = IssueRepo::find_by_id(store, id)
        .await?
        .ok_or_else(|| AppError::not_found(Collection::HygieneIssues.entity(), id))?;

    let resolution = match resolve(issue, now.date_naive(), now) {
        ResolveOutcome::AlreadyResolved(issue) => {
            tracing::debug!(issue_id = %issue.id, "Issue already resolved");
            return Ok(Resolved::Already(issue));
        }
        ResolveOutcome::Resolved(resolution) => resolution,
    };

    IssueRepo::apply_resolution(store, id, &resolution.patch).await?;
    NotificationRepo::create(store, &resolution.notification).await?;
    for entry in &resolution.audit_entries {
        AuditLogRepo::append(store, entry).await?;
    }
    tracing::info!(issue_id = %id, rule = %resolution.issue.rule_name, "Issue resolved");

    super::deliver_best_effort(mailer, &resolution.notification).await;
    Ok(Resolved::Now(resolution.issue))
}
