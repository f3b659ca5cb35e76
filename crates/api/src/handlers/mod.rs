//! HTTP request handlers, one module per resource.

pub mod audit;
pub mod dashboard;
pub mod hygiene;
pub mod issue;
pub mod notification;
pub mod project;
pub mod rule;

use hygiene_core::audit::AuditLogEntry;
use hygiene_store::repositories::AuditLogRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// Append an operator-action audit entry.
pub(crate) async fn record_audit(state: &AppState, entry: AuditLogEntry) -> AppResult<()> {
    AuditLogRepo::append(state.store(), &entry).await?;
    Ok(())
}
