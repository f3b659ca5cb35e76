//! Repository for the `audit_log` collection.
//!
//! The audit log is append-only: there is no update or delete.

use hygiene_core::audit::AuditLogEntry;

use super::{decode, decode_all, encode};
use crate::collection::Collection;
use crate::error::StoreError;
use crate::store::RecordStore;

const COLLECTION: Collection = Collection::AuditLog;

/// Append-only access to the audit trail.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Persist one entry.
    pub async fn append(
        store: &dyn RecordStore,
        entry: &AuditLogEntry,
    ) -> Result<AuditLogEntry, StoreError> {
        let stored = decode(store.create(COLLECTION, encode(entry)?).await?)?;
        tracing::debug!(action = entry.action.as_str(), entity_id = %entry.entity_id, "Audit entry recorded");
        Ok(stored)
    }

    /// List entries, newest first.
    pub async fn list(store: &dyn RecordStore) -> Result<Vec<AuditLogEntry>, StoreError> {
        let mut entries: Vec<AuditLogEntry> = decode_all(COLLECTION, store.list(COLLECTION).await?);
        // Later appends win ties.
        entries.reverse();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }
}
