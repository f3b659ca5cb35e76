//! Repository layer.
//!
//! Each repository is a zero-sized struct providing typed async operations
//! that accept `&dyn RecordStore` as the first argument.

pub mod audit_repo;
pub mod issue_repo;
pub mod notification_repo;
pub mod project_repo;
pub mod rule_repo;

pub use audit_repo::AuditLogRepo;
pub use issue_repo::IssueRepo;
pub use notification_repo::NotificationRepo;
pub use project_repo::ProjectRepo;
pub use rule_repo::RuleRepo;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::collection::Collection;
use crate::error::StoreError;

/// A stored record that could not be decoded and was left out of a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRecord {
    pub collection: &'static str,
    pub id: Option<String>,
    pub error: String,
}

/// A listing split into the records that decoded and the ones that did not.
#[derive(Debug, Clone)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedRecord>,
}

pub(crate) fn decode_listing<T: DeserializeOwned>(
    collection: Collection,
    records: Vec<Value>,
) -> Decoded<T> {
    let mut decoded = Decoded {
        records: Vec::with_capacity(records.len()),
        skipped: Vec::new(),
    };
    for record in records {
        let id = record.get("id").and_then(Value::as_str).map(str::to_string);
        match serde_json::from_value::<T>(record) {
            Ok(value) => decoded.records.push(value),
            Err(e) => {
                tracing::warn!(%collection, id = ?id, error = %e, "Skipping malformed record");
                decoded.skipped.push(SkippedRecord {
                    collection: collection.as_str(),
                    id,
                    error: e.to_string(),
                });
            }
        }
    }
    decoded
}

/// Decode every record of a listing, skipping records that do not fit `T`.
pub(crate) fn decode_all<T: DeserializeOwned>(collection: Collection, records: Vec<Value>) -> Vec<T> {
    decode_listing(collection, records).records
}

pub(crate) fn decode<T: DeserializeOwned>(record: Value) -> Result<T, StoreError> {
    Ok(serde_json::from_value(record)?)
}

pub(crate) fn encode<T: Serialize>(record: &T) -> Result<Value, StoreError> {
    Ok(serde_json::to_value(record)?)
}
