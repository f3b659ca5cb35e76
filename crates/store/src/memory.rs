//! In-process record store.
//!
//! [`MemoryStore`] keeps each collection as an insertion-ordered list behind
//! a `tokio::sync::RwLock`. It backs the API integration tests and can be
//! told to fail writes to a collection after a number of successes.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};

use crate::collection::Collection;
use crate::error::StoreError;
use crate::store::RecordStore;

/// Status reported by injected write failures.
pub const INJECTED_FAILURE_STATUS: u16 = 503;

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<Collection, Vec<Value>>>,
    /// Remaining successful writes per collection before writes start failing.
    write_budgets: Mutex<HashMap<Collection, usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append records to a collection without going through the write path.
    pub async fn seed(&self, collection: Collection, records: impl IntoIterator<Item = Value>) {
        self.tables
            .write()
            .await
            .entry(collection)
            .or_default()
            .extend(records);
    }

    /// Let `successes` more writes to `collection` succeed, then fail every
    /// later write with HTTP [`INJECTED_FAILURE_STATUS`].
    pub async fn fail_writes_after(&self, collection: Collection, successes: usize) {
        self.write_budgets.lock().await.insert(collection, successes);
    }

    /// Stop failing writes to `collection`.
    pub async fn heal(&self, collection: Collection) {
        self.write_budgets.lock().await.remove(&collection);
    }

    async fn admit_write(&self, collection: Collection) -> Result<(), StoreError> {
        let mut budgets = self.write_budgets.lock().await;
        match budgets.get_mut(&collection) {
            None => Ok(()),
            Some(0) => Err(StoreError::HttpStatus(INJECTED_FAILURE_STATUS)),
            Some(remaining) => {
                *remaining -= 1;
                Ok(())
            }
        }
    }
}

fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

fn position(records: &[Value], id: &str) -> Option<usize> {
    records.iter().position(|r| record_id(r) == Some(id))
}

fn require_object(record: Value) -> Result<serde_json::Map<String, Value>, StoreError> {
    match record {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Decode(serde::de::Error::custom(format!(
            "expected a JSON object record, got {other}"
        )))),
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(&collection)
            .and_then(|records| records.iter().find(|r| record_id(r) == Some(id)))
            .cloned())
    }

    async fn create(&self, collection: Collection, record: Value) -> Result<Value, StoreError> {
        let mut map = require_object(record)?;
        self.admit_write(collection).await?;
        if !map.get("id").is_some_and(Value::is_string) {
            map.insert("id".into(), Value::String(hygiene_core::types::new_record_id()));
        }
        let record = Value::Object(map);
        self.tables
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn replace(
        &self,
        collection: Collection,
        id: &str,
        record: Value,
    ) -> Result<Value, StoreError> {
        let mut map = require_object(record)?;
        self.admit_write(collection).await?;
        map.insert("id".into(), Value::String(id.to_string()));
        let record = Value::Object(map);

        let mut tables = self.tables.write().await;
        let records = tables.entry(collection).or_default();
        let idx = position(records, id).ok_or_else(|| StoreError::not_found(collection, id))?;
        records[idx] = record.clone();
        Ok(record)
    }

    async fn patch(
        &self,
        collection: Collection,
        id: &str,
        patch: Value,
    ) -> Result<Value, StoreError> {
        let patch = require_object(patch)?;
        self.admit_write(collection).await?;

        let mut tables = self.tables.write().await;
        let records = tables.entry(collection).or_default();
        let idx = position(records, id).ok_or_else(|| StoreError::not_found(collection, id))?;
        if let Value::Object(existing) = &mut records[idx] {
            existing.extend(patch.into_iter().filter(|(k, _)| k != "id"));
        }
        Ok(records[idx].clone())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        self.admit_write(collection).await?;
        let mut tables = self.tables.write().await;
        let records = tables.entry(collection).or_default();
        let idx = position(records, id).ok_or_else(|| StoreError::not_found(collection, id))?;
        records.remove(idx);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
