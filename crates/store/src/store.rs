use async_trait::async_trait;
use serde_json::Value;

use crate::collection::Collection;
use crate::error::StoreError;

/// Untyped access to the record store.
///
/// Records are JSON objects carrying a string `id`. Implementations must not
/// retry; callers decide what a failed write means.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every record in `collection`, in store order.
    async fn list(&self, collection: Collection) -> Result<Vec<Value>, StoreError>;

    /// A single record, or `None` if it does not exist.
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError>;

    /// Insert `record` and return the stored form.
    async fn create(&self, collection: Collection, record: Value) -> Result<Value, StoreError>;

    /// Replace the record at `id` wholesale.
    async fn replace(
        &self,
        collection: Collection,
        id: &str,
        record: Value,
    ) -> Result<Value, StoreError>;

    /// Merge the top-level keys of `patch` into the record at `id`.
    async fn patch(
        &self,
        collection: Collection,
        id: &str,
        patch: Value,
    ) -> Result<Value, StoreError>;

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError>;
}
