//! Repository for the `hygiene_rules` collection.

use hygiene_core::rule::HygieneRule;

use super::{decode, decode_all, decode_listing, encode, Decoded};
use crate::collection::Collection;
use crate::error::StoreError;
use crate::store::RecordStore;

const COLLECTION: Collection = Collection::HygieneRules;

/// Provides CRUD operations for hygiene rules.
pub struct RuleRepo;

impl RuleRepo {
    /// List all rules, enabled or not, in store order.
    pub async fn list(store: &dyn RecordStore) -> Result<Vec<HygieneRule>, StoreError> {
        Ok(decode_all(COLLECTION, store.list(COLLECTION).await?))
    }

    /// Like [`Self::list`], but reports the records that did not decode.
    pub async fn list_decoded(store: &dyn RecordStore) -> Result<Decoded<HygieneRule>, StoreError> {
        Ok(decode_listing(COLLECTION, store.list(COLLECTION).await?))
    }

    pub async fn find_by_id(
        store: &dyn RecordStore,
        id: &str,
    ) -> Result<Option<HygieneRule>, StoreError> {
        store.get(COLLECTION, id).await?.map(decode).transpose()
    }

    pub async fn create(store: &dyn RecordStore, rule: &HygieneRule) -> Result<HygieneRule, StoreError> {
        decode(store.create(COLLECTION, encode(rule)?).await?)
    }

    pub async fn replace(
        store: &dyn RecordStore,
        id: &str,
        rule: &HygieneRule,
    ) -> Result<HygieneRule, StoreError> {
        decode(store.replace(COLLECTION, id, encode(rule)?).await?)
    }

    /// Flip only the `enabled` flag.
    pub async fn set_enabled(
        store: &dyn RecordStore,
        id: &str,
        enabled: bool,
    ) -> Result<HygieneRule, StoreError> {
        let patch = serde_json::json!({ "enabled": enabled });
        decode(store.patch(COLLECTION, id, patch).await?)
    }

    pub async fn delete(store: &dyn RecordStore, id: &str) -> Result<(), StoreError> {
        store.delete(COLLECTION, id).await
    }
}
