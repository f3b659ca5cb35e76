//! Repository for the `hygiene_issues` collection.
//!
//! Issues are created by check runs and only ever patched by resolution;
//! there is no general update.

use std::collections::HashSet;

use hygiene_core::issue::{open_key_of, HygieneIssue, IssueKey, IssueResolutionPatch};

use super::{decode, decode_all, encode};
use crate::collection::Collection;
use crate::error::StoreError;
use crate::store::RecordStore;

const COLLECTION: Collection = Collection::HygieneIssues;

pub struct IssueRepo;

impl IssueRepo {
    pub async fn list(store: &dyn RecordStore) -> Result<Vec<HygieneIssue>, StoreError> {
        Ok(decode_all(COLLECTION, store.list(COLLECTION).await?))
    }

    /// Keys of every non-resolved stored issue, read from the raw records.
    ///
    /// Issues that would be skipped by [`Self::list`] are still counted.
    pub async fn open_keys(store: &dyn RecordStore) -> Result<HashSet<IssueKey>, StoreError> {
        Ok(store
            .list(COLLECTION)
            .await?
            .iter()
            .filter_map(open_key_of)
            .collect())
    }

    pub async fn find_by_id(
        store: &dyn RecordStore,
        id: &str,
    ) -> Result<Option<HygieneIssue>, StoreError> {
        store.get(COLLECTION, id).await?.map(decode).transpose()
    }

    pub async fn create(
        store: &dyn RecordStore,
        issue: &HygieneIssue,
    ) -> Result<HygieneIssue, StoreError> {
        decode(store.create(COLLECTION, encode(issue)?).await?)
    }

    /// Apply the resolution patch (`status`, `resolvedDate`) to one issue.
    pub async fn apply_resolution(
        store: &dyn RecordStore,
        id: &str,
        patch: &IssueResolutionPatch,
    ) -> Result<HygieneIssue, StoreError> {
        decode(store.patch(COLLECTION, id, encode(patch)?).await?)
    }

    pub async fn delete(store: &dyn RecordStore, id: &str) -> Result<(), StoreError> {
        store.delete(COLLECTION, id).await
    }
}
