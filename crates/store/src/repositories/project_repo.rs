//! Repository for the `projects` collection.

use hygiene_core::project::Project;

use super::{decode, decode_all, decode_listing, encode, Decoded};
use crate::collection::Collection;
use crate::error::StoreError;
use crate::store::RecordStore;

const COLLECTION: Collection = Collection::Projects;

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// List all projects in store order.
    pub async fn list(store: &dyn RecordStore) -> Result<Vec<Project>, StoreError> {
        Ok(decode_all(COLLECTION, store.list(COLLECTION).await?))
    }

    /// Like [`Self::list`], but reports the records that did not decode.
    pub async fn list_decoded(store: &dyn RecordStore) -> Result<Decoded<Project>, StoreError> {
        Ok(decode_listing(COLLECTION, store.list(COLLECTION).await?))
    }

    pub async fn find_by_id(store: &dyn RecordStore, id: &str) -> Result<Option<Project>, StoreError> {
        store.get(COLLECTION, id).await?.map(decode).transpose()
    }

    /// Insert a new project, returning the stored record.
    pub async fn create(store: &dyn RecordStore, project: &Project) -> Result<Project, StoreError> {
        decode(store.create(COLLECTION, encode(project)?).await?)
    }

    /// Replace a project wholesale.
    pub async fn replace(
        store: &dyn RecordStore,
        id: &str,
        project: &Project,
    ) -> Result<Project, StoreError> {
        decode(store.replace(COLLECTION, id, encode(project)?).await?)
    }

    pub async fn delete(store: &dyn RecordStore, id: &str) -> Result<(), StoreError> {
        store.delete(COLLECTION, id).await
    }
}
