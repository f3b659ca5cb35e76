//! Repository for the `notifications` collection. Notifications are
//! append-only.

use hygiene_core::notification::Notification;

use super::{decode, decode_all, encode};
use crate::collection::Collection;
use crate::error::StoreError;
use crate::store::RecordStore;

const COLLECTION: Collection = Collection::Notifications;

pub struct NotificationRepo;

impl NotificationRepo {
    /// List notifications, most recently sent first.
    pub async fn list(store: &dyn RecordStore) -> Result<Vec<Notification>, StoreError> {
        let mut notifications: Vec<Notification> =
            decode_all(COLLECTION, store.list(COLLECTION).await?);
        // Later appends win ties.
        notifications.reverse();
        notifications.sort_by(|a, b| b.sent_date.cmp(&a.sent_date));
        Ok(notifications)
    }

    pub async fn create(
        store: &dyn RecordStore,
        notification: &Notification,
    ) -> Result<Notification, StoreError> {
        decode(store.create(COLLECTION, encode(notification)?).await?)
    }
}
