//! Effect executors for the two batch-style operations.
//!
//! The domain core decides what a check run or a resolution produces; the
//! functions here apply those records to the store in order and push
//! notifications out through the mailer when one is configured.

pub mod hygiene_check;
pub mod resolution;

use hygiene_core::notification::Notification;
use hygiene_events::{EmailDelivery, EmailError};

/// Mail a persisted notification if SMTP is configured.
///
/// The notification record is the source of truth; a delivery failure is
/// logged and otherwise ignored.
pub async fn deliver_best_effort(mailer: Option<&EmailDelivery>, notification: &Notification) {
    let Some(mailer) = mailer else {
        return;
    };
    match mailer.deliver(notification).await {
        Ok(()) => {}
        Err(EmailError::MissingRecipient(id)) => {
            tracing::debug!(notification_id = %id, "No recipient e-mail, skipping delivery");
        }
        Err(e) => {
            tracing::warn!(notification_id = %notification.id, error = %e, "Notification e-mail failed");
        }
    }
}
