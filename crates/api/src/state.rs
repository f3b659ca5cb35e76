use std::sync::Arc;

use hygiene_core::evaluation::EvaluationContext;
use hygiene_core::types::Timestamp;
use hygiene_events::EmailDelivery;
use hygiene_store::RecordStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Record store client (HTTP in production, in-memory in tests).
    pub store: Arc<dyn RecordStore>,
    pub config: Arc<ServerConfig>,
    /// SMTP delivery; `None` when SMTP is not configured.
    pub mailer: Option<Arc<EmailDelivery>>,
}

impl AppState {
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    pub fn mailer(&self) -> Option<&EmailDelivery> {
        self.mailer.as_deref()
    }

    /// Evaluation inputs for a check run starting at `now`.
    pub fn evaluation_context(&self, now: Timestamp) -> EvaluationContext {
        EvaluationContext::new(now).with_outdated_threshold(self.config.outdated_threshold_days)
    }
}
