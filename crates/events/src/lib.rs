//! Outbound delivery for hygiene notifications.
//!
//! Notification records are produced by the domain core and persisted by the
//! API; this crate pushes them outside the service. The only channel is
//! e-mail over SMTP ([`EmailDelivery`]).

pub mod delivery;

pub use delivery::email::{EmailConfig, EmailDelivery, EmailError};
