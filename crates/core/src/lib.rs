//! Domain core for the FDO hygiene monitoring service.
//!
//! Everything in this crate is pure: records are passed in by the caller and
//! decisions come back as plain values. Persistence, delivery and HTTP live in
//! the `store`, `events` and `api` crates.

pub mod audit;
pub mod error;
pub mod evaluation;
pub mod issue;
pub mod metrics;
pub mod notification;
pub mod project;
pub mod reconciliation;
pub mod resolution;
pub mod rule;
pub mod search;
pub mod types;
