//! Record Store Client.
//!
//! The hygiene service keeps every record in an external table store
//! addressed as `{base}/{table}[/{id}]`. This crate provides:
//!
//! - [`RecordStore`]: the untyped JSON record interface.
//! - [`HttpRecordStore`]: the production implementation over `reqwest`.
//! - [`MemoryStore`]: an in-process implementation for tests and local runs.
//! - [`repositories`]: typed, zero-sized repositories per collection.

pub mod collection;
pub mod error;
pub mod http;
pub mod memory;
pub mod repositories;
pub mod store;

pub use collection::Collection;
pub use error::StoreError;
pub use http::HttpRecordStore;
pub use memory::MemoryStore;
pub use store::RecordStore;
