use crate::collection::Collection;

/// Error type for record store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request failed (network, DNS, timeout, etc.).
    #[error("Record store request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with a non-2xx status code.
    #[error("Record store returned HTTP {0}")]
    HttpStatus(u16),

    /// A record or response body did not have the expected shape.
    #[error("Record store payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    /// The addressed record does not exist.
    #[error("{} not found in {collection}: {id}", collection.entity())]
    NotFound { collection: Collection, id: String },

    /// The configured base URL cannot address tables.
    #[error("Invalid record store base URL: {0}")]
    InvalidBaseUrl(String),
}

impl StoreError {
    pub fn not_found(collection: Collection, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection,
            id: id.into(),
        }
    }
}
