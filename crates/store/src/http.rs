//! Record store over HTTP.
//!
//! [`HttpRecordStore`] speaks the table API: `GET {base}/{table}` returns
//! `{ "data": [...] }`, single-record calls address `{base}/{table}/{id}`.
//! Every call is made once with the client-wide timeout; a non-2xx status
//! surfaces as [`StoreError::HttpStatus`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::collection::Collection;
use crate::error::StoreError;
use crate::store::RecordStore;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    data: Vec<Value>,
}

// ---------------------------------------------------------------------------
// HttpRecordStore
// ---------------------------------------------------------------------------

/// HTTP client for the external record store.
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpRecordStore {
    /// Build a store client rooted at `base_url` (e.g. `http://host/tables`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let base_url =
            Url::parse(base_url).map_err(|e| StoreError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidBaseUrl(base_url.to_string()));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, collection: Collection, id: Option<&str>) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| StoreError::InvalidBaseUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().push(collection.as_str());
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    /// Send one request and return its status and raw body.
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<(StatusCode, Vec<u8>), StoreError> {
        tracing::debug!(%method, %url, "Record store request");
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok((status, body.to_vec()))
    }

    async fn write(
        &self,
        method: Method,
        collection: Collection,
        id: Option<&str>,
        body: &Value,
    ) -> Result<Value, StoreError> {
        let (status, body) = self.send(method, self.url(collection, id)?, Some(body)).await?;
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(StoreError::not_found(collection, id));
            }
        }
        check_status(status)?;
        decode_body(&body)
    }
}

/// Decode a response body, treating an empty body as `null`.
fn decode_body(body: &[u8]) -> Result<Value, StoreError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(body)?)
}

fn check_status(status: StatusCode) -> Result<(), StoreError> {
    if status.is_success() {
        return Ok(());
    }
    tracing::warn!(status = status.as_u16(), "Record store returned an error status");
    Err(StoreError::HttpStatus(status.as_u16()))
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        let (status, body) = self.send(Method::GET, self.url(collection, None)?, None).await?;
        check_status(status)?;
        let envelope: ListEnvelope = serde_json::from_value(decode_body(&body)?)?;
        Ok(envelope.data)
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError> {
        let (status, body) = self
            .send(Method::GET, self.url(collection, Some(id))?, None)
            .await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        check_status(status)?;
        match decode_body(&body)? {
            Value::Null => Ok(None),
            record => Ok(Some(record)),
        }
    }

    async fn create(&self, collection: Collection, record: Value) -> Result<Value, StoreError> {
        let stored = self.write(Method::POST, collection, None, &record).await?;
        Ok(if stored.is_null() { record } else { stored })
    }

    async fn replace(
        &self,
        collection: Collection,
        id: &str,
        record: Value,
    ) -> Result<Value, StoreError> {
        let stored = self.write(Method::PUT, collection, Some(id), &record).await?;
        Ok(if stored.is_null() { record } else { stored })
    }

    async fn patch(
        &self,
        collection: Collection,
        id: &str,
        patch: Value,
    ) -> Result<Value, StoreError> {
        self.write(Method::PATCH, collection, Some(id), &patch).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let (status, _) = self
            .send(Method::DELETE, self.url(collection, Some(id))?, None)
            .await?;
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::not_found(collection, id));
        }
        check_status(status)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
