//! # Catalog Sources
//!
//! Where raw product records come from: a remote JSON document fetched once
//! per page load, or an inline literal for tests and embedded deployments.
//! One request, no timeout, no retry; a network failure simply surfaces as
//! a failed load.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

/// A provider of the raw catalog payload.
///
/// Implementations return the decoded JSON as-is; the loader is responsible
/// for rejecting payloads that are not arrays.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<Value>;
}

/// Fetches the catalog from a URL (the original `products.json`)
pub struct HttpCatalogSource {
    url: String,
    client: reqwest::Client,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Value> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch catalog from {}", self.url))?;

        let response = response
            .error_for_status()
            .with_context(|| format!("Catalog request to {} returned an error", self.url))?;

        response
            .json()
            .await
            .context("Failed to decode catalog JSON")
    }
}

/// Serves an in-memory payload; used by tests and builds that ship the
/// catalog alongside the application.
pub struct InlineCatalogSource {
    payload: Value,
}

impl InlineCatalogSource {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }

    pub fn from_records(records: Vec<Value>) -> Self {
        Self {
            payload: Value::Array(records),
        }
    }
}

#[async_trait]
impl CatalogSource for InlineCatalogSource {
    async fn fetch(&self) -> Result<Value> {
        Ok(self.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_inline_source_returns_payload() {
        let source = InlineCatalogSource::from_records(vec![json!({"id": "a"})]);
        let payload = source.fetch().await.unwrap();
        assert_eq!(payload, json!([{"id": "a"}]));
    }

    #[tokio::test]
    async fn test_inline_source_passes_non_arrays_through() {
        // Array validation is the loader's job, not the source's
        let source = InlineCatalogSource::new(json!({"oops": true}));
        let payload = source.fetch().await.unwrap();
        assert!(payload.is_object());
    }
}
