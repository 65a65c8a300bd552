//! HTTP client for the catalog endpoint.

use std::sync::Arc;

use reqwest::StatusCode;
use tracing::{debug, instrument};
use url::Url;
use vitrine_core::Catalog;

use super::{CatalogSource, FetchError};
use crate::config::CatalogConfig;

/// Client for the catalog endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: Url,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client: builder.build()?,
                endpoint: config.endpoint.clone(),
            }),
        })
    }

    /// The endpoint this client fetches from.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// The underlying HTTP client, shared with other requests to the same
    /// hosts.
    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.inner.client
    }

    /// Fetch and decode the catalog.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the request fails, `FetchError::Status`
    /// for any status other than 200, and `FetchError::Decode` if the body does
    /// not match the catalog shape.
    #[instrument(skip(self), fields(endpoint = %self.inner.endpoint))]
    pub async fn fetch_catalog(&self) -> Result<Catalog, FetchError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoint.clone())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog endpoint returned non-200 status"
            );
            return Err(FetchError::Status(status.as_u16()));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        let catalog: Catalog = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to decode catalog response"
            );
            FetchError::Decode(e)
        })?;

        debug!(products = catalog.products.len(), "Catalog fetched");
        Ok(catalog)
    }
}

impl CatalogSource for CatalogClient {
    async fn fetch(&self) -> Result<Catalog, FetchError> {
        self.fetch_catalog().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_new_keeps_endpoint() {
        let config = CatalogConfig {
            endpoint: Url::parse("http://127.0.0.1:9/catalog").unwrap(),
            request_timeout: Some(Duration::from_secs(2)),
        };
        let client = CatalogClient::new(&config).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://127.0.0.1:9/catalog");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = CatalogConfig {
            endpoint: Url::parse(&format!("http://{addr}/catalog")).unwrap(),
            request_timeout: Some(Duration::from_secs(5)),
        };
        let client = CatalogClient::new(&config).unwrap();

        let result = client.fetch_catalog().await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
