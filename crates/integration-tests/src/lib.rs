//! Integration tests for Vitrine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrine-integration-tests
//! ```
//!
//! Tests never touch the network beyond loopback: [`StubCatalog`] serves a
//! canned response from an ephemeral local port and the storefront client
//! is pointed at it.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::http::{StatusCode, header};
use axum::routing::get;
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use url::Url;
use vitrine_storefront::config::{CatalogConfig, StorefrontConfig};

/// Path the stub serves the catalog on.
pub const CATALOG_PATH: &str = "/v2/catalog";

/// A local HTTP server standing in for the remote catalog endpoint.
///
/// The server task is aborted on drop.
pub struct StubCatalog {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl StubCatalog {
    /// Serve `body` as JSON with status 200.
    ///
    /// # Panics
    ///
    /// Panics if the loopback listener cannot be bound.
    pub async fn json(body: &Value) -> Self {
        Self::raw(StatusCode::OK, body.to_string()).await
    }

    /// Serve `body` verbatim with the given status.
    ///
    /// # Panics
    ///
    /// Panics if the loopback listener cannot be bound.
    #[allow(clippy::expect_used)]
    pub async fn raw(status: StatusCode, body: impl Into<String>) -> Self {
        let body: String = body.into();
        let app = Router::new().route(
            CATALOG_PATH,
            get(move || {
                let body = body.clone();
                async move { (status, [(header::CONTENT_TYPE, "application/json")], body) }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let addr = listener.local_addr().expect("Failed to read stub address");

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, handle }
    }

    /// Full URL of the stub catalog.
    ///
    /// # Panics
    ///
    /// Panics if the bound address does not form a valid URL.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}{CATALOG_PATH}", self.addr)).expect("Invalid stub URL")
    }

    /// Storefront configuration pointing at this stub.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            catalog: CatalogConfig {
                endpoint: self.url(),
                request_timeout: Some(Duration::from_secs(5)),
            },
            ..StorefrontConfig::default()
        }
    }
}

impl Drop for StubCatalog {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A catalog payload shaped like the production endpoint.
///
/// Three products: one on sale with a discount, one full price, one on sale
/// with every size sold out.
#[must_use]
pub fn sample_catalog() -> Value {
    json!({
        "products": [
            {
                "name": "VESTIDO TRANSPASSE BOW",
                "style": "20002605",
                "code_color": "20002605_613",
                "color_slug": "tapecaria",
                "color": "TAPEÇARIA",
                "on_sale": false,
                "regular_price": "R$ 199,90",
                "actual_price": "R$ 199,90",
                "discount_percentage": "",
                "installments": "3x R$ 66,63",
                "image": "https://d3l7rqep7l31az.cloudfront.net/images/products/20002605_615_catalog_1.jpg",
                "sizes": [
                    { "available": false, "size": "PP", "sku": "5807_343_0_PP" },
                    { "available": true, "size": "P", "sku": "5807_343_0_P" },
                    { "available": true, "size": "M", "sku": "5807_343_0_M" }
                ]
            },
            {
                "name": "Dress",
                "on_sale": true,
                "regular_price": "R$ 29,90",
                "actual_price": "R$ 19,90",
                "image": "",
                "sizes": [
                    { "available": true, "size": "M" },
                    { "available": true, "size": "G" }
                ]
            },
            {
                "name": "BATA DECOTE FLUID",
                "on_sale": true,
                "regular_price": "R$ 99,90",
                "actual_price": "R$ 79,90",
                "image": "https://d3l7rqep7l31az.cloudfront.net/images/products/20002570_002_catalog_1.jpg",
                "sizes": [
                    { "available": false, "size": "P" },
                    { "available": false, "size": "M" }
                ]
            }
        ]
    })
}
