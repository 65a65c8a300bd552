//! Application state shared across consumers.

use std::sync::Arc;

use crate::cart::CartStore;
use crate::catalog::{CatalogClient, CatalogListing, FetchError};
use crate::config::StorefrontConfig;
use crate::presentation::HttpImageLoader;

/// Application root.
///
/// Owns the one [`CartStore`] of this run and the catalog client. Cheaply
/// cloneable via `Arc`; every clone hands out the same cart.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    cart: CartStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, FetchError> {
        let catalog = CatalogClient::new(&config.catalog)?;
        let cart = CartStore::new(config.currency);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the cart.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Image loader sharing the catalog client's connection pool.
    #[must_use]
    pub fn image_loader(&self) -> HttpImageLoader {
        HttpImageLoader::new(self.inner.catalog.http().clone())
    }

    /// A new, empty listing backed by the catalog client and this cart.
    #[must_use]
    pub fn listing(&self) -> CatalogListing {
        CatalogListing::new(self.inner.catalog.clone(), self.inner.cart.clone())
    }
}
