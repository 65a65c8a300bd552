//! The visible product list.

use tracing::{info, instrument, warn};
use vitrine_core::Product;

use super::{CatalogClient, CatalogSource, FetchError};
use crate::cart::CartStore;
use crate::presentation::ProductPresenter;

/// The product list currently shown, after optional sale-only filtering.
///
/// Replaced wholesale on each successful fetch and left untouched by a
/// failed one.
pub struct CatalogListing<S = CatalogClient> {
    source: S,
    cart: CartStore,
    products: Vec<Product>,
}

impl<S> CatalogListing<S> {
    /// Create an empty listing fed by `source`.
    #[must_use]
    pub const fn new(source: S, cart: CartStore) -> Self {
        Self {
            source,
            cart,
            products: Vec::new(),
        }
    }

    /// Seed the listing with products.
    #[must_use]
    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    /// Number of visible products.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.products.len()
    }

    /// The visible products.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The product at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    /// The product at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Check [`Self::item_count`] first.
    #[must_use]
    pub fn item_at(&self, index: usize) -> &Product {
        self.get(index).unwrap_or_else(|| {
            panic!(
                "catalog index {index} out of range for {} products",
                self.products.len()
            )
        })
    }

    /// Adapter for the product at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn product_at(&self, index: usize) -> ProductPresenter {
        ProductPresenter::new(self.item_at(index).clone(), self.cart.clone())
    }
}

impl<S: CatalogSource> CatalogListing<S> {
    /// Fetch the catalog and replace the visible list.
    ///
    /// With `on_sale_only`, only products flagged as on sale are kept.
    ///
    /// # Errors
    ///
    /// Returns the source's `FetchError`; the visible list is unchanged.
    #[instrument(skip(self))]
    pub async fn fetch(&mut self, on_sale_only: bool) -> Result<&[Product], FetchError> {
        let catalog = match self.source.fetch().await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed, keeping previous listing");
                return Err(e);
            }
        };

        let fetched = catalog.products.len();
        self.products = if on_sale_only {
            catalog.products.into_iter().filter(|p| p.on_sale).collect()
        } else {
            catalog.products
        };

        info!(fetched, visible = self.products.len(), "Catalog listing replaced");
        Ok(&self.products)
    }
}
