//! Product adapter.

use thiserror::Error;
use tracing::debug;
use url::Url;
use vitrine_core::{Product, Size};

use super::StyledText;
use crate::cart::CartStore;

/// Errors reported by an [`ImageLoader`].
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Invalid image URL: {0}")]
    InvalidUrl(String),
    #[error("Image load failed: {0}")]
    Failed(String),
}

/// Callback invoked once an image load finishes.
pub type ImageLoadCallback = Box<dyn FnOnce(Result<(), ImageLoadError>) + Send>;

/// External collaborator that fetches and displays images.
///
/// The state layer never touches image bytes; it only hands over a URL.
pub trait ImageLoader {
    /// Start loading `url` and call `on_complete` when done.
    fn load(&self, url: &Url, on_complete: ImageLoadCallback);
}

/// Display adapter for one product.
#[derive(Clone)]
pub struct ProductPresenter {
    product: Product,
    cart: CartStore,
}

impl ProductPresenter {
    /// Wrap a product; cart actions go to `cart`.
    #[must_use]
    pub const fn new(product: Product, cart: CartStore) -> Self {
        Self { product, cart }
    }

    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Product name in lowercase.
    #[must_use]
    pub fn name(&self) -> String {
        self.product.name.to_lowercase()
    }

    #[must_use]
    pub fn actual_price(&self) -> &str {
        &self.product.actual_price
    }

    #[must_use]
    pub fn regular_price(&self) -> &str {
        &self.product.regular_price
    }

    /// Regular price tagged for strikethrough.
    #[must_use]
    pub fn regular_price_strike(&self) -> StyledText {
        StyledText::strikethrough(self.product.regular_price.clone())
    }

    /// Whether the product is on sale below its regular price.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.product.on_sale && self.product.regular_amount() > self.product.actual_amount()
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.product.image
    }

    #[must_use]
    pub fn sizes(&self) -> &[Size] {
        &self.product.sizes
    }

    #[must_use]
    pub const fn size_available(&self, size: &Size) -> bool {
        size.available
    }

    /// Add this product in `size` to the cart.
    pub fn add_to_cart(&self, size: &Size, quantity: u32) {
        self.cart.add(self.product.clone(), size.clone(), quantity);
    }

    /// Whether this product in `size` is already in the cart.
    ///
    /// Also published to the cart's in-cart stream.
    pub fn check_in_cart(&self, size: &Size) -> bool {
        self.cart.check_in_cart(&self.product, size)
    }

    /// Hand the product image to `loader`.
    ///
    /// An image field that is not a URL fails immediately without reaching
    /// the loader.
    pub fn load_image<L: ImageLoader>(&self, loader: &L, on_complete: ImageLoadCallback) {
        match Url::parse(&self.product.image) {
            Ok(url) => loader.load(&url, on_complete),
            Err(e) => {
                debug!(image = %self.product.image, error = %e, "Product image is not a URL");
                on_complete(Err(ImageLoadError::InvalidUrl(self.product.image.clone())));
            }
        }
    }
}
