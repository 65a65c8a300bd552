//! Catalog entities as delivered by the product endpoint.
//!
//! Wire keys are snake_case and map one-to-one onto the field names:
//!
//! ```json
//! { "products": [ { "name": "Vestido", "image": "https://...", "on_sale": true,
//!   "regular_price": "R$ 199,90", "actual_price": "R$ 119,90",
//!   "sizes": [ { "available": true, "size": "M" } ] } ] }
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::price::{CurrencyCode, parse_currency};

/// Currency the endpoint writes `regular_price` and `actual_price` in.
///
/// Independent of the currency prices are displayed in.
pub const PRICE_CURRENCY: CurrencyCode = CurrencyCode::BRL;

/// The full set of products returned by one fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from a list of products.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Products flagged as on sale, in catalog order.
    pub fn on_sale(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.on_sale)
    }
}

/// A catalog product.
///
/// Equality and hashing are structural over every field, so two products
/// are the same product exactly when all of their data matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Product {
    /// Display name.
    pub name: String,
    /// Image URL, resolved by an external image loader.
    pub image: String,
    /// Whether the product is currently discounted.
    pub on_sale: bool,
    /// Price before discount, as formatted by the endpoint (e.g. `R$ 199,90`).
    pub regular_price: String,
    /// Price actually charged, as formatted by the endpoint.
    pub actual_price: String,
    /// Sizes in display order.
    pub sizes: Vec<Size>,
}

impl Product {
    /// Numeric value of [`Self::actual_price`].
    ///
    /// Unparsable prices count as zero.
    #[must_use]
    pub fn actual_amount(&self) -> Decimal {
        parse_currency(&self.actual_price, PRICE_CURRENCY)
    }

    /// Numeric value of [`Self::regular_price`].
    #[must_use]
    pub fn regular_amount(&self) -> Decimal {
        parse_currency(&self.regular_price, PRICE_CURRENCY)
    }

    /// Find a size by its label.
    #[must_use]
    pub fn size(&self, label: &str) -> Option<&Size> {
        self.sizes.iter().find(|s| s.size == label)
    }
}

/// A size option of a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Whether this size can currently be ordered.
    pub available: bool,
    /// Size label (e.g. "PP", "M", "GG").
    pub size: String,
}

impl Size {
    /// Create a size option.
    #[must_use]
    pub fn new(size: impl Into<String>, available: bool) -> Self {
        Self {
            available,
            size: size.into(),
        }
    }
}
