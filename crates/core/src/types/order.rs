//! Cart line items.

use std::hash::{DefaultHasher, Hash, Hasher};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::{Product, Size};

/// A cart line item binding a product, a size, and a quantity.
///
/// `quantity` is at least 1 while the order is held by a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub product: Product,
    pub size: Size,
    pub quantity: u32,
}

impl Order {
    /// Create a new order.
    #[must_use]
    pub const fn new(product: Product, size: Size, quantity: u32) -> Self {
        Self {
            product,
            size,
            quantity,
        }
    }

    /// Whether this order is for the given product and size.
    #[must_use]
    pub fn matches(&self, product: &Product, size: &Size) -> bool {
        self.product == *product && self.size == *size
    }

    /// Composite key identifying this order's product and size.
    #[must_use]
    pub fn key(&self) -> OrderKey {
        OrderKey::new(&self.product, &self.size)
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.actual_amount() * Decimal::from(self.quantity)
    }
}

/// Fingerprint of a `(product, size)` pair used to index cart lookups.
///
/// Built from borrowed values without cloning either. Distinct pairs may
/// share a key, so a hit must be confirmed with [`Order::matches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderKey(u64);

impl OrderKey {
    /// Build a key from a product and size.
    #[must_use]
    pub fn new(product: &Product, size: &Size) -> Self {
        let mut hasher = DefaultHasher::new();
        product.hash(&mut hasher);
        size.hash(&mut hasher);
        Self(hasher.finish())
    }
}
