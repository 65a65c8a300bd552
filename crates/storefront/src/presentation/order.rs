//! Order adapter.

use rust_decimal::Decimal;
use vitrine_core::{Order, Product, Size};

use super::format_currency;
use crate::cart::{CartStore, apply_delta};

/// Display adapter for one cart line.
///
/// Caches the line total and its formatted text; both are refreshed by
/// [`Self::update_quantity`].
#[derive(Clone)]
pub struct OrderPresenter {
    product: Product,
    size: Size,
    quantity: u32,
    price_total: Decimal,
    price_total_formatted: String,
    cart: CartStore,
}

impl OrderPresenter {
    /// Wrap an order; quantity changes go to `cart`.
    #[must_use]
    pub fn new(order: Order, cart: CartStore) -> Self {
        let mut presenter = Self {
            product: order.product,
            size: order.size,
            quantity: order.quantity,
            price_total: Decimal::ZERO,
            price_total_formatted: String::new(),
            cart,
        };
        presenter.refresh();
        presenter
    }

    /// Adapter for the cart's order at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for `cart`.
    #[must_use]
    pub fn at(cart: &CartStore, index: usize) -> Self {
        Self::new(cart.order_at(index), cart.clone())
    }

    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub const fn size(&self) -> &Size {
        &self.size
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    #[must_use]
    pub const fn price_total(&self) -> Decimal {
        self.price_total
    }

    #[must_use]
    pub fn price_total_formatted(&self) -> &str {
        &self.price_total_formatted
    }

    /// Unit price in display form.
    #[must_use]
    pub fn unit_price_formatted(&self) -> String {
        format_currency(self.unit_price(), self.cart.currency())
    }

    fn unit_price(&self) -> Decimal {
        self.product.actual_amount()
    }

    fn refresh(&mut self) {
        self.price_total = self.unit_price() * Decimal::from(self.quantity);
        self.price_total_formatted = format_currency(self.price_total, self.cart.currency());
    }

    /// Change the quantity by `delta`, never going below 1.
    ///
    /// When the order is in the cart, the cart's resulting quantity wins.
    pub fn update_quantity(&mut self, delta: i32) {
        if let Some(quantity) = apply_delta(self.quantity, delta) {
            self.quantity = quantity;
        }
        if let Some(quantity) = self.cart.update_quantity(&self.product, &self.size, delta) {
            self.quantity = quantity;
        }
        self.refresh();
    }

    /// Remove this order from the cart.
    pub fn remove(&self) {
        self.cart.remove_order(&self.product, &self.size);
    }
}
