//! The cart store.
//!
//! One [`CartStore`] exists per application run. It is created by
//! [`crate::state::AppState`] and handed to every consumer as a cheap clone
//! of the same handle.
//!
//! Every mutation runs under a single lock: change the order list, recompute
//! the total, publish. Subscribers therefore never observe a total that
//! disagrees with the order list it was computed from. The total is published
//! before the order list, so an order-list subscriber reading
//! [`CartStore::total`] always sees the matching total.
//!
//! # Duplicate orders
//!
//! [`CartStore::add`] appends without merging. Adding the same product and
//! size twice yields two separate orders; lookups by product and size act on
//! the first one.

mod publisher;

pub use publisher::{Publisher, Subscription};

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use tracing::{debug, warn};
use vitrine_core::{CurrencyCode, Order, OrderKey, Product, Size};

/// Orders and total read under one lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSnapshot {
    pub orders: Vec<Order>,
    pub total: Decimal,
}

/// Handle to the cart.
///
/// Clones share the same orders and streams.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    currency: CurrencyCode,
    state: Mutex<CartState>,
    orders: Publisher<Vec<Order>>,
    in_cart: Publisher<bool>,
    total: Publisher<Decimal>,
}

#[derive(Default)]
struct CartState {
    orders: Vec<Order>,
    /// Number of orders per key. Absent keys have no orders; present keys
    /// may still belong to a different pair with the same fingerprint.
    counts: HashMap<OrderKey, usize>,
    total: Decimal,
}

impl CartState {
    fn contains(&self, product: &Product, size: &Size) -> bool {
        self.position(product, size).is_some()
    }

    fn position(&self, product: &Product, size: &Size) -> Option<usize> {
        if !self.counts.contains_key(&OrderKey::new(product, size)) {
            return None;
        }
        self.orders.iter().position(|o| o.matches(product, size))
    }

    fn push(&mut self, order: Order) {
        *self.counts.entry(order.key()).or_insert(0) += 1;
        self.orders.push(order);
    }

    fn remove(&mut self, index: usize) -> Order {
        let order = self.orders.remove(index);
        let key = order.key();
        if let Some(count) = self.counts.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&key);
            }
        }
        order
    }

    fn recompute_total(&mut self) {
        self.total = self.orders.iter().map(Order::line_total).sum();
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(CurrencyCode::default())
    }
}

impl CartStore {
    /// Create an empty cart whose amounts are displayed in `currency`.
    ///
    /// Product prices are always read in [`vitrine_core::PRICE_CURRENCY`];
    /// `currency` only affects formatting.
    #[must_use]
    pub fn new(currency: CurrencyCode) -> Self {
        Self {
            inner: Arc::new(CartStoreInner {
                currency,
                state: Mutex::new(CartState::default()),
                orders: Publisher::new(Vec::new()),
                in_cart: Publisher::new(false),
                total: Publisher::new(Decimal::ZERO),
            }),
        }
    }

    /// Currency amounts are displayed in.
    #[must_use]
    pub fn currency(&self) -> CurrencyCode {
        self.inner.currency
    }

    fn lock(&self) -> MutexGuard<'_, CartState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Recompute the total and publish it along with the order list.
    ///
    /// Must be called with the state lock held.
    fn commit(&self, state: &mut CartState) {
        state.recompute_total();
        self.inner.total.publish(state.total);
        self.inner.orders.publish(state.orders.clone());
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append a new order.
    ///
    /// Does not merge with an existing order for the same product and size.
    /// A quantity of zero is ignored.
    pub fn add(&self, product: Product, size: Size, quantity: u32) {
        if quantity == 0 {
            warn!(product = %product.name, size = %size.size, "Ignoring add with zero quantity");
            return;
        }

        let mut state = self.lock();
        debug!(product = %product.name, size = %size.size, quantity, "Adding order");
        state.push(Order::new(product, size, quantity));
        self.commit(&mut state);
    }

    /// Remove the first order for `product` and `size`.
    ///
    /// Does nothing, and publishes nothing, if there is no such order.
    pub fn remove_order(&self, product: &Product, size: &Size) {
        let mut state = self.lock();
        let Some(index) = state.position(product, size) else {
            debug!(product = %product.name, size = %size.size, "No order to remove");
            return;
        };

        state.remove(index);
        debug!(product = %product.name, size = %size.size, "Removed order");
        self.commit(&mut state);
    }

    /// Change the quantity of the first order for `product` and `size` by
    /// `delta`.
    ///
    /// A change that would bring the quantity below 1 leaves it unchanged;
    /// the total and order list are published either way. Returns the
    /// resulting quantity, or `None` if there is no such order.
    pub fn update_quantity(&self, product: &Product, size: &Size, delta: i32) -> Option<u32> {
        let mut state = self.lock();
        let index = state.position(product, size)?;
        let order = state.orders.get_mut(index)?;

        if let Some(quantity) = apply_delta(order.quantity, delta) {
            order.quantity = quantity;
        }
        let quantity = order.quantity;

        debug!(product = %product.name, size = %size.size, delta, quantity, "Updated quantity");
        self.commit(&mut state);
        Some(quantity)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether the cart holds an order for `product` and `size`.
    ///
    /// The answer is also published to [`Self::subscribe_in_cart`].
    pub fn check_in_cart(&self, product: &Product, size: &Size) -> bool {
        let state = self.lock();
        let in_cart = state.contains(product, size);
        self.inner.in_cart.publish(in_cart);
        in_cart
    }

    /// Sum of unit price times quantity over all orders.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lock().total
    }

    /// Copy of the current orders, in insertion order.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.lock().orders.clone()
    }

    /// Orders and total as one consistent read.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        let state = self.lock();
        CartSnapshot {
            orders: state.orders.clone(),
            total: state.total,
        }
    }

    /// The order at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Check [`Self::order_count`] first.
    #[must_use]
    pub fn order_at(&self, index: usize) -> Order {
        let order = self.lock().orders.get(index).cloned();
        order.unwrap_or_else(|| panic!("cart order index {index} out of range"))
    }

    /// Number of orders (not units) in the cart.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.lock().orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().orders.is_empty()
    }

    // =========================================================================
    // Streams
    // =========================================================================

    /// Stream of the order list, published after every mutation.
    #[must_use]
    pub fn subscribe_orders(&self) -> Subscription<Vec<Order>> {
        self.inner.orders.subscribe()
    }

    /// Stream of [`Self::check_in_cart`] answers.
    #[must_use]
    pub fn subscribe_in_cart(&self) -> Subscription<bool> {
        self.inner.in_cart.subscribe()
    }

    /// Stream of the cart total, published after every mutation.
    #[must_use]
    pub fn subscribe_total(&self) -> Subscription<Decimal> {
        self.inner.total.subscribe()
    }
}

/// `quantity + delta` if the result is at least 1.
pub(crate) fn apply_delta(quantity: u32, delta: i32) -> Option<u32> {
    let next = i64::from(quantity) + i64::from(delta);
    if next >= 1 {
        u32::try_from(next).ok()
    } else {
        None
    }
}
