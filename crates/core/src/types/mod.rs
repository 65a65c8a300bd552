//! Core types for Vitrine.
//!
//! This module provides the domain entities exchanged between the fetch
//! client, the cart store, and the presentation layer.

pub mod catalog;
pub mod order;
pub mod price;

pub use catalog::{Catalog, PRICE_CURRENCY, Product, Size};
pub use order::{Order, OrderKey};
pub use price::{CurrencyCode, Price, PriceError, parse_currency};
