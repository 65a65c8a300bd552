//! Vitrine Core - Shared domain types.
//!
//! This crate provides the types used across all Vitrine components:
//! - `storefront` - Catalog fetch client, cart store, and presentation adapters
//! - `cli` - Command-line consumer of the state layer
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no shared state. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Products, sizes, orders, and locale-aware prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
