//! Vitrine Storefront library.
//!
//! The state layer between the catalog endpoint and whatever renders it:
//!
//! - [`catalog`] - Fetch client and the filtered, index-addressable listing
//! - [`cart`] - The cart store and its replay-latest change streams
//! - [`presentation`] - Display-ready adapters over products and orders
//! - [`state`] - Root composition owning the single cart instance
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_storefront::{config::StorefrontConfig, state::AppState};
//!
//! let state = AppState::new(StorefrontConfig::from_env()?)?;
//! let mut listing = state.listing();
//! listing.fetch(true).await?;
//!
//! let product = listing.product_at(0);
//! product.add_to_cart(&product.sizes()[0], 1);
//! println!("{}", state.cart().total());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod presentation;
pub mod state;
