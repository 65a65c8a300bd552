//! Catalog fetch client and listing state.
//!
//! # Architecture
//!
//! - One `GET` per fetch against a fixed endpoint, no retry, no caching
//! - [`CatalogSource`] abstracts the client so listings can be driven by a stub
//! - [`CatalogListing`] keeps the last successful result, optionally filtered
//!   to products on sale
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_storefront::catalog::{CatalogClient, CatalogListing};
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let mut listing = CatalogListing::new(client, cart.clone());
//!
//! let on_sale = listing.fetch(true).await?;
//! println!("{} products on sale", on_sale.len());
//! ```

mod client;
mod listing;

pub use client::CatalogClient;
pub use listing::CatalogListing;

use std::future::Future;

use thiserror::Error;
use vitrine_core::Catalog;

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No connection, no response, or the body could not be read.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a status other than 200.
    #[error("Unexpected status code: {0}")]
    Status(u16),

    /// The body is not valid JSON or does not match the catalog shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can produce a catalog.
pub trait CatalogSource {
    /// Fetch the full catalog.
    fn fetch(&self) -> impl Future<Output = Result<Catalog, FetchError>> + Send;
}
