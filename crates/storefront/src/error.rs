//! Unified error handling.
//!
//! Provides a unified `AppError` type for consumers that drive the state
//! layer end to end. Cart operations never fail; only configuration and
//! fetching do.

use thiserror::Error;

use crate::catalog::FetchError;
use crate::config::ConfigError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog fetch failed.
    #[error("Catalog error: {0}")]
    Fetch(#[from] FetchError),

    /// Requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
