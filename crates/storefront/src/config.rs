//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `VITRINE_CATALOG_URL` - Catalog endpoint (default: the public mock catalog)
//! - `VITRINE_REQUEST_TIMEOUT_SECS` - Fetch timeout in seconds (default: none)
//! - `VITRINE_CURRENCY` - Currency totals are displayed in (default: BRL)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::time::Duration;

use thiserror::Error;
use url::Url;
use vitrine_core::CurrencyCode;

/// Catalog endpoint used when `VITRINE_CATALOG_URL` is not set.
pub const DEFAULT_CATALOG_URL: &str = "https://www.mocky.io/v2/59b6a65a0f0000e90471257d";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone, Default)]
pub struct StorefrontConfig {
    /// Catalog endpoint configuration
    pub catalog: CatalogConfig,
    /// Display currency for totals; catalog prices are always read as BRL
    pub currency: CurrencyCode,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Catalog endpoint configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// URL answering `GET` with the catalog JSON
    pub endpoint: Url,
    /// Overall request timeout; `None` leaves the transport default in place
    pub request_timeout: Option<Duration>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = match lookup("VITRINE_CATALOG_URL") {
            Some(raw) => parse_endpoint("VITRINE_CATALOG_URL", &raw)?,
            None => default_endpoint(),
        };

        let request_timeout = lookup("VITRINE_REQUEST_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| {
                        ConfigError::InvalidEnvVar(
                            "VITRINE_REQUEST_TIMEOUT_SECS".to_string(),
                            e.to_string(),
                        )
                    })
            })
            .transpose()?;

        let currency = lookup("VITRINE_CURRENCY")
            .map(|raw| {
                raw.parse::<CurrencyCode>().map_err(|e| {
                    ConfigError::InvalidEnvVar("VITRINE_CURRENCY".to_string(), e.to_string())
                })
            })
            .transpose()?
            .unwrap_or_default();

        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.trim().is_empty());

        Ok(Self {
            catalog: CatalogConfig {
                endpoint,
                request_timeout,
            },
            currency,
            sentry_dsn,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn default_endpoint() -> Url {
    #[allow(clippy::expect_used)] // Compile-time constant, covered by tests
    Url::parse(DEFAULT_CATALOG_URL).expect("default catalog URL is valid")
}

/// Parse and validate an endpoint URL.
fn parse_endpoint(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.catalog.endpoint.as_str(), DEFAULT_CATALOG_URL);
        assert!(config.catalog.request_timeout.is_none());
        assert_eq!(config.currency, CurrencyCode::BRL);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_custom_values() {
        let config = load(&[
            ("VITRINE_CATALOG_URL", "http://127.0.0.1:8080/products"),
            ("VITRINE_REQUEST_TIMEOUT_SECS", "15"),
            ("VITRINE_CURRENCY", "usd"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ])
        .unwrap();

        assert_eq!(
            config.catalog.endpoint.as_str(),
            "http://127.0.0.1:8080/products"
        );
        assert_eq!(config.catalog.request_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.currency, CurrencyCode::USD);
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_invalid_url() {
        let err = load(&[("VITRINE_CATALOG_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "VITRINE_CATALOG_URL"));
    }

    #[test]
    fn test_unsupported_scheme() {
        let err = load(&[("VITRINE_CATALOG_URL", "ftp://example.com/catalog")]).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_invalid_timeout() {
        let err = load(&[("VITRINE_REQUEST_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_invalid_currency() {
        let err = load(&[("VITRINE_CURRENCY", "XYZ")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid environment variable VITRINE_CURRENCY: Unknown currency code: XYZ"
        );
    }

    #[test]
    fn test_empty_sentry_dsn_ignored() {
        let config = load(&[("SENTRY_DSN", "  ")]).unwrap();
        assert!(config.sentry_dsn.is_none());
    }
}
