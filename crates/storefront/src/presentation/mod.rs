//! Display-ready adapters over products and orders.
//!
//! Adapters derive formatted values from domain entities and forward cart
//! mutations to the [`crate::cart::CartStore`] they were built with. They
//! hold no rendering logic.

mod image;
mod order;
mod product;

pub use image::HttpImageLoader;
pub use order::OrderPresenter;
pub use product::{ImageLoadCallback, ImageLoadError, ImageLoader, ProductPresenter};

use rust_decimal::Decimal;
use serde::Serialize;
use vitrine_core::{CurrencyCode, Price};

/// Text tagged with presentation attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledText {
    pub text: String,
    pub strikethrough: bool,
}

impl StyledText {
    /// Plain, unstyled text.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            strikethrough: false,
        }
    }

    /// Text rendered with a line through it, as for a pre-discount price.
    #[must_use]
    pub fn strikethrough(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            strikethrough: true,
        }
    }
}

/// Format an amount in the given currency.
#[must_use]
pub fn format_currency(amount: Decimal, currency: CurrencyCode) -> String {
    Price::new(amount, currency).format()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styled_text() {
        let strike = StyledText::strikethrough("R$ 29,90");
        assert_eq!(strike.text, "R$ 29,90");
        assert!(strike.strikethrough);
        assert!(!StyledText::plain("R$ 29,90").strikethrough);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(
            format_currency(Decimal::new(3980, 2), CurrencyCode::BRL),
            "R$\u{a0}39,80"
        );
    }
}
