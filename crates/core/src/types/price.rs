//! Type-safe price representation using decimal arithmetic.
//!
//! Prices travel as text in two conventions:
//!
//! - Wire form, as sent by the catalog endpoint: `R$ 199,90` or `R$19.99`.
//! - Display form, as produced by [`Price::format`]: `R$ 1.234,56` (with a
//!   non-breaking space after the symbol).
//!
//! [`Price::parse`] accepts both. When the currency's decimal separator is
//! present, its grouping separator is dropped; otherwise the text is read as
//! a plain decimal with `.` as the point.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing prices and currency codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("Invalid price: {0:?}")]
    Invalid(String),
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., reais, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Parse a price string in either wire or display form.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Invalid` if no number remains after removing the
    /// currency symbol and separators.
    pub fn parse(text: &str, currency_code: CurrencyCode) -> Result<Self, PriceError> {
        let stripped = text.replace(currency_code.symbol(), "");
        let trimmed = stripped.trim();
        let (negative, digits) = trimmed
            .strip_prefix('-')
            .map_or((false, trimmed), |rest| (true, rest.trim_start()));

        let decimal = currency_code.decimal_separator();
        let grouping = currency_code.grouping_separator();
        let normalized: String = if digits.contains(decimal) {
            digits
                .chars()
                .filter(|&c| c != grouping)
                .map(|c| if c == decimal { '.' } else { c })
                .collect()
        } else {
            digits.replace(',', "")
        };

        let amount = Decimal::from_str(&normalized)
            .map_err(|_| PriceError::Invalid(text.to_string()))?;

        Ok(Self::new(if negative { -amount } else { amount }, currency_code))
    }

    /// Format for display, rounded to two fraction digits.
    ///
    /// BRL renders as `R$ 1.234,56`, USD as `$1,234.56`.
    #[must_use]
    pub fn format(&self) -> String {
        let currency = self.currency_code;
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let fixed = format!("{:.2}", rounded.abs());
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        format!(
            "{sign}{}{}{}{}{fraction}",
            currency.symbol(),
            currency.symbol_spacing(),
            group_digits(whole, currency.grouping_separator()),
            currency.decimal_separator(),
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Parse a price string leniently: anything unparsable is zero.
#[must_use]
pub fn parse_currency(text: &str, currency_code: CurrencyCode) -> Decimal {
    Price::parse(text, currency_code).map_or(Decimal::ZERO, |price| price.amount)
}

fn group_digits(whole: &str, separator: char) -> String {
    let len = whole.chars().count();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BRL,
    USD,
}

impl CurrencyCode {
    /// Currency symbol as printed before the amount.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::BRL => "R$",
            Self::USD => "$",
        }
    }

    #[must_use]
    pub const fn decimal_separator(self) -> char {
        match self {
            Self::BRL => ',',
            Self::USD => '.',
        }
    }

    #[must_use]
    pub const fn grouping_separator(self) -> char {
        match self {
            Self::BRL => '.',
            Self::USD => ',',
        }
    }

    const fn symbol_spacing(self) -> &'static str {
        match self {
            Self::BRL => "\u{a0}",
            Self::USD => "",
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BRL" => Ok(Self::BRL),
            "USD" => Ok(Self::USD),
            other => Err(PriceError::UnknownCurrency(other.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn brl(text: &str) -> Decimal {
        parse_currency(text, CurrencyCode::BRL)
    }

    #[test]
    fn test_parse_wire_formats() {
        assert_eq!(brl("R$ 199,90"), Decimal::new(19990, 2));
        assert_eq!(brl("R$19,90"), Decimal::new(1990, 2));
        assert_eq!(brl("R$19.99"), Decimal::new(1999, 2));
        assert_eq!(brl("10.90"), Decimal::new(1090, 2));
    }

    #[test]
    fn test_parse_display_format() {
        assert_eq!(brl("R$\u{a0}1.234,56"), Decimal::new(123_456, 2));
        assert_eq!(brl("-R$\u{a0}5,00"), Decimal::new(-500, 2));
    }

    #[test]
    fn test_parse_unparsable_is_zero() {
        assert_eq!(brl(""), Decimal::ZERO);
        assert_eq!(brl("R$"), Decimal::ZERO);
        assert_eq!(brl("grátis"), Decimal::ZERO);
        assert!(matches!(
            Price::parse("abc", CurrencyCode::BRL),
            Err(PriceError::Invalid(_))
        ));
    }

    #[test]
    fn test_format_brl() {
        let price = Price::new(Decimal::new(1990, 2), CurrencyCode::BRL);
        assert_eq!(price.format(), "R$\u{a0}19,90");

        let price = Price::new(Decimal::new(1_234_567_891, 3), CurrencyCode::BRL);
        assert_eq!(price.format(), "R$\u{a0}1.234.567,89");

        let price = Price::new(Decimal::ZERO, CurrencyCode::BRL);
        assert_eq!(price.to_string(), "R$\u{a0}0,00");
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        let price = Price::new(Decimal::new(10_005, 3), CurrencyCode::BRL);
        assert_eq!(price.format(), "R$\u{a0}10,01");
    }

    #[test]
    fn test_format_negative_and_usd() {
        let price = Price::new(Decimal::new(-250, 2), CurrencyCode::BRL);
        assert_eq!(price.format(), "-R$\u{a0}2,50");

        let price = Price::new(Decimal::new(123_450, 2), CurrencyCode::USD);
        assert_eq!(price.format(), "$1,234.50");
    }

    #[test]
    fn test_format_then_parse_recovers_amount() {
        let tolerance = Decimal::new(1, 2);
        for cents in [0_i64, 1, 99, 1990, 123_456, 99_999_999] {
            let amount = Decimal::new(cents, 2);
            for currency in [CurrencyCode::BRL, CurrencyCode::USD] {
                let text = Price::new(amount, currency).format();
                let parsed = parse_currency(&text, currency);
                assert!(
                    (parsed - amount).abs() <= tolerance,
                    "{text} parsed as {parsed}, expected {amount}"
                );
            }
        }
    }

    #[test]
    fn test_currency_code_from_str() {
        assert_eq!("brl".parse::<CurrencyCode>().unwrap(), CurrencyCode::BRL);
        assert_eq!(" USD ".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert!(matches!(
            "EUR".parse::<CurrencyCode>(),
            Err(PriceError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1", '.'), "1");
        assert_eq!(group_digits("123", '.'), "123");
        assert_eq!(group_digits("1234", '.'), "1.234");
        assert_eq!(group_digits("1234567", ','), "1,234,567");
    }
}
