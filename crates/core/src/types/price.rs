//! Decimal price representation with display formatting.
//!
//! The catalog carries a single implicit currency; the display symbol is
//! hard-coded here rather than stored per record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display symbol for the store's single currency.
const CURRENCY_SYMBOL: &str = "₦";

/// A non-negative price in the store's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The raw decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a line quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Format for display, e.g. `₦1,000` or `₦19.99`.
    ///
    /// Whole amounts are shown without decimals; fractional amounts are
    /// rounded to two places. Assumes a non-negative amount.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = format!("{:.2}", self.0);
        let (int_part, frac_part) = rounded
            .split_once('.')
            .unwrap_or((rounded.as_str(), "00"));
        let grouped = group_thousands(int_part);
        if frac_part == "00" {
            format!("{CURRENCY_SYMBOL}{grouped}")
        } else {
            format!("{CURRENCY_SYMBOL}{grouped}.{frac_part}")
        }
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Insert thousands separators into a digit string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn price(n: i64) -> Price {
        Price::new(Decimal::from(n))
    }

    #[test]
    fn test_display_whole_amount() {
        assert_eq!(price(1000).display(), "₦1,000");
        assert_eq!(price(0).display(), "₦0");
        assert_eq!(price(999).display(), "₦999");
        assert_eq!(price(1_250_000).display(), "₦1,250,000");
    }

    #[test]
    fn test_display_fractional_amount() {
        let p = Price::new(Decimal::new(1999, 2)); // 19.99
        assert_eq!(p.display(), "₦19.99");

        let p = Price::new(Decimal::new(123_456_75, 2)); // 123456.75
        assert_eq!(p.display(), "₦123,456.75");
    }

    #[test]
    fn test_times() {
        assert_eq!(price(1000).times(3), price(3000));
        assert_eq!(price(1000).times(0), price(0));
    }

    #[test]
    fn test_serde_roundtrip() {
        let p = price(2500);
        let json = serde_json::to_string(&p).expect("serialize");
        let back: Price = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, p);
    }

    #[test]
    fn test_deserialize_from_json_number() {
        // Catalog records carry prices as bare JSON numbers.
        let p: Price = serde_json::from_str("1000").expect("deserialize");
        assert_eq!(p, price(1000));
    }
}
