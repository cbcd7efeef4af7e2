//! Currency display formatting.
//!
//! Prices are shown without minor units (`৳1,100`, never `৳1,100.00`).
//! Fractional taka are truncated toward zero rather than rounded, so a
//! displayed amount never exceeds what is actually charged.

use crate::types::Money;

/// How integer digits are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grouping {
    /// Thousands, then lakhs and crores: `1,00,00,000`.
    #[default]
    SouthAsian,
    /// Thousands throughout: `10,000,000`.
    Western,
}

/// A zero-decimal currency format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    /// Prefix placed before the digits (after any minus sign).
    pub symbol: &'static str,
    /// Digit grouping rule.
    pub grouping: Grouping,
}

impl CurrencyFormat {
    /// Bangladeshi taka: `৳` with South-Asian grouping.
    pub const TAKA: Self = Self {
        symbol: "৳",
        grouping: Grouping::SouthAsian,
    };

    /// Format an amount.
    ///
    /// ```
    /// use krishi_core::{CurrencyFormat, Money};
    ///
    /// assert_eq!(CurrencyFormat::TAKA.format(Money::from_taka(150000)), "৳1,50,000");
    /// ```
    #[must_use]
    pub fn format(&self, amount: Money) -> String {
        let whole = amount.amount().trunc();
        let negative = whole.is_sign_negative() && !whole.is_zero();
        let digits = whole.abs().normalize().to_string();
        let grouped = group_digits(&digits, self.grouping);

        if negative {
            format!("-{}{grouped}", self.symbol)
        } else {
            format!("{}{grouped}", self.symbol)
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::TAKA
    }
}

/// Format an amount as taka.
#[must_use]
pub fn format_taka(amount: Money) -> String {
    CurrencyFormat::TAKA.format(amount)
}

fn group_digits(digits: &str, grouping: Grouping) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }

    let (mut rest, thousands) = digits.split_at(digits.len() - 3);
    let size = match grouping {
        Grouping::SouthAsian => 2,
        Grouping::Western => 3,
    };

    let mut groups = vec![thousands];
    while rest.len() > size {
        let (head, group) = rest.split_at(rest.len() - size);
        groups.push(group);
        rest = head;
    }
    groups.push(rest);
    groups.reverse();
    groups.join(",")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_small_amounts_have_no_separator() {
        assert_eq!(format_taka(Money::ZERO), "৳0");
        assert_eq!(format_taka(Money::from_taka(100)), "৳100");
        assert_eq!(format_taka(Money::from_taka(999)), "৳999");
    }

    #[test]
    fn test_south_asian_grouping() {
        assert_eq!(format_taka(Money::from_taka(1100)), "৳1,100");
        assert_eq!(format_taka(Money::from_taka(100_000)), "৳1,00,000");
        assert_eq!(format_taka(Money::from_taka(12_345_678)), "৳1,23,45,678");
    }

    #[test]
    fn test_western_grouping() {
        let usd = CurrencyFormat {
            symbol: "$",
            grouping: Grouping::Western,
        };
        assert_eq!(usd.format(Money::from_taka(12_345_678)), "$12,345,678");
    }

    #[test]
    fn test_truncates_fraction() {
        assert_eq!(format_taka(Money::from_str("1000.99").unwrap()), "৳1,000");
        assert_eq!(format_taka(Money::from_str("0.75").unwrap()), "৳0");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_taka(Money::from_taka(-250)), "-৳250");
        assert_eq!(format_taka(Money::from_str("-0.4").unwrap()), "৳0");
    }

    #[test]
    fn test_deterministic() {
        let amount = Money::from_taka(45_600);
        assert_eq!(format_taka(amount), format_taka(amount));
    }
}
