//! Money type for representing currency amounts
//!
//! Internally stores amounts in paise (i64, hundredths of a rupee) to avoid
//! floating-point precision issues. Provides safe arithmetic operations,
//! half-up division for budget splits, and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::error::{MoneyTrackError, MoneyTrackResult};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
///
/// Using i64 cents keeps every monetary value at exactly two fraction digits
/// and avoids floating-point precision issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use moneytrack::models::Money;
    /// let amount = Money::from_cents(1050); // ₹10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units and cents
    pub const fn from_major_minor(units: i64, cents: i64) -> Self {
        Self(units * 100 + cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole-unit portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Divide by a count, rounding half-up (away from zero) to the cent
    ///
    /// Used for the even split of a budget across days. Fails with
    /// `InvalidOperation` when `divisor` is zero or negative.
    ///
    /// # Examples
    /// ```
    /// use moneytrack::models::Money;
    /// let daily = Money::from_cents(100_000).divide_round_half_up(3).unwrap();
    /// assert_eq!(daily.cents(), 33_333);
    /// ```
    pub fn divide_round_half_up(&self, divisor: i64) -> MoneyTrackResult<Self> {
        if divisor <= 0 {
            return Err(MoneyTrackError::InvalidOperation(format!(
                "cannot divide {} by {}",
                self, divisor
            )));
        }

        let quotient = self.0 / divisor;
        let remainder = self.0 % divisor;
        // Half-up rounds away from zero when the remainder is at least half
        // the divisor.
        if remainder.abs() * 2 >= divisor {
            if self.0 >= 0 {
                Ok(Self(quotient + 1))
            } else {
                Ok(Self(quotient - 1))
            }
        } else {
            Ok(Self(quotient))
        }
    }

    /// Ratio of `self` to `total` as a percentage
    ///
    /// The ratio is rounded half-up to four fraction digits before the
    /// percentage conversion, matching decimal division at scale 4. A zero
    /// total yields 0.0 rather than an error.
    pub fn percentage_of(&self, total: Money) -> f64 {
        if total.is_zero() {
            return 0.0;
        }

        // self/total scaled to 1e4, rounded half-up
        let numerator = (self.0 as i128) * 10_000;
        let denominator = total.0 as i128;
        let quotient = numerator / denominator;
        let remainder = numerator % denominator;
        let scaled = if remainder.abs() * 2 >= denominator.abs() {
            if (numerator >= 0) == (denominator >= 0) {
                quotient + 1
            } else {
                quotient - 1
            }
        } else {
            quotient
        };

        // scaled is the ratio at 4 fraction digits; * 100 for percent
        scaled as f64 / 100.0
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "₹10.50", "$10.50", "10"
    pub fn parse(s: &str) -> MoneyTrackResult<Self> {
        let s = s.trim();

        // The sign may appear before or after the currency symbol
        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        // Remove currency symbol if present
        let s = s.strip_prefix('₹').or_else(|| s.strip_prefix('$')).unwrap_or(s);

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) if !negative => (true, stripped),
            _ => (negative, s),
        };

        let invalid = || MoneyTrackError::Validation(format!("Invalid money format: {}", s));

        // Parse based on format
        let cents = if s.contains('.') {
            // Decimal format: "10.50"
            let parts: Vec<&str> = s.split('.').collect();
            if parts.len() != 2 {
                return Err(invalid());
            }

            let units: i64 = parts[0].parse().map_err(|_| invalid())?;
            if units < 0 {
                return Err(invalid());
            }

            // Fraction must be ASCII digits, so positional slicing below is safe
            let cents_str = parts[1];
            if !cents_str.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }

            // Pad or truncate cents to 2 digits
            let cents: i64 = match cents_str.len() {
                0 => 0,
                1 => cents_str.parse::<i64>().map_err(|_| invalid())? * 10,
                _ => cents_str[..2].parse().map_err(|_| invalid())?,
            };

            units * 100 + cents
        } else {
            // Integer format - assume whole units
            let units: i64 = s.parse().map_err(|_| invalid())?;
            if units < 0 {
                return Err(invalid());
            }
            units * 100
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-₹{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "₹{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_from_major_minor() {
        let m = Money::from_major_minor(10, 50);
        assert_eq!(m.cents(), 1050);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "₹10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "₹0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-₹10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "₹0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_divide_even_split() {
        // 1000.00 over 10 days -> 100.00
        let daily = Money::from_cents(100_000).divide_round_half_up(10).unwrap();
        assert_eq!(daily.cents(), 10_000);
    }

    #[test]
    fn test_divide_rounds_half_up() {
        // 0.05 / 2 = 0.025 -> 0.03
        assert_eq!(Money::from_cents(5).divide_round_half_up(2).unwrap().cents(), 3);
        // 0.01 / 3 = 0.0033 -> 0.00
        assert_eq!(Money::from_cents(1).divide_round_half_up(3).unwrap().cents(), 0);
        // 1000.00 / 3 = 333.333... -> 333.33
        assert_eq!(
            Money::from_cents(100_000).divide_round_half_up(3).unwrap().cents(),
            33_333
        );
    }

    #[test]
    fn test_divide_negative_rounds_away_from_zero() {
        // -0.05 / 2 = -0.025 -> -0.03
        assert_eq!(Money::from_cents(-5).divide_round_half_up(2).unwrap().cents(), -3);
    }

    #[test]
    fn test_divide_by_zero_or_negative_fails() {
        assert!(Money::from_cents(100).divide_round_half_up(0).is_err());
        assert!(Money::from_cents(100).divide_round_half_up(-4).is_err());
    }

    #[test]
    fn test_percentage_of() {
        let spent = Money::from_cents(30_000);
        let total = Money::from_cents(100_000);
        assert_eq!(spent.percentage_of(total), 30.0);
    }

    #[test]
    fn test_percentage_of_zero_total() {
        let spent = Money::from_cents(30_000);
        assert_eq!(spent.percentage_of(Money::zero()), 0.0);
    }

    #[test]
    fn test_percentage_rounds_at_four_digits() {
        // 1/3 = 0.3333 -> 33.33%
        let p = Money::from_cents(100).percentage_of(Money::from_cents(300));
        assert!((p - 33.33).abs() < 1e-9);
        // 2/3 = 0.6667 -> 66.67%
        let p = Money::from_cents(200).percentage_of(Money::from_cents(300));
        assert!((p - 66.67).abs() < 1e-9);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("₹10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
    }

    #[test]
    fn test_parse_sign_after_currency_symbol() {
        assert_eq!(Money::parse("₹-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("$-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("₹-0.50").unwrap().cents(), -50);
        assert_eq!(Money::parse("-₹10.50").unwrap().cents(), -1050);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("10.5.0").is_err());
        assert!(Money::parse("-₹-10.50").is_err());
    }

    #[test]
    fn test_parse_non_ascii_fraction_is_error() {
        // Multi-byte characters in the fraction must not slice mid-character
        assert!(Money::parse("10.€5").is_err());
        assert!(Money::parse("10.5€").is_err());
        assert!(Money::parse("10.₹₹").is_err());
    }

    #[test]
    fn test_comparison() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        let c = Money::from_cents(1000);

        assert!(a > b);
        assert!(b < a);
        assert_eq!(a, c);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
