//! Money amounts using decimal arithmetic.
//!
//! The backend reports every amount in QAR as a JSON number. Amounts are
//! kept as [`Decimal`] so sums and differences computed for display are
//! exact.

use core::fmt;
use core::ops::{Add, Sub};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A QAR amount as reported by the backend.
///
/// `Display` prints the normalized value (`150`, `12.5`); use
/// [`Amount::fixed2`] where a report shows two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount from a decimal value.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create a whole-number amount.
    #[must_use]
    pub fn whole(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    /// Returns `true` if the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Format with exactly two decimal places (e.g., `-5.00`).
    #[must_use]
    pub fn fixed2(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{rounded:.2}")
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_normalized() {
        assert_eq!(Amount::whole(150).to_string(), "150");
        assert_eq!(Amount::new(Decimal::new(1250, 2)).to_string(), "12.5");
    }

    #[test]
    fn test_fixed2() {
        assert_eq!(Amount::whole(-5).fixed2(), "-5.00");
        assert_eq!(Amount::new(Decimal::new(12345, 3)).fixed2(), "12.35");
    }

    #[test]
    fn test_sign_checks() {
        assert!(Amount::whole(-5).is_negative());
        assert!(!Amount::ZERO.is_negative());
        assert!(Amount::ZERO.is_zero());
        assert!(!Amount::whole(3).is_negative());
    }

    #[test]
    fn test_deserialize_json_numbers() {
        let amount: Amount = serde_json::from_str("100").unwrap();
        assert_eq!(amount, Amount::whole(100));

        let amount: Amount = serde_json::from_str("-5").unwrap();
        assert!(amount.is_negative());

        let amount: Amount = serde_json::from_str("12.5").unwrap();
        assert_eq!(amount.fixed2(), "12.50");
    }

    #[test]
    fn test_arithmetic() {
        let total = Amount::whole(100) + Amount::whole(50);
        assert_eq!(total, Amount::whole(150));
        assert_eq!(total - Amount::whole(200), Amount::whole(-50));
    }
}
