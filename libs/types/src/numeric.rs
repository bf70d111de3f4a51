//! Fixed-point numeric types for prices and quantities
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point error
//! accumulates over the 1/256 increments treasury prices move in).
//!
//! Positivity is enforced at the boundaries: every price entering the
//! system passes through [`TryFrom<Decimal>`], which also backs the serde
//! path. Interior arithmetic on already-validated prices constructs
//! directly and only debug-asserts, since mid ± spread/2 on a quote near
//! par cannot leave the positive range.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::errors::ParseError;

/// Fixed-point treasury price, always positive.
///
/// Subtracting two prices yields a plain [`Decimal`] (a spread can
/// legitimately be negative on a crossed book). Serde delegates to the
/// validated `TryFrom`/`Into` conversions, so a non-positive price fails
/// deserialization the same way it fails parsing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Validated constructor; `None` unless the value is positive.
    pub fn try_new(value: Decimal) -> Option<Self> {
        Self::try_from(value).ok()
    }

    /// Convenience constructor for whole-number prices (tests mostly).
    /// Callers pass non-zero values.
    pub fn from_u64(value: u64) -> Self {
        debug_assert!(value > 0, "price must be positive");
        Self(Decimal::from(value))
    }

    /// Parse a decimal string into a validated price.
    pub fn from_str(s: &str) -> Result<Self, ParseError> {
        let decimal = Decimal::from_str(s).map_err(|_| ParseError::BadPrice {
            value: s.to_string(),
        })?;
        Self::try_from(decimal)
    }

    /// Inner decimal value.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = ParseError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(ParseError::BadPrice {
                value: value.to_string(),
            })
        }
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Add<Decimal> for Price {
    type Output = Price;

    fn add(self, rhs: Decimal) -> Self::Output {
        let sum = self.0 + rhs;
        debug_assert!(sum > Decimal::ZERO, "price arithmetic left positive range");
        Price(sum)
    }
}

impl Sub<Decimal> for Price {
    type Output = Price;

    fn sub(self, rhs: Decimal) -> Self::Output {
        let difference = self.0 - rhs;
        debug_assert!(
            difference > Decimal::ZERO,
            "price arithmetic left positive range"
        );
        Price(difference)
    }
}

impl Sub for Price {
    type Output = Decimal;

    fn sub(self, rhs: Self) -> Self::Output {
        self.0 - rhs.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order and trade quantity.
///
/// Treasury sizes are integral (multiples of a million in practice), so the
/// inner representation is a plain `u64`. Zero is allowed: the hidden side
/// of a market execution carries no quantity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Signed view, used when positions net buys against sells.
    pub fn as_i64(&self) -> i64 {
        self.0 as i64
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_creation() {
        let price = Price::from_u64(100);
        assert_eq!(price.as_decimal(), Decimal::from(100));
    }

    #[test]
    fn test_try_from_rejects_non_positive() {
        assert!(Price::try_from(Decimal::from(100)).is_ok());
        assert!(matches!(
            Price::try_from(Decimal::ZERO),
            Err(ParseError::BadPrice { .. })
        ));
        assert!(Price::try_from(Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_try_new() {
        assert!(Price::try_new(Decimal::from(100)).is_some());
        assert!(Price::try_new(Decimal::ZERO).is_none());
    }

    #[test]
    fn test_from_str_rejects_garbage_and_non_positive() {
        assert!(Price::from_str("99.995").is_ok());
        assert!(Price::from_str("ninety-nine").is_err());
        assert!(Price::from_str("0").is_err());
        assert!(Price::from_str("-1.5").is_err());
    }

    #[test]
    fn test_price_difference_is_decimal() {
        let offer = Price::from_str("100.0078125").unwrap();
        let bid = Price::from_str("99.9921875").unwrap();
        assert_eq!(offer - bid, Decimal::from_str("0.015625").unwrap());
        // crossed book yields a negative spread without panicking
        assert!((bid - offer) < Decimal::ZERO);
    }

    #[test]
    fn test_price_offset() {
        let mid = Price::from_u64(100);
        let half_spread = Decimal::from_str("0.005").unwrap();
        assert_eq!(
            (mid - half_spread).as_decimal(),
            Decimal::from_str("99.995").unwrap()
        );
        assert_eq!(
            (mid + half_spread).as_decimal(),
            Decimal::from_str("100.005").unwrap()
        );
    }

    #[test]
    fn test_price_serializes_as_string() {
        let price = Price::from_str("99.995").unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"99.995\"");
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(price, back);
    }

    #[test]
    fn test_price_deserialize_rejects_non_positive() {
        assert!(serde_json::from_str::<Price>("\"0\"").is_err());
        assert!(serde_json::from_str::<Price>("\"-2.5\"").is_err());
    }

    #[test]
    fn test_quantity_arithmetic() {
        let visible = Quantity::new(1_000_000);
        let hidden = Quantity::new(2_000_000);
        assert_eq!((visible + hidden).as_u64(), 3_000_000);
    }

    #[test]
    fn test_quantity_zero() {
        assert!(Quantity::ZERO.is_zero());
        assert!(!Quantity::new(1).is_zero());
    }

    #[test]
    fn test_quantity_serializes_as_number() {
        let qty = Quantity::new(1_000_000);
        let json = serde_json::to_string(&qty).unwrap();
        assert_eq!(json, "1000000");
    }
}
