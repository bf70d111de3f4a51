//! Mid/spread price records from the pricing feed

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::Cusip;
use crate::numeric::Price;
use crate::tick;

/// A two-sided price: mid plus the bid/offer spread around it.
///
/// Invariant: `spread >= 0`. The bid and offer are derived as
/// `mid ∓ spread / 2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MidPrice {
    pub product: Cusip,
    pub mid: Price,
    pub spread: Decimal,
}

impl MidPrice {
    pub fn new(product: Cusip, mid: Price, spread: Decimal) -> Self {
        debug_assert!(spread >= Decimal::ZERO, "spread must be non-negative");
        Self {
            product,
            mid,
            spread,
        }
    }

    /// Bid side of the quote: mid − spread/2.
    pub fn bid(&self) -> Price {
        self.mid - self.spread / Decimal::from(2)
    }

    /// Offer side of the quote: mid + spread/2.
    pub fn offer(&self) -> Price {
        self.mid + self.spread / Decimal::from(2)
    }
}

impl fmt::Display for MidPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.product,
            tick::format_price(self.mid),
            self.spread
        )
    }
}
