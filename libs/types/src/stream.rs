//! Two-way price streams produced by the algo streaming path

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::book::Side;
use crate::ids::Cusip;
use crate::numeric::{Price, Quantity};
use crate::tick;

/// One side of a published price stream.
///
/// Invariant: `hidden_quantity = 2 × visible_quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceStreamOrder {
    pub price: Price,
    pub visible_quantity: Quantity,
    pub hidden_quantity: Quantity,
    pub side: Side,
}

impl PriceStreamOrder {
    pub fn new(price: Price, visible_quantity: Quantity, hidden_quantity: Quantity, side: Side) -> Self {
        Self {
            price,
            visible_quantity,
            hidden_quantity,
            side,
        }
    }
}

impl fmt::Display for PriceStreamOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side {
            Side::Bid => "BID",
            Side::Offer => "OFFER",
        };
        write!(
            f,
            "{},{},{},{}",
            tick::format_price(self.price),
            self.visible_quantity,
            self.hidden_quantity,
            side
        )
    }
}

/// A two-way market: a bid order and an offer order on one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceStream {
    pub product: Cusip,
    pub bid: PriceStreamOrder,
    pub offer: PriceStreamOrder,
}

impl PriceStream {
    pub fn new(product: Cusip, bid: PriceStreamOrder, offer: PriceStreamOrder) -> Self {
        Self {
            product,
            bid,
            offer,
        }
    }
}

impl fmt::Display for PriceStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.product, self.bid, self.offer)
    }
}

/// Output of the algo streaming pass; wraps the stream it derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgoStream {
    pub price_stream: PriceStream,
}

impl AlgoStream {
    pub fn new(price_stream: PriceStream) -> Self {
        Self { price_stream }
    }
}
