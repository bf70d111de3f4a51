//! Order book stacks with per-price depth aggregation
//!
//! Books arrive as five raw levels per side. Before a book is stored or
//! shown to listeners its sides are aggregated: quantities at equal prices
//! are summed, bids sorted best (highest) first, offers best (lowest) first.
//! Aggregation is idempotent, so re-aggregating a stored book is a no-op.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ids::Cusip;
use crate::numeric::{Price, Quantity};

/// Number of levels each side of an inbound book snapshot carries.
pub const BOOK_DEPTH: usize = 5;

/// Side of a resting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy interest
    Bid,
    /// Sell interest
    Offer,
}

impl Side {
    pub fn opposite(&self) -> Self {
        match self {
            Side::Bid => Side::Offer,
            Side::Offer => Side::Bid,
        }
    }
}

/// A resting order: price, quantity and side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookOrder {
    pub price: Price,
    pub quantity: Quantity,
    pub side: Side,
}

impl BookOrder {
    pub fn new(price: Price, quantity: Quantity, side: Side) -> Self {
        Self {
            price,
            quantity,
            side,
        }
    }
}

/// Best bid and best offer of a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidOffer {
    pub bid: BookOrder,
    pub offer: BookOrder,
}

impl BidOffer {
    /// Spread between the best offer and the best bid.
    pub fn spread(&self) -> Decimal {
        self.offer.price - self.bid.price
    }
}

/// Order book with a bid and an offer stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    pub product: Cusip,
    pub bids: Vec<BookOrder>,
    pub offers: Vec<BookOrder>,
}

impl OrderBook {
    pub fn new(product: Cusip, bids: Vec<BookOrder>, offers: Vec<BookOrder>) -> Self {
        Self {
            product,
            bids,
            offers,
        }
    }

    /// Highest-priced bid, if any.
    pub fn best_bid(&self) -> Option<&BookOrder> {
        self.bids.iter().max_by_key(|order| order.price)
    }

    /// Lowest-priced offer, if any.
    pub fn best_offer(&self) -> Option<&BookOrder> {
        self.offers.iter().min_by_key(|order| order.price)
    }

    /// Best bid and offer together; `None` when either side is empty.
    pub fn best_bid_offer(&self) -> Option<BidOffer> {
        match (self.best_bid(), self.best_offer()) {
            (Some(bid), Some(offer)) => Some(BidOffer {
                bid: bid.clone(),
                offer: offer.clone(),
            }),
            _ => None,
        }
    }

    /// Aggregate both sides by price.
    ///
    /// Quantities at equal prices are summed; the aggregated bid stack is
    /// sorted best (highest) first and the offer stack best (lowest) first.
    pub fn aggregate(self) -> OrderBook {
        let bids = aggregate_side(self.bids, Side::Bid);
        let offers = aggregate_side(self.offers, Side::Offer);
        OrderBook {
            product: self.product,
            bids,
            offers,
        }
    }
}

fn aggregate_side(orders: Vec<BookOrder>, side: Side) -> Vec<BookOrder> {
    // BTreeMap keyed on price for deterministic iteration order
    let mut levels: BTreeMap<Decimal, u64> = BTreeMap::new();
    for order in orders {
        *levels.entry(order.price.as_decimal()).or_insert(0) += order.quantity.as_u64();
    }

    let mut aggregated: Vec<BookOrder> = levels
        .into_iter()
        .filter_map(|(price, qty)| {
            Price::try_new(price).map(|p| BookOrder::new(p, Quantity::new(qty), side))
        })
        .collect();

    // best bid first (descending); BTreeMap already yields offers ascending
    if side == Side::Bid {
        aggregated.reverse();
    }
    aggregated
}
