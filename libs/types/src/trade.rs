//! Booked trades and the trading books they settle into

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::book::Side;
use crate::errors::ParseError;
use crate::ids::{Cusip, TradeId};
use crate::numeric::{Price, Quantity};
use crate::tick;

/// Direction of a booked trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// +1 for a buy, −1 for a sell; positions net on this sign.
    pub fn sign(&self) -> i64 {
        match self {
            TradeSide::Buy => 1,
            TradeSide::Sell => -1,
        }
    }
}

impl From<Side> for TradeSide {
    /// A BID execution bought, an OFFER execution sold.
    fn from(side: Side) -> Self {
        match side {
            Side::Bid => TradeSide::Buy,
            Side::Offer => TradeSide::Sell,
        }
    }
}

impl FromStr for TradeSide {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(TradeSide::Buy),
            "SELL" => Ok(TradeSide::Sell),
            other => Err(ParseError::BadSide {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        };
        write!(f, "{label}")
    }
}

/// Named partition positions settle into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradingBook {
    Trsy1,
    Trsy2,
    Trsy3,
}

impl TradingBook {
    /// Rotate over the three books by counter value.
    pub fn from_index(index: u64) -> Self {
        match index % 3 {
            0 => TradingBook::Trsy1,
            1 => TradingBook::Trsy2,
            _ => TradingBook::Trsy3,
        }
    }
}

impl FromStr for TradingBook {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TRSY1" => Ok(TradingBook::Trsy1),
            "TRSY2" => Ok(TradingBook::Trsy2),
            "TRSY3" => Ok(TradingBook::Trsy3),
            other => Err(ParseError::BadSide {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TradingBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TradingBook::Trsy1 => "TRSY1",
            TradingBook::Trsy2 => "TRSY2",
            TradingBook::Trsy3 => "TRSY3",
        };
        write!(f, "{label}")
    }
}

/// A trade booked against a particular book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub product: Cusip,
    pub trade_id: TradeId,
    pub price: Price,
    pub book: TradingBook,
    pub quantity: Quantity,
    pub side: TradeSide,
}

impl Trade {
    pub fn new(
        product: Cusip,
        trade_id: TradeId,
        price: Price,
        book: TradingBook,
        quantity: Quantity,
        side: TradeSide,
    ) -> Self {
        Self {
            product,
            trade_id,
            price,
            book,
            quantity,
            side,
        }
    }

    /// Signed quantity: positive for buys, negative for sells.
    pub fn signed_quantity(&self) -> i64 {
        self.side.sign() * self.quantity.as_i64()
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.product,
            self.trade_id,
            tick::format_price(self.price),
            self.book,
            self.quantity,
            self.side
        )
    }
}
