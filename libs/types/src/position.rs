//! Signed per-book position tracking

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::ids::Cusip;
use crate::trade::TradingBook;

/// Signed position in one product across the trading books.
///
/// Mutations are additive: adding a quantity to a book adjusts the existing
/// slot rather than replacing it, so the stored value is the running net.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub product: Cusip,
    /// BTreeMap keeps the book order stable for display and persistence.
    positions: BTreeMap<TradingBook, i64>,
}

impl Position {
    pub fn new(product: Cusip) -> Self {
        Self {
            product,
            positions: BTreeMap::new(),
        }
    }

    /// Add a signed quantity to a book slot.
    pub fn add(&mut self, book: TradingBook, quantity: i64) {
        *self.positions.entry(book).or_insert(0) += quantity;
    }

    /// Net position in one book (zero when the book has never traded).
    pub fn quantity(&self, book: TradingBook) -> i64 {
        self.positions.get(&book).copied().unwrap_or(0)
    }

    /// Net position across all books.
    pub fn aggregate(&self) -> i64 {
        self.positions.values().sum()
    }

    /// Iterate (book, net quantity) pairs in book order.
    pub fn books(&self) -> impl Iterator<Item = (TradingBook, i64)> + '_ {
        self.positions.iter().map(|(book, qty)| (*book, *qty))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.product)?;
        for (book, quantity) in self.books() {
            write!(f, ",{},{}", book, quantity)?;
        }
        Ok(())
    }
}
