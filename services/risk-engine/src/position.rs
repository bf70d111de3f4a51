//! Position service: signed per-book inventory
//!
//! Each booked trade adds its signed quantity (+ for buys, − for sells)
//! into the product's book slot; listeners receive the updated position
//! record after every mutation.

use std::sync::{Arc, Mutex};

use soa::{ServiceCore, ServiceListener};
use tracing::debug;
use types::ids::Cusip;
use types::position::Position;
use types::trade::Trade;

/// Keyed on product identifier.
pub struct PositionService {
    core: ServiceCore<Cusip, Position>,
}

impl PositionService {
    pub fn new() -> Self {
        Self {
            core: ServiceCore::new(),
        }
    }

    /// Fold a trade into the product's position and notify listeners with
    /// the updated record.
    pub fn add_trade(&mut self, trade: &Trade) {
        let product = trade.product.clone();
        let mut position = self
            .core
            .get(&product)
            .cloned()
            .unwrap_or_else(|| Position::new(product.clone()));
        position.add(trade.book, trade.signed_quantity());

        debug!(
            product = %product,
            book = %trade.book,
            aggregate = position.aggregate(),
            "position updated"
        );
        self.core.apply(product, position);
    }

    pub fn get_data(&self, product: &Cusip) -> Option<&Position> {
        self.core.get(product)
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<Position>>) {
        self.core.add_listener(listener);
    }
}

impl Default for PositionService {
    fn default() -> Self {
        Self::new()
    }
}

/// Shim subscribing this service to trade booking.
pub struct PositionListener {
    service: Arc<Mutex<PositionService>>,
}

impl PositionListener {
    pub fn new(service: Arc<Mutex<PositionService>>) -> Self {
        Self { service }
    }
}

impl ServiceListener<Trade> for PositionListener {
    fn process_add(&mut self, data: &Trade) {
        if let Ok(mut service) = self.service.lock() {
            service.add_trade(data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::TradeId;
    use types::numeric::{Price, Quantity};
    use types::trade::{TradeSide, TradingBook};

    fn trade(id: &str, book: TradingBook, qty: u64, side: TradeSide) -> Trade {
        Trade::new(
            Cusip::new("912828M80").unwrap(),
            TradeId::new(id),
            Price::from_u64(100),
            book,
            Quantity::new(qty),
            side,
        )
    }

    #[test]
    fn test_buys_accumulate() {
        let mut service = PositionService::new();
        service.add_trade(&trade("T1", TradingBook::Trsy1, 1_000_000, TradeSide::Buy));
        service.add_trade(&trade("T2", TradingBook::Trsy1, 3_000_000, TradeSide::Buy));

        let position = service.get_data(&Cusip::new("912828M80").unwrap()).unwrap();
        assert_eq!(position.quantity(TradingBook::Trsy1), 4_000_000);
        assert_eq!(position.aggregate(), 4_000_000);
    }

    #[test]
    fn test_sells_subtract() {
        let mut service = PositionService::new();
        service.add_trade(&trade("T1", TradingBook::Trsy1, 5_000_000, TradeSide::Buy));
        service.add_trade(&trade("T2", TradingBook::Trsy2, 2_000_000, TradeSide::Sell));

        let position = service.get_data(&Cusip::new("912828M80").unwrap()).unwrap();
        assert_eq!(position.aggregate(), 3_000_000);
        assert_eq!(position.quantity(TradingBook::Trsy2), -2_000_000);
    }

    #[test]
    fn test_listener_sees_running_position() {
        struct Capture {
            aggregates: Arc<Mutex<Vec<i64>>>,
        }
        impl ServiceListener<Position> for Capture {
            fn process_add(&mut self, data: &Position) {
                if let Ok(mut aggregates) = self.aggregates.lock() {
                    aggregates.push(data.aggregate());
                }
            }
        }

        let aggregates = Arc::new(Mutex::new(Vec::new()));
        let mut service = PositionService::new();
        service.add_listener(Box::new(Capture {
            aggregates: Arc::clone(&aggregates),
        }));

        service.add_trade(&trade("T1", TradingBook::Trsy1, 1_000_000, TradeSide::Buy));
        service.add_trade(&trade("T2", TradingBook::Trsy1, 2_000_000, TradeSide::Buy));
        service.add_trade(&trade("T3", TradingBook::Trsy1, 1_000_000, TradeSide::Sell));

        assert_eq!(
            aggregates.lock().unwrap().as_slice(),
            &[1_000_000, 3_000_000, 2_000_000]
        );
    }
}
