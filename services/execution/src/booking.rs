//! Trade booking: feed intake plus trades synthesized from executions
//!
//! Trades arrive two ways. The trade feed delivers complete records which
//! are upserted and broadcast through `on_message`. Executions arrive
//! through the listener shim, which synthesizes a trade (total quantity,
//! BID→BUY / OFFER→SELL, books rotating TRSY1→TRSY2→TRSY3) and routes it
//! through `book_trade` — a notify-only path that skips the map update.

use std::sync::{Arc, Mutex};

use soa::{ServiceCore, ServiceListener};
use tracing::debug;
use types::execution::ExecutionOrder;
use types::ids::TradeId;
use types::trade::{Trade, TradeSide, TradingBook};

/// Keyed on trade identifier.
pub struct TradeBookingService {
    core: ServiceCore<TradeId, Trade>,
}

impl TradeBookingService {
    pub fn new() -> Self {
        Self {
            core: ServiceCore::new(),
        }
    }

    /// Feed intake: upsert the trade and notify listeners.
    pub fn on_message(&mut self, trade: Trade) {
        debug!(trade_id = %trade.trade_id, book = %trade.book, "trade intake");
        self.core.apply(trade.trade_id.clone(), trade);
    }

    /// Book a trade synthesized inside the pipeline: notify listeners
    /// without touching the store.
    pub fn book_trade(&mut self, trade: &Trade) {
        debug!(trade_id = %trade.trade_id, book = %trade.book, "trade booked");
        self.core.notify_add(trade);
    }

    pub fn get_data(&self, trade_id: &TradeId) -> Option<&Trade> {
        self.core.get(trade_id)
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<Trade>>) {
        self.core.add_listener(listener);
    }
}

impl Default for TradeBookingService {
    fn default() -> Self {
        Self::new()
    }
}

/// Shim subscribing trade booking to the execution service.
///
/// Carries the per-listener rotation counter; it is incremented before
/// use, so the first booked trade lands in TRSY2.
pub struct TradeBookingListener {
    service: Arc<Mutex<TradeBookingService>>,
    count: u64,
}

impl TradeBookingListener {
    pub fn new(service: Arc<Mutex<TradeBookingService>>) -> Self {
        Self { service, count: 0 }
    }

    fn synthesize(&mut self, order: &ExecutionOrder) -> Trade {
        self.count += 1;
        let book = TradingBook::from_index(self.count);
        Trade::new(
            order.product.clone(),
            TradeId::from(order.order_id.clone()),
            order.price,
            book,
            order.total_quantity(),
            TradeSide::from(order.side),
        )
    }
}

impl ServiceListener<ExecutionOrder> for TradeBookingListener {
    fn process_add(&mut self, data: &ExecutionOrder) {
        let trade = self.synthesize(data);
        if let Ok(mut service) = self.service.lock() {
            service.book_trade(&trade);
        }
    }
}
