//! Algo execution pass: aggress the book when the spread is tightest
//!
//! A market execution is produced only when best_offer − best_bid is at
//! most 1/128. The pass alternates between buying and selling on a
//! per-service counter: a buy takes liquidity from the offer at the offer
//! price but is sized off the bid side, a sell mirrors that. Books wider
//! than the gate produce nothing downstream and do not advance the
//! alternation.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use soa::{ServiceCore, ServiceListener};
use tracing::{debug, trace};
use types::book::{OrderBook, Side};
use types::execution::{AlgoExecution, ExecutionOrder, Market, OrderType};
use types::ids::{Cusip, OrderId};
use types::numeric::Quantity;

/// The gate: 1/128, the tightest spread the synthetic books reach.
pub fn tightest_spread() -> Decimal {
    Decimal::ONE / Decimal::from(128)
}

/// Keyed on product identifier.
pub struct AlgoExecutionService {
    core: ServiceCore<Cusip, AlgoExecution>,
    /// Counts emitted executions; parity selects buy vs sell.
    count: u64,
    rng: StdRng,
}

impl AlgoExecutionService {
    pub fn new() -> Self {
        Self {
            core: ServiceCore::new(),
            count: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic ids for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            core: ServiceCore::new(),
            count: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// React to an aggregated book: emit one market execution when the
    /// spread gate passes, otherwise do nothing at all.
    pub fn execute_on_book(&mut self, book: &OrderBook) {
        let Some(top) = book.best_bid_offer() else {
            trace!(product = %book.product, "book missing a side, skipped");
            return;
        };
        if top.spread() > tightest_spread() {
            trace!(product = %book.product, spread = %top.spread(), "spread too wide, skipped");
            return;
        }

        // Buy on even counts, sell on odd. The aggressing order crosses the
        // spread at the far side's price but is sized off the near side.
        let (side, price, quantity) = if self.count % 2 == 0 {
            (Side::Bid, top.offer.price, top.bid.quantity)
        } else {
            (Side::Offer, top.bid.price, top.offer.quantity)
        };
        self.count += 1;

        let order = ExecutionOrder::new(
            book.product.clone(),
            side,
            OrderId::algo(&mut self.rng),
            OrderType::Market,
            price,
            quantity,
            Quantity::ZERO,
            OrderId::algo_parent(&mut self.rng),
            false,
        );
        let execution = AlgoExecution::new(order, Market::Brokertec);

        debug!(
            product = %book.product,
            order_id = %execution.order.order_id,
            ?side,
            "algo execution emitted"
        );
        self.core.apply(book.product.clone(), execution);
    }

    pub fn get_data(&self, product: &Cusip) -> Option<&AlgoExecution> {
        self.core.get(product)
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<AlgoExecution>>) {
        self.core.add_listener(listener);
    }
}

impl Default for AlgoExecutionService {
    fn default() -> Self {
        Self::new()
    }
}

/// Shim subscribing this service to the market data service.
pub struct AlgoExecutionListener {
    service: Arc<Mutex<AlgoExecutionService>>,
}

impl AlgoExecutionListener {
    pub fn new(service: Arc<Mutex<AlgoExecutionService>>) -> Self {
        Self { service }
    }
}

impl ServiceListener<OrderBook> for AlgoExecutionListener {
    fn process_add(&mut self, data: &OrderBook) {
        if let Ok(mut service) = self.service.lock() {
            service.execute_on_book(data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::book::BookOrder;
    use types::numeric::Price;

    fn cusip() -> Cusip {
        Cusip::new("9128283F5").unwrap()
    }

    fn book(bid: &str, bid_qty: u64, offer: &str, offer_qty: u64) -> OrderBook {
        OrderBook::new(
            cusip(),
            vec![BookOrder::new(
                Price::from_str(bid).unwrap(),
                Quantity::new(bid_qty),
                Side::Bid,
            )],
            vec![BookOrder::new(
                Price::from_str(offer).unwrap(),
                Quantity::new(offer_qty),
                Side::Offer,
            )],
        )
    }

    #[test]
    fn test_wide_spread_emits_nothing() {
        let mut service = AlgoExecutionService::with_seed(1);
        // spread = 1/64, wider than the 1/128 gate
        service.execute_on_book(&book("99.9921875", 1_000_000, "100.0078125", 2_000_000));
        assert!(service.get_data(&cusip()).is_none());
    }

    #[test]
    fn test_tight_spread_emits_buy_with_cross_sizing() {
        let mut service = AlgoExecutionService::with_seed(1);
        // spread exactly 1/128
        service.execute_on_book(&book("99.9921875", 1_000_000, "100.0", 2_000_000));

        let execution = service.get_data(&cusip()).unwrap();
        assert_eq!(execution.order.side, Side::Bid);
        // buy takes the offer price...
        assert_eq!(execution.order.price, Price::from_str("100.0").unwrap());
        // ...but is sized off the bid side
        assert_eq!(execution.order.visible_quantity.as_u64(), 1_000_000);
        assert_eq!(execution.order.hidden_quantity.as_u64(), 0);
        assert_eq!(execution.order.order_type, OrderType::Market);
        assert_eq!(execution.market, Market::Brokertec);
        assert!(!execution.order.is_child_order);
    }

    #[test]
    fn test_alternation_between_buy_and_sell() {
        let mut service = AlgoExecutionService::with_seed(1);
        let tight = book("99.9921875", 1_000_000, "100.0", 2_000_000);

        service.execute_on_book(&tight);
        assert_eq!(service.get_data(&cusip()).unwrap().order.side, Side::Bid);

        service.execute_on_book(&tight);
        let sell = service.get_data(&cusip()).unwrap();
        assert_eq!(sell.order.side, Side::Offer);
        // sell hits the bid price, sized off the offer side
        assert_eq!(sell.order.price, Price::from_str("99.9921875").unwrap());
        assert_eq!(sell.order.visible_quantity.as_u64(), 2_000_000);
    }

    #[test]
    fn test_gated_books_do_not_advance_alternation() {
        let mut service = AlgoExecutionService::with_seed(1);
        let wide = book("99.9921875", 1_000_000, "100.0078125", 2_000_000);
        let tight = book("99.9921875", 1_000_000, "100.0", 2_000_000);

        service.execute_on_book(&wide);
        service.execute_on_book(&tight);
        // the wide book consumed no parity; the first emit is still a buy
        assert_eq!(service.get_data(&cusip()).unwrap().order.side, Side::Bid);
    }

    #[test]
    fn test_order_ids_are_fresh_per_execution() {
        let mut service = AlgoExecutionService::with_seed(1);
        let tight = book("99.9921875", 1_000_000, "100.0", 2_000_000);

        service.execute_on_book(&tight);
        let first = service.get_data(&cusip()).unwrap().order.order_id.clone();
        service.execute_on_book(&tight);
        let second = service.get_data(&cusip()).unwrap().order.order_id.clone();

        assert_ne!(first, second);
        assert!(first.as_str().starts_with("Algo"));
    }

    #[test]
    fn test_empty_side_is_skipped() {
        let mut service = AlgoExecutionService::with_seed(1);
        let book = OrderBook::new(cusip(), vec![], vec![]);
        service.execute_on_book(&book);
        assert!(service.get_data(&cusip()).is_none());
    }
}
