//! Order-book market data service with depth aggregation
//!
//! Books arrive as five raw levels per side. Intake aggregates both sides
//! by price (summing quantities at equal prices) and stores the aggregated
//! book, so listeners and best-bid/offer queries only ever see aggregated
//! depth. Aggregation is idempotent; re-delivering a stored book changes
//! nothing.

use soa::{ServiceCore, ServiceListener};
use tracing::debug;
use types::book::{BidOffer, OrderBook, BOOK_DEPTH};
use types::ids::Cusip;

/// Keyed on product identifier; fixed five-level book depth.
pub struct MarketDataService {
    core: ServiceCore<Cusip, OrderBook>,
    book_depth: usize,
}

impl MarketDataService {
    pub fn new() -> Self {
        Self {
            core: ServiceCore::new(),
            book_depth: BOOK_DEPTH,
        }
    }

    /// Feed intake: aggregate the snapshot, store it, notify listeners with
    /// the aggregated book.
    pub fn on_message(&mut self, book: OrderBook) {
        let aggregated = book.aggregate();
        debug!(
            product = %aggregated.product,
            bid_levels = aggregated.bids.len(),
            offer_levels = aggregated.offers.len(),
            "order book intake"
        );
        self.core.apply(aggregated.product.clone(), aggregated);
    }

    /// Latest aggregated book for a product.
    pub fn get_data(&self, product: &Cusip) -> Option<&OrderBook> {
        self.core.get(product)
    }

    /// Best bid and offer from the stored book.
    pub fn get_best_bid_offer(&self, product: &Cusip) -> Option<BidOffer> {
        self.core.get(product).and_then(OrderBook::best_bid_offer)
    }

    pub fn book_depth(&self) -> usize {
        self.book_depth
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<OrderBook>>) {
        self.core.add_listener(listener);
    }
}

impl Default for MarketDataService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use types::book::{BookOrder, Side};
    use types::numeric::{Price, Quantity};

    struct Capture {
        seen: Arc<Mutex<Vec<OrderBook>>>,
    }

    impl ServiceListener<OrderBook> for Capture {
        fn process_add(&mut self, data: &OrderBook) {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(data.clone());
            }
        }
    }

    fn cusip() -> Cusip {
        Cusip::new("912828M80").unwrap()
    }

    fn order(price: &str, qty: u64, side: Side) -> BookOrder {
        BookOrder::new(Price::from_str(price).unwrap(), Quantity::new(qty), side)
    }

    fn five_level_book() -> OrderBook {
        // two bid orders land on the same price level
        let bids = vec![
            order("99.50", 1_000_000, Side::Bid),
            order("99.50", 2_000_000, Side::Bid),
            order("99.25", 3_000_000, Side::Bid),
            order("99.00", 4_000_000, Side::Bid),
            order("98.75", 5_000_000, Side::Bid),
        ];
        let offers = vec![
            order("100.00", 1_000_000, Side::Offer),
            order("100.25", 2_000_000, Side::Offer),
            order("100.25", 3_000_000, Side::Offer),
            order("100.50", 4_000_000, Side::Offer),
            order("100.75", 5_000_000, Side::Offer),
        ];
        OrderBook::new(cusip(), bids, offers)
    }

    #[test]
    fn test_intake_stores_aggregated() {
        let mut service = MarketDataService::new();
        service.on_message(five_level_book());

        let stored = service.get_data(&cusip()).unwrap();
        // 5 raw levels collapse to 4 distinct prices per side
        assert_eq!(stored.bids.len(), 4);
        assert_eq!(stored.offers.len(), 4);
        assert_eq!(stored.bids[0].quantity.as_u64(), 3_000_000);
        assert_eq!(stored.offers[1].quantity.as_u64(), 5_000_000);
    }

    #[test]
    fn test_listeners_see_aggregated_book() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut service = MarketDataService::new();
        service.add_listener(Box::new(Capture {
            seen: Arc::clone(&seen),
        }));

        service.on_message(five_level_book());

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        // no duplicate price on either side
        let mut bid_prices: Vec<_> = seen[0].bids.iter().map(|o| o.price).collect();
        bid_prices.dedup();
        assert_eq!(bid_prices.len(), seen[0].bids.len());
    }

    #[test]
    fn test_best_bid_offer() {
        let mut service = MarketDataService::new();
        service.on_message(five_level_book());

        let top = service.get_best_bid_offer(&cusip()).unwrap();
        assert_eq!(top.bid.price, Price::from_str("99.50").unwrap());
        assert_eq!(top.offer.price, Price::from_str("100.00").unwrap());
        assert_eq!(top.bid.quantity.as_u64(), 3_000_000);
    }

    #[test]
    fn test_best_bid_offer_unknown_product() {
        let service = MarketDataService::new();
        assert!(service.get_best_bid_offer(&cusip()).is_none());
    }

    #[test]
    fn test_book_depth_is_five() {
        assert_eq!(MarketDataService::new().book_depth(), 5);
    }
}
