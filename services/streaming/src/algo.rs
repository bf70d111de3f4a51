//! Algo streaming pass: prices in, two-way streams out
//!
//! For every price observed the service constructs a stream whose bid and
//! offer sit `spread / 2` around the mid. Visible size alternates between
//! one and two million on a per-service counter; hidden size is always
//! twice the visible size.

use std::sync::{Arc, Mutex};

use soa::{ServiceCore, ServiceListener};
use tracing::debug;
use types::book::Side;
use types::ids::Cusip;
use types::numeric::Quantity;
use types::price::MidPrice;
use types::stream::{AlgoStream, PriceStream, PriceStreamOrder};

const VISIBLE_EVEN: u64 = 1_000_000;
const VISIBLE_ODD: u64 = 2_000_000;

/// Keyed on product identifier.
pub struct AlgoStreamingService {
    core: ServiceCore<Cusip, AlgoStream>,
    /// Monotonic per-service counter driving the size alternation.
    count: u64,
}

impl AlgoStreamingService {
    pub fn new() -> Self {
        Self {
            core: ServiceCore::new(),
            count: 0,
        }
    }

    /// Derive a stream from a price, store it, and notify listeners.
    pub fn publish_algo_stream(&mut self, price: &MidPrice) {
        let visible = if self.count % 2 == 0 {
            VISIBLE_EVEN
        } else {
            VISIBLE_ODD
        };
        self.count += 1;
        let hidden = visible * 2;

        let bid = PriceStreamOrder::new(
            price.bid(),
            Quantity::new(visible),
            Quantity::new(hidden),
            Side::Bid,
        );
        let offer = PriceStreamOrder::new(
            price.offer(),
            Quantity::new(visible),
            Quantity::new(hidden),
            Side::Offer,
        );
        let stream = AlgoStream::new(PriceStream::new(price.product.clone(), bid, offer));

        debug!(product = %price.product, visible, "algo stream derived");
        self.core.apply(price.product.clone(), stream);
    }

    pub fn get_data(&self, product: &Cusip) -> Option<&AlgoStream> {
        self.core.get(product)
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<AlgoStream>>) {
        self.core.add_listener(listener);
    }
}

impl Default for AlgoStreamingService {
    fn default() -> Self {
        Self::new()
    }
}

/// Shim subscribing this service to the pricing service.
pub struct AlgoStreamingListener {
    service: Arc<Mutex<AlgoStreamingService>>,
}

impl AlgoStreamingListener {
    pub fn new(service: Arc<Mutex<AlgoStreamingService>>) -> Self {
        Self { service }
    }
}

impl ServiceListener<MidPrice> for AlgoStreamingListener {
    fn process_add(&mut self, data: &MidPrice) {
        if let Ok(mut service) = self.service.lock() {
            service.publish_algo_stream(data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use types::numeric::Price;

    fn price(cusip: &str) -> MidPrice {
        MidPrice::new(
            Cusip::new(cusip).unwrap(),
            Price::from_u64(100),
            Decimal::from_str("0.01").unwrap(),
        )
    }

    #[test]
    fn test_first_stream_shape() {
        let mut service = AlgoStreamingService::new();
        service.publish_algo_stream(&price("9128283H1"));

        let stream = &service
            .get_data(&Cusip::new("9128283H1").unwrap())
            .unwrap()
            .price_stream;
        assert_eq!(stream.bid.price, Price::from_str("99.995").unwrap());
        assert_eq!(stream.offer.price, Price::from_str("100.005").unwrap());
        assert_eq!(stream.bid.visible_quantity.as_u64(), 1_000_000);
        assert_eq!(stream.bid.hidden_quantity.as_u64(), 2_000_000);
        assert_eq!(stream.bid.side, Side::Bid);
        assert_eq!(stream.offer.side, Side::Offer);
    }

    #[test]
    fn test_visible_size_alternates() {
        let mut service = AlgoStreamingService::new();
        let cusip = Cusip::new("9128283H1").unwrap();

        let mut sizes = Vec::new();
        for _ in 0..4 {
            service.publish_algo_stream(&price("9128283H1"));
            let stream = &service.get_data(&cusip).unwrap().price_stream;
            sizes.push(stream.bid.visible_quantity.as_u64());
        }
        assert_eq!(sizes, vec![1_000_000, 2_000_000, 1_000_000, 2_000_000]);
    }

    #[test]
    fn test_hidden_is_twice_visible() {
        let mut service = AlgoStreamingService::new();
        let cusip = Cusip::new("9128283H1").unwrap();
        for _ in 0..3 {
            service.publish_algo_stream(&price("9128283H1"));
            let stream = &service.get_data(&cusip).unwrap().price_stream;
            assert_eq!(
                stream.offer.hidden_quantity.as_u64(),
                2 * stream.offer.visible_quantity.as_u64()
            );
        }
    }

    #[test]
    fn test_counter_is_per_service_not_per_product() {
        let mut service = AlgoStreamingService::new();
        service.publish_algo_stream(&price("9128283H1"));
        service.publish_algo_stream(&price("912828M80"));

        // second product sees the odd counter value
        let stream = &service
            .get_data(&Cusip::new("912828M80").unwrap())
            .unwrap()
            .price_stream;
        assert_eq!(stream.bid.visible_quantity.as_u64(), 2_000_000);
    }
}
