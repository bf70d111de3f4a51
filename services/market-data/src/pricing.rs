//! Pricing service — root of the price-derived edges
//!
//! Stores the latest mid/spread price per product and fans each intake out
//! to its listeners (the algo streaming pass and the throttled GUI path).
//! No derivation happens here beyond identity.

use soa::{ServiceCore, ServiceListener};
use tracing::debug;
use types::ids::Cusip;
use types::price::MidPrice;

/// Keyed on product identifier; one record per product, latest wins.
pub struct PricingService {
    core: ServiceCore<Cusip, MidPrice>,
}

impl PricingService {
    pub fn new() -> Self {
        Self {
            core: ServiceCore::new(),
        }
    }

    /// Feed intake: upsert the price and notify every listener before
    /// returning.
    pub fn on_message(&mut self, price: MidPrice) {
        debug!(product = %price.product, mid = %price.mid, "price intake");
        self.core.apply(price.product.clone(), price);
    }

    /// Latest stored price for a product.
    pub fn get_data(&self, product: &Cusip) -> Option<&MidPrice> {
        self.core.get(product)
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<MidPrice>>) {
        self.core.add_listener(listener);
    }
}

impl Default for PricingService {
    fn default() -> Self {
        Self::new()
    }
}
