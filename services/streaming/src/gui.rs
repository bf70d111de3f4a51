//! Throttled GUI output path
//!
//! Consumes prices and forwards at most one per throttle window to the GUI
//! sink. The window is per service, not per product, and is measured on a
//! monotonic clock read once per event. Prices arriving inside a window
//! are dropped, never buffered.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use soa::{Connector, ServiceCore, ServiceListener};
use tracing::{debug, trace};
use types::ids::Cusip;
use types::price::MidPrice;

/// Default minimum interval between GUI lines.
pub const GUI_THROTTLE: Duration = Duration::from_millis(300);

/// Keyed on product identifier; emits through the GUI sink.
pub struct GuiService {
    core: ServiceCore<Cusip, MidPrice>,
    throttle: Duration,
    last_emit: Option<Instant>,
    connector: Box<dyn Connector<MidPrice>>,
}

impl GuiService {
    pub fn new(connector: Box<dyn Connector<MidPrice>>) -> Self {
        Self::with_throttle(GUI_THROTTLE, connector)
    }

    pub fn with_throttle(throttle: Duration, connector: Box<dyn Connector<MidPrice>>) -> Self {
        Self {
            core: ServiceCore::new(),
            throttle,
            last_emit: None,
            connector,
        }
    }

    /// Store the price and emit it unless the throttle window is open.
    pub fn on_price(&mut self, price: &MidPrice) {
        self.on_price_at(price, Instant::now());
    }

    /// Throttle decision against an explicit clock reading.
    pub fn on_price_at(&mut self, price: &MidPrice, now: Instant) {
        self.core.apply(price.product.clone(), price.clone());

        let emit = match self.last_emit {
            None => true,
            Some(last) => now.duration_since(last) > self.throttle,
        };
        if emit {
            debug!(product = %price.product, "gui line emitted");
            self.connector.publish(price);
            self.last_emit = Some(now);
        } else {
            trace!(product = %price.product, "gui line dropped by throttle");
        }
    }

    pub fn get_data(&self, product: &Cusip) -> Option<&MidPrice> {
        self.core.get(product)
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<MidPrice>>) {
        self.core.add_listener(listener);
    }
}

/// Shim subscribing the GUI path to the pricing service.
pub struct GuiListener {
    service: Arc<Mutex<GuiService>>,
}

impl GuiListener {
    pub fn new(service: Arc<Mutex<GuiService>>) -> Self {
        Self { service }
    }
}

impl ServiceListener<MidPrice> for GuiListener {
    fn process_add(&mut self, data: &MidPrice) {
        if let Ok(mut service) = self.service.lock() {
            service.on_price(data);
        }
    }
}
