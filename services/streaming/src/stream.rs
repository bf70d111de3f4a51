//! Streaming service: stores the latest stream and broadcasts it
//!
//! Consumes algo streams, stores the inner price stream keyed by product,
//! notifies listeners (the historical sink), and pushes the stream out
//! through the publish-only stream connector. The connector enqueues and
//! returns; it never blocks the upstream pricing path.

use std::sync::{Arc, Mutex};

use soa::{Connector, ServiceCore, ServiceListener};
use tracing::debug;
use types::ids::Cusip;
use types::stream::{AlgoStream, PriceStream};

/// Keyed on product identifier.
pub struct StreamingService {
    core: ServiceCore<Cusip, PriceStream>,
    connector: Option<Box<dyn Connector<PriceStream>>>,
}

impl StreamingService {
    pub fn new() -> Self {
        Self {
            core: ServiceCore::new(),
            connector: None,
        }
    }

    /// Attach the outbound stream connector.
    pub fn set_connector(&mut self, connector: Box<dyn Connector<PriceStream>>) {
        self.connector = Some(connector);
    }

    /// Store the stream, notify listeners, then publish it downstream.
    pub fn add_price_stream(&mut self, algo_stream: &AlgoStream) {
        let stream = algo_stream.price_stream.clone();
        let product = stream.product.clone();
        debug!(product = %product, "price stream stored");
        self.core.apply(product, stream);

        if let Some(connector) = &mut self.connector {
            connector.publish(&algo_stream.price_stream);
        }
    }

    pub fn get_data(&self, product: &Cusip) -> Option<&PriceStream> {
        self.core.get(product)
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<PriceStream>>) {
        self.core.add_listener(listener);
    }
}

impl Default for StreamingService {
    fn default() -> Self {
        Self::new()
    }
}

/// Shim subscribing this service to the algo streaming service.
pub struct StreamingListener {
    service: Arc<Mutex<StreamingService>>,
}

impl StreamingListener {
    pub fn new(service: Arc<Mutex<StreamingService>>) -> Self {
        Self { service }
    }
}

impl ServiceListener<AlgoStream> for StreamingListener {
    fn process_add(&mut self, data: &AlgoStream) {
        if let Ok(mut service) = self.service.lock() {
            service.add_price_stream(data);
        }
    }
}
