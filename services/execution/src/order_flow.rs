//! Execution service: stores orders and publishes them
//!
//! Consumes algo executions, stores the inner execution order keyed by its
//! process-unique order id, notifies listeners (trade booking and the
//! historical sink), and pushes (order, market) through the execution
//! connector.

use std::sync::{Arc, Mutex};

use soa::{ServiceCore, ServiceListener};
use tracing::debug;
use types::execution::{AlgoExecution, ExecutionOrder, Market};
use types::ids::OrderId;

/// Publish-side connector carrying the order together with its venue.
pub trait ExecutionConnector: Send {
    fn publish(&mut self, order: &ExecutionOrder, market: Market);
}

/// Keyed on order identifier (unique, so upserts never collide).
pub struct ExecutionService {
    core: ServiceCore<OrderId, ExecutionOrder>,
    connector: Option<Box<dyn ExecutionConnector>>,
}

impl ExecutionService {
    pub fn new() -> Self {
        Self {
            core: ServiceCore::new(),
            connector: None,
        }
    }

    /// Attach the outbound execution connector.
    pub fn set_connector(&mut self, connector: Box<dyn ExecutionConnector>) {
        self.connector = Some(connector);
    }

    /// Store the order, notify listeners, then publish it downstream.
    pub fn add_execution_order(&mut self, execution: &AlgoExecution) {
        let order = execution.order.clone();
        debug!(order_id = %order.order_id, market = %execution.market, "execution order stored");
        self.core.apply(order.order_id.clone(), order);

        if let Some(connector) = &mut self.connector {
            connector.publish(&execution.order, execution.market);
        }
    }

    pub fn get_data(&self, order_id: &OrderId) -> Option<&ExecutionOrder> {
        self.core.get(order_id)
    }

    pub fn order_count(&self) -> usize {
        self.core.len()
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<ExecutionOrder>>) {
        self.core.add_listener(listener);
    }
}

impl Default for ExecutionService {
    fn default() -> Self {
        Self::new()
    }
}

/// Shim subscribing this service to the algo execution service.
pub struct ExecutionListener {
    service: Arc<Mutex<ExecutionService>>,
}

impl ExecutionListener {
    pub fn new(service: Arc<Mutex<ExecutionService>>) -> Self {
        Self { service }
    }
}

impl ServiceListener<AlgoExecution> for ExecutionListener {
    fn process_add(&mut self, data: &AlgoExecution) {
        if let Ok(mut service) = self.service.lock() {
            service.add_execution_order(data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::book::Side;
    use types::execution::OrderType;
    use types::ids::Cusip;
    use types::numeric::{Price, Quantity};

    struct CountingConnector {
        published: Arc<Mutex<Vec<(OrderId, Market)>>>,
    }

    impl ExecutionConnector for CountingConnector {
        fn publish(&mut self, order: &ExecutionOrder, market: Market) {
            if let Ok(mut published) = self.published.lock() {
                published.push((order.order_id.clone(), market));
            }
        }
    }

    fn execution(order_id: &str) -> AlgoExecution {
        AlgoExecution::new(
            ExecutionOrder::new(
                Cusip::new("912828M80").unwrap(),
                Side::Bid,
                OrderId::new(order_id),
                OrderType::Market,
                Price::from_u64(100),
                Quantity::new(1_000_000),
                Quantity::ZERO,
                OrderId::new("AlgoParentXXXXX"),
                false,
            ),
            Market::Brokertec,
        )
    }

    #[test]
    fn test_stores_by_order_id() {
        let mut service = ExecutionService::new();
        service.add_execution_order(&execution("AlgoA"));
        service.add_execution_order(&execution("AlgoB"));

        assert_eq!(service.order_count(), 2);
        assert!(service.get_data(&OrderId::new("AlgoA")).is_some());
    }

    #[test]
    fn test_publishes_with_market() {
        let published = Arc::new(Mutex::new(Vec::new()));
        let mut service = ExecutionService::new();
        service.set_connector(Box::new(CountingConnector {
            published: Arc::clone(&published),
        }));

        service.add_execution_order(&execution("AlgoA"));

        let published = published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].1, Market::Brokertec);
    }
}
