//! Execution orders and market executions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::book::Side;
use crate::ids::{Cusip, OrderId};
use crate::numeric::{Price, Quantity};
use crate::tick;

/// Order type of an execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Fok,
    Ioc,
    Market,
    Limit,
    Stop,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderType::Fok => "FOK",
            OrderType::Ioc => "IOC",
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::Stop => "STOP",
        };
        write!(f, "{label}")
    }
}

/// Venue an execution is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    Brokertec,
    Espeed,
    Cme,
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Market::Brokertec => "BROKERTEC",
            Market::Espeed => "ESPEED",
            Market::Cme => "CME",
        };
        write!(f, "{label}")
    }
}

/// An order that can be placed on an exchange.
///
/// `order_id` is unique process-wide; child orders reference their parent
/// through `parent_order_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOrder {
    pub product: Cusip,
    pub side: Side,
    pub order_id: OrderId,
    pub order_type: OrderType,
    pub price: Price,
    pub visible_quantity: Quantity,
    pub hidden_quantity: Quantity,
    pub parent_order_id: OrderId,
    pub is_child_order: bool,
}

impl ExecutionOrder {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        product: Cusip,
        side: Side,
        order_id: OrderId,
        order_type: OrderType,
        price: Price,
        visible_quantity: Quantity,
        hidden_quantity: Quantity,
        parent_order_id: OrderId,
        is_child_order: bool,
    ) -> Self {
        Self {
            product,
            side,
            order_id,
            order_type,
            price,
            visible_quantity,
            hidden_quantity,
            parent_order_id,
            is_child_order,
        }
    }

    /// Total size of the order.
    pub fn total_quantity(&self) -> Quantity {
        self.visible_quantity + self.hidden_quantity
    }
}

impl fmt::Display for ExecutionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side {
            Side::Bid => "BID",
            Side::Offer => "OFFER",
        };
        write!(
            f,
            "{},{},{},{},{},{},{},{},{}",
            self.product,
            self.order_id,
            side,
            self.order_type,
            tick::format_price(self.price),
            self.visible_quantity,
            self.hidden_quantity,
            self.parent_order_id,
            if self.is_child_order { "True" } else { "False" }
        )
    }
}

/// An execution order bound to the market it will be worked on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgoExecution {
    pub order: ExecutionOrder,
    pub market: Market,
}

impl AlgoExecution {
    pub fn new(order: ExecutionOrder, market: Market) -> Self {
        Self { order, market }
    }
}
