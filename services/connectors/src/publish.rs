//! Outbound socket publishers, '\r' framed
//!
//! A publisher owns only the sending half of an unbounded channel; a
//! spawned writer task owns the TCP connection. `publish` therefore
//! enqueues and returns immediately, and a broken or absent downstream
//! costs the graph nothing but a log line per dropped frame.

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use soa::Connector;
use types::execution::{ExecutionOrder, Market};
use types::stream::PriceStream;

/// Frame delimiter on the downstream sockets.
const FRAME_DELIMITER: u8 = b'\r';

/// Spawn the writer task for one downstream socket and hand back the
/// enqueue side.
fn spawn_socket_writer(addr: String, label: &'static str) -> mpsc::UnboundedSender<String> {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    tokio::spawn(async move {
        let mut stream = match TcpStream::connect(&addr).await {
            Ok(stream) => {
                info!(sink = label, %addr, "sink connected");
                stream
            }
            Err(err) => {
                error!(sink = label, %addr, %err, "sink connect failed, frames will be dropped");
                // drain so publishers never block or accumulate
                while rx.recv().await.is_some() {}
                return;
            }
        };

        while let Some(frame) = rx.recv().await {
            let mut bytes = frame.into_bytes();
            bytes.push(FRAME_DELIMITER);
            if let Err(err) = stream.write_all(&bytes).await {
                warn!(sink = label, %err, "sink write failed, frame dropped");
            }
        }
    });
    tx
}

/// Publishes price stream dumps to the downstream stream socket.
pub struct StreamPublisher {
    tx: mpsc::UnboundedSender<String>,
}

impl StreamPublisher {
    /// Connect (asynchronously, in the background) to the downstream
    /// endpoint.
    pub fn connect(addr: String) -> Self {
        Self {
            tx: spawn_socket_writer(addr, "stream"),
        }
    }
}

impl Connector<PriceStream> for StreamPublisher {
    fn publish(&mut self, data: &PriceStream) {
        if self.tx.send(format_stream_dump(data)).is_err() {
            warn!(product = %data.product, "stream writer gone, frame dropped");
        }
    }
}

/// Publishes execution dumps to the downstream execution socket.
pub struct ExecutionPublisher {
    tx: mpsc::UnboundedSender<String>,
}

impl ExecutionPublisher {
    pub fn connect(addr: String) -> Self {
        Self {
            tx: spawn_socket_writer(addr, "execution"),
        }
    }
}

impl execution::ExecutionConnector for ExecutionPublisher {
    fn publish(&mut self, order: &ExecutionOrder, market: Market) {
        if self.tx.send(format_execution_dump(order, market)).is_err() {
            warn!(order_id = %order.order_id, "execution writer gone, frame dropped");
        }
    }
}

/// Human-readable dump of a price stream, one frame.
pub fn format_stream_dump(stream: &PriceStream) -> String {
    format!(
        "Price Stream (Product {}):\n\
         \tBid\tPrice: {}\tVisibleQuantity: {}\tHiddenQuantity: {}\n\
         \tAsk\tPrice: {}\tVisibleQuantity: {}\tHiddenQuantity: {}\n",
        stream.product,
        stream.bid.price,
        stream.bid.visible_quantity,
        stream.bid.hidden_quantity,
        stream.offer.price,
        stream.offer.visible_quantity,
        stream.offer.hidden_quantity,
    )
}

/// Human-readable dump of an execution order plus its market, one frame.
pub fn format_execution_dump(order: &ExecutionOrder, market: Market) -> String {
    let side = match order.side {
        types::book::Side::Bid => "Bid",
        types::book::Side::Offer => "Offer",
    };
    format!(
        "Execution Order (Product {}):\n\
         \tOrderId: {}\tMarket: {}\tSide: {}\tOrderType: {}\tIsChildOrder: {}\n\
         \tPrice: {}\tVisibleQuantity: {}\tHiddenQuantity: {}\tParentOrderId: {}\n",
        order.product,
        order.order_id,
        market,
        side,
        order.order_type,
        if order.is_child_order { "True" } else { "False" },
        order.price,
        order.visible_quantity,
        order.hidden_quantity,
        order.parent_order_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::book::Side;
    use types::execution::OrderType;
    use types::ids::{Cusip, OrderId};
    use types::numeric::{Price, Quantity};
    use types::stream::PriceStreamOrder;

    #[test]
    fn test_stream_dump_layout() {
        let stream = PriceStream::new(
            Cusip::new("9128283H1").unwrap(),
            PriceStreamOrder::new(
                Price::from_str("99.995").unwrap(),
                Quantity::new(1_000_000),
                Quantity::new(2_000_000),
                Side::Bid,
            ),
            PriceStreamOrder::new(
                Price::from_str("100.005").unwrap(),
                Quantity::new(1_000_000),
                Quantity::new(2_000_000),
                Side::Offer,
            ),
        );
        let dump = format_stream_dump(&stream);
        assert!(dump.contains("Product 9128283H1"));
        assert!(dump.contains("Bid\tPrice: 99.995"));
        assert!(dump.contains("Ask\tPrice: 100.005"));
        assert!(dump.contains("HiddenQuantity: 2000000"));
    }

    #[test]
    fn test_execution_dump_layout() {
        let order = ExecutionOrder::new(
            Cusip::new("912828M80").unwrap(),
            Side::Offer,
            OrderId::new("AlgoZZZZZZZZZZZ"),
            OrderType::Market,
            Price::from_u64(100),
            Quantity::new(2_000_000),
            Quantity::ZERO,
            OrderId::new("AlgoParentYYYYY"),
            false,
        );
        let dump = format_execution_dump(&order, Market::Brokertec);
        assert!(dump.contains("OrderId: AlgoZZZZZZZZZZZ"));
        assert!(dump.contains("Market: BROKERTEC"));
        assert!(dump.contains("Side: Offer"));
        assert!(dump.contains("OrderType: MARKET"));
    }
}
