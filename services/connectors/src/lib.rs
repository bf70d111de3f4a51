//! Connectors — everything that crosses the process boundary
//!
//! Inbound, one feed server per external source, newline framed:
//!
//! - prices → `PricingService`
//! - order books → `MarketDataService`
//! - trades → `TradeBookingService`
//! - inquiries → `InquiryService`
//!
//! Outbound, '\r' framed, writes enqueued and never blocking the graph:
//!
//! - price stream dumps → downstream stream socket
//! - execution dumps → downstream execution socket
//!
//! Plus the receiving side of those sockets ([`receiver`]) and the file
//! feeder ([`feeder`]) that replays fixture files into a feed socket.
//!
//! Failure policy is fail-open at record granularity: a malformed line or
//! unknown CUSIP logs a warning and is skipped; a bind failure aborts only
//! the affected adapter.

pub mod feed;
pub mod feeder;
pub mod metrics;
pub mod parsers;
pub mod publish;
pub mod receiver;

pub use feed::{
    run_feed, FeedHandler, InquiryFeedHandler, MarketDataFeedHandler, PriceFeedHandler,
    TradeFeedHandler,
};
pub use metrics::FeedMetrics;
pub use publish::{ExecutionPublisher, StreamPublisher};
