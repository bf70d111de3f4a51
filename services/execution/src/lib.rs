//! Execution Services
//!
//! The book-derived half of the pipeline:
//!
//! - [`algo::AlgoExecutionService`] — aggresses the book when the spread is
//!   at its tightest, alternating buy and sell
//! - [`order_flow::ExecutionService`] — stores execution orders by order id
//!   and publishes them to the execution sink
//! - [`booking::TradeBookingService`] — books trades from the trade feed
//!   and from executions, rotating over the three treasury books
//!
//! ```text
//! MarketDataService ──▶ AlgoExecutionService ──▶ ExecutionService ──▶ sink
//!                                                       │
//! trade feed ───────────────────────────────▶ TradeBookingService ──▶ Position
//! ```

pub mod algo;
pub mod booking;
pub mod order_flow;

pub use algo::{tightest_spread, AlgoExecutionListener, AlgoExecutionService};
pub use booking::{TradeBookingListener, TradeBookingService};
pub use order_flow::{ExecutionConnector, ExecutionListener, ExecutionService};
