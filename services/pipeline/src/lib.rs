//! Pipeline assembly
//!
//! Builds every service, wires the listener graph (rejecting cycles at
//! wiring time), opens the historical files, and runs the four feed
//! servers. The graph, leaves first:
//!
//! ```text
//! prices ──▶ Pricing ──▶ AlgoStreaming ──▶ Streaming ──▶ streaming.txt + socket
//!                   └──▶ GUI (throttled) ──▶ gui.txt
//! books ───▶ MarketData ──▶ AlgoExecution ──▶ Execution ──▶ executions.txt + socket
//!                                                   └──▶ TradeBooking
//! trades ──▶ TradeBooking ──▶ Position ──▶ positions.txt
//!                                   └──▶ Risk ──▶ risk.txt
//! inquiries ──▶ Inquiry ──▶ allinquiries.txt
//! ```

pub mod config;
pub mod wiring;

pub use config::Config;
pub use wiring::{Pipeline, PipelineBuildError};
