//! Streaming Services
//!
//! Everything derived from the pricing feed:
//!
//! - [`algo::AlgoStreamingService`] — turns each price into a two-way
//!   stream, alternating visible size deterministically
//! - [`stream::StreamingService`] — stores the latest stream per product
//!   and broadcasts it through the stream sink
//! - [`gui::GuiService`] — throttled GUI output, at most one line per
//!   throttle window, dropped not buffered
//!
//! ```text
//! PricingService ──▶ AlgoStreamingService ──▶ StreamingService ──▶ sink
//!               └──▶ GuiService (throttled) ──▶ gui file
//! ```

pub mod algo;
pub mod gui;
pub mod stream;

pub use algo::{AlgoStreamingListener, AlgoStreamingService};
pub use gui::{GuiListener, GuiService};
pub use stream::{StreamingListener, StreamingService};
