//! Historical Persistence
//!
//! Terminal nodes of the pipeline: each persisted stream gets its own
//! [`historical::HistoricalDataService`], a publish-only listener that
//! appends one timestamped line per notification to its well-known file.
//!
//! - `positions.txt` — positions, keyed by product
//! - `risk.txt` — PV01 records, keyed by product
//! - `executions.txt` — execution orders, keyed by order id
//! - `streaming.txt` — price streams, keyed by product
//! - `allinquiries.txt` — inquiries, keyed by inquiry id
//! - `gui.txt` — the throttled GUI lines
//!
//! [`history::HistoryWriter`] is the shared append-only writer with
//! explicit flush policies.

pub mod historical;
pub mod history;

pub use historical::{GuiSink, HistoricalDataService, HistoryRecord};
pub use history::{FlushPolicy, HistoryError, HistoryWriter};
