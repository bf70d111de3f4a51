//! Risk Engine Services
//!
//! The position and risk tail of the pipeline:
//!
//! - [`position::PositionService`] — signed per-book positions, updated
//!   additively from booked trades
//! - [`risk::RiskService`] — PV01 exposure per product, accumulated from
//!   position aggregates, with bucketed sector queries
//! - [`pv01`] — the per-unit PV01 seed table derived from the bond formula
//!
//! ```text
//! TradeBookingService ──▶ PositionService ──▶ RiskService ──▶ Historical
//! ```

pub mod position;
pub mod pv01;
pub mod risk;

pub use position::{PositionListener, PositionService};
pub use pv01::Pv01Table;
pub use risk::{RiskListener, RiskService};
