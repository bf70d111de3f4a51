//! Service-oriented primitives for the trading pipeline
//!
//! Every domain service is a keyed store plus an ordered listener list.
//! A record entering a service is upserted and then broadcast to each
//! registered listener, synchronously and in registration order, before the
//! intake call returns. Cross-service edges are listener shims, so the
//! whole pipeline forms a directed acyclic listener graph; [`topology`]
//! rejects any wiring that would introduce a cycle.

pub mod service;
pub mod topology;

pub use service::{Connector, ServiceCore, ServiceListener};
pub use topology::{Topology, WiringError};
