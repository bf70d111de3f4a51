//! Feed counters
//!
//! Lightweight atomics tracking per-feed line outcomes; read by the
//! heartbeat log line in the pipeline binary.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one feed adapter.
#[derive(Debug, Default)]
pub struct FeedMetrics {
    lines_accepted: AtomicU64,
    lines_rejected: AtomicU64,
    connections: AtomicU64,
}

impl FeedMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_accepted(&self) {
        self.lines_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.lines_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_connection(&self) {
        self.connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn lines_accepted(&self) -> u64 {
        self.lines_accepted.load(Ordering::Relaxed)
    }

    pub fn lines_rejected(&self) -> u64 {
        self.lines_rejected.load(Ordering::Relaxed)
    }

    pub fn connections(&self) -> u64 {
        self.connections.load(Ordering::Relaxed)
    }
}
