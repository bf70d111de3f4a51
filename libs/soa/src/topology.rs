//! Wiring-time acyclicity guard for the listener graph
//!
//! The delivery path locks services along topology edges, so a cycle in the
//! listener graph would deadlock at runtime. Edges are therefore declared
//! while wiring; adding an edge that closes a cycle fails immediately and
//! no runtime detection is needed on the hot path.

use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WiringError {
    #[error("listener edge {from} -> {to} would close a cycle")]
    CycleDetected { from: String, to: String },
}

/// Declared listener edges between named services.
#[derive(Debug, Default)]
pub struct Topology {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a producer → consumer listener edge.
    ///
    /// Fails if the reverse direction is already reachable, i.e. the edge
    /// would close a cycle.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<(), WiringError> {
        if from == to || self.reachable(to, from) {
            return Err(WiringError::CycleDetected {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        self.edges
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
        Ok(())
    }

    /// Number of declared edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|targets| targets.len()).sum()
    }

    fn reachable(&self, from: &str, to: &str) -> bool {
        let mut stack = vec![from.to_string()];
        let mut visited = BTreeSet::new();
        while let Some(node) = stack.pop() {
            if node == to {
                return true;
            }
            if !visited.insert(node.clone()) {
                continue;
            }
            if let Some(targets) = self.edges.get(&node) {
                stack.extend(targets.iter().cloned());
            }
        }
        false
    }
}
