//! Identifier types for pipeline entities
//!
//! CUSIPs come in on the feeds; order, trade, and inquiry identifiers are
//! either feed-supplied or generated as random alphanumeric strings.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ProductError;

/// 9-character US security identifier.
///
/// Validated on construction; the feed adapters reject lines whose CUSIP
/// field is not exactly nine alphanumeric characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cusip(String);

impl Cusip {
    /// Create a new Cusip, validating the 9-character format.
    pub fn new(s: impl Into<String>) -> Result<Self, ProductError> {
        let s = s.into();
        if s.len() == 9 && s.chars().all(|c| c.is_ascii_alphanumeric()) {
            Ok(Self(s))
        } else {
            Err(ProductError::InvalidCusip { cusip: s })
        }
    }

    /// Get the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cusip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an execution order.
///
/// Algo executions generate `Algo` + 11 random alphanumeric characters;
/// parent ids use `AlgoParent` + 5.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Generate an algo order id: `Algo` + 11 random characters.
    pub fn algo<R: Rng>(rng: &mut R) -> Self {
        Self(format!("Algo{}", random_alphanumeric(rng, 11)))
    }

    /// Generate an algo parent order id: `AlgoParent` + 5 random characters.
    pub fn algo_parent<R: Rng>(rng: &mut R) -> Self {
        Self(format!("AlgoParent{}", random_alphanumeric(rng, 5)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a booked trade.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(String);

impl TradeId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<OrderId> for TradeId {
    fn from(id: OrderId) -> Self {
        Self(id.0)
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a customer inquiry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InquiryId(String);

impl InquiryId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InquiryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generate a random identifier from digits and uppercase letters.
pub fn random_alphanumeric<R: Rng>(rng: &mut R, length: usize) -> String {
    const CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    (0..length)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
