//! Interest-rate risk records

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::Cusip;

/// PV01 exposure for one product.
///
/// `pv01` is the per-unit dollar value of a 1 basis-point parallel yield
/// shift; `quantity` accumulates the position aggregates delivered so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pv01 {
    pub product: Cusip,
    pub pv01: Decimal,
    pub quantity: i64,
}

impl Pv01 {
    pub fn new(product: Cusip, pv01: Decimal, quantity: i64) -> Self {
        Self {
            product,
            pv01,
            quantity,
        }
    }

    /// Add quantity associated with this risk value.
    pub fn add_quantity(&mut self, quantity: i64) {
        self.quantity += quantity;
    }
}

impl fmt::Display for Pv01 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.product, self.pv01, self.quantity)
    }
}

/// A named group of products risk can be bucketed over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketedSector {
    pub name: String,
    pub products: Vec<Cusip>,
}

impl BucketedSector {
    pub fn new(name: impl Into<String>, products: Vec<Cusip>) -> Self {
        Self {
            name: name.into(),
            products,
        }
    }
}

/// Aggregated risk for a sector.
///
/// `pv01` carries the sector total Σ(unit_pv01 × quantity) rather than a
/// per-unit value; `quantity` is the summed constituent quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorPv01 {
    pub sector: String,
    pub pv01: Decimal,
    pub quantity: i64,
}

impl fmt::Display for SectorPv01 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.sector, self.pv01, self.quantity)
    }
}
