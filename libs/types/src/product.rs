//! Bond product payload and the process-wide product registry
//!
//! The registry is seeded once at startup and read-only afterwards; every
//! feed adapter resolves CUSIPs against it and skips records it cannot
//! resolve.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::errors::ProductError;
use crate::ids::Cusip;

/// US treasury bond payload: ticker, coupon and maturity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bond {
    pub cusip: Cusip,
    pub ticker: String,
    /// Annual coupon rate, e.g. 0.0175 for a 1¾ coupon.
    pub coupon: Decimal,
    pub maturity: NaiveDate,
}

impl Bond {
    pub fn new(
        cusip: Cusip,
        ticker: impl Into<String>,
        coupon: Decimal,
        maturity: NaiveDate,
    ) -> Self {
        Self {
            cusip,
            ticker: ticker.into(),
            coupon,
            maturity,
        }
    }
}

/// Read-only registry of tradable bonds, keyed by CUSIP.
#[derive(Debug, Clone, Default)]
pub struct BondRegistry {
    bonds: BTreeMap<Cusip, Bond>,
}

impl BondRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the on-the-run treasury curve
    /// (2Y, 3Y, 5Y, 7Y, 10Y, 20Y, 30Y).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (cusip, ticker, coupon, maturity) in [
            ("9128283H1", "US2Y", "0.01750", (2019, 11, 30)),
            ("9128283L2", "US3Y", "0.01875", (2020, 12, 15)),
            ("912828M80", "US5Y", "0.02000", (2022, 11, 30)),
            ("9128283J7", "US7Y", "0.02125", (2024, 11, 30)),
            ("9128283F5", "US10Y", "0.02250", (2027, 12, 15)),
            ("912810TW8", "US20Y", "0.02500", (2037, 12, 15)),
            ("912810RZ3", "US30Y", "0.02750", (2047, 12, 15)),
        ] {
            let (y, m, d) = maturity;
            let bond = Bond::new(
                Cusip::new(cusip).expect("seed CUSIP is valid"),
                ticker,
                Decimal::from_str(coupon).expect("seed coupon is valid"),
                NaiveDate::from_ymd_opt(y, m, d).expect("seed maturity is valid"),
            );
            registry.insert(bond);
        }
        registry
    }

    /// Insert a bond. Only meaningful before the pipeline is wired; the
    /// registry is shared immutably afterwards.
    pub fn insert(&mut self, bond: Bond) {
        self.bonds.insert(bond.cusip.clone(), bond);
    }

    /// Look up a bond by CUSIP.
    pub fn lookup(&self, cusip: &Cusip) -> Result<&Bond, ProductError> {
        self.bonds.get(cusip).ok_or_else(|| ProductError::UnknownProduct {
            cusip: cusip.to_string(),
        })
    }

    /// Resolve a raw CUSIP string to a registered bond.
    pub fn resolve(&self, raw: &str) -> Result<&Bond, ProductError> {
        let cusip = Cusip::new(raw)?;
        self.lookup(&cusip)
    }

    /// All registered CUSIPs in sorted order.
    pub fn cusips(&self) -> Vec<Cusip> {
        self.bonds.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }
}
