//! Per-unit PV01 seed table
//!
//! The unit PV01 of each bond is precomputed from a standard dirty-price
//! calculation: price the bond off a flat yield, shock the yield by one
//! basis point, and take the price difference. Face 1000, semi-annual
//! coupons, yields from a snapshot of the treasury curve.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

use types::ids::Cusip;

const BASIS_POINT: &str = "0.0001";

/// Present value of the bond cash flows at a flat yield.
fn bond_price(
    face: Decimal,
    coupon_rate: Decimal,
    yield_rate: Decimal,
    years_to_maturity: u32,
    frequency: u32,
) -> Decimal {
    let periods = years_to_maturity * frequency;
    let coupon = face * coupon_rate / Decimal::from(frequency);
    let per_period = Decimal::ONE + yield_rate / Decimal::from(frequency);

    // iterative discounting keeps everything on Decimal (no float pow)
    let mut discount = Decimal::ONE;
    let mut price = Decimal::ZERO;
    for _ in 0..periods {
        discount /= per_period;
        price += coupon * discount;
    }
    price + face * discount
}

/// Dollar PV01 per unit of face under a 1 bp parallel yield shock.
pub fn calculate_pv01(
    face: Decimal,
    coupon_rate: Decimal,
    yield_rate: Decimal,
    years_to_maturity: u32,
    frequency: u32,
) -> Decimal {
    let bp = Decimal::from_str(BASIS_POINT).expect("basis point constant");
    let base = bond_price(face, coupon_rate, yield_rate, years_to_maturity, frequency);
    let shocked = bond_price(
        face,
        coupon_rate,
        yield_rate + bp,
        years_to_maturity,
        frequency,
    );
    base - shocked
}

/// Read-only map CUSIP → unit PV01, seeded for the default bond curve.
#[derive(Debug, Clone, Default)]
pub struct Pv01Table {
    values: BTreeMap<Cusip, Decimal>,
}

impl Pv01Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table for the seven seeded treasuries.
    ///
    /// Yield snapshot: 2Y 4.64%, 3Y 4.40%, 5Y 4.12%, 7Y 4.30%, 10Y 4.28%,
    /// 20Y 4.61%, 30Y 4.43%.
    pub fn with_defaults() -> Self {
        let face = Decimal::from(1000);
        let mut table = Self::new();
        for (cusip, coupon, yield_rate, years) in [
            ("9128283H1", "0.01750", "0.0464", 2u32),
            ("9128283L2", "0.01875", "0.0440", 3),
            ("912828M80", "0.02000", "0.0412", 5),
            ("9128283J7", "0.02125", "0.0430", 7),
            ("9128283F5", "0.02250", "0.0428", 10),
            ("912810TW8", "0.02500", "0.0461", 20),
            ("912810RZ3", "0.02750", "0.0443", 30),
        ] {
            let cusip = Cusip::new(cusip).expect("seed CUSIP is valid");
            let coupon = Decimal::from_str(coupon).expect("seed coupon is valid");
            let yield_rate = Decimal::from_str(yield_rate).expect("seed yield is valid");
            table
                .values
                .insert(cusip, calculate_pv01(face, coupon, yield_rate, years, 2));
        }
        table
    }

    pub fn insert(&mut self, cusip: Cusip, pv01: Decimal) {
        self.values.insert(cusip, pv01);
    }

    /// Unit PV01 for a product, if seeded.
    pub fn unit_pv01(&self, cusip: &Cusip) -> Option<Decimal> {
        self.values.get(cusip).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
