//! Risk service: PV01 exposure accumulated from positions
//!
//! Every position notification contributes the position's aggregate to the
//! product's PV01 quantity (creating the slot from the seed table on first
//! sight). Listeners observe the stored, accumulated record. Sector-level
//! risk is the literal sum Σ(unit_pv01 × quantity) over constituents.

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use soa::{ServiceCore, ServiceListener};
use tracing::{debug, warn};
use types::ids::Cusip;
use types::position::Position;
use types::risk::{BucketedSector, Pv01, SectorPv01};

use crate::pv01::Pv01Table;

/// Keyed on product identifier.
pub struct RiskService {
    core: ServiceCore<Cusip, Pv01>,
    table: Pv01Table,
}

impl RiskService {
    pub fn new(table: Pv01Table) -> Self {
        Self {
            core: ServiceCore::new(),
            table,
        }
    }

    /// Fold a position update into the product's PV01 slot and notify
    /// listeners with the accumulated record.
    pub fn add_position(&mut self, position: &Position) {
        let product = position.product.clone();
        let aggregate = position.aggregate();

        if let Some(existing) = self.core.get_mut(&product) {
            existing.add_quantity(aggregate);
        } else {
            let Some(unit) = self.table.unit_pv01(&product) else {
                warn!(product = %product, "no PV01 seed for product, risk update skipped");
                return;
            };
            self.core
                .insert(product.clone(), Pv01::new(product.clone(), unit, aggregate));
        }

        if let Some(record) = self.core.get(&product).cloned() {
            debug!(product = %product, quantity = record.quantity, "risk updated");
            self.core.notify_add(&record);
        }
    }

    pub fn get_data(&self, product: &Cusip) -> Option<&Pv01> {
        self.core.get(product)
    }

    /// Total risk for a bucketed sector: Σ(unit_pv01 × quantity) with the
    /// summed constituent quantity.
    pub fn get_bucketed_risk(&self, sector: &BucketedSector) -> SectorPv01 {
        let mut pv01 = Decimal::ZERO;
        let mut quantity: i64 = 0;
        for product in &sector.products {
            if let Some(record) = self.core.get(product) {
                pv01 += record.pv01 * Decimal::from(record.quantity);
                quantity += record.quantity;
            }
        }
        SectorPv01 {
            sector: sector.name.clone(),
            pv01,
            quantity,
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<Pv01>>) {
        self.core.add_listener(listener);
    }
}

/// Shim subscribing this service to the position service.
pub struct RiskListener {
    service: Arc<Mutex<RiskService>>,
}

impl RiskListener {
    pub fn new(service: Arc<Mutex<RiskService>>) -> Self {
        Self { service }
    }
}

impl ServiceListener<Position> for RiskListener {
    fn process_add(&mut self, data: &Position) {
        if let Ok(mut service) = self.service.lock() {
            service.add_position(data);
        }
    }
}
