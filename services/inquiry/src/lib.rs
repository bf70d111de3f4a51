//! Inquiry Service
//!
//! Customer inquiries run a small state machine:
//!
//! | state in | action                              | state out |
//! |----------|-------------------------------------|-----------|
//! | RECEIVED | hand to the quoter, re-submit       | QUOTED    |
//! | QUOTED   | mark DONE, store, notify            | DONE      |
//! | DONE     | remove from the store               | —         |
//! | other    | store, notify                       | unchanged |
//!
//! The quoter plays the role of the inquiry connector's publish path: it
//! transitions a RECEIVED inquiry to QUOTED and the service re-enters the
//! updated record. A terminal DONE never remains in the store, and each
//! terminal transition notifies listeners exactly once.

use soa::{ServiceCore, ServiceListener};
use tracing::debug;
use types::ids::InquiryId;
use types::inquiry::{Inquiry, InquiryState};
use types::numeric::Price;

/// The quote-back half of the inquiry connector.
///
/// `publish` may mutate the inquiry (typically RECEIVED → QUOTED) and
/// returns whether the mutated record should be re-submitted to the
/// service.
pub trait InquiryQuoter: Send {
    fn publish(&mut self, inquiry: &mut Inquiry) -> bool;
}

/// Default quoter: transitions RECEIVED inquiries to QUOTED and re-submits.
#[derive(Debug, Default)]
pub struct AutoQuoter;

impl InquiryQuoter for AutoQuoter {
    fn publish(&mut self, inquiry: &mut Inquiry) -> bool {
        if inquiry.state == InquiryState::Received {
            inquiry.state = InquiryState::Quoted;
            true
        } else {
            false
        }
    }
}

/// Keyed on inquiry identifier (each inquiry is unique, unlike product
/// keyed services).
pub struct InquiryService {
    core: ServiceCore<InquiryId, Inquiry>,
    quoter: Box<dyn InquiryQuoter>,
}

impl InquiryService {
    pub fn new() -> Self {
        Self::with_quoter(Box::new(AutoQuoter))
    }

    pub fn with_quoter(quoter: Box<dyn InquiryQuoter>) -> Self {
        Self {
            core: ServiceCore::new(),
            quoter,
        }
    }

    /// Feed intake and re-entry point for quoter-updated records.
    pub fn on_message(&mut self, mut inquiry: Inquiry) {
        let inquiry_id = inquiry.inquiry_id.clone();
        match inquiry.state {
            InquiryState::Received => {
                debug!(inquiry_id = %inquiry_id, "inquiry received, quoting");
                if self.quoter.publish(&mut inquiry) {
                    self.on_message(inquiry);
                }
            }
            InquiryState::Quoted => {
                inquiry.state = InquiryState::Done;
                debug!(inquiry_id = %inquiry_id, "inquiry quoted, completing");
                self.core.apply(inquiry_id.clone(), inquiry);
                // terminal records never remain in the store
                self.core.remove(&inquiry_id);
            }
            InquiryState::Done => {
                self.core.remove(&inquiry_id);
            }
            InquiryState::Rejected | InquiryState::CustomerRejected => {
                self.core.apply(inquiry_id, inquiry);
            }
        }
    }

    /// Mutate the stored inquiry's price and notify listeners.
    pub fn send_quote(&mut self, inquiry_id: &InquiryId, price: Price) {
        if let Some(inquiry) = self.core.get_mut(inquiry_id) {
            inquiry.price = price;
        }
        if let Some(record) = self.core.get(inquiry_id).cloned() {
            self.core.notify_add(&record);
        }
    }

    /// Reject the stored inquiry.
    pub fn reject_inquiry(&mut self, inquiry_id: &InquiryId) {
        if let Some(inquiry) = self.core.get_mut(inquiry_id) {
            inquiry.state = InquiryState::Rejected;
        }
    }

    pub fn get_data(&self, inquiry_id: &InquiryId) -> Option<&Inquiry> {
        self.core.get(inquiry_id)
    }

    pub fn stored_count(&self) -> usize {
        self.core.len()
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<Inquiry>>) {
        self.core.add_listener(listener);
    }
}

impl Default for InquiryService {
    fn default() -> Self {
        Self::new()
    }
}
