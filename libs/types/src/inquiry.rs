//! Customer inquiries and their lifecycle states

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseError;
use crate::ids::{Cusip, InquiryId};
use crate::numeric::{Price, Quantity};
use crate::tick;
use crate::trade::TradeSide;

/// Lifecycle state of a customer inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InquiryState {
    Received,
    Quoted,
    Done,
    Rejected,
    CustomerRejected,
}

impl FromStr for InquiryState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RECEIVED" => Ok(InquiryState::Received),
            "QUOTED" => Ok(InquiryState::Quoted),
            "DONE" => Ok(InquiryState::Done),
            "REJECTED" => Ok(InquiryState::Rejected),
            "CUSTOMER_REJECTED" => Ok(InquiryState::CustomerRejected),
            other => Err(ParseError::BadState {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for InquiryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InquiryState::Received => "RECEIVED",
            InquiryState::Quoted => "QUOTED",
            InquiryState::Done => "DONE",
            InquiryState::Rejected => "REJECTED",
            InquiryState::CustomerRejected => "CUSTOMER_REJECTED",
        };
        write!(f, "{label}")
    }
}

/// A customer inquiry for a quote on one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub inquiry_id: InquiryId,
    pub product: Cusip,
    pub side: TradeSide,
    pub quantity: Quantity,
    pub price: Price,
    pub state: InquiryState,
}

impl Inquiry {
    pub fn new(
        inquiry_id: InquiryId,
        product: Cusip,
        side: TradeSide,
        quantity: Quantity,
        price: Price,
        state: InquiryState,
    ) -> Self {
        Self {
            inquiry_id,
            product,
            side,
            quantity,
            price,
            state,
        }
    }
}

impl fmt::Display for Inquiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.inquiry_id,
            self.product,
            self.side,
            self.quantity,
            tick::format_price(self.price),
            self.state
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(state: InquiryState) -> Inquiry {
        Inquiry::new(
            InquiryId::new("INQ00000001"),
            Cusip::new("9128283F5").unwrap(),
            TradeSide::Buy,
            Quantity::new(2_000_000),
            Price::from_str("99.5").unwrap(),
            state,
        )
    }

    #[test]
    fn test_state_parse_all() {
        for state in [
            InquiryState::Received,
            InquiryState::Quoted,
            InquiryState::Done,
            InquiryState::Rejected,
            InquiryState::CustomerRejected,
        ] {
            assert_eq!(state.to_string().parse::<InquiryState>().unwrap(), state);
        }
    }

    #[test]
    fn test_state_parse_rejects_unknown() {
        assert!("PENDING".parse::<InquiryState>().is_err());
    }

    #[test]
    fn test_state_wire_name() {
        assert_eq!(
            serde_json::to_string(&InquiryState::CustomerRejected).unwrap(),
            "\"CUSTOMER_REJECTED\""
        );
    }

    #[test]
    fn test_display_is_csv() {
        let line = sample(InquiryState::Received).to_string();
        assert_eq!(line.split(',').count(), 6);
        assert!(line.ends_with("RECEIVED"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let inquiry = sample(InquiryState::Quoted);
        let json = serde_json::to_string(&inquiry).unwrap();
        let back: Inquiry = serde_json::from_str(&json).unwrap();
        assert_eq!(inquiry, back);
    }
}
