//! Error types for the feed and product layer
//!
//! The pipeline is fail-open at record granularity: a bad line or an
//! unknown CUSIP is logged and skipped, never torn down for.

use thiserror::Error;

/// Feed line parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed line: expected {expected} fields, got {got}")]
    FieldCount { expected: usize, got: usize },

    #[error("bad price: {value}")]
    BadPrice { value: String },

    #[error("bad quantity: {value}")]
    BadQuantity { value: String },

    #[error("bad side: {value}")]
    BadSide { value: String },

    #[error("bad inquiry state: {value}")]
    BadState { value: String },
}

/// Product registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    #[error("invalid CUSIP: {cusip}")]
    InvalidCusip { cusip: String },

    #[error("unknown CUSIP: {cusip}")]
    UnknownProduct { cusip: String },
}

/// Top-level feed error: anything that makes a single record unusable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("product error: {0}")]
    Product(#[from] ProductError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::BadPrice {
            value: "99-9".to_string(),
        };
        assert_eq!(err.to_string(), "bad price: 99-9");
    }

    #[test]
    fn test_feed_error_from_parse_error() {
        let parse = ParseError::FieldCount {
            expected: 5,
            got: 3,
        };
        let feed: FeedError = parse.into();
        assert!(matches!(feed, FeedError::Parse(_)));
        assert!(feed.to_string().contains("expected 5 fields"));
    }

    #[test]
    fn test_feed_error_from_product_error() {
        let product = ProductError::UnknownProduct {
            cusip: "000000000".to_string(),
        };
        let feed: FeedError = product.into();
        assert!(matches!(feed, FeedError::Product(_)));
        assert!(feed.to_string().contains("unknown CUSIP"));
    }
}
