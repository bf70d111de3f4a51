//! CSV line parsers for the four feed formats
//!
//! All prices accept either 32nds notation or plain decimals. Every parser
//! resolves the CUSIP against the registry, so downstream services only
//! ever see registered products.

use rust_decimal::Decimal;
use std::str::FromStr;

use types::book::{BookOrder, OrderBook, Side, BOOK_DEPTH};
use types::errors::{FeedError, ParseError};
use types::ids::{InquiryId, TradeId};
use types::inquiry::{Inquiry, InquiryState};
use types::numeric::{Price, Quantity};
use types::price::MidPrice;
use types::product::BondRegistry;
use types::tick;
use types::trade::{Trade, TradeSide, TradingBook};

/// `timestamp,CUSIP,bid,ask,spread`
pub fn parse_price_line(line: &str, registry: &BondRegistry) -> Result<MidPrice, FeedError> {
    let fields = split_fields(line, 5)?;
    let bond = registry.resolve(fields[1])?;
    let bid = tick::parse_price(fields[2])?;
    let ask = tick::parse_price(fields[3])?;
    let spread = parse_spread(fields[4])?;
    let mid = Price::try_new((bid.as_decimal() + ask.as_decimal()) / Decimal::from(2))
        .ok_or(ParseError::BadPrice {
            value: line.to_string(),
        })?;
    Ok(MidPrice::new(bond.cusip.clone(), mid, spread))
}

/// `timestamp,CUSIP,(bid_i,bidSize_i,ask_i,askSize_i){5}`
pub fn parse_market_data_line(line: &str, registry: &BondRegistry) -> Result<OrderBook, FeedError> {
    let fields = split_fields(line, 2 + 4 * BOOK_DEPTH)?;
    let bond = registry.resolve(fields[1])?;

    let mut bids = Vec::with_capacity(BOOK_DEPTH);
    let mut offers = Vec::with_capacity(BOOK_DEPTH);
    for level in 0..BOOK_DEPTH {
        let base = 2 + 4 * level;
        let bid_price = tick::parse_price(fields[base])?;
        let bid_size = parse_quantity(fields[base + 1])?;
        let ask_price = tick::parse_price(fields[base + 2])?;
        let ask_size = parse_quantity(fields[base + 3])?;
        bids.push(BookOrder::new(bid_price, bid_size, Side::Bid));
        offers.push(BookOrder::new(ask_price, ask_size, Side::Offer));
    }
    Ok(OrderBook::new(bond.cusip.clone(), bids, offers))
}

/// `CUSIP,tradeId,price,book,quantity,side`
pub fn parse_trade_line(line: &str, registry: &BondRegistry) -> Result<Trade, FeedError> {
    let fields = split_fields(line, 6)?;
    let bond = registry.resolve(fields[0])?;
    let trade_id = TradeId::new(fields[1]);
    let price = tick::parse_price(fields[2])?;
    let book = TradingBook::from_str(fields[3])?;
    let quantity = parse_quantity(fields[4])?;
    let side = TradeSide::from_str(fields[5])?;
    Ok(Trade::new(
        bond.cusip.clone(),
        trade_id,
        price,
        book,
        quantity,
        side,
    ))
}

/// `inquiryId,CUSIP,side,quantity,price,state`
pub fn parse_inquiry_line(line: &str, registry: &BondRegistry) -> Result<Inquiry, FeedError> {
    let fields = split_fields(line, 6)?;
    let inquiry_id = InquiryId::new(fields[0]);
    let bond = registry.resolve(fields[1])?;
    let side = TradeSide::from_str(fields[2])?;
    let quantity = parse_quantity(fields[3])?;
    let price = tick::parse_price(fields[4])?;
    let state = InquiryState::from_str(fields[5])?;
    Ok(Inquiry::new(
        inquiry_id,
        bond.cusip.clone(),
        side,
        quantity,
        price,
        state,
    ))
}

fn split_fields(line: &str, expected: usize) -> Result<Vec<&str>, ParseError> {
    let fields: Vec<&str> = line.trim_end().split(',').collect();
    if fields.len() != expected {
        return Err(ParseError::FieldCount {
            expected,
            got: fields.len(),
        });
    }
    Ok(fields)
}

fn parse_quantity(s: &str) -> Result<Quantity, ParseError> {
    s.parse::<u64>()
        .map(Quantity::new)
        .map_err(|_| ParseError::BadQuantity {
            value: s.to_string(),
        })
}

fn parse_spread(s: &str) -> Result<Decimal, ParseError> {
    let spread = Decimal::from_str(s).map_err(|_| ParseError::BadPrice {
        value: s.to_string(),
    })?;
    if spread < Decimal::ZERO {
        return Err(ParseError::BadPrice {
            value: s.to_string(),
        });
    }
    Ok(spread)
}
