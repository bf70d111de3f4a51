//! End-to-end scenarios over the fully wired pipeline
//!
//! Each test builds the whole service graph against a temporary output
//! directory and pushes records in at the feed roots, then checks both the
//! stored state and the persisted files.

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, Instant};

use rust_decimal::Decimal;
use tempfile::TempDir;

use pipeline::{Config, Pipeline};
use types::book::{BookOrder, OrderBook, Side};
use types::ids::{Cusip, InquiryId, TradeId};
use types::inquiry::{Inquiry, InquiryState};
use types::numeric::{Price, Quantity};
use types::price::MidPrice;
use types::trade::{Trade, TradeSide, TradingBook};

fn build_pipeline() -> (Pipeline, TempDir) {
    let tmp = TempDir::new().expect("tempdir");
    let config = Config::default().with_output_dir(tmp.path());
    let pipeline = Pipeline::build(&config).expect("pipeline builds");
    (pipeline, tmp)
}

fn cusip(s: &str) -> Cusip {
    Cusip::new(s).unwrap()
}

fn line_count(dir: &Path, file: &str) -> usize {
    fs::read_to_string(dir.join(file))
        .map(|content| content.lines().count())
        .unwrap_or(0)
}

fn mid_price(product: &str, mid: &str, spread: &str) -> MidPrice {
    MidPrice::new(
        cusip(product),
        Price::from_str(mid).unwrap(),
        Decimal::from_str(spread).unwrap(),
    )
}

/// Five-level book centered so the top of book matches the given prices.
fn five_level_book(product: &str, best_bid: &str, best_offer: &str) -> OrderBook {
    let step = Decimal::ONE / Decimal::from(128);
    let best_bid = Price::from_str(best_bid).unwrap();
    let best_offer = Price::from_str(best_offer).unwrap();

    let mut bids = Vec::new();
    let mut offers = Vec::new();
    for level in 0..5u64 {
        let offset = step * Decimal::from(level);
        let size = Quantity::new((level + 1) * 1_000_000);
        bids.push(BookOrder::new(best_bid - offset, size, Side::Bid));
        offers.push(BookOrder::new(best_offer + offset, size, Side::Offer));
    }
    OrderBook::new(cusip(product), bids, offers)
}

// S1: one price produces one algo stream with the derived bid/offer and the
// alternating visible size.
#[test]
fn scenario_price_to_algo_stream() {
    let (pipeline, _tmp) = build_pipeline();

    pipeline
        .pricing
        .lock()
        .unwrap()
        .on_message(mid_price("9128283H1", "100.0", "0.01"));

    {
        let algo = pipeline.algo_streaming.lock().unwrap();
        let stream = &algo.get_data(&cusip("9128283H1")).unwrap().price_stream;
        assert_eq!(stream.bid.price, Price::from_str("99.995").unwrap());
        assert_eq!(stream.offer.price, Price::from_str("100.005").unwrap());
        assert_eq!(stream.bid.visible_quantity.as_u64(), 1_000_000);
        assert_eq!(stream.bid.hidden_quantity.as_u64(), 2_000_000);
    }

    // second price on the same product flips the visible size
    pipeline
        .pricing
        .lock()
        .unwrap()
        .on_message(mid_price("9128283H1", "100.0", "0.01"));

    let algo = pipeline.algo_streaming.lock().unwrap();
    let stream = &algo.get_data(&cusip("9128283H1")).unwrap().price_stream;
    assert_eq!(stream.bid.visible_quantity.as_u64(), 2_000_000);
    assert_eq!(stream.bid.hidden_quantity.as_u64(), 4_000_000);
}

// S1 continued: the streaming service stores the stream and persists it.
#[test]
fn scenario_price_reaches_streaming_and_history() {
    let (pipeline, tmp) = build_pipeline();

    pipeline
        .pricing
        .lock()
        .unwrap()
        .on_message(mid_price("9128283H1", "100.0", "0.01"));

    assert!(pipeline
        .streaming
        .lock()
        .unwrap()
        .get_data(&cusip("9128283H1"))
        .is_some());
    assert_eq!(line_count(tmp.path(), "streaming.txt"), 1);
}

// S2: a book whose spread is 1/64 produces nothing downstream.
#[test]
fn scenario_wide_spread_produces_nothing() {
    let (pipeline, tmp) = build_pipeline();

    pipeline
        .market_data
        .lock()
        .unwrap()
        .on_message(five_level_book("912828M80", "99.9921875", "100.0078125"));

    assert!(pipeline
        .algo_execution
        .lock()
        .unwrap()
        .get_data(&cusip("912828M80"))
        .is_none());
    assert_eq!(pipeline.execution.lock().unwrap().order_count(), 0);
    assert!(pipeline
        .position
        .lock()
        .unwrap()
        .get_data(&cusip("912828M80"))
        .is_none());
    assert_eq!(line_count(tmp.path(), "executions.txt"), 0);
    assert_eq!(line_count(tmp.path(), "positions.txt"), 0);
    assert_eq!(line_count(tmp.path(), "risk.txt"), 0);
}

// S3: a book at the 1/128 gate flows all the way to risk; the first booked
// trade lands in TRSY2.
#[test]
fn scenario_tight_spread_flows_to_risk() {
    let (pipeline, tmp) = build_pipeline();

    pipeline
        .market_data
        .lock()
        .unwrap()
        .on_message(five_level_book("912828M80", "99.9921875", "100.0"));

    // one execution order, buy side, priced at the offer, sized off the bid
    {
        let execution = pipeline.execution.lock().unwrap();
        assert_eq!(execution.order_count(), 1);
    }
    let algo = pipeline.algo_execution.lock().unwrap();
    let order = &algo.get_data(&cusip("912828M80")).unwrap().order;
    assert_eq!(order.side, Side::Bid);
    assert_eq!(order.price, Price::from_str("100.0").unwrap());
    assert_eq!(order.visible_quantity.as_u64(), 1_000_000);
    drop(algo);

    // booked into TRSY2 (rotation counter increments before use)
    let position_service = pipeline.position.lock().unwrap();
    let position = position_service.get_data(&cusip("912828M80")).unwrap();
    assert_eq!(position.quantity(TradingBook::Trsy2), 1_000_000);
    assert_eq!(position.aggregate(), 1_000_000);
    drop(position_service);

    // risk accumulated the aggregate
    let risk = pipeline.risk.lock().unwrap();
    assert_eq!(risk.get_data(&cusip("912828M80")).unwrap().quantity, 1_000_000);
    drop(risk);

    assert_eq!(line_count(tmp.path(), "executions.txt"), 1);
    assert_eq!(line_count(tmp.path(), "positions.txt"), 1);
    assert_eq!(line_count(tmp.path(), "risk.txt"), 1);
}

// S4: two buys on the same book accumulate additively.
#[test]
fn scenario_trades_accumulate_position() {
    let (pipeline, tmp) = build_pipeline();

    for (id, qty) in [("T0000000001", 1_000_000u64), ("T0000000002", 3_000_000)] {
        pipeline.booking.lock().unwrap().on_message(Trade::new(
            cusip("912828M80"),
            TradeId::new(id),
            Price::from_str("99.5").unwrap(),
            TradingBook::Trsy1,
            Quantity::new(qty),
            TradeSide::Buy,
        ));
    }

    let position_service = pipeline.position.lock().unwrap();
    let position = position_service.get_data(&cusip("912828M80")).unwrap();
    assert_eq!(position.quantity(TradingBook::Trsy1), 4_000_000);
    assert_eq!(position.aggregate(), 4_000_000);
    drop(position_service);

    // one persisted line per mutation notification
    assert_eq!(line_count(tmp.path(), "positions.txt"), 2);
    assert_eq!(line_count(tmp.path(), "risk.txt"), 2);
}

// S5: a RECEIVED inquiry is auto-quoted, completes, leaves the store, and
// persists exactly one line.
#[test]
fn scenario_inquiry_lifecycle() {
    let (pipeline, tmp) = build_pipeline();

    pipeline.inquiry.lock().unwrap().on_message(Inquiry::new(
        InquiryId::new("INQ000000001"),
        cusip("9128283F5"),
        TradeSide::Buy,
        Quantity::new(2_000_000),
        Price::from_str("99.5").unwrap(),
        InquiryState::Received,
    ));

    let inquiry_service = pipeline.inquiry.lock().unwrap();
    assert!(inquiry_service
        .get_data(&InquiryId::new("INQ000000001"))
        .is_none());
    assert_eq!(inquiry_service.stored_count(), 0);
    drop(inquiry_service);

    assert_eq!(line_count(tmp.path(), "allinquiries.txt"), 1);
    let content = fs::read_to_string(tmp.path().join("allinquiries.txt")).unwrap();
    assert!(content.trim_end().ends_with("DONE"));
}

// S6: ten prices inside the throttle window emit a single GUI line.
#[test]
fn scenario_gui_throttle_drops_burst() {
    let (pipeline, tmp) = build_pipeline();

    // drive the gui service directly with a synthetic clock so the test
    // does not depend on wall-clock speed
    {
        let mut gui = pipeline.gui.lock().unwrap();
        let start = Instant::now();
        for i in 0..10u64 {
            gui.on_price_at(
                &mid_price("9128283H1", "100.0", "0.01"),
                start + Duration::from_millis(i * 10),
            );
        }
    }

    assert_eq!(line_count(tmp.path(), "gui.txt"), 1);
}

// The full price path through the wired graph also reaches the GUI sink.
#[test]
fn scenario_price_path_reaches_gui() {
    let (pipeline, tmp) = build_pipeline();

    pipeline
        .pricing
        .lock()
        .unwrap()
        .on_message(mid_price("9128283H1", "100.0", "0.01"));

    assert_eq!(line_count(tmp.path(), "gui.txt"), 1);
}

// Alternation across the execution path: two tight books produce a buy then
// a sell, booked into TRSY2 then TRSY3.
#[test]
fn scenario_execution_alternation_and_book_rotation() {
    let (pipeline, _tmp) = build_pipeline();

    for _ in 0..2 {
        pipeline
            .market_data
            .lock()
            .unwrap()
            .on_message(five_level_book("912828M80", "99.9921875", "100.0"));
    }

    let algo = pipeline.algo_execution.lock().unwrap();
    let second = &algo.get_data(&cusip("912828M80")).unwrap().order;
    assert_eq!(second.side, Side::Offer);
    drop(algo);

    let position_service = pipeline.position.lock().unwrap();
    let position = position_service.get_data(&cusip("912828M80")).unwrap();
    // buy of 1M into TRSY2, sell of 1M into TRSY3
    assert_eq!(position.quantity(TradingBook::Trsy2), 1_000_000);
    assert_eq!(position.quantity(TradingBook::Trsy3), -1_000_000);
    assert_eq!(position.aggregate(), 0);
}
