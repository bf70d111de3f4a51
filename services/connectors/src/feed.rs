//! Newline-framed TCP feed servers
//!
//! One server per external feed. Each accepted connection is read line by
//! line; every parsed record is delivered synchronously into the owning
//! service, which walks its listener graph to completion before the next
//! line is read. Connections are served one at a time so records reach the
//! service in arrival order.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use execution::TradeBookingService;
use inquiry::InquiryService;
use market_data::{MarketDataService, PricingService};
use types::errors::FeedError;
use types::product::BondRegistry;

use crate::metrics::FeedMetrics;
use crate::parsers;

/// Per-feed line handler: parse the line and deliver the record.
pub trait FeedHandler: Send + 'static {
    fn name(&self) -> &'static str;

    fn on_line(&mut self, line: &str) -> Result<(), FeedError>;
}

/// Run one feed server until the task is dropped.
///
/// A bind failure logs at error and aborts this adapter only; the rest of
/// the pipeline keeps running. Per-record failures are logged and skipped.
pub async fn run_feed<H: FeedHandler>(addr: String, mut handler: H, metrics: Arc<FeedMetrics>) {
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(feed = handler.name(), %addr, %err, "feed bind failed, adapter aborted");
            return;
        }
    };
    info!(feed = handler.name(), %addr, "feed listening");

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!(feed = handler.name(), %err, "accept failed");
                continue;
            }
        };
        metrics.record_connection();
        info!(feed = handler.name(), %peer, "feed connection opened");

        let mut lines = BufReader::new(stream).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match handler.on_line(&line) {
                        Ok(()) => metrics.record_accepted(),
                        Err(err) => {
                            metrics.record_rejected();
                            warn!(feed = handler.name(), %err, line, "line skipped");
                        }
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    warn!(feed = handler.name(), %err, "read failed, closing connection");
                    break;
                }
            }
        }
        info!(feed = handler.name(), %peer, "feed connection closed");
    }
}

/// Prices → [`PricingService`].
pub struct PriceFeedHandler {
    registry: Arc<BondRegistry>,
    service: Arc<Mutex<PricingService>>,
}

impl PriceFeedHandler {
    pub fn new(registry: Arc<BondRegistry>, service: Arc<Mutex<PricingService>>) -> Self {
        Self { registry, service }
    }
}

impl FeedHandler for PriceFeedHandler {
    fn name(&self) -> &'static str {
        "prices"
    }

    fn on_line(&mut self, line: &str) -> Result<(), FeedError> {
        let price = parsers::parse_price_line(line, &self.registry)?;
        if let Ok(mut service) = self.service.lock() {
            service.on_message(price);
        }
        Ok(())
    }
}

/// Order books → [`MarketDataService`].
pub struct MarketDataFeedHandler {
    registry: Arc<BondRegistry>,
    service: Arc<Mutex<MarketDataService>>,
}

impl MarketDataFeedHandler {
    pub fn new(registry: Arc<BondRegistry>, service: Arc<Mutex<MarketDataService>>) -> Self {
        Self { registry, service }
    }
}

impl FeedHandler for MarketDataFeedHandler {
    fn name(&self) -> &'static str {
        "marketdata"
    }

    fn on_line(&mut self, line: &str) -> Result<(), FeedError> {
        let book = parsers::parse_market_data_line(line, &self.registry)?;
        if let Ok(mut service) = self.service.lock() {
            service.on_message(book);
        }
        Ok(())
    }
}

/// Trades → [`TradeBookingService`].
pub struct TradeFeedHandler {
    registry: Arc<BondRegistry>,
    service: Arc<Mutex<TradeBookingService>>,
}

impl TradeFeedHandler {
    pub fn new(registry: Arc<BondRegistry>, service: Arc<Mutex<TradeBookingService>>) -> Self {
        Self { registry, service }
    }
}

impl FeedHandler for TradeFeedHandler {
    fn name(&self) -> &'static str {
        "trades"
    }

    fn on_line(&mut self, line: &str) -> Result<(), FeedError> {
        let trade = parsers::parse_trade_line(line, &self.registry)?;
        if let Ok(mut service) = self.service.lock() {
            service.on_message(trade);
        }
        Ok(())
    }
}

/// Inquiries → [`InquiryService`].
pub struct InquiryFeedHandler {
    registry: Arc<BondRegistry>,
    service: Arc<Mutex<InquiryService>>,
}

impl InquiryFeedHandler {
    pub fn new(registry: Arc<BondRegistry>, service: Arc<Mutex<InquiryService>>) -> Self {
        Self { registry, service }
    }
}

impl FeedHandler for InquiryFeedHandler {
    fn name(&self) -> &'static str {
        "inquiries"
    }

    fn on_line(&mut self, line: &str) -> Result<(), FeedError> {
        let inquiry = parsers::parse_inquiry_line(line, &self.registry)?;
        if let Ok(mut service) = self.service.lock() {
            service.on_message(inquiry);
        }
        Ok(())
    }
}
