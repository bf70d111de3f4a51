//! Service construction and listener wiring
//!
//! Services are built once at startup, wired in a fixed order, and shared
//! behind `Arc<Mutex<_>>`. The lock order of the delivery path follows the
//! listener edges, and the [`Topology`] guard fails the build if an edge
//! would close a cycle, so the synchronous walk can never deadlock.

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::signal;
use tracing::info;

use connectors::feed::{
    run_feed, InquiryFeedHandler, MarketDataFeedHandler, PriceFeedHandler, TradeFeedHandler,
};
use connectors::receiver::run_receiver;
use connectors::{ExecutionPublisher, FeedMetrics, StreamPublisher};
use execution::{
    AlgoExecutionListener, AlgoExecutionService, ExecutionListener, ExecutionService,
    TradeBookingListener, TradeBookingService,
};
use inquiry::InquiryService;
use market_data::{MarketDataService, PricingService};
use persistence::{GuiSink, HistoricalDataService, HistoryError, HistoryWriter};
use risk_engine::{PositionListener, PositionService, Pv01Table, RiskListener, RiskService};
use soa::{Topology, WiringError};
use streaming::{
    AlgoStreamingListener, AlgoStreamingService, GuiListener, GuiService, StreamingListener,
    StreamingService,
};
use types::product::BondRegistry;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum PipelineBuildError {
    #[error("history file error: {0}")]
    History(#[from] HistoryError),

    #[error("wiring error: {0}")]
    Wiring(#[from] WiringError),
}

/// The wired service graph.
pub struct Pipeline {
    pub registry: Arc<BondRegistry>,
    pub pricing: Arc<Mutex<PricingService>>,
    pub market_data: Arc<Mutex<MarketDataService>>,
    pub algo_streaming: Arc<Mutex<AlgoStreamingService>>,
    pub streaming: Arc<Mutex<StreamingService>>,
    pub gui: Arc<Mutex<GuiService>>,
    pub algo_execution: Arc<Mutex<AlgoExecutionService>>,
    pub execution: Arc<Mutex<ExecutionService>>,
    pub booking: Arc<Mutex<TradeBookingService>>,
    pub position: Arc<Mutex<PositionService>>,
    pub risk: Arc<Mutex<RiskService>>,
    pub inquiry: Arc<Mutex<InquiryService>>,
}

impl Pipeline {
    /// Build every service, open the output files, and wire the listener
    /// graph. No sockets are touched here; socket sinks attach separately.
    pub fn build(config: &Config) -> Result<Self, PipelineBuildError> {
        let out = |file: &str| HistoryWriter::open(config.output_dir.join(file));

        let registry = Arc::new(BondRegistry::with_defaults());
        let pricing = Arc::new(Mutex::new(PricingService::new()));
        let market_data = Arc::new(Mutex::new(MarketDataService::new()));
        let algo_streaming = Arc::new(Mutex::new(AlgoStreamingService::new()));
        let streaming = Arc::new(Mutex::new(StreamingService::new()));
        let gui = Arc::new(Mutex::new(GuiService::with_throttle(
            config.gui_throttle,
            Box::new(GuiSink::new(out("gui.txt")?)),
        )));
        let algo_execution = Arc::new(Mutex::new(AlgoExecutionService::new()));
        let execution = Arc::new(Mutex::new(ExecutionService::new()));
        let booking = Arc::new(Mutex::new(TradeBookingService::new()));
        let position = Arc::new(Mutex::new(PositionService::new()));
        let risk = Arc::new(Mutex::new(RiskService::new(Pv01Table::with_defaults())));
        let inquiry = Arc::new(Mutex::new(InquiryService::new()));

        // declare every edge before registering listeners; a cycle here is
        // a construction bug and must fail the build
        let mut topology = Topology::new();
        topology.add_edge("pricing", "algo-streaming")?;
        topology.add_edge("pricing", "gui")?;
        topology.add_edge("algo-streaming", "streaming")?;
        topology.add_edge("streaming", "historical-streaming")?;
        topology.add_edge("market-data", "algo-execution")?;
        topology.add_edge("algo-execution", "execution")?;
        topology.add_edge("execution", "trade-booking")?;
        topology.add_edge("execution", "historical-executions")?;
        topology.add_edge("trade-booking", "position")?;
        topology.add_edge("position", "risk")?;
        topology.add_edge("position", "historical-positions")?;
        topology.add_edge("risk", "historical-risk")?;
        topology.add_edge("inquiry", "historical-inquiries")?;
        info!(edges = topology.edge_count(), "listener topology verified");

        // price path: algo streaming first, gui second
        {
            let mut svc = lock(&pricing);
            svc.add_listener(Box::new(AlgoStreamingListener::new(Arc::clone(
                &algo_streaming,
            ))));
            svc.add_listener(Box::new(GuiListener::new(Arc::clone(&gui))));
        }
        lock(&algo_streaming)
            .add_listener(Box::new(StreamingListener::new(Arc::clone(&streaming))));
        lock(&streaming).add_listener(Box::new(HistoricalDataService::new(out(
            "streaming.txt",
        )?)));

        // execution path
        lock(&market_data).add_listener(Box::new(AlgoExecutionListener::new(Arc::clone(
            &algo_execution,
        ))));
        lock(&algo_execution)
            .add_listener(Box::new(ExecutionListener::new(Arc::clone(&execution))));
        {
            let mut svc = lock(&execution);
            svc.add_listener(Box::new(TradeBookingListener::new(Arc::clone(&booking))));
            svc.add_listener(Box::new(HistoricalDataService::new(out(
                "executions.txt",
            )?)));
        }

        // position and risk tail
        lock(&booking).add_listener(Box::new(PositionListener::new(Arc::clone(&position))));
        {
            let mut svc = lock(&position);
            svc.add_listener(Box::new(RiskListener::new(Arc::clone(&risk))));
            svc.add_listener(Box::new(HistoricalDataService::new(out(
                "positions.txt",
            )?)));
        }
        lock(&risk).add_listener(Box::new(HistoricalDataService::new(out("risk.txt")?)));

        // inquiries
        lock(&inquiry).add_listener(Box::new(HistoricalDataService::new(out(
            "allinquiries.txt",
        )?)));

        info!("pipeline wired");
        Ok(Self {
            registry,
            pricing,
            market_data,
            algo_streaming,
            streaming,
            gui,
            algo_execution,
            execution,
            booking,
            position,
            risk,
            inquiry,
        })
    }

    /// Attach the outbound socket publishers. Requires a tokio runtime.
    pub fn attach_socket_sinks(&self, config: &Config) {
        lock(&self.streaming).set_connector(Box::new(StreamPublisher::connect(
            config.stream_sink_addr.clone(),
        )));
        lock(&self.execution).set_connector(Box::new(ExecutionPublisher::connect(
            config.execution_sink_addr.clone(),
        )));
    }
}

fn lock<T>(service: &Arc<Mutex<T>>) -> std::sync::MutexGuard<'_, T> {
    service.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Build, wire, and run the pipeline until ctrl-c.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let pipeline = Pipeline::build(&config)?;

    if config.spawn_receivers {
        tokio::spawn(run_receiver(config.stream_sink_addr.clone(), "stream"));
        tokio::spawn(run_receiver(config.execution_sink_addr.clone(), "execution"));
    }
    pipeline.attach_socket_sinks(&config);

    let price_metrics = Arc::new(FeedMetrics::new());
    let market_metrics = Arc::new(FeedMetrics::new());
    let trade_metrics = Arc::new(FeedMetrics::new());
    let inquiry_metrics = Arc::new(FeedMetrics::new());

    tokio::spawn(run_feed(
        config.price_feed_addr.clone(),
        PriceFeedHandler::new(Arc::clone(&pipeline.registry), Arc::clone(&pipeline.pricing)),
        Arc::clone(&price_metrics),
    ));
    tokio::spawn(run_feed(
        config.market_feed_addr.clone(),
        MarketDataFeedHandler::new(
            Arc::clone(&pipeline.registry),
            Arc::clone(&pipeline.market_data),
        ),
        Arc::clone(&market_metrics),
    ));
    tokio::spawn(run_feed(
        config.trade_feed_addr.clone(),
        TradeFeedHandler::new(Arc::clone(&pipeline.registry), Arc::clone(&pipeline.booking)),
        Arc::clone(&trade_metrics),
    ));
    tokio::spawn(run_feed(
        config.inquiry_feed_addr.clone(),
        InquiryFeedHandler::new(Arc::clone(&pipeline.registry), Arc::clone(&pipeline.inquiry)),
        Arc::clone(&inquiry_metrics),
    ));

    info!(output_dir = %config.output_dir.display(), "trading pipeline running");
    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("shutdown requested");
                break;
            }
            _ = tokio::time::sleep(std::time::Duration::from_secs(5)) => {
                info!(
                    prices = price_metrics.lines_accepted(),
                    books = market_metrics.lines_accepted(),
                    trades = trade_metrics.lines_accepted(),
                    inquiries = inquiry_metrics.lines_accepted(),
                    rejected = price_metrics.lines_rejected()
                        + market_metrics.lines_rejected()
                        + trade_metrics.lines_rejected()
                        + inquiry_metrics.lines_rejected(),
                    "heartbeat"
                );
            }
        }
    }
    Ok(())
}
