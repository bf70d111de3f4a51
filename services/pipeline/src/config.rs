//! Runtime configuration
//!
//! Everything is env-overridable with sensible localhost defaults, so a
//! bare `pipeline` invocation works against the datagen feeder out of the
//! box.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Addresses, paths and knobs for one pipeline process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Inbound price feed listen address.
    pub price_feed_addr: String,
    /// Inbound order book feed listen address.
    pub market_feed_addr: String,
    /// Inbound trade feed listen address.
    pub trade_feed_addr: String,
    /// Inbound inquiry feed listen address.
    pub inquiry_feed_addr: String,
    /// Downstream price stream socket.
    pub stream_sink_addr: String,
    /// Downstream execution socket.
    pub execution_sink_addr: String,
    /// Run the receiving side of the downstream sockets in-process.
    pub spawn_receivers: bool,
    /// Directory the output files land in.
    pub output_dir: PathBuf,
    /// Minimum interval between GUI lines.
    pub gui_throttle: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            price_feed_addr: "127.0.0.1:3000".to_string(),
            market_feed_addr: "127.0.0.1:3001".to_string(),
            trade_feed_addr: "127.0.0.1:3002".to_string(),
            inquiry_feed_addr: "127.0.0.1:3003".to_string(),
            stream_sink_addr: "127.0.0.1:3100".to_string(),
            execution_sink_addr: "127.0.0.1:3101".to_string(),
            spawn_receivers: true,
            output_dir: PathBuf::from("output"),
            gui_throttle: Duration::from_millis(300),
        }
    }
}

impl Config {
    /// Load from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            price_feed_addr: env_string("PIPELINE_PRICE_ADDR", defaults.price_feed_addr),
            market_feed_addr: env_string("PIPELINE_MARKET_ADDR", defaults.market_feed_addr),
            trade_feed_addr: env_string("PIPELINE_TRADE_ADDR", defaults.trade_feed_addr),
            inquiry_feed_addr: env_string("PIPELINE_INQUIRY_ADDR", defaults.inquiry_feed_addr),
            stream_sink_addr: env_string("PIPELINE_STREAM_SINK", defaults.stream_sink_addr),
            execution_sink_addr: env_string("PIPELINE_EXEC_SINK", defaults.execution_sink_addr),
            spawn_receivers: env_bool("PIPELINE_RECEIVERS", defaults.spawn_receivers),
            output_dir: env_string("PIPELINE_OUTPUT_DIR", "output".to_string()).into(),
            gui_throttle: Duration::from_millis(env_u64("PIPELINE_GUI_THROTTLE_MS", 300)),
        }
    }

    /// Same config, rooted at a different output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

fn env_string(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.as_str(), "1" | "true" | "yes"),
        Err(_) => default,
    }
}
