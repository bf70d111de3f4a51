mod generate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use types::product::BondRegistry;

use crate::generate::GenerateConfig;

#[derive(Parser)]
#[command(name = "datagen", about = "Synthetic feed fixtures and the file feeder")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate prices.txt, marketdata.txt, trades.txt and inquiries.txt.
    Generate {
        /// Directory the fixture files land in.
        #[arg(long, default_value = "data")]
        out_dir: PathBuf,
        /// RNG seed; same seed, same fixtures.
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Data points per product in the price/book files.
        #[arg(long, default_value_t = 1000)]
        points: usize,
    },
    /// Stream a fixture file's lines to a feed socket.
    Feed {
        /// Fixture file to replay.
        file: PathBuf,
        /// Feed address, e.g. 127.0.0.1:3000.
        addr: String,
        /// Send the header line too instead of skipping it.
        #[arg(long)]
        keep_header: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            out_dir,
            seed,
            points,
        } => {
            let registry = BondRegistry::with_defaults();
            let config = GenerateConfig { seed, points };
            generate::generate_all(&registry.cusips(), &out_dir, &config)?;
            tracing::info!(out_dir = %out_dir.display(), seed, points, "fixtures written");
        }
        Command::Feed {
            file,
            addr,
            keep_header,
        } => {
            let sent = connectors::feeder::stream_file(&file, &addr, !keep_header).await?;
            tracing::info!(file = %file.display(), %addr, sent, "feed complete");
        }
    }
    Ok(())
}
