//! Fixture generators for the four feed files
//!
//! Prices oscillate between 99 and 101 on the 1/256 grid with spreads
//! cycling between 1/128 and 1/64. Books carry five fixed levels per side
//! with sizes 1M..5M and a spread that breathes between 1/128 and 1/32,
//! so the tightest books trip the execution gate. Trades alternate
//! BUY/SELL across the three books; inquiries all start RECEIVED.
//! Everything runs off a seeded RNG so fixtures are reproducible.

use anyhow::Context;
use chrono::{DateTime, Duration, Local};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use types::ids::{random_alphanumeric, Cusip};
use types::numeric::Price;
use types::tick;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Generation knobs.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub seed: u64,
    /// Data points per product in the price/book files.
    pub points: usize,
}

/// Write all four fixture files into `out_dir`.
pub fn generate_all(
    cusips: &[Cusip],
    out_dir: &Path,
    config: &GenerateConfig,
) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    generate_prices_and_books(cusips, out_dir, config)?;
    generate_trades(cusips, out_dir, config.seed)?;
    generate_inquiries(cusips, out_dir, config.seed)?;
    Ok(())
}

fn dec(numerator: i64, denominator: i64) -> Decimal {
    Decimal::from(numerator) / Decimal::from(denominator)
}

fn fmt32(value: Decimal) -> String {
    match Price::try_new(value) {
        Some(price) => tick::format_price(price),
        None => value.to_string(),
    }
}

/// prices.txt and marketdata.txt share the oscillating mid.
fn generate_prices_and_books(
    cusips: &[Cusip],
    out_dir: &Path,
    config: &GenerateConfig,
) -> anyhow::Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut prices = BufWriter::new(File::create(out_dir.join("prices.txt"))?);
    let mut books = BufWriter::new(File::create(out_dir.join("marketdata.txt"))?);

    writeln!(prices, "Timestamp,CUSIP,Bid,Ask,Spread")?;
    let mut book_header = String::from("Timestamp,CUSIP");
    for level in 1..=5 {
        book_header.push_str(&format!(
            ",Bid{level},BidSize{level},Ask{level},AskSize{level}"
        ));
    }
    writeln!(books, "{book_header}")?;

    let floor = Decimal::from(99);
    let ceiling = Decimal::from(101);
    let tick_step = dec(1, 256);

    for cusip in cusips {
        let mut mid = Decimal::from(99);
        let mut price_increasing = true;
        let mut spread_increasing = true;
        let mut fix_spread = dec(1, 128);
        let mut time: DateTime<Local> = Local::now();

        for _ in 0..config.points {
            // spread oscillates between 1/128 and 1/64
            let random_spread = Decimal::from(rng.gen_range(2..=4i64)) / Decimal::from(256);
            time = time + Duration::milliseconds(rng.gen_range(1..=20));
            let timestamp = time.format(TIMESTAMP_FORMAT);

            let bid = mid - random_spread / Decimal::from(2);
            let ask = mid + random_spread / Decimal::from(2);
            writeln!(
                prices,
                "{timestamp},{cusip},{},{},{random_spread}",
                fmt32(bid),
                fmt32(ask)
            )?;

            write!(books, "{timestamp},{cusip}")?;
            for level in 1..=5i64 {
                let half_depth = fix_spread * Decimal::from(level) / Decimal::from(2);
                let size = level * 1_000_000;
                write!(
                    books,
                    ",{},{size},{},{size}",
                    fmt32(mid - half_depth),
                    fmt32(mid + half_depth)
                )?;
            }
            writeln!(books)?;

            // oscillate the mid between 99 and 101
            if price_increasing {
                mid += tick_step;
                if ask >= ceiling {
                    price_increasing = false;
                }
            } else {
                mid -= tick_step;
                if bid <= floor {
                    price_increasing = true;
                }
            }

            // oscillate the book spread between 1/128 and 1/32
            if spread_increasing {
                fix_spread += dec(1, 128);
                if fix_spread >= dec(1, 32) {
                    spread_increasing = false;
                }
            } else {
                fix_spread -= dec(1, 128);
                if fix_spread <= dec(1, 128) {
                    spread_increasing = true;
                }
            }
        }
    }

    prices.flush()?;
    books.flush()?;
    Ok(())
}

/// trades.txt: ten trades per product, alternating sides, rotating books.
fn generate_trades(cusips: &[Cusip], out_dir: &Path, seed: u64) -> anyhow::Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = BufWriter::new(File::create(out_dir.join("trades.txt"))?);
    writeln!(out, "CUSIP,TradeId,Price,Book,Quantity,Side")?;

    let books = ["TRSY1", "TRSY2", "TRSY3"];
    let quantities: [i64; 5] = [1, 2, 3, 4, 5];

    for cusip in cusips {
        for i in 0..10usize {
            let side = if i % 2 == 0 { "BUY" } else { "SELL" };
            let trade_id = random_alphanumeric(&mut rng, 12);
            // buys fill a touch under par, sells a touch over
            let base = if side == "BUY" { 99 } else { 100 };
            let price = Decimal::from(base) + dec(rng.gen_range(0..=255), 256);
            let quantity = quantities[i % quantities.len()] * 1_000_000;
            let book = books[i % books.len()];
            writeln!(
                out,
                "{cusip},{trade_id},{},{book},{quantity},{side}",
                fmt32(price)
            )?;
        }
    }
    out.flush()?;
    Ok(())
}

/// inquiries.txt: ten RECEIVED inquiries per product.
fn generate_inquiries(cusips: &[Cusip], out_dir: &Path, seed: u64) -> anyhow::Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
    let mut out = BufWriter::new(File::create(out_dir.join("inquiries.txt"))?);
    writeln!(out, "InquiryId,CUSIP,Side,Quantity,Price,State")?;

    let quantities: [i64; 5] = [1, 2, 3, 4, 5];

    for cusip in cusips {
        for i in 0..10usize {
            let side = if i % 2 == 0 { "BUY" } else { "SELL" };
            let inquiry_id = random_alphanumeric(&mut rng, 12);
            let base = if side == "BUY" { 99 } else { 100 };
            let price = Decimal::from(base) + dec(rng.gen_range(0..=255), 256);
            let quantity = quantities[i % quantities.len()] * 1_000_000;
            writeln!(
                out,
                "{inquiry_id},{cusip},{side},{quantity},{},RECEIVED",
                fmt32(price)
            )?;
        }
    }
    out.flush()?;
    Ok(())
}
