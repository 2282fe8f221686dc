//! Demo 1: Market Snapshot
//!
//! Showcases: public endpoints, typed orderbook, perpetual funding rates
//!
//! Run: cargo run --bin market_snapshot

use colored::*;
use ftx_rest::{FtxRestClient, HistoryFilter, Resolution};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

const MARKETS: [&str; 3] = ["BTC/USD", "ETH/USD", "BTC-PERP"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(70).cyan());
    println!("{}", "  FTX MARKET SNAPSHOT".cyan().bold());
    println!("{}", "═".repeat(70).cyan());
    println!();

    let client = FtxRestClient::new()?;

    println!(
        "  {:<12} {:>14} {:>14} {:>12} {:>10}",
        "MARKET".white().bold(),
        "BEST BID".white().bold(),
        "BEST ASK".white().bold(),
        "SPREAD".white().bold(),
        "BPS".white().bold()
    );
    println!("  {}", "─".repeat(66));

    for market in MARKETS {
        match client.market().get_orderbook(market, 20).await {
            Ok(book) => {
                let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) else {
                    println!("  {:<12} {}", market.cyan(), "empty book".yellow());
                    continue;
                };
                let spread = ask - bid;
                let mid = (ask + bid) / dec!(2);
                let bps = if mid.is_zero() { Decimal::ZERO } else { spread / mid * dec!(10000) };

                println!(
                    "  {:<12} {:>14} {:>14} {:>12} {:>10.2}",
                    market.cyan(),
                    bid.to_string().green(),
                    ask.to_string().red(),
                    spread,
                    bps
                );
            }
            Err(e) => println!("  {:<12} {}", market.cyan(), e.to_string().red()),
        }
    }

    println!();
    println!("  {}", "LAST HOUR (5m candles)".white().bold());
    println!("  {}", "─".repeat(66));

    let filter = HistoryFilter::new().limit(12);
    let candles = client.market().get_candles("BTC-PERP", Resolution::Min5, &filter).await?;
    if let Value::Array(candles) = candles {
        for candle in candles {
            println!(
                "  {:<26} O {:>10} H {:>10} L {:>10} C {:>10}",
                candle["startTime"].as_str().unwrap_or("-"),
                candle["open"],
                candle["high"],
                candle["low"],
                candle["close"]
            );
        }
    }

    println!();
    println!("  {}", "PERPETUAL FUTURES".white().bold());
    println!("  {}", "─".repeat(66));

    let perpetuals = client.futures().get_perpetual_futures().await?;
    println!("  {} perpetual futures listed", perpetuals.len().to_string().cyan());

    for future in perpetuals.iter().take(5) {
        let name = future["name"].as_str().unwrap_or("-");
        let stats = client.futures().get_future_stats(name).await?;
        let rate = stats["nextFundingRate"].as_f64().unwrap_or_default();
        let rate_text = format!("{:+.6}%", rate * 100.0);

        println!(
            "  {:<12} next funding {}",
            name.cyan(),
            if rate >= 0.0 { rate_text.green() } else { rate_text.red() }
        );
    }

    println!();
    println!("  {} Requests in the last minute: {}", "•".white(), client.rate_window().recent());

    Ok(())
}
