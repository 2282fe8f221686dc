//! Demo 2: Account Overview
//!
//! Showcases: signed requests, subaccounts, typed balances, error kinds
//!
//! Requires FTX_API_KEY and FTX_API_SECRET (and optionally FTX_SUBACCOUNT).
//!
//! Run: cargo run --bin account_overview

use colored::*;
use ftx_rest::{Credentials, ErrorKind, FtxRestClient, HistoryFilter};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(70).cyan());
    println!("{}", "  FTX ACCOUNT OVERVIEW".cyan().bold());
    println!("{}", "═".repeat(70).cyan());
    println!();

    let credentials = Credentials::from_env()?;
    if let Some(subaccount) = credentials.subaccount() {
        println!("{} Using subaccount {}\n", "✓".green(), subaccount.cyan());
    }
    let client = FtxRestClient::with_credentials(credentials)?;

    let info = match client.account()?.get_account_info().await {
        Ok(info) => info,
        Err(e) if e.kind() == ErrorKind::RemoteRejected => {
            println!("{} Exchange rejected the credentials: {}", "✗".red(), e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("  {:<24} {}", "Collateral".white().bold(), info["collateral"]);
    println!("  {:<24} {}", "Free collateral".white().bold(), info["freeCollateral"]);
    println!("  {:<24} {}x", "Leverage".white().bold(), info["leverage"]);
    println!();

    println!("  {}", "BALANCES".white().bold());
    println!("  {}", "─".repeat(54));

    let balances = client.wallet()?.get_balances().await?;
    let mut total_usd = Decimal::ZERO;
    for balance in balances.iter().filter(|b| !b.total.is_zero()) {
        let usd = balance.usd_value.unwrap_or_default();
        total_usd += usd;
        println!(
            "  {:<10} {:>16} free {:>16} total {:>12} USD",
            balance.coin.cyan(),
            balance.free,
            balance.total,
            usd.round_dp(2)
        );
    }
    println!("  {:<10} {:>60}", "TOTAL".white().bold(), format!("{} USD", total_usd.round_dp(2)).green());
    println!();

    println!("  {}", "OPEN POSITIONS".white().bold());
    println!("  {}", "─".repeat(54));

    if let Value::Array(positions) = client.account()?.get_positions(true).await? {
        let open: Vec<&Value> = positions
            .iter()
            .filter(|p| p["size"].as_f64().unwrap_or_default() != 0.0)
            .collect();
        if open.is_empty() {
            println!("  {}", "none".white());
        }
        for position in open {
            let side = position["side"].as_str().unwrap_or("-");
            println!(
                "  {:<12} {:<5} size {:>10} entry {:>12}",
                position["future"].as_str().unwrap_or("-").cyan(),
                if side == "buy" { side.green() } else { side.red() },
                position["size"],
                position["recentAverageOpenPrice"]
            );
        }
    }
    println!();

    let filter = HistoryFilter::new().limit(5);
    let deposits = client.wallet()?.get_deposit_history(&filter).await?;
    let count = deposits.as_array().map_or(0, Vec::len);
    println!("  {} {} recent deposits", "•".white(), count);

    let subaccounts = client.account()?.get_subaccounts().await?;
    let count = subaccounts.as_array().map_or(0, Vec::len);
    println!("  {} {} subaccounts", "•".white(), count);

    Ok(())
}
