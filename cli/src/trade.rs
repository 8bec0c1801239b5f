//! Trade simulator: USDT → ETH against the projected position

use amm_model::{simulate_trade, validate_multiplier, Pool, TradeQuote};
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::config::DashboardConfig;
use crate::output::{field, header, print_json, slippage_cell, Format};

/// Result of a trade command: the quote, plus the next pool when executed
#[derive(Debug, Serialize)]
pub struct TradeOutcome {
    pub k: f64,
    pub quote: Option<TradeQuote>,
    pub settled: Option<Pool>,
}

pub fn run_trade(
    config: &DashboardConfig,
    usdt_in: f64,
    multiplier: Option<f64>,
    execute: bool,
    format: Format,
) -> Result<()> {
    let outcome = quote_trade(config, usdt_in, multiplier, execute)?;

    if format == Format::Json {
        return print_json(&outcome);
    }

    header("Trade Simulator (USDT → ETH)");
    let Some(quote) = outcome.quote else {
        println!("{}", "No trade: spend a positive USDT amount".dimmed());
        return Ok(());
    };

    field("Spend USDT", format!("{:.2}", quote.usdt_in));
    field(
        "Slippage (exec - spot) / spot",
        format!("{} [{}]", slippage_cell(quote.price_impact, quote.slippage()), quote.slippage()),
    );
    println!();
    field("ETH reserve (after)", format!("{:.4}", quote.after.x).bright_blue());
    field("USDT reserve (after)", format!("{:.2}", quote.after.y).bright_blue());
    field("ETH received", format!("{:.6}", quote.eth_received).bright_green());
    field("Spot price (before)", format!("{:.4} USDT/ETH", quote.spot_before));
    field("Spot price (after)", format!("{:.4} USDT/ETH", quote.spot_after));
    field("Execution price (avg)", format!("{:.4} USDT/ETH", quote.exec_price));

    let verify = if quote.k_matches {
        format!("{:.2} ✓ k = {:.2}", quote.k_after, outcome.k).bright_green()
    } else {
        format!("{:.2} ✗ expected {:.2}", quote.k_after, outcome.k).bright_red()
    };
    field("Verify: new x × y", verify);

    if let Some(pool) = outcome.settled {
        println!();
        header("Executed");
        field("Next pool (x0, y0)", format!("({:.4}, {:.2})", pool.x0, pool.y0));
        println!(
            "{}",
            format!("Continue with: --x0 {} --y0 {}", pool.x0, pool.y0).dimmed()
        );
    }
    Ok(())
}

/// Quote `usdt_in` against the pool projected at the multiplier
pub fn quote_trade(
    config: &DashboardConfig,
    usdt_in: f64,
    multiplier: Option<f64>,
    execute: bool,
) -> Result<TradeOutcome> {
    let r = validate_multiplier(multiplier.unwrap_or(config.pool.price_multiplier))
        .context("Trade needs a positive price multiplier")?;
    let pool = config.pool();
    let k = pool.k();
    let position = pool.position(r);

    let quote = simulate_trade(position.x, position.y, usdt_in, k);
    if quote.is_none() {
        log::info!("no quote for usdt_in={}", usdt_in);
    }
    let settled = if execute { quote.map(|q| q.settled_pool()) } else { None };

    Ok(TradeOutcome { k, quote, settled })
}
