//! Pool stats: k, projected position, ratio, IL and the flow walkthrough

use amm_model::{compute_il, validate_multiplier, DashboardCache, DashboardInputs, FlowStage, IlSeverity};
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::config::DashboardConfig;
use crate::output::{field, header, il_cell, print_json, Format};

pub fn show_pool(
    config: &DashboardConfig,
    multiplier: Option<f64>,
    usdt_in: Option<f64>,
    format: Format,
) -> Result<()> {
    let inputs = dashboard_inputs(config, multiplier, usdt_in)?;
    let mut cache = DashboardCache::new(config.curve_settings());
    let dashboard = cache.dashboard(inputs);

    if format == Format::Json {
        #[derive(Serialize)]
        struct PoolView<'a> {
            k: f64,
            initial_price: f64,
            position: &'a amm_model::Position,
            price: f64,
            ratio: &'a amm_model::PoolRatio,
            il: f64,
            il_severity: IlSeverity,
            flow_stage: FlowStage,
            k_matches: Option<bool>,
        }
        return print_json(&PoolView {
            k: dashboard.k,
            initial_price: inputs.pool.spot_price(),
            position: &dashboard.position,
            price: dashboard.price,
            ratio: &dashboard.ratio,
            il: dashboard.il,
            il_severity: dashboard.il_severity,
            flow_stage: dashboard.flow_stage,
            k_matches: dashboard.k_matches(),
        });
    }

    header("Pool");
    field("Reserves (x0, y0)", format!("({:.2}, {:.2})", inputs.pool.x0, inputs.pool.y0));
    field("k = x0 × y0", format!("{:.2}", dashboard.k));
    field("Initial price (y0/x0)", format!("{:.4}", inputs.pool.spot_price()));
    field("Price multiplier", format!("{:.3}x", inputs.price_multiplier));

    println!();
    header("Position");
    field("Current price (Y/X)", format!("{:.4}", dashboard.price).bright_blue());
    field("Reserve X", format!("{:.4}", dashboard.position.x));
    field("Reserve Y", format!("{:.4}", dashboard.position.y));
    field(
        "Pool ratio (X / Y)",
        format!("{:.1}% / {:.1}%", dashboard.ratio.x_pct, dashboard.ratio.y_pct).bright_green(),
    );
    field(
        "Impermanent loss",
        format!("{} ({})", il_cell(dashboard.il, dashboard.il_severity, 0), dashboard.il_severity),
    );

    println!();
    header("AMM Flow");
    print_flow(dashboard.flow_stage);
    Ok(())
}

pub fn show_il(ratios: &[f64], format: Format) -> Result<()> {
    #[derive(Serialize)]
    struct IlRow {
        r: f64,
        il: f64,
        severity: IlSeverity,
    }

    let mut rows = Vec::with_capacity(ratios.len());
    for &r in ratios {
        let r = validate_multiplier(r)?;
        let il = compute_il(r);
        rows.push(IlRow {
            r,
            il,
            severity: IlSeverity::classify(il),
        });
    }

    if format == Format::Json {
        return print_json(&rows);
    }

    header("Impermanent Loss");
    println!("{:>10} {:>12}  {}", "r".dimmed(), "IL".dimmed(), "band".dimmed());
    for row in &rows {
        println!("{:>9.3}x {}  {}", row.r, il_cell(row.il, row.severity, 11), row.severity);
    }
    Ok(())
}

/// Inputs for the dashboard with command-line values taking precedence
pub fn dashboard_inputs(
    config: &DashboardConfig,
    multiplier: Option<f64>,
    usdt_in: Option<f64>,
) -> Result<DashboardInputs> {
    let r = multiplier.unwrap_or(config.pool.price_multiplier);
    let r = validate_multiplier(r).context("Use a multiplier such as 0.5, 1 or 4")?;
    let usdt_in = usdt_in.unwrap_or(config.trade.usdt_in).max(0.0);
    Ok(DashboardInputs::new(config.pool(), r, usdt_in))
}

fn print_flow(active: FlowStage) {
    for stage in FlowStage::ALL {
        let line = format!("{}. {:<22} {}", stage.index(), stage.title(), stage.description());
        if stage == active {
            println!("{} {}", "▶".bright_cyan(), line.bright_cyan().bold());
        } else if active.is_done(stage) {
            println!("{} {}", "✓".bright_green(), line.dimmed());
        } else {
            println!("  {}", line.dimmed());
        }
    }
}
