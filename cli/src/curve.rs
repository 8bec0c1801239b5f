//! Curve samples with tangent / secant overlays, ready for a chart renderer

use amm_model::{CurveSettings, DashboardCache};
use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::DashboardConfig;
use crate::output::{field, header, optional_cell, print_json, Format};
use crate::pool::dashboard_inputs;

pub fn show_curve(
    config: &DashboardConfig,
    multiplier: Option<f64>,
    usdt_in: Option<f64>,
    steps: Option<usize>,
    format: Format,
) -> Result<()> {
    let settings = CurveSettings {
        steps: steps.unwrap_or(config.curve.steps),
        ..config.curve_settings()
    };
    settings.validate().context("Invalid curve window")?;

    let inputs = dashboard_inputs(config, multiplier, usdt_in)?;
    let mut cache = DashboardCache::new(settings);
    let dashboard = cache.dashboard(inputs);

    if format == Format::Json {
        return print_json(&dashboard.curve);
    }

    header("x · y = k Curve");
    field("y = k / x", format!("{:.2} / x", dashboard.k).bright_green());
    field(
        "Before",
        format!("({:.1}, {:.1})", dashboard.position.x, dashboard.position.y).bright_blue(),
    );
    if let Some(q) = &dashboard.quote {
        field("After", format!("({:.1}, {:.1})", q.after.x, q.after.y).bright_red());
        field("P₀ = y₀/x₀", format!("{:.4}", q.spot_before));
        field("P₁ = y₁/x₁", format!("{:.4}", q.spot_after));
        field("P_avg = Δy/Δx", format!("{:.4}", q.exec_price).yellow());
    }
    println!();

    println!(
        "{:>10} {:>12} {:>12} {:>12} {:>12}",
        "x".dimmed(),
        "y".dimmed(),
        "secant".dimmed(),
        "tangent0".dimmed(),
        "tangent1".dimmed()
    );
    for p in &dashboard.curve {
        println!(
            "{:>10.2} {:>12.2} {} {} {}",
            p.x,
            p.y,
            optional_cell(p.secant, 12),
            optional_cell(p.tangent0, 12),
            optional_cell(p.tangent1, 12)
        );
    }
    Ok(())
}
