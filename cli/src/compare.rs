//! HODL vs LP comparison series

use amm_model::{ComparisonPoint, DashboardCache};
use anyhow::Result;
use colored::Colorize;

use crate::config::DashboardConfig;
use crate::output::{header, print_json, Format};

pub fn show_comparison(config: &DashboardConfig, every: usize, format: Format) -> Result<()> {
    let pool = config.pool();
    let mut cache = DashboardCache::new(config.curve_settings());
    let series = cache.comparison(&pool);

    if format == Format::Json {
        return print_json(series);
    }

    header("Impermanent Loss: HODL vs LP");
    println!(
        "{:>8} {:>10} {:>10} {:>10}",
        "price".dimmed(),
        "HODL".dimmed(),
        "LP".dimmed(),
        "IL".dimmed()
    );
    for p in thin(series, every) {
        let diff = format!("{:>9.2}%", p.diff);
        let diff = if p.diff < 0.0 { diff.bright_red() } else { diff.bright_green() };
        println!("{:>7.2}x {:>9.2}% {:>9.2}% {}", p.r, p.hodl, p.lp, diff);
    }
    Ok(())
}

/// Every `every`-th sample, always keeping the last one
fn thin(series: &[ComparisonPoint], every: usize) -> Vec<&ComparisonPoint> {
    let every = every.max(1);
    let mut rows: Vec<_> = series.iter().step_by(every).collect();
    if let Some(last) = series.last() {
        if !(series.len() - 1).is_multiple_of(every) {
            rows.push(last);
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use amm_model::generate_comparison_series;

    #[test]
    fn test_thin_keeps_ends() {
        let series = generate_comparison_series(1000.0, 1000.0);
        let rows = thin(&series, 20);
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[0].r, 0.1);
        assert_eq!(rows[10].r, 10.0);

        let rows = thin(&series, 30);
        // 0, 30, ..., 180 plus the final sample
        assert_eq!(rows.len(), 8);
        assert_eq!(rows.last().unwrap().r, 10.0);

        assert_eq!(thin(&series, 0).len(), 201);
    }
}
