//! HODL vs LP value series over a fixed price-multiplier grid

use crate::math::round_to;
use crate::{COMPARISON_R_MAX, COMPARISON_R_MIN, COMPARISON_SAMPLES};

/// One sample of the IL comparison chart, values in percent of initial value
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComparisonPoint {
    pub r: f64,
    pub hodl: f64,
    pub lp: f64,
    /// lp - hodl (never positive)
    pub diff: f64,
}

/// Value of holding vs providing liquidity as the price of X moves by r
///
/// With p0 = y0/x0, for each r on the grid:
/// - hodl = x0·p0·r + y0
/// - lp   = (x0/√r)·p0·r + y0·√r
///
/// Both are normalised to the initial value x0·p0 + y0. Depends only on the
/// initial reserves, not on the live multiplier or any trade.
pub fn generate_comparison_series(x0: f64, y0: f64) -> Vec<ComparisonPoint> {
    let p0 = y0 / x0;
    let initial_total = x0 * p0 + y0;
    let last = (COMPARISON_SAMPLES - 1) as f64;

    (0..COMPARISON_SAMPLES)
        .map(|i| {
            let r = COMPARISON_R_MIN + (i as f64 / last) * (COMPARISON_R_MAX - COMPARISON_R_MIN);
            let sqrt_r = r.sqrt();

            let hodl_value = x0 * p0 * r + y0;
            let lp_value = (x0 / sqrt_r) * p0 * r + y0 * sqrt_r;

            let hodl_pct = hodl_value / initial_total * 100.0;
            let lp_pct = lp_value / initial_total * 100.0;

            ComparisonPoint {
                r: round_to(r, 2),
                hodl: round_to(hodl_pct, 2),
                lp: round_to(lp_pct, 2),
                diff: round_to(lp_pct - hodl_pct, 2),
            }
        })
        .collect()
}
