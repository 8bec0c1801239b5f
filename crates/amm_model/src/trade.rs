//! One-sided swap simulation (USDT in, ETH out) against x·y=k

use std::cmp::Ordering;

use crate::math::{Pool, Position};
use crate::{K_MATCH_TOLERANCE, SLIPPAGE_HIGH_PCT, SLIPPAGE_MODERATE_PCT};

/// Quote for swapping USDT into the pool
///
/// Recomputed in full whenever reserves or the input amount change.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TradeQuote {
    /// Reserves before the trade (x = ETH, y = USDT)
    pub before: Position,
    /// Reserves after the trade
    pub after: Position,
    /// USDT actually spent (input clamped at zero)
    pub usdt_in: f64,
    /// ETH paid out to the trader
    pub eth_received: f64,
    /// USDT per ETH before the trade
    pub spot_before: f64,
    /// USDT per ETH after the trade
    pub spot_after: f64,
    /// Average price paid: usdt_in / eth_received
    pub exec_price: f64,
    /// (exec - spot_before) / spot_before, in percent
    pub price_impact: f64,
    /// x·y after the trade
    pub k_after: f64,
    /// |k_after - k| < [`K_MATCH_TOLERANCE`]
    pub k_matches: bool,
}

/// Simulate spending `usdt_in` USDT for ETH
///
/// - new_usdt = usdt_reserve + usdt_in
/// - new_eth = k / new_usdt
/// - eth_received = eth_reserve - new_eth
/// - exec_price = usdt_in / eth_received
///
/// # Returns
/// * `None` when there is nothing to quote: zero (or negative/NaN) input, or
///   a trade that would not pay out any ETH
/// * `Some(TradeQuote)` otherwise. Invariant drift beyond the tolerance is
///   reported through `k_matches`, never as an error.
pub fn simulate_trade(eth_reserve: f64, usdt_reserve: f64, usdt_in: f64, k: f64) -> Option<TradeQuote> {
    // NaN input clamps to zero as well
    let safe_in = usdt_in.max(0.0);
    if safe_in <= 0.0 {
        return None;
    }

    let new_usdt = usdt_reserve + safe_in;
    let new_eth = k / new_usdt;
    let eth_received = eth_reserve - new_eth;

    // Also catches NaN from degenerate reserves
    if eth_received.partial_cmp(&0.0) != Some(Ordering::Greater) {
        log::debug!(
            "no quote: usdt_in={} drains nothing (eth_received={})",
            safe_in,
            eth_received
        );
        return None;
    }

    let spot_before = usdt_reserve / eth_reserve;
    let spot_after = new_usdt / new_eth;
    let exec_price = safe_in / eth_received;
    let price_impact = (exec_price - spot_before) / spot_before * 100.0;

    let k_after = new_eth * new_usdt;
    let k_matches = (k_after - k).abs() < K_MATCH_TOLERANCE;
    if !k_matches {
        log::warn!("invariant drift after trade: k={} k_after={}", k, k_after);
    }

    Some(TradeQuote {
        before: Position {
            x: eth_reserve,
            y: usdt_reserve,
        },
        after: Position {
            x: new_eth,
            y: new_usdt,
        },
        usdt_in: safe_in,
        eth_received,
        spot_before,
        spot_after,
        exec_price,
        price_impact,
        k_after,
        k_matches,
    })
}

impl TradeQuote {
    pub fn slippage(&self) -> SlippageSeverity {
        SlippageSeverity::classify(self.price_impact)
    }

    /// Pool after the trade settles, to be viewed again at multiplier 1
    pub fn settled_pool(&self) -> Pool {
        Pool {
            x0: self.after.x,
            y0: self.after.y,
        }
    }
}

/// Slippage band for the trade dashboard highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SlippageSeverity {
    /// impact <= 1%
    Low,
    /// 1% < impact <= 5%
    Moderate,
    /// impact > 5%
    High,
}

impl SlippageSeverity {
    pub fn classify(price_impact_pct: f64) -> Self {
        if price_impact_pct > SLIPPAGE_HIGH_PCT {
            SlippageSeverity::High
        } else if price_impact_pct > SLIPPAGE_MODERATE_PCT {
            SlippageSeverity::Moderate
        } else {
            SlippageSeverity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlippageSeverity::Low => "low",
            SlippageSeverity::Moderate => "moderate",
            SlippageSeverity::High => "high",
        }
    }
}

impl std::fmt::Display for SlippageSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
