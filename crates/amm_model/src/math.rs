//! Constant product pool math (x·y=k)

use crate::{AmmError, IL_SEVERE_THRESHOLD, MIN_RESERVE};

/// Invariant k = x0·y0
///
/// No validation: callers clamp reserves to [`MIN_RESERVE`] first.
#[inline]
pub fn compute_k(x0: f64, y0: f64) -> f64 {
    x0 * y0
}

/// Spot price of X in Y terms (y / x)
///
/// `x == 0` gives Infinity (or NaN for 0/0). Reserves never reach zero
/// through the projector or the trade simulator, so this is not trapped.
#[inline]
pub fn compute_price(x: f64, y: f64) -> f64 {
    y / x
}

/// Impermanent loss for price ratio r = P_current / P_initial
///
/// IL = 2·√r / (1 + r) - 1
///
/// Zero at r = 1 and negative everywhere else on r > 0. Outside that
/// domain nothing is trapped:
/// - r = 0 gives -1.0 (total loss)
/// - r < 0 gives NaN (square root of a negative)
#[inline]
pub fn compute_il(r: f64) -> f64 {
    (2.0 * r.sqrt()) / (1.0 + r) - 1.0
}

/// Reserves after the price moves by factor r, keeping k fixed
///
/// With p0 = y0/x0 and new price p0·r:
/// - x = x0 / √r
/// - y = y0 · √r
///
/// so x·y = x0·y0 and y/x = p0·r. r must be > 0 (validated upstream).
#[inline]
pub fn get_position(x0: f64, y0: f64, r: f64) -> Position {
    let sqrt_r = r.sqrt();
    Position {
        x: x0 / sqrt_r,
        y: y0 * sqrt_r,
    }
}

/// Clamp a raw reserve input to the engine's minimum (NaN clamps too)
#[inline]
pub fn clamp_reserve(value: f64) -> f64 {
    // f64::max returns the other operand when one side is NaN
    value.max(MIN_RESERVE)
}

/// Reject multipliers the projector cannot handle
pub fn validate_multiplier(r: f64) -> Result<f64, AmmError> {
    if r.is_finite() && r > 0.0 {
        Ok(r)
    } else {
        Err(AmmError::InvalidMultiplier(r))
    }
}

/// Round half away from zero to `decimals` places
///
/// Works on the scaled binary product, so a literal that sits just below a
/// tie can still round up: `round_to(1.0005, 3)` is 1.001 because
/// `1.0005 * 1000.0` is exactly 1000.5 in f64. Formatting the exact decimal
/// expansion (as `{:.3}` does) would give 1.000 instead. History dedup and
/// display both go through this function, so they always agree.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Initial pool reserves at multiplier 1
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pool {
    pub x0: f64,
    pub y0: f64,
}

impl Pool {
    /// Checked constructor: both reserves finite and strictly positive
    pub fn new(x0: f64, y0: f64) -> Result<Self, AmmError> {
        if !(x0.is_finite() && y0.is_finite() && x0 > 0.0 && y0 > 0.0) {
            return Err(AmmError::InvalidReserves { x0, y0 });
        }
        Ok(Self { x0, y0 })
    }

    /// Build from raw UI inputs, clamping each side up to [`MIN_RESERVE`]
    ///
    /// NaN and anything below the minimum (including -Infinity) clamp up;
    /// +Infinity is kept and propagates through the math.
    pub fn clamped(x0: f64, y0: f64) -> Self {
        Self {
            x0: clamp_reserve(x0),
            y0: clamp_reserve(y0),
        }
    }

    pub fn k(&self) -> f64 {
        compute_k(self.x0, self.y0)
    }

    /// Initial spot price p0 = y0 / x0
    pub fn spot_price(&self) -> f64 {
        compute_price(self.x0, self.y0)
    }

    /// Project the pool onto the curve at price multiplier r
    pub fn position(&self, r: f64) -> Position {
        get_position(self.x0, self.y0, r)
    }

    /// Same as [`Pool::position`] but rejects r <= 0 or non-finite r
    pub fn checked_position(&self, r: f64) -> Result<Position, AmmError> {
        validate_multiplier(r).map(|r| self.position(r))
    }
}

/// Reserve pair on the curve
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn k(&self) -> f64 {
        self.x * self.y
    }

    pub fn price(&self) -> f64 {
        compute_price(self.x, self.y)
    }

    pub fn ratio(&self) -> PoolRatio {
        PoolRatio::of(self.x, self.y)
    }

    /// Slope of y = k/x at this point (dy/dx = -y/x)
    pub fn tangent_slope(&self) -> f64 {
        -(self.y / self.x)
    }
}

/// Share of each reserve in x + y, in percent
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PoolRatio {
    pub x_pct: f64,
    pub y_pct: f64,
}

impl PoolRatio {
    pub fn of(x: f64, y: f64) -> Self {
        let total = x + y;
        Self {
            x_pct: x / total * 100.0,
            y_pct: y / total * 100.0,
        }
    }
}

/// IL severity band used by the stats bar and the history table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IlSeverity {
    /// il < -1%
    Severe,
    /// -1% <= il < 0
    Mild,
    /// il >= 0 (also NaN)
    None,
}

impl IlSeverity {
    pub fn classify(il: f64) -> Self {
        if il < IL_SEVERE_THRESHOLD {
            IlSeverity::Severe
        } else if il < 0.0 {
            IlSeverity::Mild
        } else {
            IlSeverity::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IlSeverity::Severe => "severe",
            IlSeverity::Mild => "mild",
            IlSeverity::None => "none",
        }
    }
}

impl std::fmt::Display for IlSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_compute_k() {
        assert_eq!(compute_k(1000.0, 1000.0), 1_000_000.0);
        assert_eq!(compute_k(2.5, 4.0), 10.0);
    }

    #[test]
    fn test_compute_price_degenerate() {
        assert_eq!(compute_price(4.0, 8.0), 2.0);
        assert!(compute_price(0.0, 8.0).is_infinite());
        assert!(compute_price(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_position_at_4x() {
        // x0=y0=1000, r=4 -> (500, 2000), spot 4.0
        let pos = get_position(1000.0, 1000.0, 4.0);
        assert!((pos.x - 500.0).abs() < EPS);
        assert!((pos.y - 2000.0).abs() < EPS);
        assert!((pos.price() - 4.0).abs() < EPS);
        assert!((pos.k() - 1_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_position_identity_at_1x() {
        let pos = get_position(1234.0, 56.0, 1.0);
        assert_eq!(pos, Position { x: 1234.0, y: 56.0 });
    }

    #[test]
    fn test_il_values() {
        assert_eq!(compute_il(1.0), 0.0);
        assert!((compute_il(4.0) + 0.2).abs() < EPS);
        // Both directions lose
        assert!(compute_il(0.25) < 0.0);
        assert!(compute_il(10.0) < 0.0);
        assert!(compute_il(-1.0).is_nan());
    }

    #[test]
    fn test_il_at_zero_ratio() {
        assert_eq!(compute_il(0.0), -1.0);
        assert_eq!(IlSeverity::classify(compute_il(0.0)), IlSeverity::Severe);
    }

    #[test]
    fn test_il_severity_bands() {
        assert_eq!(IlSeverity::classify(-0.2), IlSeverity::Severe);
        assert_eq!(IlSeverity::classify(-0.01), IlSeverity::Mild);
        assert_eq!(IlSeverity::classify(-0.0001), IlSeverity::Mild);
        assert_eq!(IlSeverity::classify(0.0), IlSeverity::None);
        assert_eq!(IlSeverity::classify(f64::NAN), IlSeverity::None);
    }

    #[test]
    fn test_pool_checked_constructor() {
        assert!(Pool::new(1000.0, 1000.0).is_ok());
        assert!(matches!(Pool::new(0.0, 1.0), Err(AmmError::InvalidReserves { .. })));
        assert!(Pool::new(1.0, -5.0).is_err());
        assert!(Pool::new(f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_pool_clamped() {
        let pool = Pool::clamped(0.0, f64::NAN);
        assert_eq!(pool, Pool { x0: 1.0, y0: 1.0 });
        let pool = Pool::clamped(-30.0, 500.0);
        assert_eq!(pool.x0, 1.0);
        assert_eq!(pool.y0, 500.0);
        let pool = Pool::clamped(f64::NEG_INFINITY, f64::INFINITY);
        assert_eq!(pool.x0, 1.0);
        assert_eq!(pool.y0, f64::INFINITY);
    }

    #[test]
    fn test_checked_position_rejects_bad_multiplier() {
        let pool = Pool::new(1000.0, 1000.0).unwrap();
        assert!(matches!(pool.checked_position(0.0), Err(AmmError::InvalidMultiplier(_))));
        assert!(pool.checked_position(-2.0).is_err());
        assert!(pool.checked_position(f64::NAN).is_err());
        assert!(pool.checked_position(2.0).is_ok());
    }

    #[test]
    fn test_pool_ratio() {
        let ratio = PoolRatio::of(500.0, 2000.0);
        assert!((ratio.x_pct - 20.0).abs() < EPS);
        assert!((ratio.y_pct - 80.0).abs() < EPS);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(909.090909, 2), 909.09);
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert_eq!(round_to(-0.125, 2), -0.13);
        // Scaled product lands on the tie and rounds away from zero
        assert_eq!(round_to(1.0005, 3), 1.001);
    }

    #[test]
    fn test_tangent_slope() {
        let pos = Position { x: 500.0, y: 2000.0 };
        assert_eq!(pos.tangent_slope(), -4.0);
    }
}
