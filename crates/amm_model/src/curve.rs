//! Curve sampling for y = k / x and the trade overlays drawn on top of it

use crate::math::{round_to, Position};
use crate::trade::TradeQuote;
use crate::TANGENT_SPAN;

/// One sample of the curve
///
/// Overlay fields are sparse: they are `None` outside their span rather than
/// zero-filled, so the chart leaves a gap there.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
    /// Line between the trade's before and after reserves (average price)
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub secant: Option<f64>,
    /// Tangent at the current position (spot before)
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub tangent0: Option<f64>,
    /// Tangent at the post-trade position (spot after)
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub tangent1: Option<f64>,
}

impl CurvePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            secant: None,
            tangent0: None,
            tangent1: None,
        }
    }
}

/// Sample y = k / x over [x_min, x_max]
///
/// Splits the window into `steps` equal intervals and emits `steps + 1`
/// samples, skipping any with x <= 0. Both coordinates are rounded to 2
/// decimals. `steps == 0` is treated as a single interval. The output grows
/// with `steps`; hosts bound it through [`crate::CurveSettings::validate`].
///
/// # Arguments
/// * `k` - Pool invariant
/// * `x_min` / `x_max` - Sampling window on the X reserve axis
/// * `steps` - Number of intervals (see [`crate::DEFAULT_CURVE_STEPS`])
pub fn generate_curve_data(k: f64, x_min: f64, x_max: f64, steps: usize) -> Vec<CurvePoint> {
    let steps = steps.max(1);
    let step_size = (x_max - x_min) / steps as f64;

    (0..=steps)
        .map(|i| x_min + i as f64 * step_size)
        .filter(|&x| x > 0.0)
        .map(|x| CurvePoint::new(round_to(x, 2), round_to(k / x, 2)))
        .collect()
}

/// Tangent line at a touch point, restricted to ±[`TANGENT_SPAN`] of its x
#[derive(Debug, Clone, Copy)]
struct Tangent {
    at: Position,
    slope: f64,
    lo: f64,
    hi: f64,
}

impl Tangent {
    fn at(pos: Position) -> Self {
        let span = pos.x * TANGENT_SPAN;
        Self {
            at: pos,
            slope: pos.tangent_slope(),
            lo: pos.x - span,
            hi: pos.x + span,
        }
    }

    /// Only positive values inside the span are drawn
    fn sample(&self, x: f64) -> Option<f64> {
        if x < self.lo || x > self.hi {
            return None;
        }
        let y = round_to(self.at.y + self.slope * (x - self.at.x), 2);
        (y > 0.0).then_some(y)
    }
}

/// Secant between the before/after reserves of a trade
#[derive(Debug, Clone, Copy)]
struct Secant {
    before: Position,
    after: Position,
    lo: f64,
    hi: f64,
}

impl Secant {
    fn of(quote: &TradeQuote) -> Self {
        Self {
            before: quote.before,
            after: quote.after,
            lo: quote.after.x.min(quote.before.x),
            hi: quote.after.x.max(quote.before.x),
        }
    }

    fn sample(&self, x: f64) -> Option<f64> {
        if x < self.lo || x > self.hi {
            return None;
        }
        let t = (x - self.after.x) / (self.before.x - self.after.x);
        Some(round_to(self.after.y + t * (self.before.y - self.after.y), 2))
    }
}

/// Annotate a sampled curve with tangent and secant overlays
///
/// `tangent0` is always computed at `position`. `secant` and `tangent1` are
/// only present when a trade quote is supplied. Returns a fresh sequence;
/// the input samples are left untouched.
pub fn annotate_curve(
    points: &[CurvePoint],
    position: Position,
    quote: Option<&TradeQuote>,
) -> Vec<CurvePoint> {
    let tangent0 = Tangent::at(position);
    let tangent1 = quote.map(|q| Tangent::at(q.after));
    let secant = quote.map(Secant::of);

    points
        .iter()
        .map(|pt| CurvePoint {
            x: pt.x,
            y: pt.y,
            secant: secant.and_then(|s| s.sample(pt.x)),
            tangent0: tangent0.sample(pt.x),
            tangent1: tangent1.and_then(|t| t.sample(pt.x)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trade::simulate_trade;

    #[test]
    fn test_sample_count_and_bounds() {
        let pts = generate_curve_data(1_000_000.0, 100.0, 3500.0, 340);
        assert_eq!(pts.len(), 341);
        assert_eq!(pts[0].x, 100.0);
        assert_eq!(pts[0].y, 10_000.0);
        assert_eq!(pts[90].x, 1000.0);
        assert_eq!(pts[340].x, 3500.0);
        assert_eq!(pts[340].y, 285.71);
    }

    #[test]
    fn test_skips_non_positive_x() {
        // Window [-10, 10] in 4 steps: -10, -5, 0, 5, 10
        let pts = generate_curve_data(100.0, -10.0, 10.0, 4);
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[0], CurvePoint::new(5.0, 20.0));
        assert_eq!(pts[1], CurvePoint::new(10.0, 10.0));
    }

    #[test]
    fn test_zero_steps_is_one_interval() {
        let pts = generate_curve_data(100.0, 1.0, 10.0, 0);
        assert_eq!(pts.len(), 2);
        assert!(pts.iter().all(|p| p.x.is_finite()));
    }

    #[test]
    fn test_restartable() {
        let a = generate_curve_data(42.0, 0.5, 9.0, 50);
        let b = generate_curve_data(42.0, 0.5, 9.0, 50);
        assert_eq!(a, b);
    }

    #[test]
    fn test_tangent_without_trade() {
        let pos = Position { x: 1000.0, y: 1000.0 };
        let base = generate_curve_data(1_000_000.0, 100.0, 3500.0, 340);
        let pts = annotate_curve(&base, pos, None);

        assert_eq!(pts.len(), base.len());
        assert!(pts.iter().all(|p| p.secant.is_none() && p.tangent1.is_none()));

        // Tangent touches the curve at the position
        let touch = pts.iter().find(|p| p.x == 1000.0).unwrap();
        assert_eq!(touch.tangent0, Some(1000.0));

        // Outside ±60% of x there is no tangent sample
        assert!(pts.iter().filter(|p| p.x < 400.0 || p.x > 1600.0).all(|p| p.tangent0.is_none()));
        // Slope -1 through (1000, 1000): y = 2000 - x stays positive in span
        let inside = pts.iter().find(|p| p.x == 1500.0).unwrap();
        assert_eq!(inside.tangent0, Some(500.0));
    }

    #[test]
    fn test_secant_spans_trade() {
        let pos = Position { x: 1000.0, y: 1000.0 };
        let quote = simulate_trade(pos.x, pos.y, 100.0, 1_000_000.0).unwrap();
        let base = generate_curve_data(1_000_000.0, 100.0, 3500.0, 340);
        let pts = annotate_curve(&base, pos, Some(&quote));

        for p in &pts {
            let inside = p.x >= quote.after.x && p.x <= quote.before.x;
            assert_eq!(p.secant.is_some(), inside, "x={}", p.x);
        }

        // Secant passes through the before point
        let at_before = pts.iter().find(|p| p.x == 1000.0).unwrap();
        assert_eq!(at_before.secant, Some(1000.0));
        assert!(pts.iter().any(|p| p.tangent1.is_some()));
    }
}
