//! Full recomputation of the dashboard from its four inputs
//!
//! Everything the dashboard shows is a pure function of
//! `(x0, y0, price_multiplier, usdt_in)`. [`Dashboard::compute`] derives it in
//! one go; [`DashboardCache`] remembers the last input tuple so a host that
//! fires on every UI event only recomputes when an input actually changed.

use crate::compare::{generate_comparison_series, ComparisonPoint};
use crate::curve::{annotate_curve, generate_curve_data, CurvePoint};
use crate::flow::FlowStage;
use crate::math::{compute_il, IlSeverity, Pool, PoolRatio, Position};
use crate::trade::{simulate_trade, TradeQuote};
use crate::{
    AmmError, CURVE_X_MAX_FACTOR, CURVE_X_MIN_FACTOR, DASHBOARD_CURVE_STEPS, MAX_CURVE_STEPS,
};

/// Raw dashboard inputs
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DashboardInputs {
    pub pool: Pool,
    pub price_multiplier: f64,
    pub usdt_in: f64,
}

impl DashboardInputs {
    pub fn new(pool: Pool, price_multiplier: f64, usdt_in: f64) -> Self {
        Self {
            pool,
            price_multiplier,
            usdt_in,
        }
    }

    /// Bit-exact cache key (distinguishes 0.0 / -0.0, NaN compares by payload)
    fn key(&self) -> [u64; 4] {
        [
            self.pool.x0.to_bits(),
            self.pool.y0.to_bits(),
            self.price_multiplier.to_bits(),
            self.usdt_in.to_bits(),
        ]
    }
}

/// Curve window and resolution, relative to x0
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CurveSettings {
    pub steps: usize,
    pub x_min_factor: f64,
    pub x_max_factor: f64,
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            steps: DASHBOARD_CURVE_STEPS,
            x_min_factor: CURVE_X_MIN_FACTOR,
            x_max_factor: CURVE_X_MAX_FACTOR,
        }
    }
}

impl CurveSettings {
    /// Rejects an empty or reversed window and a sample count outside
    /// `1..=MAX_CURVE_STEPS`
    pub fn validate(&self) -> Result<(), AmmError> {
        if !(1..=MAX_CURVE_STEPS).contains(&self.steps) {
            return Err(AmmError::InvalidSteps {
                steps: self.steps,
                max: MAX_CURVE_STEPS,
            });
        }
        let (min, max) = (self.x_min_factor, self.x_max_factor);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min < max) {
            return Err(AmmError::InvalidRange { min, max });
        }
        Ok(())
    }

    /// Sampling window on the X axis for a pool
    pub fn window(&self, pool: &Pool) -> (f64, f64) {
        (pool.x0 * self.x_min_factor, pool.x0 * self.x_max_factor)
    }
}

/// Every derived value the dashboard displays
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Dashboard {
    pub inputs: DashboardInputs,
    pub k: f64,
    pub position: Position,
    pub price: f64,
    pub il: f64,
    pub il_severity: IlSeverity,
    pub ratio: PoolRatio,
    /// Trade against the projected position, if any
    pub quote: Option<TradeQuote>,
    pub flow_stage: FlowStage,
    /// Curve samples with overlays for the current position and quote
    pub curve: Vec<CurvePoint>,
}

impl Dashboard {
    pub fn compute(inputs: DashboardInputs, settings: &CurveSettings) -> Self {
        let pool = inputs.pool;
        let k = pool.k();
        let position = pool.position(inputs.price_multiplier);
        let il = compute_il(inputs.price_multiplier);

        let quote = simulate_trade(position.x, position.y, inputs.usdt_in, k);

        let (x_min, x_max) = settings.window(&pool);
        let base = generate_curve_data(k, x_min, x_max, settings.steps);
        let curve = annotate_curve(&base, position, quote.as_ref());

        Self {
            inputs,
            k,
            position,
            price: position.price(),
            il,
            il_severity: IlSeverity::classify(il),
            ratio: position.ratio(),
            quote,
            flow_stage: FlowStage::active(k, inputs.usdt_in, inputs.price_multiplier),
            curve,
        }
    }

    /// `None` when there is no trade to verify
    pub fn k_matches(&self) -> Option<bool> {
        self.quote.map(|q| q.k_matches)
    }
}

/// Single-entry memo for the dashboard and the comparison series
///
/// The comparison series only depends on (x0, y0), so it is cached under
/// its own key and survives multiplier or trade changes.
#[derive(Debug, Clone, Default)]
pub struct DashboardCache {
    settings: CurveSettings,
    dashboard: Option<([u64; 4], Dashboard)>,
    comparison: Option<([u64; 2], Vec<ComparisonPoint>)>,
    hits: u64,
    misses: u64,
}

impl DashboardCache {
    pub fn new(settings: CurveSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &CurveSettings {
        &self.settings
    }

    /// Dashboard for `inputs`, recomputed only when the tuple changed
    pub fn dashboard(&mut self, inputs: DashboardInputs) -> &Dashboard {
        let key = inputs.key();
        let fresh = matches!(&self.dashboard, Some((k, _)) if *k == key);
        if fresh {
            self.hits += 1;
        } else {
            self.misses += 1;
            self.dashboard = None;
            log::debug!(
                "dashboard recompute: x0={} y0={} r={} usdt_in={}",
                inputs.pool.x0,
                inputs.pool.y0,
                inputs.price_multiplier,
                inputs.usdt_in
            );
        }
        let settings = self.settings;
        let (_, dashboard) = self
            .dashboard
            .get_or_insert_with(|| (key, Dashboard::compute(inputs, &settings)));
        dashboard
    }

    /// Comparison series for a pool, recomputed only when x0 or y0 changed
    pub fn comparison(&mut self, pool: &Pool) -> &[ComparisonPoint] {
        let key = [pool.x0.to_bits(), pool.y0.to_bits()];
        let fresh = matches!(&self.comparison, Some((k, _)) if *k == key);
        if fresh {
            self.hits += 1;
        } else {
            self.misses += 1;
            self.comparison = None;
        }
        let (_, series) = self
            .comparison
            .get_or_insert_with(|| (key, generate_comparison_series(pool.x0, pool.y0)));
        series
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn invalidate(&mut self) {
        self.dashboard = None;
        self.comparison = None;
    }
}
