//! AMM Model - Constant product projection engine (x·y=k)
//!
//! Pure f64 math behind the AMM dashboard: invariant arithmetic, curve
//! sampling, position projection under a price multiplier, impermanent loss,
//! trade/slippage quotes and the HODL-vs-LP comparison series.
//!
//! Every function is a pure function of its arguments. The only stateful
//! pieces are [`HistoryRecorder`] and [`DashboardCache`], both owned by the
//! host that drives the engine.
//!
//! **Caller clamps**: the raw formulas do not validate their inputs and let
//! NaN/Infinity propagate. Use [`Pool::new`], [`clamp_reserve`] and
//! [`validate_multiplier`] at the edge.

pub mod compare;
pub mod curve;
pub mod dashboard;
pub mod flow;
pub mod history;
pub mod math;
pub mod slider;
pub mod trade;

pub use compare::{generate_comparison_series, ComparisonPoint};
pub use curve::{annotate_curve, generate_curve_data, CurvePoint};
pub use dashboard::{CurveSettings, Dashboard, DashboardCache, DashboardInputs};
pub use flow::FlowStage;
pub use history::{HistoryRecord, HistoryRecorder};
pub use math::{
    clamp_reserve, compute_il, compute_k, compute_price, get_position, round_to,
    validate_multiplier, IlSeverity, Pool, PoolRatio, Position,
};
pub use slider::{multiplier_from_slider, slider_from_multiplier, slider_sweep};
pub use trade::{simulate_trade, SlippageSeverity, TradeQuote};

/// Smallest reserve the host may feed into the engine
pub const MIN_RESERVE: f64 = 1.0;

/// Default sample count for [`generate_curve_data`]
pub const DEFAULT_CURVE_STEPS: usize = 200;

/// Sample count used for the dashboard curve
pub const DASHBOARD_CURVE_STEPS: usize = 300;

/// Largest sample count a configured curve may ask for
pub const MAX_CURVE_STEPS: usize = 10_000;

/// Dashboard curve window, as multiples of x0
pub const CURVE_X_MIN_FACTOR: f64 = 0.1;
pub const CURVE_X_MAX_FACTOR: f64 = 3.5;

/// Tangent overlays span ±60% of the touch point's x
pub const TANGENT_SPAN: f64 = 0.6;

/// IL below this is "severe"; between this and zero is "mild"
pub const IL_SEVERE_THRESHOLD: f64 = -0.01;

/// Price impact (percent) bands for slippage severity
pub const SLIPPAGE_HIGH_PCT: f64 = 5.0;
pub const SLIPPAGE_MODERATE_PCT: f64 = 1.0;

/// Absolute tolerance when checking x·y against k after a trade
pub const K_MATCH_TOLERANCE: f64 = 0.01;

/// History ring buffer capacity
pub const HISTORY_CAPACITY: usize = 50;

/// Decimal places used to dedup history samples
pub const HISTORY_DECIMALS: u32 = 3;

/// Comparison grid: 201 samples of r over [0.1, 10.0]
pub const COMPARISON_SAMPLES: usize = 201;
pub const COMPARISON_R_MIN: f64 = 0.1;
pub const COMPARISON_R_MAX: f64 = 10.0;

/// Error types for checked engine entry points
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum AmmError {
    /// Reserve is zero, negative or not finite
    #[error("invalid reserves: x0={x0}, y0={y0} (both must be finite and > 0)")]
    InvalidReserves { x0: f64, y0: f64 },
    /// Price multiplier is zero, negative or not finite
    #[error("invalid price multiplier {0} (must be finite and > 0)")]
    InvalidMultiplier(f64),
    /// Curve window is empty or reversed
    #[error("invalid curve range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },
    /// Curve sample count is zero or above the cap
    #[error("invalid curve steps {steps} (must be in 1..={max})")]
    InvalidSteps { steps: usize, max: usize },
}
