//! Centralized calibration constants for the pricing analytics.
//!
//! These values come from the marketplace's historical extracts and are
//! shared between the simulator, the advice layer, and the scan pipeline.
//! Changing a threshold here affects BOTH the advice classification (in
//! `advice.rs`) and candidate scoring (in `radar-pipeline`).

/// Elasticity magnitude above which demand counts as elastic.
/// Exactly 1.0 is inelastic (the boundary is exclusive).
pub const ELASTIC_BOUNDARY: f64 = 1.0;

/// R-squared above which an elasticity estimate is considered reliable.
pub const HIGH_RELIABILITY_R2: f64 = 0.3;

/// R-squared above which an estimate is moderately reliable.
/// Below this the estimate is usable only with caution.
pub const MODERATE_RELIABILITY_R2: f64 = 0.1;

/// Default margin rate assumed when a scenario does not specify one.
pub const DEFAULT_MARGIN_RATE: f64 = 0.25;

/// Z-score magnitude above which a daily sales point is flagged anomalous.
pub const ANOMALY_Z_THRESHOLD: f64 = 2.0;

/// Minimum history length (days) before any forecast is attempted.
pub const FORECAST_MIN_POINTS: usize = 7;

/// History length (days) at which the forecaster switches from the flat
/// mean fallback to a least-squares linear trend.
pub const TREND_FIT_MIN_POINTS: usize = 30;

/// Z value for the ~95% confidence band around forecast points.
pub const CONFIDENCE_BAND_Z: f64 = 1.96;

/// Default forecast horizon in days.
pub const FORECAST_HORIZON_DAYS: usize = 30;

/// Default safety-stock coverage in days for reorder planning.
pub const DEFAULT_SAFETY_STOCK_DAYS: f64 = 3.0;
