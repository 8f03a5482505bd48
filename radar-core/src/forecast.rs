//! Demand forecasting and reorder planning.
//!
//! Two regimes, chosen by history length:
//! - 30+ daily observations: least-squares linear trend over the day
//!   index, projected forward, each point clamped at zero. The
//!   confidence band is ±1.96 × the population std-dev of the fit
//!   residuals.
//! - 7..30 observations: flat mean fallback; the band uses the sample
//!   std-dev of the history instead.
//!
//! Fewer than 7 observations is an error: there is nothing defensible to
//! project from.

use serde::Serialize;

use crate::error::{PricingError, PricingResult};
use crate::stats;
use crate::thresholds;

/// Which projection produced a forecast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ForecastMethod {
    LinearTrend,
    FlatAverage,
}

/// Point forecast with a ~95% confidence band.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DemandForecast {
    pub method: ForecastMethod,
    /// Per-day point forecasts, clamped at zero.
    pub points: Vec<f64>,
    /// Band lower bounds, clamped at zero.
    pub lower: Vec<f64>,
    /// Band upper bounds.
    pub upper: Vec<f64>,
    /// Sum of the clamped point forecasts over the horizon.
    pub total_expected: f64,
}

/// Least-squares fit of `y = intercept + slope * x` over `x = 0..n`.
fn linear_fit(series: &[f64]) -> (f64, f64) {
    let x_mean = (series.len() - 1) as f64 / 2.0;
    let y_mean = stats::mean(series);

    let mut cov = 0.0;
    let mut var = 0.0;
    for (i, &y) in series.iter().enumerate() {
        let dx = i as f64 - x_mean;
        cov += dx * (y - y_mean);
        var += dx * dx;
    }
    // var is 0 only for a single point, which the caller rules out.
    let slope = if var > 0.0 { cov / var } else { 0.0 };
    let intercept = y_mean - slope * x_mean;
    (slope, intercept)
}

/// Forecast daily demand `horizon_days` forward from a daily sales
/// series (one value per calendar day, gaps already filled with zeros).
pub fn forecast_demand(daily_sales: &[f64], horizon_days: usize) -> PricingResult<DemandForecast> {
    let n = daily_sales.len();
    if n < thresholds::FORECAST_MIN_POINTS {
        return Err(PricingError::InsufficientHistory {
            points: n,
            required: thresholds::FORECAST_MIN_POINTS,
        });
    }

    let (points, spread, method) = if n >= thresholds::TREND_FIT_MIN_POINTS {
        let (slope, intercept) = linear_fit(daily_sales);
        let residuals: Vec<f64> = daily_sales
            .iter()
            .enumerate()
            .map(|(i, &y)| y - (intercept + slope * i as f64))
            .collect();
        let spread = stats::std_dev(&residuals);
        let points: Vec<f64> = (n..n + horizon_days)
            .map(|x| (intercept + slope * x as f64).max(0.0))
            .collect();
        (points, spread, ForecastMethod::LinearTrend)
    } else {
        let avg = stats::mean(daily_sales);
        let spread = stats::sample_std_dev(daily_sales);
        (vec![avg; horizon_days], spread, ForecastMethod::FlatAverage)
    };

    let band = if spread > 0.0 {
        thresholds::CONFIDENCE_BAND_Z * spread
    } else {
        0.0
    };
    let lower: Vec<f64> = points.iter().map(|p| (p - band).max(0.0)).collect();
    let upper: Vec<f64> = points.iter().map(|p| p + band).collect();
    let total_expected = points.iter().sum();

    Ok(DemandForecast {
        method,
        points,
        lower,
        upper,
        total_expected,
    })
}

/// Recommended order quantity: forecast demand plus a safety-stock
/// buffer sized in days of historical average sales.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReorderPlan {
    pub forecast_qty: f64,
    pub safety_stock_qty: f64,
    pub recommended_order_qty: f64,
    /// Share of the recommendation that is safety stock, in [0, 1].
    /// Zero when the recommendation itself is zero.
    pub safety_share: f64,
}

pub fn reorder_plan(
    forecast: &DemandForecast,
    historical_daily_avg: f64,
    safety_stock_days: f64,
) -> ReorderPlan {
    let forecast_qty = forecast.total_expected.ceil();
    let safety_stock_qty = (safety_stock_days * historical_daily_avg).ceil();
    let recommended_order_qty = forecast_qty + safety_stock_qty;
    let safety_share = if recommended_order_qty > 0.0 {
        safety_stock_qty / recommended_order_qty
    } else {
        0.0
    };
    ReorderPlan {
        forecast_qty,
        safety_stock_qty,
        recommended_order_qty,
        safety_share,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_history_is_rejected() {
        let result = forecast_demand(&[1.0; 6], 30);
        assert!(matches!(
            result,
            Err(PricingError::InsufficientHistory {
                points: 6,
                required: 7
            })
        ));
    }

    #[test]
    fn medium_history_uses_flat_average() {
        let series = [2.0, 4.0, 6.0, 4.0, 2.0, 4.0, 6.0, 4.0];
        let f = forecast_demand(&series, 30).unwrap();
        assert_eq!(f.method, ForecastMethod::FlatAverage);
        assert_eq!(f.points.len(), 30);
        assert!(f.points.iter().all(|&p| (p - 4.0).abs() < 1e-12));
        assert!((f.total_expected - 120.0).abs() < 1e-9);
        // Sample std-dev of the history drives the band.
        assert!(f.upper[0] > f.points[0]);
        assert!(f.lower[0] < f.points[0]);
    }

    #[test]
    fn long_history_fits_a_trend() {
        // y = 10 + 0.5x, exact: residuals are zero, band collapses.
        let series: Vec<f64> = (0..40).map(|i| 10.0 + 0.5 * i as f64).collect();
        let f = forecast_demand(&series, 10).unwrap();
        assert_eq!(f.method, ForecastMethod::LinearTrend);
        assert!((f.points[0] - 30.0).abs() < 1e-9);
        assert!((f.points[9] - 34.5).abs() < 1e-9);
        assert_eq!(f.lower, f.points);
        assert_eq!(f.upper, f.points);
    }

    #[test]
    fn declining_trend_is_clamped_at_zero() {
        let series: Vec<f64> = (0..40).map(|i| (20.0 - i as f64).max(0.0)).collect();
        let f = forecast_demand(&series, 30).unwrap();
        assert!(f.points.iter().all(|&p| p >= 0.0));
        assert!(f.lower.iter().all(|&p| p >= 0.0));
        // Far enough out the projection bottoms out at zero.
        assert_eq!(*f.points.last().unwrap(), 0.0);
    }

    #[test]
    fn reorder_plan_adds_ceiled_safety_stock() {
        let series = [4.0; 10];
        let f = forecast_demand(&series, 30).unwrap();
        // forecast 120, safety ceil(3 * 4.2) = 13
        let plan = reorder_plan(&f, 4.2, 3.0);
        assert_eq!(plan.forecast_qty, 120.0);
        assert_eq!(plan.safety_stock_qty, 13.0);
        assert_eq!(plan.recommended_order_qty, 133.0);
        assert!((plan.safety_share - 13.0 / 133.0).abs() < 1e-12);
    }

    #[test]
    fn zero_demand_plan_has_zero_safety_share() {
        let series = [0.0; 10];
        let f = forecast_demand(&series, 30).unwrap();
        let plan = reorder_plan(&f, 0.0, 3.0);
        assert_eq!(plan.recommended_order_qty, 0.0);
        assert_eq!(plan.safety_share, 0.0);
    }
}
