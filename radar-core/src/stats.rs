//! Small statistics helpers shared by the forecaster and the anomaly
//! annotations.

use serde::Serialize;

use crate::thresholds;

/// Arithmetic mean. Empty input yields 0.
pub fn mean(series: &[f64]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    series.iter().sum::<f64>() / series.len() as f64
}

/// Population standard deviation (divisor n). Empty input yields 0.
pub fn std_dev(series: &[f64]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    let m = mean(series);
    let var = series.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / series.len() as f64;
    var.sqrt()
}

/// Sample standard deviation (divisor n-1). Fewer than two points yield 0.
pub fn sample_std_dev(series: &[f64]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let m = mean(series);
    let var =
        series.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / (series.len() - 1) as f64;
    var.sqrt()
}

/// Per-point z-scores against the series' own mean and population
/// std-dev. A zero-spread series yields all zeros rather than dividing
/// by zero.
pub fn z_scores(series: &[f64]) -> Vec<f64> {
    let m = mean(series);
    let sd = std_dev(series);
    if sd == 0.0 {
        return vec![0.0; series.len()];
    }
    series.iter().map(|x| (x - m) / sd).collect()
}

/// A point whose z-score exceeded the anomaly threshold.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnomalyFlag {
    pub index: usize,
    pub value: f64,
    pub z_score: f64,
}

/// Indices of series points with `z > threshold`. Only upward spikes are
/// flagged; drops to zero are normal in sparse daily sales.
pub fn anomaly_flags(series: &[f64], threshold: f64) -> Vec<AnomalyFlag> {
    z_scores(series)
        .into_iter()
        .enumerate()
        .filter(|(_, z)| *z > threshold)
        .map(|(index, z_score)| AnomalyFlag {
            index,
            value: series[index],
            z_score,
        })
        .collect()
}

/// [`anomaly_flags`] at the calibrated default threshold.
pub fn default_anomaly_flags(series: &[f64]) -> Vec<AnomalyFlag> {
    anomaly_flags(series, thresholds::ANOMALY_Z_THRESHOLD)
}
