//! Z-score anomaly detection over a series of whale amounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use whale_stats_core::TimestampedAmount;

use crate::common::round_to;

/// An observation whose z-score exceeded the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyPoint {
    pub timestamp: DateTime<Utc>,
    pub amount: f64,
    /// Rounded to 2 decimals
    pub z_score: f64,
}

/// Population mean and standard deviation (divisor n).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl SeriesStats {
    /// Computes population statistics; an empty slice gives zeros.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
            };
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// Z-score of `value`, or 0 when the series has no spread.
    #[must_use]
    pub fn z_score(&self, value: f64) -> f64 {
        if self.std_dev > 0.0 {
            (value - self.mean) / self.std_dev
        } else {
            0.0
        }
    }
}

/// Returns the observations whose absolute z-score is strictly above `threshold`.
///
/// Output preserves input order and contains only input observations.
#[must_use]
pub fn detect_anomalies(data: &[TimestampedAmount], threshold: f64) -> Vec<AnomalyPoint> {
    let amounts: Vec<f64> = data.iter().map(|d| d.amount).collect();
    let stats = SeriesStats::from_values(&amounts);

    data.iter()
        .filter_map(|d| {
            let z = stats.z_score(d.amount);
            (z.abs() > threshold).then(|| AnomalyPoint {
                timestamp: d.timestamp,
                amount: d.amount,
                z_score: round_to(z, 2),
            })
        })
        .collect()
}
