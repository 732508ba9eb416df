//! Correlation between whale activity and price.
//!
//! Provides the Pearson coefficient for paired series, a trailing-window
//! rolling variant over merged daily samples, and helpers to label and
//! test the resulting coefficients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use whale_stats_core::{Result, StatsError, TimestampedObservation};

use crate::common::round_to;

/// Correlation at the end of one rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPoint {
    pub timestamp: DateTime<Utc>,
    /// Pearson coefficient [-1, 1], rounded to 3 decimals
    pub correlation: f64,
}

/// Qualitative label for the magnitude of a correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Weak,
    VeryWeak,
}

impl CorrelationStrength {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Weak => "Weak",
            Self::VeryWeak => "Very Weak",
        }
    }
}

/// Significance bucket derived from the two-tailed p-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    /// p < 0.01
    High,
    /// p < 0.05
    Medium,
    /// p < 0.10
    Low,
    None,
}

/// A correlation coefficient together with its significance test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSignificance {
    pub correlation: f64,
    /// Two-tailed p-value (normal approximation to the t statistic)
    pub p_value: f64,
    pub sample_size: usize,
    pub significance: Significance,
}

/// Calculates the Pearson correlation coefficient between two series.
///
/// Empty input and zero variance in either series yield 0.
///
/// # Errors
/// Returns `StatsError::InvalidInput` if the series differ in length.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(StatsError::invalid_input(format!(
            "pearson correlation needs equal-length series, got {} and {}",
            x.len(),
            y.len()
        )));
    }

    Ok(pearson_unchecked(x, y))
}

/// Pearson coefficient of two equal-length series, in mean-centred form.
fn pearson_unchecked(x: &[f64], y: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    // A constant series can leave deviations of a few ulps of the mean.
    let noise_x = (n * f64::EPSILON * mean_x.abs()).powi(2);
    let noise_y = (n * f64::EPSILON * mean_y.abs()).powi(2);
    if var_x <= noise_x || var_y <= noise_y {
        return 0.0;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }

    (covariance / denominator).clamp(-1.0, 1.0)
}

/// Computes the trailing-window correlation between whale amount and price.
///
/// Samples must be sorted ascending by timestamp. One point is emitted per
/// complete window, stamped with the window's last sample, so the output
/// holds `max(0, samples.len() - window_size + 1)` points.
///
/// # Errors
/// Returns `StatsError::InvalidInput` if `window_size` is zero.
pub fn rolling_correlation(
    samples: &[TimestampedObservation],
    window_size: usize,
) -> Result<Vec<CorrelationPoint>> {
    if window_size == 0 {
        return Err(StatsError::invalid_input(
            "rolling correlation window must be at least 1",
        ));
    }
    if samples.len() < window_size {
        return Ok(Vec::new());
    }

    let whale: Vec<f64> = samples.iter().map(|s| s.whale_amount).collect();
    let price: Vec<f64> = samples.iter().map(|s| s.price).collect();

    let points = (window_size - 1..samples.len())
        .map(|end| {
            let start = end + 1 - window_size;
            let correlation = pearson_unchecked(&whale[start..=end], &price[start..=end]);
            CorrelationPoint {
                timestamp: samples[end].timestamp,
                correlation: round_to(correlation, 3),
            }
        })
        .collect();

    Ok(points)
}

/// Mean of the rolling correlations, 0 for no points.
#[must_use]
pub fn average_correlation(points: &[CorrelationPoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| p.correlation).sum::<f64>() / points.len() as f64
}

#[must_use]
pub fn correlation_strength(correlation: f64) -> CorrelationStrength {
    let magnitude = correlation.abs();
    if magnitude > 0.7 {
        CorrelationStrength::Strong
    } else if magnitude > 0.4 {
        CorrelationStrength::Moderate
    } else if magnitude > 0.2 {
        CorrelationStrength::Weak
    } else {
        CorrelationStrength::VeryWeak
    }
}

/// Tests a correlation coefficient for significance.
///
/// Uses `t = r * sqrt(n-2) / sqrt(1 - r^2)` with a normal approximation for
/// the two-tailed p-value. Fewer than 3 samples give p = 1.
#[must_use]
pub fn correlation_significance(correlation: f64, sample_size: usize) -> CorrelationSignificance {
    let p_value = correlation_p_value(correlation, sample_size);
    let significance = if p_value < 0.01 {
        Significance::High
    } else if p_value < 0.05 {
        Significance::Medium
    } else if p_value < 0.10 {
        Significance::Low
    } else {
        Significance::None
    };

    CorrelationSignificance {
        correlation,
        p_value,
        sample_size,
        significance,
    }
}

fn correlation_p_value(r: f64, n: usize) -> f64 {
    if n < 3 {
        return 1.0;
    }

    let r_clamped = r.clamp(-0.9999, 0.9999);
    let df = n as f64 - 2.0;
    let t_stat = r_clamped * (df / (1.0 - r_clamped * r_clamped)).sqrt();

    let p = 2.0 * (1.0 - standard_normal_cdf(t_stat.abs()));
    p.clamp(0.0, 1.0)
}

/// Standard normal CDF (Abramowitz & Stegun 26.2.17).
fn standard_normal_cdf(x: f64) -> f64 {
    if x < 0.0 {
        return 1.0 - standard_normal_cdf(-x);
    }

    const B: [f64; 5] = [
        0.319_381_530,
        -0.356_563_782,
        1.781_477_937,
        -1.821_255_978,
        1.330_274_429,
    ];
    let t = 1.0 / (1.0 + 0.231_641_9 * x);

    let mut poly = 0.0;
    let mut t_pow = t;
    for b in B {
        poly += b * t_pow;
        t_pow *= t;
    }

    let pdf = (-x * x / 2.0).exp() / (2.0 * std::f64::consts::PI).sqrt();
    1.0 - pdf * poly
}
