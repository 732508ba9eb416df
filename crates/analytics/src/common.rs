//! Rounding and summation helpers shared by the analyzers.

use std::cmp::Ordering;

/// Rounds half-up to `decimals` places, the convention the dashboard displays.
///
/// `-2.5` rounds to `-2`, not `-3`.
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    let rounded = (value * factor + 0.5).floor() / factor;
    // Avoid emitting -0.0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Divides, returning 0 when the denominator is zero.
pub(crate) fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

pub(crate) fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Returns a copy sorted largest first.
pub(crate) fn sorted_descending(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    sorted
}

pub(crate) fn sorted_ascending(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Number of entries in the leading `fraction` of `len` items, rounded up.
pub(crate) fn ceil_fraction(len: usize, fraction: f64) -> usize {
    ((len as f64) * fraction).ceil() as usize
}
