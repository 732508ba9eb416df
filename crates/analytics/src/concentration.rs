//! Market concentration metrics for whale activity.
//!
//! Concentration is measured across distinct senders: transfers are first
//! summed per `from_address`, then the Herfindahl-Hirschman Index, Gini
//! coefficient and top-N shares are computed over those per-address totals.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use whale_stats_core::{RiskLevel, Transfer};

use crate::common::{ceil_fraction, ratio_or_zero, round_to, sorted_ascending, sorted_descending, sum};

/// HHI above which activity counts as highly concentrated.
pub const HIGH_HHI_THRESHOLD: f64 = 2500.0;
/// HHI above which activity counts as moderately concentrated.
pub const MEDIUM_HHI_THRESHOLD: f64 = 1500.0;
pub const HIGH_GINI_THRESHOLD: f64 = 0.7;
pub const MEDIUM_GINI_THRESHOLD: f64 = 0.5;

/// Number of largest addresses in the top-N concentration figure.
pub const TOP_ADDRESS_COUNT: usize = 10;
/// Share of addresses (rounded up) counted as whales in the whale-to-retail ratio.
pub const WHALE_ADDRESS_FRACTION: f64 = 0.1;

/// Summed transfer volume for one sending address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressTotal {
    pub address: String,
    pub total: f64,
}

/// Concentration summary for a set of whale transfers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationResult {
    /// Herfindahl-Hirschman Index [0, 10000]
    pub hhi: f64,
    /// Gini coefficient [0, 1]
    pub gini: f64,
    /// Share of volume held by the ten largest addresses [0, 100]
    pub top10_concentration_pct: f64,
    /// Volume of the top 10% of addresses divided by the rest
    pub whale_to_retail_ratio: f64,
    pub risk_level: RiskLevel,
}

/// Calculates the Herfindahl-Hirschman Index of a set of amounts.
///
/// Each amount's market share is expressed in percent, so a single holder
/// scores 10000 and an empty or all-zero set scores 0. The result is
/// rounded to the nearest integer.
#[must_use]
pub fn calculate_hhi(amounts: &[f64]) -> f64 {
    let total = sum(amounts);
    if total == 0.0 {
        return 0.0;
    }

    let hhi: f64 = amounts
        .iter()
        .map(|amount| {
            let share = amount / total * 100.0;
            share * share
        })
        .sum();

    round_to(hhi, 0)
}

/// Calculates the Gini coefficient of a set of amounts, rounded to 3 decimals.
///
/// # Formula
/// ```text
/// G = sum((2i - n - 1) * a_i) / (n * total),  a sorted ascending, i = 1..n
/// ```
#[must_use]
pub fn calculate_gini(amounts: &[f64]) -> f64 {
    if amounts.is_empty() {
        return 0.0;
    }

    let sorted = sorted_ascending(amounts);
    let n = sorted.len() as f64;
    let total = sum(&sorted);
    if total == 0.0 {
        return 0.0;
    }

    let numerator: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, amount)| (2.0 * (i as f64 + 1.0) - n - 1.0) * amount)
        .sum();

    round_to(numerator / (n * total), 3)
}

/// Sums transfer amounts per sending address, largest total first.
///
/// Ties are ordered by address so the output is deterministic.
#[must_use]
pub fn aggregate_by_address(transfers: &[Transfer]) -> Vec<AddressTotal> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for transfer in transfers {
        *totals.entry(transfer.from_address.as_str()).or_insert(0.0) += transfer.amount;
    }

    let mut aggregated: Vec<AddressTotal> = totals
        .into_iter()
        .map(|(address, total)| AddressTotal {
            address: address.to_string(),
            total,
        })
        .collect();

    aggregated.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.address.cmp(&b.address))
    });
    aggregated
}

/// Percentage of the total held by the `n` largest amounts (0 when the total is 0).
#[must_use]
pub fn top_n_concentration_pct(amounts: &[f64], n: usize) -> f64 {
    let sorted = sorted_descending(amounts);
    let total = sum(&sorted);
    let top: f64 = sorted.iter().take(n).sum();
    ratio_or_zero(top, total) * 100.0
}

/// Volume of the top 10% of holders (rounded up) divided by everyone else.
///
/// Returns 0 when the remaining holders have no volume.
#[must_use]
pub fn whale_to_retail_ratio(amounts: &[f64]) -> f64 {
    let sorted = sorted_descending(amounts);
    let split = ceil_fraction(sorted.len(), WHALE_ADDRESS_FRACTION).min(sorted.len());
    let (whales, retail) = sorted.split_at(split);
    ratio_or_zero(sum(whales), sum(retail))
}

/// Maps HHI and Gini onto a risk level; either metric alone can raise it.
#[must_use]
pub fn classify_risk(hhi: f64, gini: f64) -> RiskLevel {
    if hhi > HIGH_HHI_THRESHOLD || gini > HIGH_GINI_THRESHOLD {
        RiskLevel::High
    } else if hhi > MEDIUM_HHI_THRESHOLD || gini > MEDIUM_GINI_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Computes the full concentration summary for a set of transfers.
#[must_use]
pub fn calculate_concentration(transfers: &[Transfer]) -> ConcentrationResult {
    let amounts: Vec<f64> = aggregate_by_address(transfers)
        .into_iter()
        .map(|a| a.total)
        .collect();

    let hhi = calculate_hhi(&amounts);
    let gini = calculate_gini(&amounts);

    ConcentrationResult {
        hhi,
        gini,
        top10_concentration_pct: round_to(top_n_concentration_pct(&amounts, TOP_ADDRESS_COUNT), 1),
        whale_to_retail_ratio: round_to(whale_to_retail_ratio(&amounts), 2),
        risk_level: classify_risk(hhi, gini),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfers(pairs: &[(f64, &str)]) -> Vec<Transfer> {
        pairs
            .iter()
            .map(|(amount, address)| Transfer::new(*amount, *address))
            .collect()
    }

    #[test]
    fn hhi_of_worked_example() {
        assert_eq!(calculate_hhi(&[50.0, 30.0, 10.0, 10.0]), 3600.0);
    }

    #[test]
    fn hhi_single_holder_is_monopoly() {
        assert_eq!(calculate_hhi(&[42.0]), 10000.0);
        assert_eq!(calculate_hhi(&[0.001]), 10000.0);
        assert_eq!(calculate_hhi(&[7.0, 0.0, 0.0]), 10000.0);
    }

    #[test]
    fn hhi_empty_or_zero_is_zero() {
        assert_eq!(calculate_hhi(&[]), 0.0);
        assert_eq!(calculate_hhi(&[0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn hhi_stays_within_bounds() {
        let cases: Vec<Vec<f64>> = vec![
            vec![1.0; 100],
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![1e9, 1.0, 1.0],
            vec![0.5, 0.25, 0.125, 0.0625],
            (1..=50).map(|i| (i * i) as f64).collect(),
        ];

        for amounts in cases {
            let hhi = calculate_hhi(&amounts);
            assert!((0.0..=10000.0).contains(&hhi), "hhi {hhi} for {amounts:?}");
        }
    }

    #[test]
    fn hhi_of_equal_shares_is_ten_thousand_over_n() {
        assert_eq!(calculate_hhi(&[25.0, 25.0, 25.0, 25.0]), 2500.0);
    }

    #[test]
    fn gini_of_worked_example() {
        // sorted [10, 10, 30, 50]: (-3*10 - 1*10 + 1*30 + 3*50) / (4 * 100) = 140 / 400
        let gini = calculate_gini(&[50.0, 30.0, 10.0, 10.0]);
        assert!((gini - 0.35).abs() < 1e-12, "gini was {gini}");
    }

    #[test]
    fn gini_of_equal_amounts_is_zero() {
        assert_eq!(calculate_gini(&[5.0, 5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn gini_empty_or_zero_is_zero() {
        assert_eq!(calculate_gini(&[]), 0.0);
        assert_eq!(calculate_gini(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn gini_stays_within_bounds() {
        let cases: Vec<Vec<f64>> = vec![
            vec![0.0, 0.0, 0.0, 1000.0],
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![1e-6, 1e6],
            vec![3.0],
            (1..=40).map(|i| (i as f64).powi(3)).collect(),
        ];

        for amounts in cases {
            let gini = calculate_gini(&amounts);
            assert!((0.0..=1.0).contains(&gini), "gini {gini} for {amounts:?}");
        }
    }

    #[test]
    fn gini_does_not_increase_when_richer_gives_to_poorer() {
        let cases = [
            (vec![1.0, 2.0, 3.0, 10.0], vec![2.0, 2.0, 3.0, 9.0]),
            (vec![0.0, 5.0, 5.0, 20.0], vec![1.0, 5.0, 5.0, 19.0]),
            (vec![4.0, 8.0], vec![5.0, 7.0]),
            (vec![10.0, 1.0, 50.0], vec![10.0, 2.0, 49.0]),
        ];

        for (before, after) in cases {
            let g_before = calculate_gini(&before);
            let g_after = calculate_gini(&after);
            assert!(
                g_after <= g_before,
                "gini rose from {g_before} to {g_after} ({before:?} -> {after:?})"
            );
        }
    }

    #[test]
    fn gini_leaves_input_order_untouched() {
        let amounts = vec![50.0, 10.0, 30.0];
        let _ = calculate_gini(&amounts);
        assert_eq!(amounts, vec![50.0, 10.0, 30.0]);
    }

    #[test]
    fn aggregate_sums_per_sender_largest_first() {
        let totals = aggregate_by_address(&transfers(&[
            (10.0, "0xb"),
            (5.0, "0xa"),
            (20.0, "0xc"),
            (7.0, "0xb"),
            (12.0, "0xa"),
        ]));

        let flattened: Vec<(&str, f64)> = totals
            .iter()
            .map(|t| (t.address.as_str(), t.total))
            .collect();
        assert_eq!(flattened, vec![("0xc", 20.0), ("0xa", 17.0), ("0xb", 17.0)]);
    }

    #[test]
    fn top_n_concentration_handles_small_and_zero_sets() {
        assert_eq!(top_n_concentration_pct(&[], 10), 0.0);
        assert_eq!(top_n_concentration_pct(&[0.0, 0.0], 10), 0.0);
        assert_eq!(top_n_concentration_pct(&[3.0, 1.0], 10), 100.0);
        assert_eq!(top_n_concentration_pct(&[1.0, 3.0, 4.0], 1), 50.0);
    }

    #[test]
    fn whale_to_retail_splits_at_ceiling_of_ten_percent() {
        // 11 addresses -> top 2 are whales
        let mut amounts = vec![100.0, 50.0];
        amounts.extend(std::iter::repeat(5.0).take(9));
        assert_eq!(whale_to_retail_ratio(&amounts), 150.0 / 45.0);

        // single address: no retail volume
        assert_eq!(whale_to_retail_ratio(&[100.0]), 0.0);
        assert_eq!(whale_to_retail_ratio(&[]), 0.0);
    }

    #[test]
    fn classify_risk_uses_either_metric() {
        assert_eq!(classify_risk(3000.0, 0.1), RiskLevel::High);
        assert_eq!(classify_risk(100.0, 0.75), RiskLevel::High);
        assert_eq!(classify_risk(1600.0, 0.1), RiskLevel::Medium);
        assert_eq!(classify_risk(100.0, 0.55), RiskLevel::Medium);
        assert_eq!(classify_risk(1500.0, 0.5), RiskLevel::Low);
    }

    #[test]
    fn concentration_groups_by_sender_address() {
        // two transfers from the same whale collapse into one holder
        let result = calculate_concentration(&transfers(&[
            (30.0, "0xwhale"),
            (20.0, "0xwhale"),
            (30.0, "0xb"),
            (10.0, "0xc"),
            (10.0, "0xd"),
        ]));

        assert_eq!(result.hhi, 3600.0);
        assert!((result.gini - 0.35).abs() < 1e-12);
        assert_eq!(result.top10_concentration_pct, 100.0);
        // ceil(0.4) = 1 whale: 50 / 50
        assert_eq!(result.whale_to_retail_ratio, 1.0);
        assert_eq!(result.risk_level, RiskLevel::High);
    }

    #[test]
    fn concentration_of_diffuse_activity_is_low_risk() {
        let pairs: Vec<(f64, String)> = (0..40).map(|i| (100.0, format!("0x{i:02x}"))).collect();
        let input: Vec<Transfer> = pairs
            .iter()
            .map(|(amount, address)| Transfer::new(*amount, address.clone()))
            .collect();

        let result = calculate_concentration(&input);

        assert_eq!(result.hhi, 250.0);
        assert_eq!(result.gini, 0.0);
        assert_eq!(result.top10_concentration_pct, 25.0);
        assert_eq!(result.whale_to_retail_ratio, 0.11);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn concentration_of_no_transfers_is_neutral() {
        let result = calculate_concentration(&[]);

        assert_eq!(result.hhi, 0.0);
        assert_eq!(result.gini, 0.0);
        assert_eq!(result.top10_concentration_pct, 0.0);
        assert_eq!(result.whale_to_retail_ratio, 0.0);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }
}
