//! Holder distribution buckets and the transparency score.

use serde::{Deserialize, Serialize};

use crate::common::{ceil_fraction, round_to, sorted_descending};

/// Volume held by each tier of holders, ranked largest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HolderDistribution {
    /// Top 10% of holders (rounded up)
    pub top_10_pct: f64,
    /// Holders ranked from the top 10% to the top 50%
    pub next_40_pct: f64,
    pub bottom_50_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransparencyLevel {
    Low,
    Medium,
    High,
}

impl TransparencyLevel {
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::High => "Well-distributed whale activity",
            Self::Medium => "Moderate transparency with some concentration concerns",
            Self::Low => "High concentration risk from dominant whales",
        }
    }
}

/// Inverse-concentration score in [0, 100]; higher is more transparent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransparencyScore {
    pub score: f64,
    pub level: TransparencyLevel,
}

#[must_use]
pub fn holder_distribution(amounts: &[f64]) -> HolderDistribution {
    let sorted = sorted_descending(amounts);
    let top_end = ceil_fraction(sorted.len(), 0.1).min(sorted.len());
    let mid_end = ceil_fraction(sorted.len(), 0.5).clamp(top_end, sorted.len());

    HolderDistribution {
        top_10_pct: sorted[..top_end].iter().sum(),
        next_40_pct: sorted[top_end..mid_end].iter().sum(),
        bottom_50_pct: sorted[mid_end..].iter().sum(),
    }
}

/// Combines HHI and Gini into a transparency score.
///
/// Each metric contributes up to 50 points: `50 - hhi/10000*50` and
/// `50 - gini*50`, floored at 0. Scores of 70+ are high, 40+ medium.
#[must_use]
pub fn transparency_score(hhi: f64, gini: f64) -> TransparencyScore {
    let hhi_points = (50.0 - hhi / 10_000.0 * 50.0).max(0.0);
    let gini_points = (50.0 - gini * 50.0).max(0.0);
    let score = round_to(hhi_points + gini_points, 0);

    let level = if score >= 70.0 {
        TransparencyLevel::High
    } else if score >= 40.0 {
        TransparencyLevel::Medium
    } else {
        TransparencyLevel::Low
    };

    TransparencyScore { score, level }
}
