use serde::{Deserialize, Serialize};

use crate::tokens::EXCHANGE_WALLETS;

/// Trailing window, in samples, for rolling correlation.
pub const DEFAULT_ROLLING_WINDOW: usize = 7;
/// Absolute z-score above which an observation is anomalous.
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 3.0;
/// Day offsets measured by the event study.
pub const DEFAULT_EVENT_OFFSETS: [u32; 3] = [1, 3, 7];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub rolling_window: usize,
    pub anomaly_threshold: f64,
    pub event_offsets_days: Vec<u32>,
    /// Smallest transfer treated as a whale event when deriving events from transfers
    pub min_event_amount: f64,
    /// Known exchange hot wallets, used to classify transfers as inflow or outflow
    pub exchange_wallets: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rolling_window: DEFAULT_ROLLING_WINDOW,
            anomaly_threshold: DEFAULT_ANOMALY_THRESHOLD,
            event_offsets_days: DEFAULT_EVENT_OFFSETS.to_vec(),
            min_event_amount: 1_000.0,
            exchange_wallets: EXCHANGE_WALLETS
                .iter()
                .map(|(wallet, _)| (*wallet).to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// "text" or "json"
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
        }
    }
}
