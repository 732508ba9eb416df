//! Statistics over whale transfer activity and asset prices.
//!
//! Every function here is pure: inputs are borrowed, never mutated, and
//! degenerate input (empty series, zero totals, zero variance) yields a
//! neutral 0 rather than NaN or infinity.

mod common;

pub mod anomaly;
pub mod concentration;
pub mod correlation;
pub mod distribution;
pub mod event_study;
pub mod flows;

pub use anomaly::{detect_anomalies, AnomalyPoint, SeriesStats};
pub use concentration::{
    aggregate_by_address, calculate_concentration, calculate_gini, calculate_hhi, classify_risk,
    top_n_concentration_pct, whale_to_retail_ratio, AddressTotal, ConcentrationResult,
};
pub use correlation::{
    average_correlation, correlation_significance, correlation_strength, pearson_correlation,
    rolling_correlation, CorrelationPoint, CorrelationSignificance, CorrelationStrength,
    Significance,
};
pub use distribution::{
    holder_distribution, transparency_score, HolderDistribution, TransparencyLevel,
    TransparencyScore,
};
pub use event_study::{
    event_study, event_study_by_direction, DirectionalEventStudy, EventStudyResult,
};
pub use flows::{
    calculate_net_flow, calculate_percentage_change, flow_sentiment, stablecoin_rotation,
    summarize_flows, FlowSentiment, FlowSummary, Sentiment, StablecoinRotation,
};

pub use whale_stats_core::{DEFAULT_ANOMALY_THRESHOLD, DEFAULT_EVENT_OFFSETS, DEFAULT_ROLLING_WINDOW};
