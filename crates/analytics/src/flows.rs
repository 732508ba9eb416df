//! Exchange flow analytics: net flow, sentiment and stablecoin rotation.

use serde::Serialize;
use whale_stats_core::{tokens, ExchangeFlow, RiskLevel};

use crate::common::ratio_or_zero;

/// Net flow magnitude for "strong" sentiment labels.
pub const STRONG_FLOW_THRESHOLD: f64 = 1_000_000.0;
/// Net flow magnitude below which sentiment is neutral.
pub const MODERATE_FLOW_THRESHOLD: f64 = 100_000.0;

/// Stablecoin share of inflows (percent) above which whales are risk-off.
pub const RISK_OFF_STABLECOIN_PCT: f64 = 60.0;
pub const CAUTIOUS_STABLECOIN_PCT: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowSentiment {
    pub sentiment: Sentiment,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowSummary {
    pub total_inflow: f64,
    pub total_outflow: f64,
    pub net_flow: f64,
    pub sentiment: FlowSentiment,
}

/// Whether whales are rotating into stablecoins (risk-off) or crypto (risk-on).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StablecoinRotation {
    pub stablecoin_inflow: f64,
    pub crypto_inflow: f64,
    /// Stablecoin share of combined stablecoin + crypto inflow [0, 100]
    pub stablecoin_ratio_pct: f64,
    pub level: RiskLevel,
    pub label: &'static str,
}

/// Sum of inflow minus outflow across all flows.
#[must_use]
pub fn calculate_net_flow(flows: &[ExchangeFlow]) -> f64 {
    flows.iter().map(ExchangeFlow::net).sum()
}

/// Classifies a net exchange flow.
///
/// Net outflow (negative) means whales are withdrawing from exchanges,
/// which reads as accumulation; net inflow reads as sell pressure.
#[must_use]
pub fn flow_sentiment(net_flow: f64) -> FlowSentiment {
    let (sentiment, label) = if net_flow < -STRONG_FLOW_THRESHOLD {
        (Sentiment::Bullish, "Strong Accumulation")
    } else if net_flow < -MODERATE_FLOW_THRESHOLD {
        (Sentiment::Bullish, "Accumulation")
    } else if net_flow > STRONG_FLOW_THRESHOLD {
        (Sentiment::Bearish, "Strong Sell Pressure")
    } else if net_flow > MODERATE_FLOW_THRESHOLD {
        (Sentiment::Bearish, "Sell Pressure")
    } else {
        (Sentiment::Neutral, "Neutral")
    };

    FlowSentiment { sentiment, label }
}

#[must_use]
pub fn summarize_flows(flows: &[ExchangeFlow]) -> FlowSummary {
    let total_inflow: f64 = flows.iter().map(|f| f.inflow).sum();
    let total_outflow: f64 = flows.iter().map(|f| f.outflow).sum();
    let net_flow = calculate_net_flow(flows);

    FlowSummary {
        total_inflow,
        total_outflow,
        net_flow,
        sentiment: flow_sentiment(net_flow),
    }
}

/// Compares exchange inflows of stablecoins (USDT/USDC) with crypto (WETH/WBTC).
///
/// Flows whose contract is not a known token are ignored.
#[must_use]
pub fn stablecoin_rotation(flows: &[ExchangeFlow]) -> StablecoinRotation {
    let mut stablecoin_inflow = 0.0;
    let mut crypto_inflow = 0.0;

    for flow in flows {
        match tokens::token_for_contract(&flow.contract_address) {
            Some(token) if tokens::is_stablecoin(token) => stablecoin_inflow += flow.inflow,
            Some("WETH" | "WBTC") => crypto_inflow += flow.inflow,
            _ => {}
        }
    }

    let stablecoin_ratio_pct =
        ratio_or_zero(stablecoin_inflow, stablecoin_inflow + crypto_inflow) * 100.0;

    let (level, label) = if stablecoin_ratio_pct > RISK_OFF_STABLECOIN_PCT {
        (RiskLevel::High, "Risk-Off Mode")
    } else if stablecoin_ratio_pct > CAUTIOUS_STABLECOIN_PCT {
        (RiskLevel::Medium, "Cautious")
    } else {
        (RiskLevel::Low, "Risk-On Mode")
    };

    StablecoinRotation {
        stablecoin_inflow,
        crypto_inflow,
        stablecoin_ratio_pct,
        level,
        label,
    }
}

/// Percent change from `previous` to `current`, 0 when `previous` is 0.
#[must_use]
pub fn calculate_percentage_change(current: f64, previous: f64) -> f64 {
    ratio_or_zero(current - previous, previous) * 100.0
}
