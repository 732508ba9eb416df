//! Observation and result types shared by the analytics, data and CLI crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single amount at a point in time (daily whale volume, one transfer, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimestampedAmount {
    pub timestamp: DateTime<Utc>,
    pub amount: f64,
}

impl TimestampedAmount {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, amount: f64) -> Self {
        Self { timestamp, amount }
    }
}

/// One merged daily sample of whale activity and asset price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimestampedObservation {
    pub timestamp: DateTime<Utc>,
    /// Total whale amount moved on this day (0 when there was no activity)
    pub whale_amount: f64,
    pub price: f64,
}

impl TimestampedObservation {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, whale_amount: f64, price: f64) -> Self {
        Self {
            timestamp,
            whale_amount,
            price,
        }
    }
}

/// A price sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Direction of a whale movement relative to exchange wallets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    /// Funds moved into an exchange (likely sell pressure)
    Inflow,
    /// Funds moved out of an exchange (likely accumulation)
    Outflow,
}

impl FlowDirection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inflow => "inflow",
            Self::Outflow => "outflow",
        }
    }
}

/// A large, discrete whale movement used as an event-study anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WhaleEvent {
    pub timestamp: DateTime<Utc>,
    pub amount: f64,
    pub direction: FlowDirection,
}

/// The minimal transfer shape needed for concentration analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub amount: f64,
    pub from_address: String,
}

impl Transfer {
    #[must_use]
    pub fn new(amount: f64, from_address: impl Into<String>) -> Self {
        Self {
            amount,
            from_address: from_address.into(),
        }
    }
}

/// A whale transfer as delivered by the blockchain query layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhaleTransfer {
    pub timestamp: DateTime<Utc>,
    pub tx_hash: String,
    pub from_address: String,
    pub to_address: String,
    pub amount: f64,
    pub token: String,
}

impl From<&WhaleTransfer> for Transfer {
    fn from(transfer: &WhaleTransfer) -> Self {
        Self {
            amount: transfer.amount,
            from_address: transfer.from_address.clone(),
        }
    }
}

impl From<&WhaleTransfer> for TimestampedAmount {
    fn from(transfer: &WhaleTransfer) -> Self {
        Self {
            timestamp: transfer.timestamp,
            amount: transfer.amount,
        }
    }
}

/// Weekly exchange inflow/outflow for one token contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeFlow {
    pub exchange: String,
    pub week_start: DateTime<Utc>,
    pub inflow: f64,
    pub outflow: f64,
    pub contract_address: String,
}

impl ExchangeFlow {
    #[must_use]
    pub fn net(&self) -> f64 {
        self.inflow - self.outflow
    }
}

/// Three-level risk classification used across concentration and flow metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn flow_direction_serializes_lowercase() {
        let json = serde_json::to_string(&FlowDirection::Inflow).unwrap();
        assert_eq!(json, "\"inflow\"");

        let parsed: FlowDirection = serde_json::from_str("\"outflow\"").unwrap();
        assert_eq!(parsed, FlowDirection::Outflow);
    }

    #[test]
    fn whale_event_parses_from_json() {
        let json = r#"{"timestamp":"2025-03-01T12:00:00Z","amount":2500.0,"direction":"inflow"}"#;
        let event: WhaleEvent = serde_json::from_str(json).unwrap();

        assert_eq!(
            event.timestamp,
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(event.direction, FlowDirection::Inflow);
    }

    #[test]
    fn whale_transfer_converts_to_transfer() {
        let whale = WhaleTransfer {
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
            tx_hash: "0xabc".to_string(),
            from_address: "0xfrom".to_string(),
            to_address: "0xto".to_string(),
            amount: 1200.0,
            token: "ETH".to_string(),
        };

        let transfer = Transfer::from(&whale);
        assert_eq!(transfer, Transfer::new(1200.0, "0xfrom"));
    }

    #[test]
    fn exchange_flow_net_is_inflow_minus_outflow() {
        let flow = ExchangeFlow {
            exchange: "Binance".to_string(),
            week_start: Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap(),
            inflow: 150.0,
            outflow: 400.0,
            contract_address: "0xdac17f958d2ee523a2206206994597c13d831ec7".to_string(),
        };
        assert!((flow.net() + 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn risk_level_displays_lowercase() {
        assert_eq!(RiskLevel::High.to_string(), "high");
        assert_eq!(
            serde_json::to_string(&RiskLevel::Medium).unwrap(),
            "\"medium\""
        );
    }
}
