//! Shared types, errors and configuration for the whale statistics workspace.

pub mod config;
pub mod config_loader;
pub mod error;
pub mod models;
pub mod tokens;

pub use config::{
    AnalysisConfig, AppConfig, OutputConfig, DEFAULT_ANOMALY_THRESHOLD, DEFAULT_EVENT_OFFSETS,
    DEFAULT_ROLLING_WINDOW,
};
pub use config_loader::ConfigLoader;
pub use error::{Result, StatsError};
pub use models::{
    ExchangeFlow, FlowDirection, PricePoint, RiskLevel, TimestampedAmount,
    TimestampedObservation, Transfer, WhaleEvent, WhaleTransfer,
};
