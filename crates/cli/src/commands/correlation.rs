//! Correlation CLI command.
//!
//! Joins daily whale volume onto the price series and reports the rolling
//! and full-period Pearson correlation between them.

use anyhow::{anyhow, Result};
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

use whale_stats_analytics::{
    average_correlation, correlation_significance, correlation_strength, pearson_correlation,
    rolling_correlation, CorrelationPoint, CorrelationSignificance, CorrelationStrength,
};
use whale_stats_core::{AppConfig, TimestampedObservation};
use whale_stats_data::{daily_transfer_totals, merge_daily, DataLoader};

use super::output::{emit, header, OutputFormat, TextReport};

/// Arguments for the correlation command.
#[derive(Args, Debug, Clone)]
pub struct CorrelationArgs {
    /// Whale transfers file (.csv or .json)
    #[arg(long)]
    pub transfers: PathBuf,

    /// Price samples file (.csv or .json)
    #[arg(long)]
    pub prices: PathBuf,

    /// Rolling window in days (overrides analysis.rolling_window)
    #[arg(long)]
    pub window: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorrelationReport {
    pub days: usize,
    pub window: usize,
    pub average_correlation: f64,
    pub average_strength: CorrelationStrength,
    /// Pearson over the whole period with its significance test
    pub overall: CorrelationSignificance,
    pub points: Vec<CorrelationPoint>,
}

impl CorrelationReport {
    /// Builds the report from merged daily observations.
    pub fn from_observations(observations: &[TimestampedObservation], window: usize) -> Result<Self> {
        let points = rolling_correlation(observations, window)?;
        let average = average_correlation(&points);

        let whale: Vec<f64> = observations.iter().map(|o| o.whale_amount).collect();
        let price: Vec<f64> = observations.iter().map(|o| o.price).collect();
        let overall = pearson_correlation(&whale, &price)?;

        Ok(Self {
            days: observations.len(),
            window,
            average_correlation: average,
            average_strength: correlation_strength(average),
            overall: correlation_significance(overall, observations.len()),
            points,
        })
    }
}

impl TextReport for CorrelationReport {
    fn to_text(&self) -> String {
        let mut out = header("WHALE / PRICE CORRELATION");

        out.push_str(&format!(
            "Days: {}   Window: {}   Points: {}\n\n",
            self.days,
            self.window,
            self.points.len()
        ));
        out.push_str(&format!(
            "Average rolling r:  {:+.3} ({})\n",
            self.average_correlation,
            self.average_strength.label()
        ));
        out.push_str(&format!(
            "Full-period r:      {:+.3} (p = {:.4}, significance: {:?})\n",
            self.overall.correlation, self.overall.p_value, self.overall.significance
        ));

        if !self.points.is_empty() {
            out.push_str("\nDate         r\n");
            for point in &self.points {
                out.push_str(&format!(
                    "{}  {:+.3}\n",
                    point.timestamp.format("%Y-%m-%d"),
                    point.correlation
                ));
            }
        }

        out
    }
}

/// Loads transfers and prices and merges them into daily observations.
pub fn load_daily_observations(
    transfers: &Path,
    prices: &Path,
) -> Result<Vec<TimestampedObservation>> {
    let transfers = DataLoader::load_transfers(transfers)?;
    let prices = DataLoader::load_prices(prices)?;
    tracing::info!(
        "Loaded {} transfers and {} price samples",
        transfers.len(),
        prices.len()
    );

    let observations = merge_daily(&daily_transfer_totals(&transfers), &prices);
    tracing::info!("Merged into {} daily observations", observations.len());
    Ok(observations)
}

/// Runs the correlation command.
pub fn run_correlation(args: &CorrelationArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let window = args.window.unwrap_or(config.analysis.rolling_window);
    if window == 0 {
        return Err(anyhow!("Rolling window must be at least 1"));
    }

    let observations = load_daily_observations(&args.transfers, &args.prices)?;
    if observations.len() < window {
        tracing::warn!(
            "Only {} days of data for a {}-day window; no rolling points",
            observations.len(),
            window
        );
    }

    let report = CorrelationReport::from_observations(&observations, window)?;
    emit(&report, format)
}
