//! Anomalies CLI command.

use anyhow::{anyhow, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use whale_stats_analytics::{detect_anomalies, AnomalyPoint, SeriesStats};
use whale_stats_core::{AppConfig, TimestampedAmount, WhaleTransfer};
use whale_stats_data::{daily_transfer_totals, DataLoader};

use super::output::{emit, header, OutputFormat, TextReport};

/// Arguments for the anomalies command.
#[derive(Args, Debug, Clone)]
pub struct AnomaliesArgs {
    /// Whale transfers file (.csv or .json)
    #[arg(long)]
    pub transfers: PathBuf,

    /// Absolute z-score threshold (overrides analysis.anomaly_threshold)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Score individual transfers instead of daily totals
    #[arg(long)]
    pub per_transfer: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnomalyReport {
    /// "daily" or "transfer"
    pub series: &'static str,
    pub samples: usize,
    pub threshold: f64,
    pub stats: SeriesStats,
    pub anomalies: Vec<AnomalyPoint>,
}

impl AnomalyReport {
    pub fn build(transfers: &[WhaleTransfer], threshold: f64, per_transfer: bool) -> Self {
        let (series, data): (&'static str, Vec<TimestampedAmount>) = if per_transfer {
            ("transfer", transfers.iter().map(TimestampedAmount::from).collect())
        } else {
            ("daily", daily_transfer_totals(transfers))
        };

        let amounts: Vec<f64> = data.iter().map(|d| d.amount).collect();

        Self {
            series,
            samples: data.len(),
            threshold,
            stats: SeriesStats::from_values(&amounts),
            anomalies: detect_anomalies(&data, threshold),
        }
    }
}

impl TextReport for AnomalyReport {
    fn to_text(&self) -> String {
        let mut out = header("WHALE VOLUME ANOMALIES");

        out.push_str(&format!(
            "Series: {} ({} samples)   Mean: {:.2}   Std dev: {:.2}   |z| > {}\n\n",
            self.series, self.samples, self.stats.mean, self.stats.std_dev, self.threshold
        ));

        if self.anomalies.is_empty() {
            out.push_str("No anomalies detected\n");
            return out;
        }

        out.push_str("Timestamp              Amount           z\n");
        for a in &self.anomalies {
            out.push_str(&format!(
                "{}   {:>14.2}   {:>+6.2}\n",
                a.timestamp.format("%Y-%m-%d %H:%M"),
                a.amount,
                a.z_score
            ));
        }
        out
    }
}

/// Runs the anomalies command.
pub fn run_anomalies(args: &AnomaliesArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let threshold = args.threshold.unwrap_or(config.analysis.anomaly_threshold);
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(anyhow!("Threshold must be a non-negative number, got {threshold}"));
    }

    let transfers = DataLoader::load_transfers(&args.transfers)?;
    tracing::info!(
        "Loaded {} transfers from {}",
        transfers.len(),
        args.transfers.display()
    );

    let report = AnomalyReport::build(&transfers, threshold, args.per_transfer);
    tracing::info!(
        "Found {} anomalies in {} samples",
        report.anomalies.len(),
        report.samples
    );
    emit(&report, format)
}
