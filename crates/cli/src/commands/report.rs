//! Full report CLI command.
//!
//! Runs every analysis over one dataset: concentration, correlation,
//! anomalies, an event study on events derived from exchange wallet
//! movements, and exchange flows when a flows file is given.

use anyhow::{anyhow, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use whale_stats_core::{AnalysisConfig, AppConfig, ExchangeFlow, PricePoint, WhaleTransfer};
use whale_stats_data::{daily_transfer_totals, events_from_transfers, merge_daily, DataLoader};

use super::anomalies::AnomalyReport;
use super::concentration::ConcentrationReport;
use super::correlation::CorrelationReport;
use super::event_study::{validate_offsets, EventStudyReport};
use super::flows::FlowsReport;
use super::output::{emit, header, OutputFormat, TextReport};

const TOP_ADDRESSES: usize = 10;

/// Arguments for the report command.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Whale transfers file (.csv or .json)
    #[arg(long)]
    pub transfers: PathBuf,

    /// Price samples file (.csv or .json)
    #[arg(long)]
    pub prices: PathBuf,

    /// Weekly exchange flows file (.csv or .json)
    #[arg(long)]
    pub flows: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FullReport {
    pub concentration: ConcentrationReport,
    pub correlation: CorrelationReport,
    pub anomalies: AnomalyReport,
    pub event_study: EventStudyReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flows: Option<FlowsReport>,
}

impl FullReport {
    pub fn build(
        transfers: &[WhaleTransfer],
        prices: &[PricePoint],
        flows: Option<&[ExchangeFlow]>,
        analysis: &AnalysisConfig,
    ) -> Result<Self> {
        if analysis.rolling_window == 0 {
            return Err(anyhow!("Rolling window must be at least 1"));
        }
        validate_offsets(&analysis.event_offsets_days)?;

        let observations = merge_daily(&daily_transfer_totals(transfers), prices);
        let events = events_from_transfers(
            transfers,
            analysis.min_event_amount,
            &analysis.exchange_wallets,
        );
        tracing::info!(
            "Report inputs: {} daily observations, {} derived events",
            observations.len(),
            events.len()
        );

        Ok(Self {
            concentration: ConcentrationReport::from_transfers(transfers, TOP_ADDRESSES),
            correlation: CorrelationReport::from_observations(&observations, analysis.rolling_window)?,
            anomalies: AnomalyReport::build(transfers, analysis.anomaly_threshold, false),
            event_study: EventStudyReport::build(
                &events,
                prices,
                &analysis.event_offsets_days,
                true,
            ),
            flows: flows.map(FlowsReport::build),
        })
    }
}

impl TextReport for FullReport {
    fn to_text(&self) -> String {
        let mut out = header("WHALE ACTIVITY REPORT");
        out.push_str(&self.concentration.to_text());
        out.push_str(&self.correlation.to_text());
        out.push_str(&self.anomalies.to_text());
        out.push_str(&self.event_study.to_text());
        if let Some(flows) = &self.flows {
            out.push_str(&flows.to_text());
        }
        out
    }
}

/// Runs the report command.
pub fn run_report(args: &ReportArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let transfers = DataLoader::load_transfers(&args.transfers)?;
    let prices = DataLoader::load_prices(&args.prices)?;
    let flows = args
        .flows
        .as_deref()
        .map(DataLoader::load_flows)
        .transpose()?;

    tracing::info!(
        "Loaded {} transfers, {} price samples, {} flow records",
        transfers.len(),
        prices.len(),
        flows.as_ref().map_or(0, Vec::len)
    );

    let report = FullReport::build(&transfers, &prices, flows.as_deref(), &config.analysis)?;
    emit(&report, format)
}
