//! Event study CLI command.
//!
//! Measures average price returns a fixed number of days after whale events.
//! Events come either from an events file or are derived from transfers
//! touching known exchange wallets.

use anyhow::{anyhow, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use whale_stats_analytics::{
    event_study, event_study_by_direction, DirectionalEventStudy, EventStudyResult,
};
use whale_stats_core::{AppConfig, FlowDirection, PricePoint, WhaleEvent};
use whale_stats_data::{events_from_transfers, DataLoader};

use super::output::{emit, header, OutputFormat, TextReport};

/// Arguments for the event-study command.
#[derive(Args, Debug, Clone)]
pub struct EventStudyArgs {
    /// Price samples file (.csv or .json)
    #[arg(long)]
    pub prices: PathBuf,

    /// Whale events file (.csv or .json)
    #[arg(long, required_unless_present = "transfers", conflicts_with = "transfers")]
    pub events: Option<PathBuf>,

    /// Whale transfers file; events are derived from exchange wallet movements
    #[arg(long)]
    pub transfers: Option<PathBuf>,

    /// Comma-separated day offsets (overrides analysis.event_offsets_days)
    #[arg(long, value_delimiter = ',')]
    pub offsets: Option<Vec<u32>>,

    /// Minimum transfer amount for derived events (overrides analysis.min_event_amount)
    #[arg(long)]
    pub min_amount: Option<f64>,

    /// Also report inflow and outflow events separately
    #[arg(long)]
    pub by_direction: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventStudyReport {
    pub event_count: usize,
    pub inflow_count: usize,
    pub outflow_count: usize,
    pub results: Vec<EventStudyResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_direction: Option<DirectionalEventStudy>,
}

impl EventStudyReport {
    pub fn build(
        events: &[WhaleEvent],
        prices: &[PricePoint],
        offsets: &[u32],
        by_direction: bool,
    ) -> Self {
        let inflow_count = events
            .iter()
            .filter(|e| e.direction == FlowDirection::Inflow)
            .count();

        Self {
            event_count: events.len(),
            inflow_count,
            outflow_count: events.len() - inflow_count,
            results: event_study(events, prices, offsets),
            by_direction: by_direction.then(|| event_study_by_direction(events, prices, offsets)),
        }
    }
}

fn push_results(out: &mut String, results: &[EventStudyResult]) {
    out.push_str("  Days   Avg return   Positive   Negative   Events\n");
    for r in results {
        out.push_str(&format!(
            "  {:>4}   {:>+9.2}%   {:>8}   {:>8}   {:>6}\n",
            r.days_after, r.avg_return_pct, r.positive_count, r.negative_count, r.total_events
        ));
    }
}

impl TextReport for EventStudyReport {
    fn to_text(&self) -> String {
        let mut out = header("WHALE EVENT STUDY");

        out.push_str(&format!(
            "Events: {} ({} inflow, {} outflow)\n\nAll events:\n",
            self.event_count, self.inflow_count, self.outflow_count
        ));
        push_results(&mut out, &self.results);

        if let Some(split) = &self.by_direction {
            out.push_str("\nExchange inflows:\n");
            push_results(&mut out, &split.inflow);
            out.push_str("\nExchange outflows:\n");
            push_results(&mut out, &split.outflow);
        }

        out
    }
}

fn load_events(args: &EventStudyArgs, config: &AppConfig) -> Result<Vec<WhaleEvent>> {
    match (&args.events, &args.transfers) {
        (Some(path), _) => DataLoader::load_events(path),
        (None, Some(path)) => {
            let transfers = DataLoader::load_transfers(path)?;
            let min_amount = args.min_amount.unwrap_or(config.analysis.min_event_amount);
            let events =
                events_from_transfers(&transfers, min_amount, &config.analysis.exchange_wallets);
            tracing::info!(
                "Derived {} events from {} transfers (min amount {})",
                events.len(),
                transfers.len(),
                min_amount
            );
            Ok(events)
        }
        (None, None) => Err(anyhow!("Either --events or --transfers is required")),
    }
}

/// Day offsets must be non-empty and positive.
pub fn validate_offsets(offsets: &[u32]) -> Result<()> {
    if offsets.is_empty() {
        return Err(anyhow!("At least one day offset is required"));
    }
    if offsets.contains(&0) {
        return Err(anyhow!("Day offsets must be positive, got {:?}", offsets));
    }
    Ok(())
}

/// Runs the event-study command.
pub fn run_event_study(args: &EventStudyArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let offsets = args
        .offsets
        .clone()
        .unwrap_or_else(|| config.analysis.event_offsets_days.clone());
    validate_offsets(&offsets)?;

    let events = load_events(args, config)?;
    let prices = DataLoader::load_prices(&args.prices)?;
    tracing::info!(
        "Running event study: {} events, {} price samples, offsets {:?}",
        events.len(),
        prices.len(),
        offsets
    );

    let report = EventStudyReport::build(&events, &prices, &offsets, args.by_direction);
    emit(&report, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    fn prices() -> Vec<PricePoint> {
        (0..10).map(|d| PricePoint::new(day(d), 100.0 + d as f64 * 10.0)).collect()
    }

    fn event(d: i64, direction: FlowDirection) -> WhaleEvent {
        WhaleEvent {
            timestamp: day(d),
            amount: 5_000.0,
            direction,
        }
    }

    #[test]
    fn report_counts_directions() {
        let events = vec![
            event(0, FlowDirection::Inflow),
            event(1, FlowDirection::Outflow),
            event(2, FlowDirection::Inflow),
        ];

        let report = EventStudyReport::build(&events, &prices(), &[1], false);

        assert_eq!(report.event_count, 3);
        assert_eq!(report.inflow_count, 2);
        assert_eq!(report.outflow_count, 1);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].total_events, 3);
        assert_eq!(report.results[0].positive_count, 3);
        assert!(report.by_direction.is_none());
    }

    #[test]
    fn directional_split_is_optional() {
        let events = vec![event(0, FlowDirection::Inflow), event(1, FlowDirection::Outflow)];

        let report = EventStudyReport::build(&events, &prices(), &[1, 3], true);
        let split = report.by_direction.as_ref().unwrap();

        assert_eq!(split.inflow[0].total_events, 1);
        assert_eq!(split.outflow[1].total_events, 1);
        // day 0 -> day 1: 100 -> 110
        assert_eq!(split.inflow[0].avg_return_pct, 10.0);

        let text = report.to_text();
        assert!(text.contains("Exchange inflows:"));
        assert!(text.contains("Exchange outflows:"));
    }

    #[test]
    fn offsets_must_be_positive() {
        assert!(validate_offsets(&[1, 3, 7]).is_ok());
        assert!(validate_offsets(&[]).is_err());
        assert!(validate_offsets(&[0]).is_err());
        assert!(validate_offsets(&[1, 0, 7]).is_err());
    }

    #[test]
    fn json_omits_missing_split() {
        let report = EventStudyReport::build(&[], &prices(), &[1], false);
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("by_direction").is_none());
        assert_eq!(json["results"][0]["total_events"], 0);
    }
}
