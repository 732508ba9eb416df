//! Exchange flows CLI command.
//!
//! Summarizes weekly exchange inflow/outflow: overall net flow and
//! sentiment, stablecoin rotation, per-exchange and per-token net flow, and
//! the change in net flow between the two most recent weeks.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use whale_stats_analytics::{
    calculate_net_flow, calculate_percentage_change, flow_sentiment, stablecoin_rotation,
    summarize_flows, FlowSentiment, FlowSummary, StablecoinRotation,
};
use whale_stats_core::{tokens, ExchangeFlow};
use whale_stats_data::DataLoader;

use super::output::{emit, header, OutputFormat, TextReport};

/// Arguments for the flows command.
#[derive(Args, Debug, Clone)]
pub struct FlowsArgs {
    /// Weekly exchange flows file (.csv or .json)
    #[arg(long)]
    pub flows: PathBuf,

    /// Only include flows for this exchange (case-insensitive)
    #[arg(long)]
    pub exchange: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupNetFlow {
    pub name: String,
    pub net_flow: f64,
    pub sentiment: FlowSentiment,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlowsReport {
    pub weeks: usize,
    pub summary: FlowSummary,
    pub rotation: StablecoinRotation,
    pub by_exchange: Vec<GroupNetFlow>,
    pub by_token: Vec<GroupNetFlow>,
    /// Net flow change from the previous week to the latest, in percent
    pub week_over_week_pct: Option<f64>,
}

fn group_net_flows<F>(flows: &[ExchangeFlow], key: F) -> Vec<GroupNetFlow>
where
    F: Fn(&ExchangeFlow) -> String,
{
    let mut groups: BTreeMap<String, f64> = BTreeMap::new();
    for flow in flows {
        *groups.entry(key(flow)).or_insert(0.0) += flow.net();
    }

    groups
        .into_iter()
        .map(|(name, net_flow)| GroupNetFlow {
            name,
            net_flow,
            sentiment: flow_sentiment(net_flow),
        })
        .collect()
}

impl FlowsReport {
    pub fn build(flows: &[ExchangeFlow]) -> Self {
        let mut weekly: BTreeMap<DateTime<Utc>, Vec<ExchangeFlow>> = BTreeMap::new();
        for flow in flows {
            weekly.entry(flow.week_start).or_default().push(flow.clone());
        }

        let week_over_week_pct = {
            let mut latest = weekly.values().rev();
            match (latest.next(), latest.next()) {
                (Some(current), Some(previous)) => Some(calculate_percentage_change(
                    calculate_net_flow(current),
                    calculate_net_flow(previous),
                )),
                _ => None,
            }
        };

        Self {
            weeks: weekly.len(),
            summary: summarize_flows(flows),
            rotation: stablecoin_rotation(flows),
            by_exchange: group_net_flows(flows, |f| f.exchange.clone()),
            by_token: group_net_flows(flows, |f| {
                tokens::token_for_contract(&f.contract_address)
                    .unwrap_or(tokens::UNKNOWN_TOKEN)
                    .to_string()
            }),
            week_over_week_pct,
        }
    }
}

impl TextReport for FlowsReport {
    fn to_text(&self) -> String {
        let s = &self.summary;
        let r = &self.rotation;
        let mut out = header("EXCHANGE FLOWS");

        out.push_str(&format!("Weeks: {}\n\n", self.weeks));
        out.push_str(&format!("Total inflow:    {:>18.2}\n", s.total_inflow));
        out.push_str(&format!("Total outflow:   {:>18.2}\n", s.total_outflow));
        out.push_str(&format!(
            "Net flow:        {:>18.2}  ({})\n",
            s.net_flow, s.sentiment.label
        ));
        if let Some(change) = self.week_over_week_pct {
            out.push_str(&format!("Week over week:  {change:>+17.1}%\n"));
        }

        out.push_str(&format!(
            "\nStablecoin rotation: {:.1}% stablecoin ({}, risk {})\n",
            r.stablecoin_ratio_pct, r.label, r.level
        ));

        for (title, groups) in [("By exchange", &self.by_exchange), ("By token", &self.by_token)] {
            if groups.is_empty() {
                continue;
            }
            out.push_str(&format!("\n{title}:\n"));
            for g in groups {
                out.push_str(&format!(
                    "  {:<10} {:>18.2}  {}\n",
                    g.name, g.net_flow, g.sentiment.label
                ));
            }
        }

        out
    }
}

/// Runs the flows command.
pub fn run_flows(args: &FlowsArgs, format: OutputFormat) -> Result<()> {
    let mut flows = DataLoader::load_flows(&args.flows)?;
    tracing::info!("Loaded {} flow records from {}", flows.len(), args.flows.display());

    if let Some(exchange) = &args.exchange {
        flows.retain(|f| f.exchange.eq_ignore_ascii_case(exchange));
        if flows.is_empty() {
            tracing::warn!("No flows for exchange '{}'", exchange);
        }
    }

    let report = FlowsReport::build(&flows);
    emit(&report, format)
}
