//! Concentration CLI command.
//!
//! Measures how concentrated whale activity is among sending addresses.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use whale_stats_analytics::{
    aggregate_by_address, calculate_concentration, holder_distribution, transparency_score,
    AddressTotal, ConcentrationResult, HolderDistribution, TransparencyScore,
};
use whale_stats_core::{Transfer, WhaleTransfer};
use whale_stats_data::DataLoader;

use super::output::{emit, header, OutputFormat, TextReport};

/// Arguments for the concentration command.
#[derive(Args, Debug, Clone)]
pub struct ConcentrationArgs {
    /// Whale transfers file (.csv or .json)
    #[arg(long)]
    pub transfers: PathBuf,

    /// Number of largest addresses to list
    #[arg(long, default_value = "10")]
    pub top: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConcentrationReport {
    pub transfer_count: usize,
    pub address_count: usize,
    pub concentration: ConcentrationResult,
    pub distribution: HolderDistribution,
    pub transparency: TransparencyScore,
    pub top_addresses: Vec<AddressTotal>,
}

impl ConcentrationReport {
    pub fn from_transfers(transfers: &[WhaleTransfer], top: usize) -> Self {
        let transfers: Vec<Transfer> = transfers.iter().map(Transfer::from).collect();
        let mut totals = aggregate_by_address(&transfers);
        let amounts: Vec<f64> = totals.iter().map(|t| t.total).collect();

        let concentration = calculate_concentration(&transfers);
        let transparency = transparency_score(concentration.hhi, concentration.gini);
        let address_count = totals.len();
        totals.truncate(top);

        Self {
            transfer_count: transfers.len(),
            address_count,
            distribution: holder_distribution(&amounts),
            transparency,
            concentration,
            top_addresses: totals,
        }
    }
}

impl TextReport for ConcentrationReport {
    fn to_text(&self) -> String {
        let c = &self.concentration;
        let d = &self.distribution;
        let mut out = header("WHALE CONCENTRATION");

        out.push_str(&format!(
            "Transfers: {}   Addresses: {}\n\n",
            self.transfer_count, self.address_count
        ));
        out.push_str(&format!("HHI:                   {:.2}\n", c.hhi));
        out.push_str(&format!("Gini:                  {:.4}\n", c.gini));
        out.push_str(&format!("Top-10 share:          {:.1}%\n", c.top10_concentration_pct));
        out.push_str(&format!("Whale/retail ratio:    {:.2}\n", c.whale_to_retail_ratio));
        out.push_str(&format!(
            "Risk level:            {}\n\n",
            c.risk_level.as_str().to_uppercase()
        ));

        out.push_str(&format!(
            "Distribution: top 10% {:.2} | next 40% {:.2} | bottom 50% {:.2}\n",
            d.top_10_pct, d.next_40_pct, d.bottom_50_pct
        ));
        out.push_str(&format!(
            "Transparency: {:.0}/100 ({})\n",
            self.transparency.score,
            self.transparency.level.description()
        ));

        if !self.top_addresses.is_empty() {
            out.push_str("\nLargest senders:\n");
            for (rank, entry) in self.top_addresses.iter().enumerate() {
                out.push_str(&format!(
                    "  {:>2}. {}  {:.2}\n",
                    rank + 1,
                    entry.address,
                    entry.total
                ));
            }
        }

        out
    }
}

/// Runs the concentration command.
pub fn run_concentration(args: &ConcentrationArgs, format: OutputFormat) -> Result<()> {
    let transfers = DataLoader::load_transfers(&args.transfers)?;
    tracing::info!(
        "Loaded {} transfers from {}",
        transfers.len(),
        args.transfers.display()
    );

    if transfers.is_empty() {
        tracing::warn!("No transfers found; all metrics will be 0");
    }

    let report = ConcentrationReport::from_transfers(&transfers, args.top);
    emit(&report, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use whale_stats_core::RiskLevel;

    fn transfer(from: &str, amount: f64) -> WhaleTransfer {
        WhaleTransfer {
            timestamp: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
            tx_hash: format!("0x{from}"),
            from_address: from.to_string(),
            to_address: "0xsink".to_string(),
            amount,
            token: "ETH".to_string(),
        }
    }

    #[test]
    fn report_aggregates_by_sender() {
        let transfers = vec![
            transfer("a", 30.0),
            transfer("b", 30.0),
            transfer("a", 20.0),
            transfer("c", 10.0),
            transfer("d", 10.0),
        ];

        let report = ConcentrationReport::from_transfers(&transfers, 2);

        assert_eq!(report.transfer_count, 5);
        assert_eq!(report.address_count, 4);
        assert_eq!(report.top_addresses.len(), 2);
        assert_eq!(report.top_addresses[0].address, "a");
        assert_eq!(report.top_addresses[0].total, 50.0);
        // shares 50/30/10/10 -> 2500 + 900 + 100 + 100
        assert!((report.concentration.hhi - 3600.0).abs() < 1e-6);
        assert_eq!(report.concentration.risk_level, RiskLevel::High);
        assert_eq!(report.transparency.score, 65.0);
    }

    #[test]
    fn empty_input_gives_neutral_report() {
        let report = ConcentrationReport::from_transfers(&[], 10);

        assert_eq!(report.concentration.hhi, 0.0);
        assert_eq!(report.concentration.gini, 0.0);
        assert!(report.top_addresses.is_empty());
        assert!(report.to_text().contains("Transfers: 0"));
    }

    #[test]
    fn text_lists_largest_senders() {
        let report = ConcentrationReport::from_transfers(&[transfer("0xwhale", 5.0)], 10);
        let text = report.to_text();

        assert!(text.contains("WHALE CONCENTRATION"));
        assert!(text.contains("1. 0xwhale"));
        assert!(text.contains("HIGH"));
    }
}
