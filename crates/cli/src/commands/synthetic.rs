//! Synthetic dataset CLI command.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use std::path::{Path, PathBuf};

use whale_stats_data::{CsvStorage, SyntheticData};

/// Arguments for the synthetic command.
#[derive(Args, Debug, Clone)]
pub struct SyntheticArgs {
    /// RNG seed; omit for a random dataset
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of days to generate
    #[arg(long, default_value = "90")]
    pub days: u32,

    /// Start timestamp (ISO 8601 format)
    #[arg(long, default_value = "2025-01-01T00:00:00Z")]
    pub start: String,

    /// Output directory for transfers.csv, prices.csv and flows.csv
    #[arg(short, long, default_value = "data")]
    pub out_dir: PathBuf,
}

/// Paths written by [`write_dataset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFiles {
    pub transfers: PathBuf,
    pub prices: PathBuf,
    pub flows: PathBuf,
}

impl DatasetFiles {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            transfers: dir.join("transfers.csv"),
            prices: dir.join("prices.csv"),
            flows: dir.join("flows.csv"),
        }
    }
}

/// Writes a dataset as three CSV files under `dir`, creating it if needed.
pub fn write_dataset(data: &SyntheticData, dir: &Path) -> Result<DatasetFiles> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let files = DatasetFiles::in_dir(dir);
    CsvStorage::write_transfers(&files.transfers, &data.transfers)?;
    CsvStorage::write_prices(&files.prices, &data.prices)?;
    CsvStorage::write_flows(&files.flows, &data.flows)?;
    Ok(files)
}

/// Runs the synthetic command.
pub fn run_synthetic(args: &SyntheticArgs) -> Result<()> {
    let start: DateTime<Utc> = args
        .start
        .parse()
        .map_err(|_| anyhow!("Invalid start time. Use ISO 8601 format"))?;

    if args.seed.is_none() {
        tracing::info!("No seed given; dataset will not be reproducible");
    }

    let data = SyntheticData::generate(args.seed, args.days, start);
    let files = write_dataset(&data, &args.out_dir)?;

    println!("Wrote {} transfers to {}", data.transfers.len(), files.transfers.display());
    println!("Wrote {} prices to {}", data.prices.len(), files.prices.display());
    println!("Wrote {} flows to {}", data.flows.len(), files.flows.display());
    Ok(())
}
