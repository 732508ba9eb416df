use anyhow::{Context, Result};
use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use whale_stats_core::{ExchangeFlow, PricePoint, TimestampedObservation, WhaleTransfer};

pub struct CsvStorage;

impl CsvStorage {
    /// Writes whale transfers, oldest first.
    ///
    /// Format: timestamp,tx_hash,from_address,to_address,amount,token
    ///
    /// # Errors
    /// Returns error if file cannot be created or writing fails
    pub fn write_transfers(path: &Path, transfers: &[WhaleTransfer]) -> Result<()> {
        let mut sorted = transfers.to_vec();
        sorted.sort_by_key(|t| t.timestamp);
        Self::write_rows(path, &sorted)
    }

    /// Writes price samples, oldest first.
    ///
    /// Format: timestamp,price
    ///
    /// # Errors
    /// Returns error if file cannot be created or writing fails
    pub fn write_prices(path: &Path, prices: &[PricePoint]) -> Result<()> {
        let mut sorted = prices.to_vec();
        sorted.sort_by_key(|p| p.timestamp);
        Self::write_rows(path, &sorted)
    }

    /// Writes weekly exchange flows.
    ///
    /// Format: exchange,week_start,inflow,outflow,contract_address
    ///
    /// # Errors
    /// Returns error if file cannot be created or writing fails
    pub fn write_flows(path: &Path, flows: &[ExchangeFlow]) -> Result<()> {
        Self::write_rows(path, flows)
    }

    /// Writes merged daily observations.
    ///
    /// Format: timestamp,whale_amount,price
    ///
    /// # Errors
    /// Returns error if file cannot be created or writing fails
    pub fn write_observations(path: &Path, observations: &[TimestampedObservation]) -> Result<()> {
        Self::write_rows(path, observations)
    }

    fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        let mut writer = Writer::from_writer(file);

        for row in rows {
            writer.serialize(row)?;
        }

        writer.flush()?;
        tracing::debug!(path = %path.display(), rows = rows.len(), "wrote CSV");
        Ok(())
    }
}
