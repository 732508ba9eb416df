//! File loaders for whale transfers, prices, events and exchange flows.
//!
//! The format is chosen by extension: `.csv` files need a header row
//! matching the record's field names; `.json` files hold either a bare
//! array or an object with a `data` array (the shape the dashboard API
//! returns).

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use whale_stats_core::{ExchangeFlow, PricePoint, WhaleEvent, WhaleTransfer};

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonRecords<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> JsonRecords<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(records) | Self::Wrapped { data: records } => records,
        }
    }
}

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    /// Infers the format from a file extension.
    ///
    /// # Errors
    /// Returns an error for missing or unsupported extensions.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(anyhow!(
                "Unsupported file type: '{}'. Expected a .csv or .json file",
                path.display()
            )),
        }
    }
}

pub struct DataLoader;

impl DataLoader {
    /// Loads whale transfers.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or a record is malformed
    pub fn load_transfers(path: &Path) -> Result<Vec<WhaleTransfer>> {
        Self::load_records(path)
    }

    /// Loads price samples sorted ascending by timestamp.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or a record is malformed
    pub fn load_prices(path: &Path) -> Result<Vec<PricePoint>> {
        let mut prices: Vec<PricePoint> = Self::load_records(path)?;
        prices.sort_by_key(|p| p.timestamp);
        Ok(prices)
    }

    /// Loads whale events.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or a record is malformed
    pub fn load_events(path: &Path) -> Result<Vec<WhaleEvent>> {
        Self::load_records(path)
    }

    /// Loads weekly exchange flows.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or a record is malformed
    pub fn load_flows(path: &Path) -> Result<Vec<ExchangeFlow>> {
        Self::load_records(path)
    }

    /// Loads any deserializable record type from a CSV or JSON file.
    ///
    /// # Errors
    /// Returns error if the extension is unsupported, the file cannot be
    /// opened, or any record fails to parse
    pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
        let records = match FileFormat::from_path(path)? {
            FileFormat::Csv => Self::read_csv(path)?,
            FileFormat::Json => Self::read_json(path)?,
        };

        tracing::debug!(path = %path.display(), records = records.len(), "loaded records");
        Ok(records)
    }

    fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        reader
            .deserialize::<T>()
            .enumerate()
            .map(|(i, row)| {
                // header is line 1
                row.with_context(|| format!("{}: malformed row at line {}", path.display(), i + 2))
            })
            .collect()
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open JSON file: {}", path.display()))?;
        let records: JsonRecords<T> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse JSON file: {}", path.display()))?;
        Ok(records.into_vec())
    }
}
