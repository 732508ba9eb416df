//! Data access for whale statistics.
//!
//! This crate provides:
//! - File loaders for transfers, prices, events and exchange flows (CSV or JSON)
//! - CSV writers for the same records
//! - Daily aggregation and the whale/price join used by correlation
//! - Seeded synthetic datasets

pub mod aggregation;
pub mod csv_storage;
pub mod loader;
pub mod synthetic;

pub use aggregation::{daily_totals, daily_transfer_totals, events_from_transfers, merge_daily};
pub use csv_storage::CsvStorage;
pub use loader::{DataLoader, FileFormat};
pub use synthetic::SyntheticData;
