//! CLI commands for whale statistics.

pub mod anomalies;
pub mod concentration;
pub mod correlation;
pub mod event_study;
pub mod flows;
pub mod output;
pub mod report;
pub mod synthetic;

pub use anomalies::{run_anomalies, AnomaliesArgs};
pub use concentration::{run_concentration, ConcentrationArgs};
pub use correlation::{run_correlation, CorrelationArgs};
pub use event_study::{run_event_study, EventStudyArgs};
pub use flows::{run_flows, FlowsArgs};
pub use output::OutputFormat;
pub use report::{run_report, ReportArgs};
pub use synthetic::{run_synthetic, SyntheticArgs};
