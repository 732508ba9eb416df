use clap::{Parser, Subcommand};
use whale_stats_core::{AppConfig, ConfigLoader};

mod commands;

use commands::{
    AnomaliesArgs, ConcentrationArgs, CorrelationArgs, EventStudyArgs, FlowsArgs, OutputFormat,
    ReportArgs, SyntheticArgs,
};

#[derive(Parser)]
#[command(name = "whale-stats")]
#[command(about = "Statistics over whale transfers, exchange flows and prices", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, env = "WHALE_STATS_CONFIG")]
    config: Option<String>,

    /// Config profile overlay (loads config/Config.{profile}.toml)
    #[arg(long, global = true, conflicts_with = "config")]
    profile: Option<String>,

    /// Output format: text, json (defaults to the configured format)
    #[arg(long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Concentration metrics (HHI, Gini, top-10 share) over transfer senders
    Concentration(ConcentrationArgs),
    /// Rolling correlation between daily whale volume and price
    Correlation(CorrelationArgs),
    /// Average price returns N days after whale events
    EventStudy(EventStudyArgs),
    /// Z-score anomalies in daily whale volume
    Anomalies(AnomaliesArgs),
    /// Exchange net flow, sentiment and stablecoin rotation
    Flows(FlowsArgs),
    /// Combined report over transfers, prices and optional flows
    Report(ReportArgs),
    /// Write a seeded synthetic dataset as CSV files
    Synthetic(SyntheticArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries results; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref(), cli.profile.as_deref())?;
    let format = OutputFormat::parse(cli.format.as_deref().unwrap_or(&config.output.format))?;

    match cli.command {
        Commands::Concentration(args) => commands::run_concentration(&args, format)?,
        Commands::Correlation(args) => commands::run_correlation(&args, &config, format)?,
        Commands::EventStudy(args) => commands::run_event_study(&args, &config, format)?,
        Commands::Anomalies(args) => commands::run_anomalies(&args, &config, format)?,
        Commands::Flows(args) => commands::run_flows(&args, format)?,
        Commands::Report(args) => commands::run_report(&args, &config, format)?,
        Commands::Synthetic(args) => commands::run_synthetic(&args)?,
    }

    Ok(())
}

fn load_config(path: Option<&str>, profile: Option<&str>) -> anyhow::Result<AppConfig> {
    match (path, profile) {
        (Some(path), _) => ConfigLoader::load_from(path),
        (None, Some(profile)) => ConfigLoader::load_with_profile(profile),
        (None, None) => ConfigLoader::load(),
    }
}
