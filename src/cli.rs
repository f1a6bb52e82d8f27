use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "conspira",
    version,
    about = "Astral Intelligence Index: lunar phase, illumination and distance scored into charge bands"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory searched for conspira.toml and .conspira/local.toml
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Scoring preset, overriding the configured one
    #[arg(long, global = true)]
    pub preset: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch today's lunar data and score it
    Snapshot(SnapshotCommand),
    /// Score a manually supplied observation
    Score(ScoreCommand),
    /// Print the synthetic curve around a score
    Forecast(ForecastCommand),
    /// Print the band thresholds of the active profile
    Bands,
    /// List the available scoring presets
    Presets,
}

#[derive(Args)]
pub struct SnapshotCommand {
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Render the unavailable state instead of the fallback observation
    #[arg(long)]
    pub no_fallback: bool,
    #[arg(long)]
    pub days: Option<u32>,
}

#[derive(Args)]
pub struct ScoreCommand {
    #[arg(long, default_value = "")]
    pub phase: String,
    /// Percentage, e.g. 80, "80%" or "12,5"
    #[arg(long)]
    pub illumination: Option<String>,
    /// Kilometres, e.g. 360000 or "384 400 km"
    #[arg(long)]
    pub distance: Option<String>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[arg(long)]
    pub days: Option<u32>,
}

#[derive(Args)]
pub struct ForecastCommand {
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub score: u8,
    #[arg(long)]
    pub days: Option<u32>,
    /// First calendar day of the curve (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
    Text,
}
