mod cli;
mod config;
mod engine;
mod error;
mod report;
mod source;
mod types;

use crate::engine::presets::{self, PRESET_NAMES};
use crate::error::{ConspiraError, Result};
use crate::source::{fallback, HttpSource};
use crate::types::config::ConspiraConfig;
use crate::types::observation::{parse_lenient_number, LunarObservation, ObservationSource};
use crate::types::report::AstralReport;
use crate::types::scoring::{AstralScore, ChargeBand, ScoringProfile};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use std::io;
use tracing_subscriber::{fmt, EnvFilter};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn output_format(format: cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
        cli::ReportFormat::Text => report::OutputFormat::Text,
    }
}

fn resolve_days(requested: Option<u32>, config: &ConspiraConfig) -> Result<u32> {
    let days = requested.unwrap_or_else(|| config.forecast_days());
    if !(1..=31).contains(&days) {
        return Err(ConspiraError::InvalidArgument(format!(
            "--days must be between 1 and 31 (found {days})"
        )));
    }
    Ok(days)
}

fn lenient_arg(name: &str, raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    let parsed = parse_lenient_number(raw);
    if parsed.is_none() {
        tracing::warn!(argument = name, value = raw, "ignoring unreadable number");
    }
    parsed
}

fn run(cli: cli::Cli) -> Result<i32> {
    let loaded = config::load_config(&cli.root)?;
    if loaded.is_none() {
        tracing::info!(root = %cli.root.display(), "no conspira.toml found; using defaults");
    }
    let config = loaded.unwrap_or_default();
    let profile = config.scoring_profile(cli.preset.as_deref())?;

    match cli.command {
        cli::Commands::Snapshot(cmd) => {
            let days = resolve_days(cmd.days, &config)?;
            let mut fallback_settings = config.fallback_settings();
            if cmd.no_fallback {
                fallback_settings.enabled = false;
            }

            let now = Utc::now();
            let source = HttpSource::from_settings(&config.source_settings());
            let report = match fallback::observe(source, &fallback_settings, now)? {
                Some((observation, origin)) => {
                    engine::assess(observation, origin, &profile, days, Some(now.date_naive()))
                }
                None => AstralReport::unavailable(&profile.name),
            };

            println!("{}", report::render(&report, output_format(cmd.format))?);

            match (report.is_available(), report.source) {
                (true, ObservationSource::Live) => Ok(exit_code::SUCCESS),
                (true, _) => {
                    eprintln!("warning: live lunar data unavailable; showing fallback observation");
                    Ok(exit_code::WARNINGS)
                }
                (false, _) => Ok(exit_code::WARNINGS),
            }
        }
        cli::Commands::Score(cmd) => {
            let days = resolve_days(cmd.days, &config)?;
            let now = Utc::now();
            let observation = LunarObservation::new(
                cmd.phase,
                lenient_arg("illumination", cmd.illumination.as_deref()),
                lenient_arg("distance", cmd.distance.as_deref()),
                now,
            );
            let report = engine::assess(
                observation,
                ObservationSource::Manual,
                &profile,
                days,
                Some(now.date_naive()),
            );
            println!("{}", report::render(&report, output_format(cmd.format))?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Forecast(cmd) => {
            let days = resolve_days(cmd.days, &config)?;
            let start = cmd
                .start
                .as_deref()
                .map(|raw| {
                    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                        ConspiraError::InvalidArgument(format!("--start {raw}: {e}"))
                    })
                })
                .transpose()?;

            let today = AstralScore::from_int(i64::from(cmd.score));
            let mut curve = engine::forecast::build_forecast_curve(today, days, &profile.thresholds);
            if let Some(start) = start {
                curve = engine::forecast::with_dates(curve, start);
            }

            for entry in &curve {
                let date = entry
                    .date
                    .map(|date| date.format("%a %b %-d").to_string())
                    .unwrap_or_default();
                println!(
                    "{:<9} {:<10} {:>3}  {}",
                    entry.label,
                    date,
                    entry.score,
                    entry.band.label()
                );
            }
            if let Some(peak) = engine::forecast::peak(&curve) {
                println!(
                    "{}",
                    engine::commentary::outlook(today, peak, "", &profile.thresholds)
                );
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Bands => {
            print_bands(&profile);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Presets => {
            for name in PRESET_NAMES {
                let marker = if name == profile.name { "*" } else { " " };
                println!("{marker} {name:<9} {}", presets::describe(name));
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn print_bands(profile: &ScoringProfile) {
    println!("profile: {}", profile.name);
    for band in ChargeBand::ALL {
        let (low, high) = profile.thresholds.range(band);
        println!(
            "{:<11} {:>3}-{:<3}  {}",
            band.label(),
            low,
            high,
            band.commentary()
        );
    }
}

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match run(cli) {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
