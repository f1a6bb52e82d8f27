use crate::types::report::ForecastEntry;
use crate::types::scoring::{AstralScore, BandThresholds};
use chrono::{Days, NaiveDate};

use super::classify;

pub const DEFAULT_DAYS: u32 = 7;

/// Triangle curve applied to every day after today, repeating past day 6.
const OFFSETS: [i32; 6] = [4, 2, 0, -2, 0, 2];

pub fn day_offset(day_index: u32) -> i32 {
    if day_index == 0 {
        return 0;
    }
    OFFSETS[((day_index - 1) as usize) % OFFSETS.len()]
}

pub fn day_label(day_index: u32) -> String {
    match day_index {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        n => format!("Day {}", n + 1),
    }
}

/// Synthetic, non-predictive curve around today's score.
pub fn build_forecast_curve(
    today: AstralScore,
    days: u32,
    thresholds: &BandThresholds,
) -> Vec<ForecastEntry> {
    (0..days)
        .map(|day_index| {
            let score = if day_index == 0 {
                today
            } else {
                today.offset(day_offset(day_index))
            };
            let description = if day_index == 0 {
                "Current astral tension vs. baseline."
            } else {
                "Projected astral tension vs. today's baseline."
            };
            ForecastEntry {
                day_index,
                label: day_label(day_index),
                date: None,
                score,
                band: classify(score, thresholds),
                description: description.to_string(),
            }
        })
        .collect()
}

/// Attaches calendar dates starting at `start`. Scores are untouched.
pub fn with_dates(mut entries: Vec<ForecastEntry>, start: NaiveDate) -> Vec<ForecastEntry> {
    for entry in &mut entries {
        entry.date = start.checked_add_days(Days::new(u64::from(entry.day_index)));
    }
    entries
}

pub fn peak(entries: &[ForecastEntry]) -> Option<AstralScore> {
    entries.iter().map(|entry| entry.score).max()
}
