use crate::types::scoring::{AstralScore, BandThresholds, ChargeBand};

use super::classify;

pub const FALLBACK_COMMENTARY: &str =
    "Fallback data: treat this as a soft signal only. Overlay with price action and volume.";

fn phase_note(phase: &str) -> Option<&'static str> {
    let phase = phase.to_ascii_lowercase();
    if phase.contains("full") {
        Some("Full-moon overlay active: emotions and leverage run hot.")
    } else if phase.contains("new") {
        Some("New-moon reset: narratives turn over quickly.")
    } else {
        None
    }
}

fn is_cycle_extreme(phase: &str) -> bool {
    phase_note(phase).is_some()
}

/// Band commentary, followed by a phase note for full and new moons.
pub fn describe(score: AstralScore, phase: &str, thresholds: &BandThresholds) -> String {
    let band = classify(score, thresholds);
    match phase_note(phase) {
        Some(note) => format!("{} {}", band.commentary(), note),
        None => band.commentary().to_string(),
    }
}

pub fn window_tags(phase: &str, score: AstralScore, thresholds: &BandThresholds) -> Vec<String> {
    let mut tags = Vec::new();
    if is_cycle_extreme(phase) {
        tags.push("Lunar cycle overlay".to_string());
    }
    match classify(score, thresholds) {
        ChargeBand::Charged => tags.push("Volatility watch".to_string()),
        ChargeBand::High => tags.push("High-tension window".to_string()),
        ChargeBand::Low | ChargeBand::Neutral => {}
    }
    tags
}

/// One-sentence read of where the week peaks relative to today.
pub fn outlook(today: AstralScore, peak: AstralScore, phase: &str, thresholds: &BandThresholds) -> String {
    let today_band = classify(today, thresholds);
    let peak_band = classify(peak, thresholds);
    let lead = if peak_band != today_band {
        format!(
            "The curve crests at {peak} ({}) before easing back toward today's {today}.",
            peak_band.label()
        )
    } else {
        format!(
            "The week holds inside the {} band, peaking at {peak}.",
            today_band.label()
        )
    };
    if is_cycle_extreme(phase) {
        format!("{lead} Expect the cycle overlay to fade as the phase rolls on.")
    } else {
        lead
    }
}
