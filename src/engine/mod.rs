pub mod commentary;
pub mod forecast;
pub mod presets;

use crate::types::observation::{LunarObservation, ObservationSource};
use crate::types::report::AstralReport;
use crate::types::scoring::{AstralScore, BandThresholds, ChargeBand, DistanceBonus, ScoringProfile};
use chrono::NaiveDate;

pub fn illumination_term(illumination: Option<f64>, weight: f64) -> f64 {
    match illumination {
        Some(value) if value.is_finite() => value.clamp(0.0, 100.0) * weight,
        _ => 0.0,
    }
}

pub fn phase_bonus(phase: &str, profile: &ScoringProfile) -> f64 {
    let phase = phase.to_ascii_lowercase();
    profile
        .phase_rules
        .iter()
        .find(|rule| rule.matches(&phase))
        .map(|rule| rule.bonus)
        .unwrap_or(profile.default_phase_bonus)
}

pub fn distance_term(distance_km: Option<f64>, bonus: &DistanceBonus) -> f64 {
    let Some(distance) = distance_km.filter(|d| d.is_finite() && *d > 0.0) else {
        return 0.0;
    };
    match *bonus {
        DistanceBonus::None => 0.0,
        DistanceBonus::Flat {
            threshold_km,
            bonus,
        } => {
            if distance < threshold_km {
                bonus
            } else {
                0.0
            }
        }
        DistanceBonus::Linear {
            near_km,
            far_km,
            max_bonus,
        } => {
            let span = far_km - near_km;
            if span <= 0.0 {
                return 0.0;
            }
            ((far_km - distance) / span).clamp(0.0, 1.0) * max_bonus
        }
    }
}

/// Astral Intelligence Index of one observation under `profile`.
pub fn compute_index(observation: &LunarObservation, profile: &ScoringProfile) -> AstralScore {
    let raw = profile.base
        + phase_bonus(&observation.phase, profile)
        + illumination_term(observation.illumination_percent, profile.illumination_weight)
        + distance_term(observation.distance_km, &profile.distance);
    AstralScore::from_raw(raw)
}

pub fn classify(score: AstralScore, thresholds: &BandThresholds) -> ChargeBand {
    let value = score.value();
    if value < thresholds.neutral {
        ChargeBand::Low
    } else if value < thresholds.charged {
        ChargeBand::Neutral
    } else if value < thresholds.high {
        ChargeBand::Charged
    } else {
        ChargeBand::High
    }
}

/// Scores an observation and assembles everything a renderer needs.
pub fn assess(
    observation: LunarObservation,
    source: ObservationSource,
    profile: &ScoringProfile,
    days: u32,
    start: Option<NaiveDate>,
) -> AstralReport {
    let thresholds = &profile.thresholds;
    let score = compute_index(&observation, profile);
    let band = classify(score, thresholds);

    let commentary = match source {
        ObservationSource::Fallback => commentary::FALLBACK_COMMENTARY.to_string(),
        ObservationSource::Live | ObservationSource::Manual => {
            commentary::describe(score, &observation.phase, thresholds)
        }
    };
    let tags = commentary::window_tags(&observation.phase, score, thresholds);

    let mut curve = forecast::build_forecast_curve(score, days, thresholds);
    if let Some(start) = start {
        curve = forecast::with_dates(curve, start);
    }
    let outlook = forecast::peak(&curve)
        .map(|peak| commentary::outlook(score, peak, &observation.phase, thresholds));

    tracing::debug!(
        profile = %profile.name,
        phase = %observation.phase,
        score = score.value(),
        band = band.label(),
        "assessed observation"
    );

    AstralReport {
        source,
        profile: profile.name.clone(),
        observation: Some(observation),
        score: Some(score),
        band: Some(band),
        commentary,
        tags,
        forecast: curve,
        outlook,
    }
}
