use crate::error::{ConspiraError, Result};
use crate::types::scoring::{BandThresholds, DistanceBonus, PhaseRule, ScoringProfile};

pub const DEFAULT_PRESET: &str = "conspira";
pub const PRESET_NAMES: [&str; 3] = ["conspira", "classic", "lumen"];

pub fn preset(name: &str) -> Result<ScoringProfile> {
    match name.trim().to_ascii_lowercase().as_str() {
        "conspira" => Ok(conspira()),
        "classic" => Ok(classic()),
        "lumen" => Ok(lumen()),
        other => Err(ConspiraError::UnknownPreset(format!(
            "{other} (expected one of: {})",
            PRESET_NAMES.join(", ")
        ))),
    }
}

pub fn describe(name: &str) -> &'static str {
    match name {
        "conspira" => "Canonical index: phase bonus, 0.25 x illumination, perigee closeness up to +10.",
        "classic" => "Snapshot formula: separate gibbous/quarter bonuses, no distance term.",
        "lumen" => "Illumination-driven: 0.7 x illumination, flat +5 inside 365,000 km.",
        _ => "",
    }
}

fn conspira() -> ScoringProfile {
    ScoringProfile {
        name: "conspira".to_string(),
        base: 10.0,
        illumination_weight: 0.25,
        phase_rules: vec![
            PhaseRule::new(&["full"], 40.0),
            PhaseRule::new(&["new"], 40.0),
            PhaseRule::new(&["gibbous", "quarter"], 20.0),
            PhaseRule::new(&["crescent"], 8.0),
        ],
        default_phase_bonus: 0.0,
        distance: DistanceBonus::Linear {
            near_km: 356_500.0,
            far_km: 370_000.0,
            max_bonus: 10.0,
        },
        thresholds: BandThresholds::default(),
    }
}

fn classic() -> ScoringProfile {
    ScoringProfile {
        name: "classic".to_string(),
        base: 10.0,
        illumination_weight: 0.25,
        phase_rules: vec![
            PhaseRule::new(&["full"], 40.0),
            PhaseRule::new(&["new"], 40.0),
            PhaseRule::new(&["gibbous"], 25.0),
            PhaseRule::new(&["quarter"], 15.0),
        ],
        default_phase_bonus: 8.0,
        distance: DistanceBonus::None,
        thresholds: BandThresholds::default(),
    }
}

fn lumen() -> ScoringProfile {
    ScoringProfile {
        name: "lumen".to_string(),
        base: 0.0,
        illumination_weight: 0.7,
        phase_rules: vec![
            PhaseRule::new(&["full"], 20.0),
            PhaseRule::new(&["new"], 10.0),
            PhaseRule::new(&["gibbous", "quarter"], 10.0),
            PhaseRule::new(&["crescent"], 5.0),
        ],
        default_phase_bonus: 0.0,
        distance: DistanceBonus::Flat {
            threshold_km: 365_000.0,
            bonus: 5.0,
        },
        thresholds: BandThresholds::default(),
    }
}
