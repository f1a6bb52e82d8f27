use crate::error::{ConspiraError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Astral Intelligence Index, always within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AstralScore(u8);

impl AstralScore {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    /// Rounds and clamps a raw sum. Non-finite input maps to zero.
    pub fn from_raw(raw: f64) -> Self {
        if !raw.is_finite() {
            return Self::MIN;
        }
        Self(raw.clamp(f64::from(Self::MIN.0), f64::from(Self::MAX.0)).round() as u8)
    }

    pub fn from_int(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Applies a signed offset, clamping the result back into range.
    pub fn offset(self, delta: i32) -> Self {
        Self::from_int(i64::from(self.0) + i64::from(delta))
    }
}

impl fmt::Display for AstralScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeBand {
    Low,
    Neutral,
    Charged,
    High,
}

impl ChargeBand {
    pub const ALL: [ChargeBand; 4] = [Self::Low, Self::Neutral, Self::Charged, Self::High];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low-charge",
            Self::Neutral => "Neutral",
            Self::Charged => "Charged",
            Self::High => "High alert",
        }
    }

    pub fn commentary(&self) -> &'static str {
        match self {
            Self::Low => "Better for accumulation, journaling, and resets. Expect quieter moves unless news overrides.",
            Self::Neutral => "Flows and news matter more than the stars. Use this as a soft overlay, not a driver.",
            Self::Charged => "Window statistically tilts toward elevated volatility. Watch for fakeouts and liquidity grabs.",
            Self::High => "High-alert band. Historically associated with outsized moves and liquidation cascades. Size down and stay nimble.",
        }
    }
}

impl fmt::Display for ChargeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lower bounds of the Neutral, Charged and High bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandThresholds {
    pub neutral: u8,
    pub charged: u8,
    pub high: u8,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            neutral: 20,
            charged: 40,
            high: 70,
        }
    }
}

impl BandThresholds {
    pub fn validate(&self) -> Result<()> {
        if self.neutral == 0 || !(self.neutral < self.charged && self.charged < self.high) {
            return Err(ConspiraError::InvalidProfile(format!(
                "thresholds must satisfy 0 < neutral < charged < high (found {}/{}/{})",
                self.neutral, self.charged, self.high
            )));
        }
        if self.high > 100 {
            return Err(ConspiraError::InvalidProfile(format!(
                "thresholds.high must be at most 100 (found {})",
                self.high
            )));
        }
        Ok(())
    }

    /// Inclusive score range covered by a band.
    pub fn range(&self, band: ChargeBand) -> (u8, u8) {
        match band {
            ChargeBand::Low => (0, self.neutral - 1),
            ChargeBand::Neutral => (self.neutral, self.charged - 1),
            ChargeBand::Charged => (self.charged, self.high - 1),
            ChargeBand::High => (self.high, 100),
        }
    }
}

/// Phase bonus applied when any keyword is a case-insensitive substring of the phase label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRule {
    pub keywords: Vec<String>,
    pub bonus: f64,
}

impl PhaseRule {
    pub fn new(keywords: &[&str], bonus: f64) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_ascii_lowercase()).collect(),
            bonus,
        }
    }

    pub fn matches(&self, phase_lower: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| !keyword.is_empty() && phase_lower.contains(&keyword.to_ascii_lowercase()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DistanceBonus {
    None,
    /// Flat bonus when the moon is closer than `threshold_km`.
    Flat { threshold_km: f64, bonus: f64 },
    /// Bonus scaled linearly from 0 at `far_km` to `max_bonus` at `near_km`.
    Linear {
        near_km: f64,
        far_km: f64,
        max_bonus: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    pub name: String,
    pub base: f64,
    pub illumination_weight: f64,
    /// Checked in order; the first match wins.
    pub phase_rules: Vec<PhaseRule>,
    pub default_phase_bonus: f64,
    pub distance: DistanceBonus,
    pub thresholds: BandThresholds,
}

impl ScoringProfile {
    pub fn validate(&self) -> Result<()> {
        let mut numbers = vec![
            ("base", self.base),
            ("illumination_weight", self.illumination_weight),
            ("default_phase_bonus", self.default_phase_bonus),
        ];
        numbers.extend(self.phase_rules.iter().map(|rule| ("phase_rules.bonus", rule.bonus)));
        match self.distance {
            DistanceBonus::None => {}
            DistanceBonus::Flat {
                threshold_km,
                bonus,
            } => {
                numbers.push(("distance.threshold_km", threshold_km));
                numbers.push(("distance.bonus", bonus));
            }
            DistanceBonus::Linear {
                near_km,
                far_km,
                max_bonus,
            } => {
                numbers.push(("distance.near_km", near_km));
                numbers.push(("distance.far_km", far_km));
                numbers.push(("distance.max_bonus", max_bonus));
                if near_km >= far_km {
                    return Err(ConspiraError::InvalidProfile(format!(
                        "distance.near_km must be below distance.far_km ({near_km} >= {far_km})"
                    )));
                }
            }
        }

        if let Some((name, _)) = numbers.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConspiraError::InvalidProfile(format!(
                "{}: {name} must be a finite number",
                self.name
            )));
        }
        if self.illumination_weight < 0.0 {
            return Err(ConspiraError::InvalidProfile(format!(
                "{}: illumination_weight must not be negative",
                self.name
            )));
        }

        self.thresholds.validate()
    }
}
