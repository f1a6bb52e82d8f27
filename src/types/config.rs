use crate::engine::presets::{self, DEFAULT_PRESET};
use crate::error::{ConspiraError, Result};
use crate::types::scoring::{BandThresholds, DistanceBonus, ScoringProfile};
use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "https://api.ipgeolocation.io/astronomy";
pub const DEFAULT_API_KEY_ENV: &str = "CONSPIRA_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConspiraConfig {
    pub source: Option<SourceConfig>,
    pub scoring: Option<ScoringConfig>,
    pub fallback: Option<FallbackConfig>,
    pub forecast: Option<ForecastConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub api_key_env: Option<String>,
    pub timeout_secs: Option<u64>,
    pub location: Option<String>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringConfig {
    pub preset: Option<String>,
    pub base: Option<f64>,
    pub illumination_weight: Option<f64>,
    pub thresholds: Option<ThresholdsConfig>,
    pub distance: Option<DistanceBonus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    pub neutral: Option<u8>,
    pub charged: Option<u8>,
    pub high: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FallbackConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub phase: Option<String>,
    pub illumination_percent: Option<f64>,
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastConfig {
    pub days: Option<u32>,
}

fn default_true() -> bool {
    true
}

/// Fully resolved settings for the upstream request.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub location: Option<String>,
    pub coordinates: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FallbackSettings {
    pub enabled: bool,
    pub phase: String,
    pub illumination_percent: Option<f64>,
    pub distance_km: Option<f64>,
}

impl Default for FallbackSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            phase: "WAXING_CRESCENT".to_string(),
            illumination_percent: Some(23.0),
            distance_km: Some(403_000.0),
        }
    }
}

impl ConspiraConfig {
    pub fn preset_name(&self) -> &str {
        self.scoring
            .as_ref()
            .and_then(|scoring| scoring.preset.as_deref())
            .unwrap_or(DEFAULT_PRESET)
    }

    /// Resolves the scoring profile: named preset first, then field overrides.
    pub fn scoring_profile(&self, preset_override: Option<&str>) -> Result<ScoringProfile> {
        let name = preset_override.unwrap_or_else(|| self.preset_name());
        let mut profile = presets::preset(name)?;

        if let Some(scoring) = &self.scoring {
            if let Some(base) = scoring.base {
                profile.base = base;
            }
            if let Some(weight) = scoring.illumination_weight {
                profile.illumination_weight = weight;
            }
            if let Some(distance) = scoring.distance {
                profile.distance = distance;
            }
            if let Some(thresholds) = &scoring.thresholds {
                let defaults = profile.thresholds;
                profile.thresholds = BandThresholds {
                    neutral: thresholds.neutral.unwrap_or(defaults.neutral),
                    charged: thresholds.charged.unwrap_or(defaults.charged),
                    high: thresholds.high.unwrap_or(defaults.high),
                };
            }
        }

        profile.validate()?;
        Ok(profile)
    }

    pub fn source_settings(&self) -> SourceSettings {
        let source = self.source.clone().unwrap_or_default();
        SourceSettings {
            endpoint: source
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_key: source.api_key.filter(|key| !key.trim().is_empty()),
            api_key_env: source
                .api_key_env
                .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string()),
            timeout_secs: source.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            location: source.location,
            coordinates: source.lat.zip(source.long),
        }
    }

    pub fn fallback_settings(&self) -> FallbackSettings {
        let defaults = FallbackSettings::default();
        match &self.fallback {
            Some(fallback) => FallbackSettings {
                enabled: fallback.enabled,
                phase: fallback.phase.clone().unwrap_or(defaults.phase),
                illumination_percent: fallback
                    .illumination_percent
                    .or(defaults.illumination_percent),
                distance_km: fallback.distance_km.or(defaults.distance_km),
            },
            None => defaults,
        }
    }

    pub fn forecast_days(&self) -> u32 {
        self.forecast
            .as_ref()
            .and_then(|forecast| forecast.days)
            .unwrap_or(crate::engine::forecast::DEFAULT_DAYS)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(source) = &self.source {
            if let Some(endpoint) = &source.endpoint {
                if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                    return Err(ConspiraError::ConfigParse(format!(
                        "source.endpoint must be an http(s) URL: {endpoint}"
                    )));
                }
            }
            if source.timeout_secs == Some(0) {
                return Err(ConspiraError::ConfigParse(
                    "source.timeout_secs must be greater than 0".to_string(),
                ));
            }
            if source.lat.is_some() != source.long.is_some() {
                return Err(ConspiraError::ConfigParse(
                    "source.lat and source.long must be set together".to_string(),
                ));
            }
            if let Some(lat) = source.lat {
                if !(-90.0..=90.0).contains(&lat) {
                    return Err(ConspiraError::ConfigParse(
                        "source.lat must be between -90 and 90".to_string(),
                    ));
                }
            }
            if let Some(long) = source.long {
                if !(-180.0..=180.0).contains(&long) {
                    return Err(ConspiraError::ConfigParse(
                        "source.long must be between -180 and 180".to_string(),
                    ));
                }
            }
        }

        if let Some(fallback) = &self.fallback {
            if let Some(illumination) = fallback.illumination_percent {
                if !(0.0..=100.0).contains(&illumination) {
                    return Err(ConspiraError::ConfigParse(
                        "fallback.illumination_percent must be between 0 and 100".to_string(),
                    ));
                }
            }
            if let Some(distance) = fallback.distance_km {
                if !(distance.is_finite() && distance > 0.0) {
                    return Err(ConspiraError::ConfigParse(
                        "fallback.distance_km must be greater than 0".to_string(),
                    ));
                }
            }
        }

        if let Some(days) = self.forecast.as_ref().and_then(|forecast| forecast.days) {
            if !(1..=31).contains(&days) {
                return Err(ConspiraError::ConfigParse(
                    "forecast.days must be between 1 and 31".to_string(),
                ));
            }
        }

        self.scoring_profile(None).map(|_| ())
    }
}
