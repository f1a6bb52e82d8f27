use crate::types::observation::{LunarObservation, ObservationSource};
use crate::types::scoring::{AstralScore, ChargeBand};
use chrono::NaiveDate;
use serde::Serialize;

pub const UNAVAILABLE_MESSAGE: &str =
    "Live lunar data is unavailable right now. Try again in a few minutes.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastEntry {
    pub day_index: u32,
    pub label: String,
    pub date: Option<NaiveDate>,
    pub score: AstralScore,
    pub band: ChargeBand,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AstralReport {
    pub source: ObservationSource,
    pub profile: String,
    pub observation: Option<LunarObservation>,
    pub score: Option<AstralScore>,
    pub band: Option<ChargeBand>,
    pub commentary: String,
    pub tags: Vec<String>,
    pub forecast: Vec<ForecastEntry>,
    pub outlook: Option<String>,
}

impl AstralReport {
    /// Report shown when no observation could be obtained and no fallback applies.
    pub fn unavailable(profile: &str) -> Self {
        Self {
            source: ObservationSource::Live,
            profile: profile.to_string(),
            observation: None,
            score: None,
            band: None,
            commentary: UNAVAILABLE_MESSAGE.to_string(),
            tags: Vec::new(),
            forecast: Vec::new(),
            outlook: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.score.is_some()
    }
}
