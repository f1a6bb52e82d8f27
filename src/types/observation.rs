use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where the observation behind a report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationSource {
    Live,
    Fallback,
    Manual,
}

impl ObservationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Fallback => "fallback",
            Self::Manual => "manual",
        }
    }
}

/// A single reading of the moon, as far as the scoring engine cares.
///
/// Numeric fields are optional: the upstream may omit them or send values
/// that cannot be read. Absent fields contribute nothing to the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LunarObservation {
    pub phase: String,
    pub illumination_percent: Option<f64>,
    pub distance_km: Option<f64>,
    pub location: Option<String>,
    pub observed_at: DateTime<Utc>,
}

impl LunarObservation {
    pub fn new(
        phase: impl Into<String>,
        illumination_percent: Option<f64>,
        distance_km: Option<f64>,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            phase: phase.into().trim().to_string(),
            illumination_percent: illumination_percent.and_then(finite),
            distance_km: distance_km.and_then(finite),
            location: None,
            observed_at,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        let location = location.into();
        let trimmed = location.trim();
        self.location = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Builds an observation from an astronomy API payload.
    ///
    /// Returns `None` only when the payload is not a JSON object at all.
    pub fn from_payload(payload: &Value, observed_at: DateTime<Utc>) -> Option<Self> {
        let object = payload.as_object()?;

        let phase = object
            .get("moon_phase")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let illumination = object
            .get("moon_illumination_percentage")
            .or_else(|| object.get("moon_illumination"))
            .and_then(numeric_field);
        let distance = object.get("moon_distance").and_then(numeric_field);

        let mut observation = Self::new(phase, illumination, distance, observed_at);
        if let Some(location) = object.get("location").and_then(location_label) {
            observation = observation.with_location(location);
        }
        Some(observation)
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Reads a JSON number or a loosely formatted numeric string.
pub fn numeric_field(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().and_then(finite),
        Value::String(text) => parse_lenient_number(text),
        _ => None,
    }
}

/// Parses strings like `"45.2%"`, `"12,5"`, `"384,400 km"`, `"384 400 km"`.
///
/// Commas followed by groups of exactly three digits are thousands
/// separators; otherwise a single comma with no dot is a decimal separator.
/// Anything that still fails to parse yields `None`.
pub fn parse_lenient_number(raw: &str) -> Option<f64> {
    let mut text = raw.trim().to_ascii_lowercase();
    for unit in ["%", "km"] {
        if let Some(stripped) = text.strip_suffix(unit) {
            text = stripped.trim_end().to_string();
        }
    }
    let text: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect();
    if text.is_empty() {
        return None;
    }

    let normalized = if is_thousands_grouped(&text) {
        text.replace(',', "")
    } else if text.matches(',').count() == 1 && !text.contains('.') {
        text.replace(',', ".")
    } else {
        text
    };
    normalized.parse::<f64>().ok().and_then(finite)
}

fn is_thousands_grouped(text: &str) -> bool {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let integer = unsigned.split('.').next().unwrap_or_default();
    if !integer.contains(',') {
        return false;
    }
    let mut groups = integer.split(',');
    let lead_ok = groups
        .next()
        .is_some_and(|lead| (1..=3).contains(&lead.len()) && lead.bytes().all(|b| b.is_ascii_digit()));
    lead_ok && groups.all(|group| group.len() == 3 && group.bytes().all(|b| b.is_ascii_digit()))
}

fn location_label(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Object(fields) => ["location_string", "city", "country_name"]
            .iter()
            .filter_map(|key| fields.get(*key).and_then(Value::as_str))
            .find(|text| !text.trim().is_empty())
            .map(str::to_string),
        _ => None,
    }
}
