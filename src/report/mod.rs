pub mod json;
pub mod md;
pub mod text;

use crate::error::ConspiraError;
use crate::types::report::AstralReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
    Text,
}

pub fn render(report: &AstralReport, format: OutputFormat) -> Result<String, ConspiraError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(ConspiraError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
        OutputFormat::Text => Ok(text::to_text(report)),
    }
}

pub(crate) const MISSING: &str = "–";

pub(crate) fn fmt_illumination(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.1}%"))
        .unwrap_or_else(|| MISSING.to_string())
}

/// Formats kilometres with thousands separators, e.g. `384,400 km`.
///
/// Non-positive distances are absent as far as scoring goes, so they render as missing.
pub(crate) fn fmt_distance(value: Option<f64>) -> String {
    let Some(km) = value.filter(|km| km.is_finite() && *km > 0.0) else {
        return MISSING.to_string();
    };
    let digits = (km.round() as i64).to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{grouped} km")
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::engine::{assess, presets};
    use crate::types::observation::{LunarObservation, ObservationSource};
    use crate::types::report::AstralReport;
    use chrono::{NaiveDate, TimeZone, Utc};

    pub fn full_moon_report() -> AstralReport {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 22, 0, 0).unwrap();
        let observation = LunarObservation::new("FULL_MOON", Some(80.0), Some(360_000.0), at)
            .with_location("Lisbon");
        let profile = presets::preset(presets::DEFAULT_PRESET).unwrap();
        assess(
            observation,
            ObservationSource::Live,
            &profile,
            7,
            NaiveDate::from_ymd_opt(2026, 10, 18),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_grouped_by_thousands() {
        assert_eq!(fmt_distance(Some(384_400.4)), "384,400 km");
        assert_eq!(fmt_distance(Some(999.0)), "999 km");
        assert_eq!(fmt_distance(Some(1_000.0)), "1,000 km");
        assert_eq!(fmt_distance(None), MISSING);
    }

    #[test]
    fn non_positive_distance_renders_as_missing() {
        assert_eq!(fmt_distance(Some(-500_000.0)), MISSING);
        assert_eq!(fmt_distance(Some(0.0)), MISSING);
    }

    #[test]
    fn illumination_has_one_decimal() {
        assert_eq!(fmt_illumination(Some(23.0)), "23.0%");
        assert_eq!(fmt_illumination(None), MISSING);
    }

    #[test]
    fn every_format_renders_unavailable_reports() {
        let report = AstralReport::unavailable("conspira");
        for format in [OutputFormat::Json, OutputFormat::Md, OutputFormat::Text] {
            let rendered = render(&report, format).expect("render should succeed");
            assert!(rendered.contains("unavailable"));
        }
    }
}
