use crate::types::report::AstralReport;

use super::{fmt_distance, fmt_illumination, MISSING};

pub fn to_text(report: &AstralReport) -> String {
    let Some(score) = report.score else {
        return format!("AII {MISSING}  {}\n", report.commentary);
    };
    let band = report.band.map(|band| band.label()).unwrap_or(MISSING);

    let mut lines = vec![format!("AII {score}/100  [{band}]")];
    if let Some(observation) = &report.observation {
        lines.push(format!(
            "{} | {} | {}",
            if observation.phase.is_empty() { MISSING } else { observation.phase.as_str() },
            fmt_illumination(observation.illumination_percent),
            fmt_distance(observation.distance_km)
        ));
    }
    lines.push(report.commentary.clone());
    if !report.tags.is_empty() {
        lines.push(format!("windows: {}", report.tags.join(", ")));
    }
    if !report.forecast.is_empty() {
        let curve = report
            .forecast
            .iter()
            .map(|entry| entry.score.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!("{}d: {curve}", report.forecast.len()));
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}
