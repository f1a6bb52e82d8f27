use crate::types::report::AstralReport;

use super::{fmt_distance, fmt_illumination, MISSING};

pub fn to_markdown(report: &AstralReport) -> String {
    let mut output = String::new();
    output.push_str("# Astral Intelligence Index\n\n");

    let Some(score) = report.score else {
        output.push_str(&format!("Index: {MISSING}\n\n{}\n", report.commentary));
        return output;
    };

    let band = report.band.map(|band| band.label()).unwrap_or(MISSING);
    output.push_str(&format!("Index: {score} ({band})\n\n"));
    output.push_str(&format!("{}\n\n", report.commentary));

    output.push_str("## Lunar Observation\n\n");
    if let Some(observation) = &report.observation {
        let phase = if observation.phase.is_empty() {
            MISSING
        } else {
            observation.phase.as_str()
        };
        output.push_str(&format!(
            "- phase: {}\n- illumination: {}\n- distance: {}\n- location: {}\n- observed: {}\n- source: {} ({})\n\n",
            phase,
            fmt_illumination(observation.illumination_percent),
            fmt_distance(observation.distance_km),
            observation.location.as_deref().unwrap_or("Planet Earth"),
            observation.observed_at.format("%Y-%m-%d %H:%M UTC"),
            report.source.as_str(),
            report.profile
        ));
    }

    output.push_str("## Windows\n\n");
    if report.tags.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for tag in &report.tags {
            output.push_str(&format!("- {tag}\n"));
        }
        output.push('\n');
    }

    output.push_str("## Forecast\n\n");
    output.push_str("| day | date | index | band |\n|---|---|---|---|\n");
    for entry in &report.forecast {
        let date = entry
            .date
            .map(|date| date.format("%a %b %-d").to_string())
            .unwrap_or_else(|| MISSING.to_string());
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            entry.label,
            date,
            entry.score,
            entry.band.label()
        ));
    }
    if let Some(outlook) = &report.outlook {
        output.push_str(&format!("\n{outlook}\n"));
    }

    output
}
