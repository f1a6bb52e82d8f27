use crate::types::report::AstralReport;

pub fn to_json(report: &AstralReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::full_moon_report;

    #[test]
    fn json_report_contains_score_and_band() {
        let rendered = to_json(&full_moon_report()).expect("json should serialize");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("json should parse");

        assert_eq!(value["score"], 77);
        assert_eq!(value["band"], "high");
        assert_eq!(value["source"], "live");
        assert_eq!(value["observation"]["phase"], "FULL_MOON");
        assert_eq!(value["forecast"].as_array().map(Vec::len), Some(7));
        assert_eq!(value["forecast"][0]["date"], "2026-10-18");
    }

    #[test]
    fn unavailable_report_serializes_nulls() {
        let report = AstralReport::unavailable("conspira");
        let value: serde_json::Value =
            serde_json::from_str(&to_json(&report).unwrap()).expect("json should parse");
        assert!(value["score"].is_null());
        assert!(value["observation"].is_null());
    }
}
