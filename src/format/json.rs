//! JSON output formatter

use crate::error::Result;
use crate::format::{OutputFormatter, Report};

/// JSON formatter - outputs the full report as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON report"
    }

    fn format(&self, report: &Report) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::tests::sample_report;

    #[test]
    fn test_json_format() {
        let output = JsonFormatter.format(&sample_report()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["title"], "Trailhead");
        assert_eq!(parsed["markers"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["markers"][0]["icon"], "peak");
        assert_eq!(parsed["spots"][0]["distance_meters"], 3200.0);
        assert!(parsed.get("generated_at").is_some());
    }

    #[test]
    fn test_json_formatter_info() {
        assert_eq!(JsonFormatter.name(), "json");
        assert!(!JsonFormatter.description().is_empty());
    }
}
