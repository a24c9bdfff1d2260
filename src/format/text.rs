//! Human-readable text output formatter

use crate::error::Result;
use crate::format::{OutputFormatter, Report};

/// Text formatter - outputs a human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, report: &Report) -> Result<String> {
        let mut output = String::new();

        // Header
        output.push_str(&format!("trail-lens: {}\n", report.title));
        if let Some(center) = &report.center {
            output.push_str(&format!(
                "Center: ({:.6}, {:.6})\n",
                center.latitude(),
                center.longitude()
            ));
        }

        if !report.markers.is_empty() {
            output.push_str(&format!("\nMarkers ({}):\n", report.markers.len()));
            for marker in &report.markers {
                output.push_str(&format!(
                    "  [{}] {} ({:.6}, {:.6})\n",
                    marker.icon,
                    marker.label,
                    marker.location.latitude(),
                    marker.location.longitude()
                ));
            }
        }

        if !report.spots.is_empty() {
            output.push_str(&format!("\nNearby ({}):\n", report.spots.len()));
            for spot in &report.spots {
                output.push_str(&format!(
                    "  {} - {} ({})\n",
                    spot.title,
                    spot.address,
                    spot.distance_display()
                ));
            }
        }

        if report.markers.is_empty() && report.spots.is_empty() {
            output.push_str("\nNothing to show.\n");
        }

        Ok(output)
    }
}
