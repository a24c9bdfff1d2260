//! GPX output formatter

use crate::error::Result;
use crate::format::{OutputFormatter, Report};
use crate::render::IconKind;
use quick_xml::escape::escape;

/// GPX formatter - one waypoint per marker and per located spot
pub struct GpxFormatter;

fn symbol(icon: IconKind) -> &'static str {
    match icon {
        IconKind::SelectedPlace => "flag",
        IconKind::Peak => "summit",
        IconKind::Danger => "danger area",
        IconKind::Shelter => "lodging",
    }
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, report: &Report) -> Result<String> {
        let mut gpx = String::new();

        // XML header
        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="trail-lens">"#);
        gpx.push('\n');

        // Metadata
        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!("    <name>{}</name>\n", escape(report.title.as_str())));
        gpx.push_str(&format!("    <time>{}</time>\n", report.generated_at.to_rfc3339()));
        gpx.push_str("  </metadata>\n");

        for marker in &report.markers {
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                marker.location.latitude(),
                marker.location.longitude()
            ));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape(marker.label.as_str())));
            gpx.push_str(&format!("    <desc>{}</desc>\n", marker.icon.description()));
            gpx.push_str(&format!("    <sym>{}</sym>\n", symbol(marker.icon)));
            gpx.push_str("  </wpt>\n");
        }

        // Spots without coordinates cannot be waypoints
        for spot in &report.spots {
            let Some(location) = spot.location else {
                continue;
            };
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                location.latitude(),
                location.longitude()
            ));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape(spot.title.as_str())));
            gpx.push_str(&format!(
                "    <desc>{} ({})</desc>\n",
                escape(spot.address.as_str()),
                spot.distance_display()
            ));
            gpx.push_str("    <sym>scenic area</sym>\n");
            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}
