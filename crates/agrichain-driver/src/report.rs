use agrichain_core::state::Report;

use crate::planner::location_segment;

pub const UNKNOWN_LOCATION: &str = "Unknown Location";

// The report body is canned; only the location is derived from the request.
pub fn build_report(request_text: &str) -> Report {
    Report {
        location: location_segment(request_text)
            .unwrap_or(UNKNOWN_LOCATION)
            .to_string(),
        crop_health: "Excellent (95%)".to_string(),
        rainfall_forecast: "3mm expected in the next 48 hours.".to_string(),
        pest_risk: "Low. No immediate threats detected.".to_string(),
        recommendations: vec![
            "Maintain current irrigation schedule.".to_string(),
            "Monitor for aphids near plot B.".to_string(),
            "Consider nitrogen supplement in 2 weeks.".to_string(),
        ],
    }
}

pub fn report_summary(report: &Report) -> String {
    format!(
        "Analysis for {}: Crop health at {}, Pest risk is {}",
        report.location, report.crop_health, report.pest_risk
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn report_location_comes_from_the_request() {
        let report = build_report("Analyze my farm conditions in Tamil Nadu, India.");
        assert_eq!(report.location, "Tamil Nadu, India.");
        assert_eq!(report.recommendations.len(), 3);
    }

    #[test]
    fn report_without_a_location_segment_uses_the_placeholder() {
        let report = build_report("Analyze my farm conditions");
        assert_eq!(report.location, UNKNOWN_LOCATION);
    }

    #[test]
    fn summary_is_derived_from_the_report_fields() {
        let report = build_report("farm in Iowa, USA");
        assert_eq!(
            report_summary(&report),
            "Analysis for Iowa, USA: Crop health at Excellent (95%), \
             Pest risk is Low. No immediate threats detected."
        );
    }
}
