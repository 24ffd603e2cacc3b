use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_PLAN_LOCATION: &str = "the area";

// Plan acquisition never fails outward; every provider falls back to the
// deterministic template instead of surfacing an error.
pub trait PlanProvider: Send + Sync {
    fn plan(&self, request: &str) -> Vec<String>;
}

// Segment after the first " in ", untrimmed, so the plan echoes the request
// text exactly as typed.
pub fn location_segment(request: &str) -> Option<&str> {
    request
        .split_once(" in ")
        .map(|(_, rest)| rest)
        .filter(|location| !location.is_empty())
}

pub fn fallback_plan(request: &str) -> Vec<String> {
    let location = location_segment(request).unwrap_or(DEFAULT_PLAN_LOCATION);
    vec![
        format!("Fetch weather data for {location}"),
        "Fetch local soil and NDVI data".to_string(),
        "Analyze weather and soil patterns".to_string(),
        "Detect pest and disease risks".to_string(),
        "Generate final farm condition report".to_string(),
    ]
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackPlanner;

impl PlanProvider for FallbackPlanner {
    fn plan(&self, request: &str) -> Vec<String> {
        fallback_plan(request)
    }
}

#[derive(Debug, Clone)]
pub struct ScriptedPlanProvider {
    pub tasks: Vec<String>,
}

impl PlanProvider for ScriptedPlanProvider {
    fn plan(&self, _request: &str) -> Vec<String> {
        self.tasks.clone()
    }
}

#[derive(Debug, Deserialize)]
struct PlanDocument {
    tasks: Vec<String>,
}

// Reads a scripted plan from a JSON document of the shape
// {"tasks": ["..."]}. Missing file, bad JSON, or an empty task list all
// fall back to the template for the same request.
#[derive(Debug, Clone)]
pub struct FilePlanProvider {
    pub path: PathBuf,
}

impl PlanProvider for FilePlanProvider {
    fn plan(&self, request: &str) -> Vec<String> {
        match read_plan_document(&self.path) {
            Some(tasks) if !tasks.is_empty() => tasks,
            _ => fallback_plan(request),
        }
    }
}

fn read_plan_document(path: &Path) -> Option<Vec<String>> {
    let raw = fs::read_to_string(path).ok()?;
    let document: PlanDocument = serde_json::from_str(&raw).ok()?;
    Some(document.tasks)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fallback_plan_templates_the_location_segment() {
        let plan = fallback_plan("Analyze my farm conditions in Tamil Nadu, India.");
        assert_eq!(
            plan,
            vec![
                "Fetch weather data for Tamil Nadu, India.",
                "Fetch local soil and NDVI data",
                "Analyze weather and soil patterns",
                "Detect pest and disease risks",
                "Generate final farm condition report"
            ]
        );
    }

    #[test]
    fn fallback_plan_uses_the_default_location_without_a_segment() {
        let plan = fallback_plan("Check my greenhouse");
        assert_eq!(plan[0], "Fetch weather data for the area");

        // A trailing " in " with nothing after it is treated as absent.
        let plan = fallback_plan("Check my greenhouse in ");
        assert_eq!(plan[0], "Fetch weather data for the area");
    }

    #[test]
    fn location_segment_splits_on_the_first_occurrence() {
        assert_eq!(
            location_segment("farm in Iowa in spring"),
            Some("Iowa in spring")
        );
        assert_eq!(location_segment("no marker here"), None);
    }

    #[test]
    fn file_provider_reads_a_well_formed_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("plan.json");
        fs::write(
            &path,
            r#"{"tasks": ["Fetch rain gauges", "Analyze drainage"]}"#,
        )
        .expect("write plan");

        let provider = FilePlanProvider { path };
        assert_eq!(
            provider.plan("whatever"),
            vec!["Fetch rain gauges", "Analyze drainage"]
        );
    }

    #[test]
    fn file_provider_falls_back_on_missing_or_malformed_documents() {
        let dir = tempfile::tempdir().expect("tempdir");

        let missing = FilePlanProvider {
            path: dir.path().join("absent.json"),
        };
        assert_eq!(
            missing.plan("Analyze my farm conditions in Tamil Nadu, India."),
            fallback_plan("Analyze my farm conditions in Tamil Nadu, India.")
        );

        let malformed_path = dir.path().join("broken.json");
        fs::write(&malformed_path, "not json at all").expect("write file");
        let malformed = FilePlanProvider {
            path: malformed_path,
        };
        assert_eq!(malformed.plan("x in Iowa"), fallback_plan("x in Iowa"));

        let empty_path = dir.path().join("empty.json");
        fs::write(&empty_path, r#"{"tasks": []}"#).expect("write file");
        let empty = FilePlanProvider { path: empty_path };
        assert_eq!(empty.plan("x in Iowa"), fallback_plan("x in Iowa"));
    }
}
