pub(super) use super::reduce;
pub(super) use crate::events::RunEvent;
pub(super) use crate::state::derive_card_phase;
pub(super) use crate::state::CardPhase;
pub(super) use crate::state::HistoryEntry;
pub(super) use crate::state::LogBuffer;
pub(super) use crate::state::LogEntry;
pub(super) use crate::state::LogLevel;
pub(super) use crate::state::LogSource;
pub(super) use crate::state::Report;
pub(super) use crate::state::RunState;
pub(super) use crate::state::Stage;
pub(super) use crate::state::TaskStatus;
pub(super) use crate::state::DEFAULT_REQUEST;
pub(super) use crate::state::NOT_STARTED_STATUS;

mod classification;
mod history;
mod log_buffer;

fn state() -> RunState {
    RunState::new()
}

fn apply(state: &mut RunState, event: RunEvent) {
    *state = reduce(state, event);
}

fn fallback_tasks() -> Vec<String> {
    vec![
        "Fetch weather data for Tamil Nadu, India.".to_string(),
        "Fetch local soil and NDVI data".to_string(),
        "Analyze weather and soil patterns".to_string(),
        "Detect pest and disease risks".to_string(),
        "Generate final farm condition report".to_string(),
    ]
}

fn sample_report() -> Report {
    Report {
        location: "Tamil Nadu, India.".to_string(),
        crop_health: "Excellent (95%)".to_string(),
        rainfall_forecast: "3mm expected in the next 48 hours.".to_string(),
        pest_risk: "Low. No immediate threats detected.".to_string(),
        recommendations: vec!["Maintain current irrigation schedule.".to_string()],
    }
}

fn to_fetching(state: &mut RunState) {
    apply(
        state,
        RunEvent::Start {
            request_text: DEFAULT_REQUEST.to_string(),
        },
    );
    apply(
        state,
        RunEvent::PlanReady {
            tasks: fallback_tasks(),
        },
    );
}

fn to_monitoring(state: &mut RunState) {
    to_fetching(state);
    for item in state.fetch_items.clone() {
        apply(
            state,
            RunEvent::FetchItem {
                label: item.label,
                status: TaskStatus::Complete,
            },
        );
    }
    apply(state, RunEvent::FetchDone);
    for item in state.analysis_items.clone() {
        apply(
            state,
            RunEvent::AnalyzeItem {
                label: item.label,
                status: TaskStatus::Complete,
            },
        );
    }
    apply(state, RunEvent::AnalyzeDone);
}

fn complete_run(state: &mut RunState, summary: &str) {
    to_monitoring(state);
    apply(
        state,
        RunEvent::ReportReady {
            report: sample_report(),
        },
    );
    apply(
        state,
        RunEvent::RunComplete {
            summary: summary.to_string(),
        },
    );
}
