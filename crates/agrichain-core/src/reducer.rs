use std::sync::Arc;

use super::events::RunEvent;
use super::state::classify_items;
use super::state::is_analysis_task;
use super::state::is_fetch_task;
use super::state::HistoryEntry;
use super::state::RunState;
use super::state::Stage;

#[cfg(test)]
mod tests;

// Pure transition function: no I/O, no timing, no randomness. Every arm
// returns a complete replacement state; history is the only field carried
// across Start/Reset.
pub fn reduce(state: &RunState, event: RunEvent) -> RunState {
    match event {
        RunEvent::Start { request_text } => {
            let mut next = RunState::fresh(state.history.clone());
            next.request_text = request_text;
            next.stage = Stage::Planning;
            next
        }
        RunEvent::PlanReady { tasks } => {
            let mut next = state.clone();
            next.fetch_items = classify_items(&tasks, is_fetch_task);
            next.plan = tasks;
            next.stage = Stage::Fetching;
            next
        }
        RunEvent::FetchItem { label, status } => {
            if !state.plan.iter().any(|task| *task == label) {
                return state.clone();
            }
            let mut next = state.clone();
            if let Some(item) = next.fetch_items.iter_mut().find(|item| item.label == label) {
                item.status = status;
            }
            next
        }
        RunEvent::FetchDone => {
            let mut next = state.clone();
            next.analysis_items = classify_items(&state.plan, is_analysis_task);
            next.stage = Stage::Analyzing;
            next
        }
        RunEvent::AnalyzeItem { label, status } => {
            if !state.plan.iter().any(|task| *task == label) {
                return state.clone();
            }
            let mut next = state.clone();
            if let Some(item) = next
                .analysis_items
                .iter_mut()
                .find(|item| item.label == label)
            {
                item.status = status;
            }
            next
        }
        RunEvent::AnalyzeDone => {
            let mut next = state.clone();
            next.stage = Stage::Monitoring;
            next
        }
        RunEvent::MonitorStatus { text } => {
            if state.stage != Stage::Monitoring {
                return state.clone();
            }
            let mut next = state.clone();
            next.monitor_status = text;
            next
        }
        RunEvent::ToggleMonitor => {
            if state.stage != Stage::Monitoring {
                return state.clone();
            }
            let mut next = state.clone();
            next.monitor_paused = !state.monitor_paused;
            next
        }
        RunEvent::ReportReady { report } => {
            let mut next = state.clone();
            next.report = Some(report);
            next.stage = Stage::Reporting;
            next
        }
        RunEvent::RunComplete { summary } => {
            let mut next = state.clone();
            next.history.push(HistoryEntry {
                id: state.next_history_id(),
                summary,
            });
            next.stage = Stage::Complete;
            next
        }
        RunEvent::Reset => RunState::fresh(state.history.clone()),
        RunEvent::Fail { message } => {
            let mut next = state.clone();
            next.last_error = Some(Arc::from(message));
            next.stage = Stage::Error;
            next
        }
    }
}
