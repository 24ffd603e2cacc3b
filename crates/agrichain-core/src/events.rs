use super::state::Report;
use super::state::TaskStatus;

// Closed event set; the reducer handles every variant and treats
// out-of-context arrivals as no-ops.
#[derive(Debug, Clone)]
pub enum RunEvent {
    Start { request_text: String },
    PlanReady { tasks: Vec<String> },
    FetchItem { label: String, status: TaskStatus },
    FetchDone,
    AnalyzeItem { label: String, status: TaskStatus },
    AnalyzeDone,
    MonitorStatus { text: String },
    ToggleMonitor,
    ReportReady { report: Report },
    RunComplete { summary: String },
    Reset,
    Fail { message: String },
}
