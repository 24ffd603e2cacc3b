use std::collections::VecDeque;
use std::sync::Arc;

use serde::Serialize;

pub const DEFAULT_REQUEST: &str = "Analyze my farm conditions in Tamil Nadu, India.";
pub const NOT_STARTED_STATUS: &str = "Not Started";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Idle,
    Planning,
    Fetching,
    Analyzing,
    Monitoring,
    Reporting,
    Complete,
    Error,
}

impl Stage {
    // Rank is the contract for "already behind current"; never compare by name.
    pub fn rank(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Planning => 1,
            Self::Fetching => 2,
            Self::Analyzing => 3,
            Self::Monitoring => 4,
            Self::Reporting => 5,
            Self::Complete => 6,
            Self::Error => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Planning => "Planning",
            Self::Fetching => "Fetching",
            Self::Analyzing => "Analyzing",
            Self::Monitoring => "Monitoring",
            Self::Reporting => "Reporting",
            Self::Complete => "Complete",
            Self::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Active,
    Complete,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub label: String,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub location: String,
    pub crop_health: String,
    pub rainfall_forecast: String,
    pub pest_risk: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub stage: Stage,
    pub request_text: String,
    pub plan: Vec<String>,
    pub fetch_items: Vec<TaskItem>,
    pub analysis_items: Vec<TaskItem>,
    pub monitor_status: String,
    pub monitor_paused: bool,
    pub report: Option<Report>,
    pub history: Vec<HistoryEntry>,
    pub last_error: Option<Arc<str>>,
}

impl RunState {
    pub fn new() -> Self {
        Self::fresh(seed_history())
    }

    // A fresh run keeps nothing but the cross-run history.
    pub fn fresh(history: Vec<HistoryEntry>) -> Self {
        Self {
            stage: Stage::Idle,
            request_text: DEFAULT_REQUEST.to_string(),
            plan: Vec::new(),
            fetch_items: Vec::new(),
            analysis_items: Vec::new(),
            monitor_status: NOT_STARTED_STATUS.to_string(),
            monitor_paused: false,
            report: None,
            history,
            last_error: None,
        }
    }

    pub fn next_history_id(&self) -> u64 {
        self.history
            .iter()
            .map(|entry| entry.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_history() -> Vec<HistoryEntry> {
    vec![
        HistoryEntry {
            id: 1,
            summary: "Initial analysis for Western Cape, SA. Yield forecast: 4.2 t/ha."
                .to_string(),
        },
        HistoryEntry {
            id: 2,
            summary: "Pest risk assessment for Iowa, USA. Low risk detected.".to_string(),
        },
    ]
}

pub fn is_fetch_task(task: &str) -> bool {
    task.to_ascii_lowercase().contains("fetch")
}

pub fn is_analysis_task(task: &str) -> bool {
    let lower = task.to_ascii_lowercase();
    lower.contains("analyze") || lower.contains("detect")
}

pub fn classify_items(plan: &[String], predicate: fn(&str) -> bool) -> Vec<TaskItem> {
    plan.iter()
        .filter(|task| predicate(task))
        .map(|task| TaskItem {
            label: task.clone(),
            status: TaskStatus::Pending,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    Upcoming,
    Active,
    Done,
}

// A card spanning several stages counts as done only once every one of them
// is behind the current stage.
pub fn derive_card_phase(active_stages: &[Stage], current: Stage) -> CardPhase {
    if active_stages.contains(&current) {
        return CardPhase::Active;
    }
    if !active_stages.is_empty()
        && active_stages
            .iter()
            .all(|stage| stage.rank() < current.rank())
    {
        return CardPhase::Done;
    }
    CardPhase::Upcoming
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiTheme {
    Classic,
    Harvest,
    Monsoon,
}

impl UiTheme {
    pub fn label(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Harvest => "harvest",
            Self::Monsoon => "monsoon",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Classic => Self::Harvest,
            Self::Harvest => Self::Monsoon,
            Self::Monsoon => Self::Classic,
        }
    }

    pub fn accent(self) -> &'static str {
        match self {
            Self::Classic => "green",
            Self::Harvest => "light-yellow",
            Self::Monsoon => "light-blue",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "classic" => Some(Self::Classic),
            "harvest" => Some(Self::Harvest),
            "monsoon" => Some(Self::Monsoon),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    Session,
    Driver,
    Ui,
}

impl LogSource {
    pub fn label(self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Driver => "driver",
            Self::Ui => "ui",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub seq: u64,
    pub level: LogLevel,
    pub ts_ms: Option<u64>,
    pub source: LogSource,
    pub message: String,
}

impl LogEntry {
    pub fn stamped(level: LogLevel, source: LogSource, message: String) -> Self {
        Self {
            seq: 0,
            level,
            ts_ms: u64::try_from(chrono::Utc::now().timestamp_millis()).ok(),
            source,
            message,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogBuffer {
    cap: usize,
    next_seq: u64,
    buf: VecDeque<LogEntry>,
}

impl LogBuffer {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            next_seq: 1,
            buf: VecDeque::with_capacity(cap),
        }
    }

    pub fn append(&mut self, mut entry: LogEntry) {
        entry.seq = self.next_seq;
        self.next_seq += 1;

        if self.buf.len() == self.cap {
            self.buf.pop_front();
        }
        self.buf.push_back(entry);
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.next_seq = 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.buf.iter()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
