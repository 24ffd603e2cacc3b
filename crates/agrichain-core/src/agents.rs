use crate::state::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentId {
    Planner,
    DataFetcher,
    Analyzer,
    RiskMonitor,
    ReportGenerator,
    Memory,
}

impl AgentId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planner => "planner",
            Self::DataFetcher => "data_fetcher",
            Self::Analyzer => "analyzer",
            Self::RiskMonitor => "risk_monitor",
            Self::ReportGenerator => "report_generator",
            Self::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSpec {
    pub id: AgentId,
    pub title: &'static str,
    pub description: &'static str,
    pub active_stages: &'static [Stage],
}

pub struct AgentRegistry;

const ALL_STAGES: &[Stage] = &[
    Stage::Idle,
    Stage::Planning,
    Stage::Fetching,
    Stage::Analyzing,
    Stage::Monitoring,
    Stage::Reporting,
    Stage::Complete,
    Stage::Error,
];

const AGENT_SPECS: [AgentSpec; 6] = [
    AgentSpec {
        id: AgentId::Planner,
        title: "Planner Agent",
        description: "Breaks the user request into an ordered task plan.",
        active_stages: &[Stage::Planning],
    },
    AgentSpec {
        id: AgentId::DataFetcher,
        title: "DataFetcher Agent",
        description: "Collects the data sources named by the plan.",
        active_stages: &[Stage::Fetching],
    },
    AgentSpec {
        id: AgentId::Analyzer,
        title: "Analyzer Agent",
        description: "Works through the analysis and detection steps.",
        active_stages: &[Stage::Analyzing],
    },
    AgentSpec {
        id: AgentId::RiskMonitor,
        title: "Risk Detection Agent",
        description: "Cycles live risk readings until a report is requested.",
        active_stages: &[Stage::Monitoring],
    },
    AgentSpec {
        id: AgentId::ReportGenerator,
        title: "Report Generator",
        description: "Assembles the final farm condition report.",
        active_stages: &[Stage::Reporting, Stage::Complete],
    },
    AgentSpec {
        id: AgentId::Memory,
        title: "Long-Term Memory",
        description: "Keeps one-line summaries of completed analyses.",
        active_stages: ALL_STAGES,
    },
];

impl AgentRegistry {
    pub fn list() -> &'static [AgentSpec] {
        &AGENT_SPECS
    }

    pub fn get(id: AgentId) -> &'static AgentSpec {
        match id {
            AgentId::Planner => &AGENT_SPECS[0],
            AgentId::DataFetcher => &AGENT_SPECS[1],
            AgentId::Analyzer => &AGENT_SPECS[2],
            AgentId::RiskMonitor => &AGENT_SPECS[3],
            AgentId::ReportGenerator => &AGENT_SPECS[4],
            AgentId::Memory => &AGENT_SPECS[5],
        }
    }
}
