use std::sync::mpsc;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;

use agrichain_core::events::RunEvent;
use agrichain_core::reducer::reduce;
use agrichain_core::state::LogBuffer;
use agrichain_core::state::LogEntry;
use agrichain_core::state::LogLevel;
use agrichain_core::state::LogSource;
use agrichain_core::state::RunState;
use agrichain_core::state::Stage;

use crate::driver::DriverEnvelope;
use crate::driver::RunDriver;
use crate::driver::Timings;
use crate::planner::PlanProvider;
use crate::report::build_report;
use crate::report::report_summary;

const LOG_CAPACITY: usize = 500;

// Owns the single RunState. Driver envelopes flow in through the channel;
// anything tagged with a superseded generation is dropped before it can
// touch the current run.
pub struct RunSession {
    state: RunState,
    driver: RunDriver,
    rx: Receiver<DriverEnvelope>,
    provider: Arc<dyn PlanProvider>,
    logs: LogBuffer,
}

impl RunSession {
    pub fn new(provider: Arc<dyn PlanProvider>, timings: Timings) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            state: RunState::new(),
            driver: RunDriver::new(tx, timings),
            rx,
            provider,
            logs: LogBuffer::new(LOG_CAPACITY),
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn logs(&self) -> &LogBuffer {
        &self.logs
    }

    pub fn note(&mut self, level: LogLevel, source: LogSource, message: String) {
        self.logs.append(LogEntry::stamped(level, source, message));
    }

    pub fn start(&mut self, request_text: String) {
        let generation = self.driver.begin_run();
        self.note(
            LogLevel::Info,
            LogSource::Session,
            format!("run {generation} started: {request_text}"),
        );
        self.apply_event(
            generation,
            RunEvent::Start {
                request_text: request_text.clone(),
            },
        );
        // Entering Planning kicks off the pipeline; the transition above is
        // the only way in, even when a run supersedes another mid-flight.
        self.driver
            .spawn_run(generation, request_text, Arc::clone(&self.provider));
    }

    pub fn reset(&mut self) {
        self.driver.cancel();
        self.note(LogLevel::Info, LogSource::Session, "session reset".to_string());
        self.apply_event(self.driver.generation(), RunEvent::Reset);
    }

    pub fn toggle_monitor(&mut self) {
        if self.state.stage != Stage::Monitoring {
            return;
        }
        self.apply_event(self.driver.generation(), RunEvent::ToggleMonitor);
        self.driver.set_monitor_paused(self.state.monitor_paused);
        let label = if self.state.monitor_paused {
            "paused"
        } else {
            "resumed"
        };
        self.note(
            LogLevel::Info,
            LogSource::Session,
            format!("risk monitoring {label}"),
        );
    }

    // Valid only while monitoring; pausing the ticker does not block it.
    pub fn generate_report(&mut self) {
        if self.state.stage != Stage::Monitoring {
            return;
        }
        let report = build_report(&self.state.request_text);
        let summary = report_summary(&report);
        let generation = self.driver.generation();
        self.apply_event(generation, RunEvent::ReportReady { report });
        self.driver.schedule_completion(generation, summary);
    }

    pub fn drain(&mut self) {
        while let Ok(envelope) = self.rx.try_recv() {
            self.apply(envelope);
        }
    }

    // Blocks for at most `timeout` waiting for one envelope; used by tests
    // and by anything that wants to follow a run without spinning.
    pub fn pump(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(envelope) => {
                self.apply(envelope);
                true
            }
            Err(_) => false,
        }
    }

    fn apply(&mut self, envelope: DriverEnvelope) {
        if envelope.generation != self.driver.generation() {
            return;
        }
        self.apply_event(envelope.generation, envelope.event);
    }

    fn apply_event(&mut self, generation: u64, event: RunEvent) {
        let previous = self.state.stage;
        self.state = reduce(&self.state, event);
        self.reconcile(previous, generation);
    }

    // Keeps the driver's timers aligned with the stage the state just moved
    // to. The ticker exists exactly while the stage is Monitoring.
    fn reconcile(&mut self, previous: Stage, generation: u64) {
        let current = self.state.stage;
        if previous == current {
            return;
        }
        self.note(
            LogLevel::Info,
            LogSource::Driver,
            format!("stage {} -> {}", previous.label(), current.label()),
        );
        if current == Stage::Monitoring {
            self.driver.start_monitor(generation);
        }
        if previous == Stage::Monitoring {
            self.driver.stop_monitor();
        }
        if current == Stage::Error {
            self.driver.cancel();
            if let Some(message) = self.state.last_error.as_deref() {
                self.note(LogLevel::Error, LogSource::Driver, message.to_string());
            }
        }
    }
}
