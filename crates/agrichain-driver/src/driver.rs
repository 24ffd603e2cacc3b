use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use agrichain_core::events::RunEvent;
use agrichain_core::state::is_analysis_task;
use agrichain_core::state::is_fetch_task;
use agrichain_core::state::TaskStatus;

use crate::planner::PlanProvider;

pub const RUN_FAILURE_MESSAGE: &str =
    "Analysis run failed unexpectedly. Start a new analysis to retry.";
pub const MONITOR_ACTIVE_STATUS: &str = "Monitoring Active...";

pub const RISK_STATUSES: [&str; 5] = [
    "Weather: Stable",
    "Pest Alerts: Low",
    "Soil Moisture: Optimal",
    "Crop Health: Good",
    "Weather: Light showers expected",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub fetch_step: Duration,
    pub analyze_step: Duration,
    pub settle: Duration,
    pub monitor_interval: Duration,
    pub report_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            fetch_step: Duration::from_millis(700),
            analyze_step: Duration::from_millis(800),
            settle: Duration::from_millis(500),
            monitor_interval: Duration::from_millis(2000),
            report_delay: Duration::from_millis(1500),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DriverEnvelope {
    pub generation: u64,
    pub event: RunEvent,
}

// All simulated work runs on worker threads that send envelopes back over
// the channel. Every dispatch re-checks the generation token, so a timer
// from a superseded run dies quietly instead of firing into a newer run.
#[derive(Clone)]
pub struct RunDriver {
    tx: Sender<DriverEnvelope>,
    generation: Arc<AtomicU64>,
    monitor_epoch: Arc<AtomicU64>,
    monitor_paused: Arc<AtomicBool>,
    timings: Timings,
}

impl RunDriver {
    pub fn new(tx: Sender<DriverEnvelope>, timings: Timings) -> Self {
        Self {
            tx,
            generation: Arc::new(AtomicU64::new(0)),
            monitor_epoch: Arc::new(AtomicU64::new(0)),
            monitor_paused: Arc::new(AtomicBool::new(false)),
            timings,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    // A new run invalidates every outstanding timer and any live ticker.
    pub fn begin_run(&self) -> u64 {
        self.monitor_epoch.fetch_add(1, Ordering::SeqCst);
        self.monitor_paused.store(false, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn cancel(&self) {
        self.monitor_epoch.fetch_add(1, Ordering::SeqCst);
        self.monitor_paused.store(false, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn set_monitor_paused(&self, paused: bool) {
        self.monitor_paused.store(paused, Ordering::SeqCst);
    }

    pub fn spawn_run(
        &self,
        generation: u64,
        request_text: String,
        provider: Arc<dyn PlanProvider>,
    ) {
        let driver = self.clone();
        thread::spawn(move || {
            if let Err(message) = driver.run_pipeline(generation, &request_text, provider.as_ref())
            {
                driver.dispatch(generation, RunEvent::Fail { message });
            }
        });
    }

    fn run_pipeline(
        &self,
        generation: u64,
        request_text: &str,
        provider: &dyn PlanProvider,
    ) -> Result<(), String> {
        let tasks = provider.plan(request_text);
        if tasks.is_empty() {
            // Providers absorb their own failures; an empty plan is the one
            // way a run cannot proceed at all.
            return Err(RUN_FAILURE_MESSAGE.to_string());
        }
        let fetch_tasks: Vec<String> = tasks
            .iter()
            .filter(|task| is_fetch_task(task))
            .cloned()
            .collect();
        let analysis_tasks: Vec<String> = tasks
            .iter()
            .filter(|task| is_analysis_task(task))
            .cloned()
            .collect();
        self.dispatch(generation, RunEvent::PlanReady { tasks });

        // Fetch items run on independent timers; completion order among them
        // is unspecified, but FetchDone waits for every one of them.
        let mut workers = Vec::new();
        for (index, label) in fetch_tasks.into_iter().enumerate() {
            let driver = self.clone();
            let delay = self.timings.fetch_step * (index as u32 + 1);
            workers.push(thread::spawn(move || {
                thread::sleep(delay);
                driver.dispatch(
                    generation,
                    RunEvent::FetchItem {
                        label,
                        status: TaskStatus::Complete,
                    },
                );
            }));
        }
        for worker in workers {
            let _ = worker.join();
        }
        if self.generation() != generation {
            return Ok(());
        }
        thread::sleep(self.timings.settle);
        self.dispatch(generation, RunEvent::FetchDone);

        // Analysis is strictly sequential: the next delay starts only after
        // the previous completion has been dispatched.
        for label in analysis_tasks {
            thread::sleep(self.timings.analyze_step);
            if self.generation() != generation {
                return Ok(());
            }
            self.dispatch(
                generation,
                RunEvent::AnalyzeItem {
                    label,
                    status: TaskStatus::Complete,
                },
            );
        }
        thread::sleep(self.timings.settle);
        self.dispatch(generation, RunEvent::AnalyzeDone);
        Ok(())
    }

    // Dispatches the initial "active" status immediately, then ticks through
    // the canned readings. Pausing skips dispatches without advancing the
    // cycle position; bumping the epoch (or the generation) ends the thread,
    // so at most one ticker is ever live.
    pub fn start_monitor(&self, generation: u64) {
        let epoch = self.monitor_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.dispatch(
            generation,
            RunEvent::MonitorStatus {
                text: MONITOR_ACTIVE_STATUS.to_string(),
            },
        );
        let driver = self.clone();
        thread::spawn(move || {
            let mut index = 0_usize;
            loop {
                thread::sleep(driver.timings.monitor_interval);
                if driver.monitor_epoch.load(Ordering::SeqCst) != epoch
                    || driver.generation.load(Ordering::SeqCst) != generation
                {
                    return;
                }
                if driver.monitor_paused.load(Ordering::SeqCst) {
                    continue;
                }
                driver.dispatch(
                    generation,
                    RunEvent::MonitorStatus {
                        text: RISK_STATUSES[index].to_string(),
                    },
                );
                index = (index + 1) % RISK_STATUSES.len();
            }
        });
    }

    pub fn stop_monitor(&self) {
        self.monitor_epoch.fetch_add(1, Ordering::SeqCst);
    }

    pub fn schedule_completion(&self, generation: u64, summary: String) {
        let driver = self.clone();
        thread::spawn(move || {
            thread::sleep(driver.timings.report_delay);
            driver.dispatch(generation, RunEvent::RunComplete { summary });
        });
    }

    fn dispatch(&self, generation: u64, event: RunEvent) {
        if self.generation.load(Ordering::SeqCst) != generation {
            return;
        }
        let _ = self.tx.send(DriverEnvelope { generation, event });
    }
}
