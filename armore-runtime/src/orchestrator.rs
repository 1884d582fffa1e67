//! Run orchestration
//!
//! One run moves through `Assembling → Linking → Executing → Done`, or stops
//! in `Failed` at the first stage that errors. Each stage is announced on the
//! terminal, called, then acknowledged; every frame stays up for at least its
//! display interval.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use armore_client::{BuildError, BuildService};
use armore_spec::{Config, PipelineState, RunId, Stage};
use tracing::{debug, info, warn};

use crate::error::{Result, RunError};
use crate::terminal::{Terminal, Ticket};

/// Minimum display intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub announce: Duration,
    pub acknowledge: Duration,
    /// Hold for the execute announcement
    pub launch: Duration,
}

impl Timing {
    pub const NONE: Self = Self {
        announce: Duration::ZERO,
        acknowledge: Duration::ZERO,
        launch: Duration::ZERO,
    };

    /// How long the announcement of `stage` stays up before the call
    pub fn announce_hold(&self, stage: Stage) -> Duration {
        match stage {
            Stage::Execute => self.launch,
            Stage::Assemble | Stage::Link => self.announce,
        }
    }
}

impl From<&Config> for Timing {
    fn from(config: &Config) -> Self {
        Timing {
            announce: config.announce_delay,
            acknowledge: config.acknowledge_delay,
            launch: config.launch_delay,
        }
    }
}

/// Output of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub run: RunId,
    pub lines: Vec<String>,
}

impl Transcript {
    /// Lines as shown on the terminal
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Sequences the build stages for one active run at a time
pub struct Orchestrator<S> {
    service: S,
    terminal: Terminal,
    timing: Timing,
    next_run: AtomicU64,
    active: Mutex<Option<RunId>>,
    state: Mutex<PipelineState>,
}

/// Clears the active slot when the run ends, however it ends
struct ActiveRun<'a> {
    slot: &'a Mutex<Option<RunId>>,
    id: RunId,
}

impl Drop for ActiveRun<'_> {
    fn drop(&mut self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if *slot == Some(self.id) {
            *slot = None;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

impl<S: BuildService> Orchestrator<S> {
    /// Orchestrator using the display intervals from `config`
    pub fn new(service: S, terminal: Terminal, config: &Config) -> Self {
        Self::with_timing(service, terminal, Timing::from(config))
    }

    pub fn with_timing(service: S, terminal: Terminal, timing: Timing) -> Self {
        Orchestrator {
            service,
            terminal,
            timing,
            next_run: AtomicU64::new(1),
            active: Mutex::new(None),
            state: Mutex::new(PipelineState::Idle),
        }
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// State of the most recent run
    pub fn state(&self) -> PipelineState {
        lock(&self.state).clone()
    }

    /// Run currently in flight, if any
    pub fn active_run(&self) -> Option<RunId> {
        *lock(&self.active)
    }

    /// Assemble, link and execute `source`.
    ///
    /// Fails with `Busy` without touching the terminal if another run is in
    /// flight. Stage failures are shown on the terminal and returned.
    pub async fn run(&self, source: &str) -> Result<Transcript> {
        let guard = self.begin()?;
        let run = guard.id;
        let ticket = self.terminal.open();
        info!(%run, bytes = source.len(), "pipeline started");

        match self.drive(ticket, source).await {
            Ok(lines) => {
                let shown = self.terminal.print(ticket, lines.join("\n"));
                if !shown {
                    debug!(%run, "terminal closed, dropping output");
                }
                self.set_state(PipelineState::Done);
                info!(%run, lines = lines.len(), "pipeline finished");
                Ok(Transcript { run, lines })
            }
            Err(err) => {
                let stage = err.stage();
                let message = err.user_message().to_string();
                warn!(%run, %stage, %message, "pipeline failed");

                let failure = RunError::Stage {
                    run,
                    stage,
                    message: message.clone(),
                };
                self.terminal.print(ticket, failure.report());
                self.set_state(PipelineState::Failed { stage, message });
                Err(failure)
            }
        }
    }

    fn begin(&self) -> Result<ActiveRun<'_>> {
        let mut slot = lock(&self.active);
        if let Some(active) = *slot {
            debug!(%active, "rejecting run, pipeline busy");
            return Err(RunError::Busy { active });
        }

        let id = RunId(self.next_run.fetch_add(1, Ordering::Relaxed));
        *slot = Some(id);
        Ok(ActiveRun {
            slot: &self.active,
            id,
        })
    }

    async fn drive(
        &self,
        ticket: Ticket,
        source: &str,
    ) -> std::result::Result<Vec<String>, BuildError> {
        self.announce(ticket, Stage::Assemble).await;
        let assembled = self.service.assemble(source).await?;
        self.acknowledge(ticket, Stage::Assemble).await;

        self.announce(ticket, Stage::Link).await;
        let linked = self.service.link(&assembled).await?;
        self.acknowledge(ticket, Stage::Link).await;

        self.announce(ticket, Stage::Execute).await;
        self.service.execute(&linked).await
    }

    async fn announce(&self, ticket: Ticket, stage: Stage) {
        self.set_state(stage.running_state());
        debug!(%stage, "stage started");
        self.terminal.print(ticket, stage.announcement());
        pause(self.timing.announce_hold(stage)).await;
    }

    async fn acknowledge(&self, ticket: Ticket, stage: Stage) {
        if let Some(text) = stage.acknowledgement() {
            self.terminal.print(ticket, text);
            pause(self.timing.acknowledge).await;
        }
    }

    fn set_state(&self, state: PipelineState) {
        *lock(&self.state) = state;
    }
}
