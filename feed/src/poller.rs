//! Poll cycle controller
//!
//! One cycle fetches the event list and fully replaces the container with
//! the rendered result. `spawn_polling` runs a cycle immediately and then on
//! every interval tick until the returned handle is cancelled or dropped.
//!
//! Failures never leave this module: a failed cycle shows the error
//! placeholder, logs the cause and waits for the next tick.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::{EventSource, RenderTarget};
use crate::render::{render_event, EMPTY_PLACEHOLDER, ERROR_PLACEHOLDER, LOADING_PLACEHOLDER};

pub const DEFAULT_POLL_INTERVAL: Duration =
    Duration::from_secs(crate::config::DEFAULT_POLL_INTERVAL_SECS);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// No cycle has run yet
    Idle,
    /// Waiting on the event source
    Fetching,
    /// Last cycle rendered events or the empty placeholder
    Rendered,
    /// Last cycle showed the error placeholder
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Number of events rendered
    Rendered(usize),
    Empty,
    Failed,
}

impl CycleOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, CycleOutcome::Failed)
    }
}

/// Published after every completed cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub cycle: u64,
    pub outcome: Option<CycleOutcome>,
}

fn lock_target<T>(target: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panic mid-render leaves at worst a partial container, which the
    // next cycle overwrites anyway.
    target.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn commit<T: RenderTarget>(target: &mut T) {
    if let Err(e) = target.commit() {
        tracing::error!(error = %e, "Failed to commit rendered events");
    }
}

pub struct Poller<S>
where
    S: EventSource,
{
    source: Arc<S>,
    interval: Duration,
    state: PollState,
    cycles: u64,
}

impl<S> Poller<S>
where
    S: EventSource,
{
    pub fn new(source: Arc<S>, interval: Duration) -> Self {
        Self {
            source,
            interval,
            state: PollState::Idle,
            cycles: 0,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of cycles started so far
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Show the loading placeholder; only used before the first cycle
    pub fn show_loading<T: RenderTarget>(&self, target: &Mutex<T>) {
        let mut target = lock_target(target);
        target.show(LOADING_PLACEHOLDER.to_string());
        commit(&mut *target);
    }

    /// Run one fetch-and-render cycle against `target`
    ///
    /// The target is only locked after the fetch completes, so observers are
    /// never blocked by a slow server.
    pub async fn poll_once<T: RenderTarget>(&mut self, target: &Mutex<T>) -> CycleOutcome {
        self.state = PollState::Fetching;
        self.cycles += 1;
        let cycle = self.cycles;
        tracing::debug!(cycle, "Poll cycle started");

        let result = self.source.fetch_events().await;

        let mut target = lock_target(target);
        let outcome = match result {
            Ok(events) if events.is_empty() => {
                target.show(EMPTY_PLACEHOLDER.to_string());
                tracing::info!(cycle, "No repository events found");
                CycleOutcome::Empty
            }
            Ok(events) => {
                target.clear();
                for (index, event) in events.iter().enumerate() {
                    tracing::debug!(
                        cycle,
                        index,
                        action = event.action.as_ref().map(|a| a.as_str()).unwrap_or("-"),
                        "Rendering event"
                    );
                    target.append(render_event(event));
                }
                tracing::info!(cycle, count = events.len(), "Rendered events");
                CycleOutcome::Rendered(events.len())
            }
            Err(e) => {
                target.show(ERROR_PLACEHOLDER.to_string());
                tracing::error!(cycle, error = %e, status = ?e.status(), "Failed to load events");
                CycleOutcome::Failed
            }
        };
        commit(&mut *target);

        self.state = if outcome.is_success() {
            PollState::Rendered
        } else {
            PollState::Failed
        };
        outcome
    }
}

/// Handle to a running poll task
pub struct PollHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
    reports: watch::Receiver<CycleReport>,
}

impl PollHandle {
    /// Receiver that changes after every completed cycle
    pub fn reports(&self) -> watch::Receiver<CycleReport> {
        self.reports.clone()
    }

    pub fn latest(&self) -> CycleReport {
        *self.reports.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop polling and wait for the task to exit
    ///
    /// An in-flight fetch is dropped; the container keeps whatever the last
    /// completed cycle rendered.
    pub async fn cancel(self) {
        // Err means the task already exited
        let _ = self.shutdown.send(());

        if let Err(e) = self.task.await {
            if e.is_panic() {
                tracing::error!(error = %e, "Poll task panicked");
            }
        }
    }
}

/// Start polling: loading placeholder, one cycle now, then one per interval
///
/// Cycles never overlap; a fetch slower than the interval delays the next
/// tick. Dropping the handle stops the task at its next await point.
pub fn spawn_polling<S, T>(mut poller: Poller<S>, target: Arc<Mutex<T>>) -> PollHandle
where
    S: EventSource + 'static,
    T: RenderTarget + 'static,
{
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
    let (report_tx, report_rx) = watch::channel(CycleReport::default());

    let task = tokio::spawn(async move {
        tracing::info!(interval_secs = poller.interval().as_secs_f64(), "Polling started");
        poller.show_loading(target.as_ref());

        let mut ticker = tokio::time::interval(poller.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => break,
                _ = ticker.tick() => {}
            }

            let outcome = tokio::select! {
                _ = &mut shutdown_rx => break,
                outcome = poller.poll_once(target.as_ref()) => outcome,
            };

            report_tx.send_replace(CycleReport {
                cycle: poller.cycles(),
                outcome: Some(outcome),
            });
        }

        tracing::info!(cycles = poller.cycles(), "Polling stopped");
    });

    PollHandle {
        shutdown: shutdown_tx,
        task,
        reports: report_rx,
    }
}
