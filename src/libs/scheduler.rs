//! A recurring-task runner that tolerates irregular host timing.
//!
//! A plain coarse timer silently drops runs when the host sleeps through a
//! firing. Instead the scheduler ticks 24 times per nominal interval and
//! decides on every tick whether a full interval of wall-clock time has
//! actually elapsed. After a suspend, the very next tick notices the elapsed
//! interval and runs the task immediately — exactly once, not once per
//! missed tick. The over-sampled tick is the policy here, not an
//! implementation shortcut.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// The elapsed-time decision, separated from the timer so it can be driven
/// with synthetic clocks.
#[derive(Debug)]
pub struct Cadence {
    interval: Duration,
    last_run: Option<DateTime<Utc>>,
}

impl Cadence {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last_run: None }
    }

    /// True when the task has never run, or a full interval of wall-clock
    /// time has passed since the last run.
    pub fn should_run(&self, now: DateTime<Utc>) -> bool {
        match self.last_run {
            None => true,
            Some(last) => now
                .signed_duration_since(last)
                .to_std()
                .map_or(false, |elapsed| elapsed >= self.interval),
        }
    }

    /// Records an actual task invocation, successful or not.
    pub fn mark_run(&mut self, now: DateTime<Utc>) {
        self.last_run = Some(now);
    }

    pub fn clear(&mut self) {
        self.last_run = None;
    }

    pub fn last_run(&self) -> Option<DateTime<Utc>> {
        self.last_run
    }
}

/// Runs a supplied task once per interval, independent of what the task does.
pub struct Scheduler {
    interval: Duration,
    cadence: Arc<Mutex<Cadence>>,
    handle: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// The interval is fixed for the lifetime of the scheduler.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            cadence: Arc::new(Mutex::new(Cadence::new(interval))),
            handle: None,
        }
    }

    /// Arms the timer. At most one schedule is active at a time — calling
    /// this again replaces the previous schedule instead of stacking.
    ///
    /// Fires are never overlapped: each tick either awaits the task to
    /// completion or skips. The task owns its own error handling; a task
    /// that fails still counts as a run and is retried next interval rather
    /// than on every tick.
    pub fn schedule<T, F>(&mut self, mut task: T)
    where
        T: FnMut() -> F + Send + 'static,
        F: Future<Output = ()> + Send + 'static,
    {
        if self.handle.is_some() {
            self.unschedule();
        }

        let cadence = Arc::clone(&self.cadence);
        let tick = self.interval / 24;
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = time::interval(tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // interval() yields once immediately; the first real wait starts here
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if cadence.lock().should_run(Utc::now()) {
                    task().await;
                    cadence.lock().mark_run(Utc::now());
                }
            }
        }));
    }

    /// Cancels the timer and forgets the last run time. A no-op when
    /// nothing is scheduled.
    pub fn unschedule(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.cadence.lock().clear();
    }

    pub fn is_scheduled(&self) -> bool {
        self.handle.is_some()
    }

    pub fn last_run(&self) -> Option<DateTime<Utc>> {
        self.cadence.lock().last_run()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
