//! Join barrier for a batch of tasks.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};
use tokio::sync::Notify;
use tracing::warn;

use super::{TaskOutcome, TaskState};

/// Per-outcome counts for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTally {
    /// Tasks whose delay elapsed normally.
    pub completed: usize,
    /// Tasks interrupted during their delay.
    pub interrupted: usize,
    /// Tasks whose workload unwound.
    pub panicked: usize,
    /// Tasks never dispatched.
    pub not_started: usize,
}

impl OutcomeTally {
    /// Record one outcome.
    pub fn record(&mut self, outcome: TaskOutcome) {
        self.record_many(outcome, 1);
    }

    /// Record `n` identical outcomes.
    pub fn record_many(&mut self, outcome: TaskOutcome, n: usize) {
        let slot = match outcome {
            TaskOutcome::Completed => &mut self.completed,
            TaskOutcome::Interrupted => &mut self.interrupted,
            TaskOutcome::Panicked => &mut self.panicked,
            TaskOutcome::NotStarted => &mut self.not_started,
        };
        *slot += n;
    }

    /// Number of terminal arrivals recorded.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.completed + self.interrupted + self.panicked + self.not_started
    }
}

struct BarrierState {
    remaining: usize,
    tally: OutcomeTally,
}

/// Countdown latch that releases its waiters once every task has arrived.
///
/// Blocking waiters park on a `Condvar`, async waiters on a `Notify`.
pub struct CompletionBarrier {
    state: Mutex<BarrierState>,
    condvar: Condvar,
    notify: Notify,
}

impl CompletionBarrier {
    /// Create a barrier expecting `count` arrivals.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            state: Mutex::new(BarrierState {
                remaining: count,
                tally: OutcomeTally::default(),
            }),
            condvar: Condvar::new(),
            notify: Notify::new(),
        }
    }

    /// Record a terminal outcome. Arrivals past zero are ignored.
    pub fn arrive(&self, outcome: TaskOutcome) {
        self.arrive_many(outcome, 1);
    }

    /// Record `n` tasks that will never be dispatched.
    pub fn forfeit(&self, n: usize) {
        if n > 0 {
            self.arrive_many(TaskOutcome::NotStarted, n);
        }
    }

    fn arrive_many(&self, outcome: TaskOutcome, n: usize) {
        let released = {
            let mut state = self.state.lock();
            let accepted = n.min(state.remaining);
            if accepted < n {
                warn!(
                    outcome = %outcome,
                    extra = n - accepted,
                    "arrival after barrier already released; ignoring"
                );
            }
            state.tally.record_many(outcome, accepted);
            state.remaining -= accepted;
            let released = accepted > 0 && state.remaining == 0;
            if released {
                self.condvar.notify_all();
            }
            released
        };
        if released {
            self.notify.notify_waiters();
        }
    }

    /// Arrivals still outstanding.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.state.lock().remaining
    }

    /// Snapshot of the outcomes recorded so far.
    #[must_use]
    pub fn tally(&self) -> OutcomeTally {
        self.state.lock().tally
    }

    /// Block until every task has arrived.
    pub fn wait(&self) -> OutcomeTally {
        let mut state = self.state.lock();
        while state.remaining > 0 {
            self.condvar.wait(&mut state);
        }
        state.tally
    }

    /// Await until every task has arrived.
    pub async fn wait_async(&self) -> OutcomeTally {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            {
                let state = self.state.lock();
                if state.remaining == 0 {
                    return state.tally;
                }
            }
            notified.await;
        }
    }
}

/// Arms one barrier slot and tracks the task through its lifecycle.
///
/// Dropping an unfinished guard still arrives: as `Panicked` if the task was
/// running, `NotStarted` otherwise.
pub(crate) struct CompletionGuard {
    barrier: Arc<CompletionBarrier>,
    state: TaskState,
}

impl CompletionGuard {
    pub(crate) const fn new(barrier: Arc<CompletionBarrier>) -> Self {
        Self {
            barrier,
            state: TaskState::Created,
        }
    }

    #[cfg(test)]
    pub(crate) const fn state(&self) -> TaskState {
        self.state
    }

    pub(crate) fn start(&mut self) {
        self.state = TaskState::Running;
    }

    pub(crate) fn finish(mut self, outcome: TaskOutcome) {
        self.state = TaskState::Finished(outcome);
        self.barrier.arrive(outcome);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        let outcome = match self.state {
            TaskState::Finished(_) => return,
            TaskState::Running => TaskOutcome::Panicked,
            TaskState::Created => TaskOutcome::NotStarted,
        };
        self.barrier.arrive(outcome);
    }
}
