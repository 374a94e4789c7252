//! Interruptible delays shared by thread and async tasks.
//!
//! An [`InterruptSignal`] is raised at most once. Threads wait on a
//! `parking_lot::Condvar`; async tasks race a tokio timer against a `Notify`.

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tokio::sync::Notify;

/// Result of an interruptible sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepOutcome {
    /// The full delay elapsed.
    Elapsed,
    /// The signal was raised before the delay elapsed.
    Interrupted,
}

/// One-shot interrupt flag observable from blocking and async code.
#[derive(Debug, Default)]
pub struct InterruptSignal {
    raised: Mutex<bool>,
    condvar: Condvar,
    notify: Notify,
}

impl InterruptSignal {
    /// Create an un-raised signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal and wake every sleeper. Idempotent.
    pub fn raise(&self) {
        {
            let mut raised = self.raised.lock();
            *raised = true;
            self.condvar.notify_all();
        }
        self.notify.notify_waiters();
    }

    /// Whether the signal has been raised.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        *self.raised.lock()
    }

    /// Block the current OS thread for `delay` unless the signal is raised.
    pub fn sleep_blocking(&self, delay: Duration) -> SleepOutcome {
        let deadline = Instant::now() + delay;
        let mut raised = self.raised.lock();
        while !*raised {
            if self.condvar.wait_until(&mut raised, deadline).timed_out() {
                return if *raised {
                    SleepOutcome::Interrupted
                } else {
                    SleepOutcome::Elapsed
                };
            }
        }
        SleepOutcome::Interrupted
    }

    /// Suspend the current task for `delay` unless the signal is raised.
    /// The worker thread is released to the scheduler while suspended.
    pub async fn sleep(&self, delay: Duration) -> SleepOutcome {
        let notified = self.notify.notified();
        tokio::pin!(notified);
        // Register before checking the flag so a concurrent raise is not missed.
        notified.as_mut().enable();
        if self.is_raised() {
            return SleepOutcome::Interrupted;
        }
        tokio::select! {
            () = tokio::time::sleep(delay) => SleepOutcome::Elapsed,
            () = notified => SleepOutcome::Interrupted,
        }
    }
}
