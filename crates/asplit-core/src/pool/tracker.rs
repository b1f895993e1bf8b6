//! Completion tracking for submitted jobs (wait-group style).

use std::sync::{Condvar, Mutex, PoisonError};

use crate::job::JobOutcome;

struct TrackerState {
    outstanding: usize,
    outcomes: Vec<JobOutcome>,
}

/// Counts jobs that are queued or in flight and collects their outcomes.
/// `wait` blocks until the count drops to zero.
pub(super) struct CompletionTracker {
    state: Mutex<TrackerState>,
    idle: Condvar,
}

impl CompletionTracker {
    pub(super) fn new() -> Self {
        Self {
            state: Mutex::new(TrackerState {
                outstanding: 0,
                outcomes: Vec::new(),
            }),
            idle: Condvar::new(),
        }
    }

    /// Must be called before the job becomes visible to workers.
    pub(super) fn add(&self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .outstanding += 1;
    }

    /// Undo an `add` for a job that was never enqueued.
    pub(super) fn cancel(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.outstanding = state.outstanding.saturating_sub(1);
        if state.outstanding == 0 {
            self.idle.notify_all();
        }
    }

    /// Records a terminal outcome. Called exactly once per job.
    pub(super) fn complete(&self, outcome: JobOutcome) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.outcomes.push(outcome);
        state.outstanding = state.outstanding.saturating_sub(1);
        if state.outstanding == 0 {
            self.idle.notify_all();
        }
    }

    pub(super) fn outstanding(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .outstanding
    }

    /// Blocks until nothing is outstanding, then hands back every outcome
    /// recorded since the previous wait.
    pub(super) fn wait(&self) -> Vec<JobOutcome> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        while state.outstanding > 0 {
            state = self
                .idle
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        std::mem::take(&mut state.outcomes)
    }
}
