//! Shared job queue: blocking pop, explicit close.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, PoisonError};

use crate::job::SplitJob;

struct QueueState {
    jobs: VecDeque<SplitJob>,
    closed: bool,
}

/// FIFO of pending jobs shared by all workers. Once closed, workers drain
/// what is left and then see `None`.
pub(super) struct JobQueue {
    state: Mutex<QueueState>,
    ready: Condvar,
}

impl JobQueue {
    pub(super) fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                jobs: VecDeque::new(),
                closed: false,
            }),
            ready: Condvar::new(),
        }
    }

    /// Returns `false` (and drops the job) if the queue is already closed.
    pub(super) fn push(&self, job: SplitJob) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.closed {
            return false;
        }
        state.jobs.push_back(job);
        drop(state);
        self.ready.notify_one();
        true
    }

    /// Blocks until a job is available or the queue is closed and empty.
    pub(super) fn pop(&self) -> Option<SplitJob> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Some(job) = state.jobs.pop_front() {
                return Some(job);
            }
            if state.closed {
                return None;
            }
            state = self
                .ready
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub(super) fn close(&self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .closed = true;
        self.ready.notify_all();
    }
}
