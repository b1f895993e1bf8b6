//! Renderer stub that records every call and can be told to fail or stall.

use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use asplit_core::job::SplitJob;
use asplit_core::render::{RenderError, SegmentRenderer};
use asplit_core::segmenter::{plan_segments, OutputNaming};

#[derive(Default)]
pub struct StubRenderer {
    pub delay: Duration,
    pub fail: HashSet<u64>,
    completed: Mutex<Vec<u64>>,
    running: AtomicUsize,
    peak_running: AtomicUsize,
}

impl StubRenderer {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn failing(sequences: &[u64]) -> Self {
        Self {
            fail: sequences.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn completed(&self) -> Vec<u64> {
        self.completed.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.completed.lock().unwrap().len()
    }

    pub fn peak_running(&self) -> usize {
        self.peak_running.load(Ordering::SeqCst)
    }
}

impl SegmentRenderer for StubRenderer {
    fn render(&self, job: &SplitJob) -> Result<(), RenderError> {
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_running.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.running.fetch_sub(1, Ordering::SeqCst);
        self.completed.lock().unwrap().push(job.segment.sequence);
        if self.fail.contains(&job.segment.sequence) {
            return Err(RenderError::Failed {
                program: "stub".to_string(),
                code: Some(1),
            });
        }
        Ok(())
    }
}

/// `count` ten-second jobs numbered from 1.
pub fn jobs(count: u64) -> Vec<SplitJob> {
    let naming = OutputNaming::new("out", "rec-", "ogg");
    plan_segments(0.0, count as f64 * 10.0, 10.0, 1)
        .into_iter()
        .map(|s| SplitJob::new(Path::new("rec.wav"), s, 1.0, &naming))
        .collect()
}
