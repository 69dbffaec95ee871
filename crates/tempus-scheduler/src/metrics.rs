//! Metrics recording for the scheduler
//!
//! Workers bump lock-free counters on every dispatch; `snapshot` folds them
//! into the shared [`SchedulerMetrics`] type together with the queue depth
//! the scheduler reads under its mutex.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use tempus_types::SchedulerMetrics;

#[derive(Debug, Default)]
pub(crate) struct MetricsRecorder {
    /// Workers currently executing a closure
    running_jobs: AtomicUsize,
    /// Closures that have returned, panicking ones included
    completed_jobs: AtomicU64,
    /// Cumulative dispatch latency
    total_wait_ns: AtomicU64,
}

impl MetricsRecorder {
    pub fn job_started(&self) {
        self.running_jobs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn job_finished(&self, wait: Duration) {
        self.total_wait_ns
            .fetch_add(wait.as_nanos() as u64, Ordering::Relaxed);
        self.completed_jobs.fetch_add(1, Ordering::Relaxed);
        self.running_jobs.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, queued_jobs: usize) -> SchedulerMetrics {
        let completed = self.completed_jobs.load(Ordering::Relaxed);
        let total_wait_ns = self.total_wait_ns.load(Ordering::Relaxed);
        let avg_wait_ms = if completed > 0 {
            (total_wait_ns as f64 / completed as f64) / 1e6
        } else {
            0.0
        };

        SchedulerMetrics {
            queued_jobs,
            running_jobs: self.running_jobs.load(Ordering::Relaxed),
            completed_jobs: completed,
            avg_wait_ms,
        }
    }
}
