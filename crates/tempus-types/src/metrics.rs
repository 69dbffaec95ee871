//! Metrics and observability types

use serde::{Deserialize, Serialize};

/// Point-in-time scheduler statistics
///
/// The queue depth is read under the scheduler mutex, so it is coherent with
/// submissions; the running/completed counters come from atomics and may be
/// slightly skewed relative to the depth.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulerMetrics {
    /// Jobs accepted but not yet dispatched
    pub queued_jobs: usize,
    /// Jobs whose closure is currently executing
    pub running_jobs: usize,
    /// Jobs whose closure has returned, panicking ones included
    pub completed_jobs: u64,
    /// Average dispatch latency in milliseconds; 0.0 until a job completes
    pub avg_wait_ms: f64,
}
