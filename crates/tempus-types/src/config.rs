//! Configuration types for the scheduler

use crate::{Result, TempusError};
use serde::{Deserialize, Serialize};

/// Scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Number of worker threads in the pool
    pub worker_count: usize,
    /// Maximum number of queued (accepted, not yet dispatched) jobs before
    /// submissions are rejected
    pub max_queue_size: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
            max_queue_size: 1024,
        }
    }
}

impl SchedulerConfig {
    /// Create a configuration with explicit pool and queue sizes
    pub fn new(worker_count: usize, max_queue_size: usize) -> Self {
        Self {
            worker_count,
            max_queue_size,
        }
    }

    /// Set the number of worker threads
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Set the queue capacity
    pub fn with_max_queue_size(mut self, max_queue_size: usize) -> Self {
        self.max_queue_size = max_queue_size;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(TempusError::config("worker_count must be at least 1"));
        }
        if self.max_queue_size == 0 {
            return Err(TempusError::config("max_queue_size must be at least 1"));
        }
        Ok(())
    }
}

fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
