//! # Tempus Scheduler
//!
//! Thread-safe, priority-and-deadline job scheduling for in-process
//! background work.
//!
//! ## Overview
//!
//! A fixed pool of OS worker threads dequeues jobs from a shared,
//! time-ordered priority queue. Every job carries an earliest-run instant on
//! the monotonic clock and a priority used only to break run-at ties, so a
//! high-priority job scheduled for later never overtakes one that is
//! already due.
//!
//! ## Design Principles
//!
//! - **One mutex, one condvar**: the queue, the cancellation set, and the
//!   lifecycle flags share a single lock; all worker wakeups ride a single
//!   condition variable with timed waits to the next deadline.
//! - **Bounded queue**: submissions beyond the capacity are rejected
//!   synchronously, pushing the pacing decision back to the producer.
//! - **Lazy cancellation**: cancelled ids are marked, not searched for, and
//!   drained when workers pop the matching jobs.
//! - **Two shutdown disciplines**: graceful drain or immediate drop, both
//!   joining every worker before returning.
//! - **Panic isolation**: a failing closure never kills its worker.

mod metrics;
mod queue;
mod scheduler;
mod worker;

// Re-exports
pub use queue::JobFn;
pub use scheduler::Scheduler;

pub use tempus_types::{
    JobId, Priority, Result, SchedulerConfig, SchedulerMetrics, ShutdownMode, TempusError,
};
