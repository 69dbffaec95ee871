//! The scheduler: submission, cancellation, shutdown, and metrics
//!
//! One mutex guards the queue, the cancellation set, and the lifecycle
//! flags; one condvar carries every worker wakeup. Metric counters are
//! atomics so snapshots stay cheap.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use parking_lot::{Condvar, Mutex};
use tracing::{debug, info, warn};

use tempus_types::{
    JobId, Priority, Result, SchedulerConfig, SchedulerMetrics, ShutdownMode, TempusError,
};

use crate::metrics::MetricsRecorder;
use crate::queue::{DelayQueue, Job, JobFn};
use crate::worker;

/// State guarded by the scheduler mutex.
pub(crate) struct Shared {
    pub queue: DelayQueue,
    /// Ids marked dead; drained as workers pop the matching jobs
    pub cancelled: HashSet<JobId>,
    pub accepting: bool,
    /// Monotonic: once true, never reset
    pub stop_workers: bool,
    pub shutdown_mode: ShutdownMode,
    pub next_id: u64,
}

/// Core shared between the scheduler handle and its workers.
pub(crate) struct Core {
    pub shared: Mutex<Shared>,
    pub job_ready: Condvar,
    pub metrics: MetricsRecorder,
}

/// Thread-safe priority-and-deadline job scheduler.
///
/// A fixed pool of worker threads drains a bounded, time-ordered priority
/// queue. Jobs carry an earliest-run instant and a [`Priority`]; workers
/// dispatch the most eligible ready job, sleeping on a timed condvar wait
/// until the head becomes due. Cancellation is lazy and effective only
/// before dispatch. Dropping the scheduler requests an immediate shutdown
/// so no worker outlives it.
///
/// # Example
///
/// ```
/// use std::time::Instant;
/// use tempus_scheduler::{Priority, Scheduler, SchedulerConfig, ShutdownMode};
///
/// let scheduler = Scheduler::new(SchedulerConfig::new(2, 64))?;
/// let id = scheduler.submit(|| println!("hello"), Instant::now(), Priority::Normal)?;
/// scheduler.cancel(id)?;
/// scheduler.shutdown(ShutdownMode::Graceful);
/// # Ok::<(), tempus_scheduler::TempusError>(())
/// ```
pub struct Scheduler {
    core: Arc<Core>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    config: SchedulerConfig,
}

impl Scheduler {
    /// Validate the configuration and spawn the worker pool.
    ///
    /// The scheduler accepts submissions as soon as this returns.
    pub fn new(config: SchedulerConfig) -> Result<Self> {
        config.validate()?;
        info!(
            workers = config.worker_count,
            max_queue_size = config.max_queue_size,
            "starting scheduler"
        );

        let core = Arc::new(Core {
            shared: Mutex::new(Shared {
                queue: DelayQueue::new(config.max_queue_size),
                cancelled: HashSet::new(),
                accepting: true,
                stop_workers: false,
                shutdown_mode: ShutdownMode::Graceful,
                next_id: 1,
            }),
            job_ready: Condvar::new(),
            metrics: MetricsRecorder::default(),
        });

        let workers = (0..config.worker_count)
            .map(|index| worker::spawn(index, Arc::clone(&core)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            core,
            workers: Mutex::new(workers),
            config,
        })
    }

    /// Submit a job for execution no earlier than `run_at`.
    ///
    /// A `run_at` in the past means "as soon as possible". Returns the
    /// assigned id, or [`TempusError::ShuttingDown`] once shutdown has been
    /// requested, or [`TempusError::QueueFull`] when the queue is at
    /// capacity — the backpressure contract: the caller decides whether to
    /// shed, retry, or block.
    pub fn submit<F>(&self, work: F, run_at: Instant, priority: Priority) -> Result<JobId>
    where
        F: FnOnce() + Send + 'static,
    {
        self.submit_boxed(Box::new(work), run_at, priority)
    }

    fn submit_boxed(&self, work: JobFn, run_at: Instant, priority: Priority) -> Result<JobId> {
        let mut shared = self.core.shared.lock();
        if !shared.accepting {
            debug!("submission rejected: scheduler is shutting down");
            return Err(TempusError::shutting_down(
                "scheduler is no longer accepting jobs",
            ));
        }
        if shared.queue.is_full() {
            debug!(
                queued = shared.queue.len(),
                "submission rejected: queue at capacity"
            );
            return Err(TempusError::queue_full(format!(
                "queue already holds {} jobs",
                shared.queue.len()
            )));
        }

        let id = JobId::new(shared.next_id);
        shared.next_id += 1;
        shared.queue.push(Job {
            id,
            run_at,
            priority,
            enqueued_at: Instant::now(),
            work,
        });
        let depth = shared.queue.len();
        drop(shared);

        // At most one job became runnable; waking the whole pool would only
        // burn wakeups.
        self.core.job_ready.notify_one();
        debug!(job = %id, ?priority, depth, "job queued");
        Ok(id)
    }

    /// Mark a queued job as cancelled.
    ///
    /// Cancellation is lazy: the job stays in the heap and is discarded when
    /// a worker pops it, so the hot paths stay `O(log n)`. Ids that never
    /// existed or whose job already dispatched are accepted and silently
    /// ineffective. Refused once the scheduler has stopped accepting — after
    /// shutdown the instance no longer takes instructions, even for jobs
    /// still sitting in a graceful drain.
    pub fn cancel(&self, id: JobId) -> Result<()> {
        let mut shared = self.core.shared.lock();
        if !shared.accepting {
            debug!(job = %id, "cancel refused: scheduler is shutting down");
            return Err(TempusError::shutting_down(
                "scheduler is no longer accepting cancellations",
            ));
        }
        shared.cancelled.insert(id);
        debug!(job = %id, "cancel recorded");
        Ok(())
    }

    /// Stop the scheduler under the given discipline and join every worker.
    ///
    /// Graceful drains the queue first; Immediate drops every undispatched
    /// job (running closures still finish). Repeated calls are no-ops, and
    /// an Immediate request during a graceful drain escalates it, dropping
    /// whatever is still queued. Returns only after all workers have been
    /// joined.
    pub fn shutdown(&self, mode: ShutdownMode) {
        {
            let mut shared = self.core.shared.lock();
            info!(?mode, queued = shared.queue.len(), "shutdown requested");
            shared.accepting = false;
            shared.shutdown_mode = mode;
            match mode {
                ShutdownMode::Immediate => {
                    let dropped = shared.queue.clear();
                    shared.cancelled.clear();
                    shared.stop_workers = true;
                    if dropped > 0 {
                        info!(dropped, "pending jobs dropped");
                    }
                }
                ShutdownMode::Graceful => {
                    // Nothing to drain: workers can stop right away.
                    if shared.queue.is_empty() {
                        shared.stop_workers = true;
                    }
                }
            }
        }
        self.core.job_ready.notify_all();
        self.join_workers();
    }

    /// Lock-consistent snapshot of queue depth plus the atomic counters.
    pub fn metrics(&self) -> SchedulerMetrics {
        let queued = self.core.shared.lock().queue.len();
        self.core.metrics.snapshot(queued)
    }

    /// Configuration the scheduler was constructed with.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    fn join_workers(&self) {
        let mut workers = self.workers.lock();
        for handle in workers.drain(..) {
            if handle.join().is_err() {
                // Worker bodies catch job panics, so this is unexpected.
                warn!("worker thread panicked");
            }
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        // Guarantee no worker outlives the scheduler.
        self.shutdown(ShutdownMode::Immediate);
    }
}
