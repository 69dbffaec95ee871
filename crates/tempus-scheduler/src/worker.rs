//! Worker threads that drain the scheduler queue
//!
//! Each worker repeats the same protocol: under the mutex, decide whether to
//! exit, wait, or pop; outside the mutex, run the popped closure with panic
//! isolation. Timed waits are bounded by the head job's run-at instant and
//! re-evaluated on every wakeup, so an insert of a strictly earlier job or a
//! shutdown request takes effect immediately.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, trace, warn};

use tempus_types::{Result, ShutdownMode};

use crate::queue::Job;
use crate::scheduler::Core;

/// Spawn one worker thread over the shared core.
pub(crate) fn spawn(index: usize, core: Arc<Core>) -> Result<JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name(format!("tempus-worker-{index}"))
        .spawn(move || run(index, core))?;
    Ok(handle)
}

fn run(index: usize, core: Arc<Core>) {
    debug!(worker = index, "worker started");
    while let Some(job) = next_job(index, &core) {
        dispatch(index, &core, job);
    }
    debug!(worker = index, "worker stopped");
}

/// Block until a job is due, or return `None` when this worker should exit.
fn next_job(index: usize, core: &Core) -> Option<Job> {
    let mut shared = core.shared.lock();
    loop {
        if shared.stop_workers {
            return None;
        }

        if shared.queue.is_empty() {
            if !shared.accepting && shared.shutdown_mode == ShutdownMode::Graceful {
                // Drain complete: this worker flips the stop flag for the
                // whole pool and leaves.
                shared.stop_workers = true;
                core.job_ready.notify_all();
                debug!(worker = index, "queue drained, stopping pool");
                return None;
            }
            core.job_ready.wait(&mut shared);
            continue;
        }

        if let Some(head_run_at) = shared.queue.next_run_at() {
            if head_run_at > Instant::now() {
                // Sleep until the head is due. A submit of an earlier job or
                // a shutdown signals the condvar; re-looping re-reads the
                // head and the flags under the mutex.
                core.job_ready.wait_until(&mut shared, head_run_at);
                continue;
            }
        }

        if let Some(job) = shared.queue.pop() {
            if shared.cancelled.remove(&job.id) {
                trace!(worker = index, job = %job.id, "skipping cancelled job");
                continue;
            }
            return Some(job);
        }
    }
}

/// Run one job outside the lock, isolating panics and recording metrics.
///
/// A panicking closure must not take the worker down with it; the panic is
/// caught and discarded, and the completion counters advance either way.
fn dispatch(index: usize, core: &Core, job: Job) {
    let Job {
        id,
        enqueued_at,
        work,
        ..
    } = job;

    core.metrics.job_started();
    trace!(worker = index, job = %id, "running job");
    if panic::catch_unwind(AssertUnwindSafe(work)).is_err() {
        warn!(worker = index, job = %id, "job panicked");
    }
    core.metrics.job_finished(enqueued_at.elapsed());
    trace!(worker = index, job = %id, "job completed");
}
