//! Feeds parsed telemetry records into a scheduler
//!
//! Each valid record becomes a submitted job; fault records jump the line
//! at high priority. The blank-line sentinel turns into a graceful shutdown
//! request, mirroring how the upstream producer signalled end-of-feed.

use std::io::BufRead;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use tempus_scheduler::{Priority, Scheduler, ShutdownMode};
use tempus_types::Result;

use crate::record::{parse_line, ParsedLine, VehicleRecord};

/// Callback invoked by a worker for every dispatched record.
pub type RecordHandler = Arc<dyn Fn(VehicleRecord) + Send + Sync>;

/// Counters from one feed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedSummary {
    /// Records accepted by the scheduler
    pub submitted: usize,
    /// Lines skipped because they did not parse
    pub malformed: usize,
    /// Records the scheduler rejected (backpressure or shutdown)
    pub rejected: usize,
    /// Whether the termination sentinel was seen
    pub terminated: bool,
}

/// Line-by-line producer over an explicit scheduler instance.
pub struct Feeder<'a> {
    scheduler: &'a Scheduler,
}

impl<'a> Feeder<'a> {
    pub fn new(scheduler: &'a Scheduler) -> Self {
        Self { scheduler }
    }

    /// Read lines from `input` and submit each valid record as a job.
    ///
    /// Every record shares the run-at instant captured when the run starts,
    /// so all of them are due immediately and priority alone orders queued
    /// records: a fault record overtakes healthy ones waiting for a worker.
    /// Malformed lines are logged and counted, never fatal. A blank line
    /// stops reading and gracefully shuts the scheduler down, so every
    /// already-submitted record is still processed before this returns.
    pub fn run<R: BufRead>(&self, input: R, handler: RecordHandler) -> Result<FeedSummary> {
        let mut summary = FeedSummary::default();
        let run_at = Instant::now();

        for line in input.lines() {
            let line = line?;
            match parse_line(&line) {
                Ok(ParsedLine::Sentinel) => {
                    info!("termination sentinel received, draining scheduler");
                    summary.terminated = true;
                    self.scheduler.shutdown(ShutdownMode::Graceful);
                    break;
                }
                Ok(ParsedLine::Record(record)) => {
                    let vehicle = record.vehicle_id;
                    let priority = if record.error_code.is_fault() {
                        Priority::High
                    } else {
                        Priority::Normal
                    };
                    let handler = Arc::clone(&handler);
                    match self.scheduler.submit(move || handler(record), run_at, priority) {
                        Ok(id) => {
                            debug!(job = %id, vehicle, ?priority, "record submitted");
                            summary.submitted += 1;
                        }
                        Err(err) => {
                            warn!(vehicle, %err, "record dropped");
                            summary.rejected += 1;
                        }
                    }
                }
                Err(err) => {
                    warn!(%err, line = %line, "skipping malformed line");
                    summary.malformed += 1;
                }
            }
        }

        Ok(summary)
    }
}
