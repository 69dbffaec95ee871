use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tempus_feed::{Feeder, RecordHandler};
use tempus_scheduler::{Priority, Scheduler, SchedulerConfig, ShutdownMode};

fn collecting_handler() -> (RecordHandler, Arc<Mutex<Vec<u32>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let handler: RecordHandler = {
        let seen = Arc::clone(&seen);
        Arc::new(move |record| seen.lock().unwrap().push(record.vehicle_id))
    };
    (handler, seen)
}

#[test]
fn feed_submits_valid_records_and_stops_at_sentinel() {
    let scheduler = Scheduler::new(SchedulerConfig::new(2, 16)).expect("scheduler should start");
    let (handler, seen) = collecting_handler();

    let input = Cursor::new(concat!(
        "1,2024-03-01T10:00:00Z,55.0,ON,ENGINE_OK\n",
        "not,a,record\n",
        "2,2024-03-01T10:00:01Z,12.5,OFF,ENGINE_OVERHEAT\n",
        "\n",
        "3,2024-03-01T10:00:02Z,99.0,ON,OK\n",
    ));
    let summary = Feeder::new(&scheduler)
        .run(input, handler)
        .expect("feed should run");

    assert_eq!(summary.submitted, 2);
    assert_eq!(summary.malformed, 1);
    assert_eq!(summary.rejected, 0);
    assert!(summary.terminated);

    // The sentinel drained the scheduler inside run(), so both records were
    // processed and the line after the sentinel was never read.
    let mut vehicles = seen.lock().unwrap().clone();
    vehicles.sort_unstable();
    assert_eq!(vehicles, vec![1, 2]);

    // Post-sentinel the scheduler is shut down.
    assert!(scheduler
        .submit(|| {}, Instant::now(), Priority::Normal)
        .is_err());
}

#[test]
fn feed_without_sentinel_leaves_scheduler_running() {
    let scheduler = Scheduler::new(SchedulerConfig::new(1, 16)).expect("scheduler should start");
    let (handler, seen) = collecting_handler();

    let input = Cursor::new("4,2024-03-01T11:00:00Z,20.0,ON,OK\n");
    let summary = Feeder::new(&scheduler)
        .run(input, handler)
        .expect("feed should run");

    assert_eq!(summary.submitted, 1);
    assert!(!summary.terminated);

    // Still our job to drain.
    scheduler.shutdown(ShutdownMode::Graceful);
    assert_eq!(*seen.lock().unwrap(), vec![4]);
}

#[test]
fn fault_records_dispatch_before_healthy_ones() {
    let scheduler = Scheduler::new(SchedulerConfig::new(1, 8)).expect("scheduler should start");
    let started = Arc::new(AtomicBool::new(false));
    let release = Arc::new(AtomicBool::new(false));

    // Pin the only worker so both records sit in the queue together.
    {
        let started = Arc::clone(&started);
        let release = Arc::clone(&release);
        scheduler
            .submit(
                move || {
                    started.store(true, Ordering::SeqCst);
                    while !release.load(Ordering::SeqCst) {
                        thread::sleep(Duration::from_millis(2));
                    }
                },
                Instant::now(),
                Priority::Normal,
            )
            .expect("submission should be accepted");
    }
    while !started.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(2));
    }

    let (handler, seen) = collecting_handler();
    // Healthy record first: only its High priority can move the overheating
    // vehicle ahead of it, since both share the feed's run-at instant.
    let input = Cursor::new(concat!(
        "1,2024-03-01T10:00:00Z,50.0,ON,OK\n",
        "2,2024-03-01T10:00:01Z,90.0,ON,ENGINE_OVERHEAT\n",
    ));
    let summary = Feeder::new(&scheduler)
        .run(input, handler)
        .expect("feed should run");
    assert_eq!(summary.submitted, 2);
    assert_eq!(summary.rejected, 0);

    release.store(true, Ordering::SeqCst);
    scheduler.shutdown(ShutdownMode::Graceful);
    assert_eq!(*seen.lock().unwrap(), vec![2, 1]);
}

#[test]
fn backpressure_rejections_are_counted() {
    let scheduler = Scheduler::new(SchedulerConfig::new(1, 1)).expect("scheduler should start");
    let started = Arc::new(AtomicBool::new(false));
    let release = Arc::new(AtomicBool::new(false));

    // Pin the only worker so feed submissions hit the queue bound.
    {
        let started = Arc::clone(&started);
        let release = Arc::clone(&release);
        scheduler
            .submit(
                move || {
                    started.store(true, Ordering::SeqCst);
                    while !release.load(Ordering::SeqCst) {
                        thread::sleep(Duration::from_millis(2));
                    }
                },
                Instant::now(),
                Priority::Normal,
            )
            .expect("submission should be accepted");
    }
    while !started.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(2));
    }

    let (handler, seen) = collecting_handler();
    let input = Cursor::new(concat!(
        "1,2024-03-01T10:00:00Z,10.0,ON,OK\n",
        "2,2024-03-01T10:00:01Z,20.0,ON,OK\n",
        "3,2024-03-01T10:00:02Z,30.0,ON,OK\n",
    ));
    let summary = Feeder::new(&scheduler)
        .run(input, handler)
        .expect("feed should run");

    assert_eq!(summary.submitted, 1);
    assert_eq!(summary.rejected, 2);

    release.store(true, Ordering::SeqCst);
    scheduler.shutdown(ShutdownMode::Graceful);
    assert_eq!(seen.lock().unwrap().len(), 1);
}
