use super::*;
use crate::scheduler::clock::{ManualClock, SystemClock};

fn spec() -> WorkerSpec {
    WorkerSpec {
        name: WORKER_NAME.to_owned(),
        stack_bytes: 64 * 1024,
        priority: 5,
    }
}

#[test]
fn thread_spawner_runs_entry_with_name() {
    let (tx, rx) = std::sync::mpsc::channel();
    let control = Arc::new(WorkerControl::default());
    let handle = WorkerHandle::spawn(
        &ThreadSpawner,
        &spec(),
        control,
        Box::new(move || {
            let name = std::thread::current().name().map(str::to_owned);
            tx.send(name).unwrap();
        }),
    )
    .unwrap();

    assert_eq!(rx.recv().unwrap().as_deref(), Some(WORKER_NAME));
    assert!(handle.wait(Duration::from_secs(5)));
    assert!(handle.join());
}

#[test]
fn sleep_returns_early_on_stop() {
    let control = Arc::new(WorkerControl::default());
    let clock = ManualClock::new();
    assert!(control.sleep(&clock, Duration::from_millis(95), Duration::from_millis(10)));
    assert_eq!(clock.now(), Duration::from_millis(95));

    control.request_stop();
    assert!(!control.sleep(&clock, Duration::from_millis(50), Duration::from_millis(10)));
    assert_eq!(clock.now(), Duration::from_millis(95));
}

#[test]
fn stop_request_ends_a_sleeping_worker_within_timeout() {
    let control = Arc::new(WorkerControl::default());
    let worker_control = Arc::clone(&control);
    let handle = WorkerHandle::spawn(
        &ThreadSpawner,
        &spec(),
        control,
        Box::new(move || {
            let clock = SystemClock::new();
            worker_control.sleep(&clock, Duration::from_secs(60), Duration::from_millis(5));
        }),
    )
    .unwrap();

    assert!(!handle.is_finished());
    handle.request_stop();
    assert!(handle.wait(Duration::from_secs(5)));
    assert!(handle.join());
}

#[test]
fn terminate_flags_worker_killed() {
    let control = Arc::new(WorkerControl::default());
    let worker_control = Arc::clone(&control);
    let handle = WorkerHandle::spawn(
        &ThreadSpawner,
        &spec(),
        Arc::clone(&control),
        Box::new(move || {
            let clock = SystemClock::new();
            worker_control.sleep(&clock, Duration::from_secs(60), Duration::from_millis(5));
        }),
    )
    .unwrap();

    handle.terminate();
    assert!(control.is_killed());
    assert!(control.stop_requested());
}

struct FailingSpawner;

impl WorkerSpawner for FailingSpawner {
    fn spawn(&self, spec: &WorkerSpec, _entry: WorkerEntry) -> LottieResult<JoinHandle<()>> {
        Err(LottieError::worker_spawn(format!("no room for {}", spec.name)))
    }
}

#[test]
fn spawn_failure_is_reported() {
    let err = WorkerHandle::spawn(
        &FailingSpawner,
        &spec(),
        Arc::new(WorkerControl::default()),
        Box::new(|| {}),
    )
    .unwrap_err();
    assert!(matches!(err, LottieError::WorkerSpawn(_)));
}
