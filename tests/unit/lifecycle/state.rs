use super::*;

#[test]
fn every_state_round_trips_through_the_cell() {
    let cell = StateCell::new(LifecycleState::Unloaded);
    for s in LifecycleState::ALL {
        cell.set(s);
        assert_eq!(cell.get(), s);
    }
}

#[test]
fn transition_only_fires_from_expected_state() {
    let cell = StateCell::new(LifecycleState::Running);
    assert!(!cell.transition(LifecycleState::Paused, LifecycleState::Running));
    assert_eq!(cell.get(), LifecycleState::Running);
    assert!(cell.transition(LifecycleState::Running, LifecycleState::Paused));
    assert_eq!(cell.get(), LifecycleState::Paused);
}

#[test]
fn worker_activity_by_state() {
    assert!(LifecycleState::Running.worker_active());
    assert!(LifecycleState::Paused.worker_active());
    assert!(!LifecycleState::Idle.worker_active());
    assert!(!LifecycleState::Stopped.worker_active());
    assert!(!LifecycleState::Unloaded.worker_active());
}
