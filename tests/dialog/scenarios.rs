//! End-to-end flows through a mounted host, as the dashboard drives them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use kronos_dashboard::dialog::{DialogBus, DialogHost, FlowOutcome, TriggerCoordinator, Visibility};

use crate::{counting_on_success, settle, spawn_counting_flow, Recorder};

struct Dashboard {
    bus: DialogBus,
    recorder: Recorder,
    host: DialogHost,
    coordinator: TriggerCoordinator,
}

fn dashboard() -> Dashboard {
    let bus = DialogBus::new();
    let recorder = Recorder::attach(&bus);
    let host = DialogHost::new(bus.clone());
    let coordinator = TriggerCoordinator::new(bus.clone());
    Dashboard {
        bus,
        recorder,
        host,
        coordinator,
    }
}

#[tokio::test(start_paused = true)]
async fn test_confirm_and_succeed() {
    let d = dashboard();
    let runs = Arc::new(AtomicUsize::new(0));
    let successes = Arc::new(AtomicUsize::new(0));

    let flow = spawn_counting_flow(
        &d.coordinator,
        "Delete schedule",
        Arc::clone(&runs),
        false,
        counting_on_success(&successes),
    );
    settle().await;
    assert!(d.host.is_visible());

    d.host.confirm().unwrap();
    assert_eq!(flow.await.unwrap(), FlowOutcome::Completed);

    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(successes.load(Ordering::SeqCst), 1);
    assert_eq!(
        d.recorder.events(),
        vec![
            "open:Delete schedule",
            "is_open:true",
            "confirm",
            "reset",
            "close",
            "is_open:false"
        ]
    );
    // Reset already dropped the session, so no clear is pending
    assert!(!d.host.is_visible());
    assert!(d.host.session().is_none());
    assert!(!d.host.has_pending_clear());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_confirming() {
    let d = dashboard();
    let runs = Arc::new(AtomicUsize::new(0));

    let flow = spawn_counting_flow(&d.coordinator, "Delete schedule", Arc::clone(&runs), false, None);
    settle().await;

    assert!(d.host.dismiss());
    assert_eq!(flow.await.unwrap(), FlowOutcome::Canceled);
    assert_eq!(runs.load(Ordering::SeqCst), 0);
    assert_eq!(d.recorder.count("reset"), 0);
    assert_eq!(d.recorder.count("is_open:false"), 1);

    assert_eq!(d.host.visibility(), Visibility::Closing);
    tokio::time::sleep(Duration::from_millis(1001)).await;
    assert!(d.host.session().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_confirm_and_fail() {
    let d = dashboard();
    let runs = Arc::new(AtomicUsize::new(0));
    let successes = Arc::new(AtomicUsize::new(0));

    let flow = spawn_counting_flow(
        &d.coordinator,
        "Add new schedule",
        Arc::clone(&runs),
        true,
        counting_on_success(&successes),
    );
    settle().await;
    d.host.confirm().unwrap();

    assert!(matches!(flow.await.unwrap(), FlowOutcome::Failed(_)));
    assert_eq!(successes.load(Ordering::SeqCst), 0);
    assert_eq!(d.recorder.count("close"), 1);
    assert!(!d.host.is_visible());

    // No reset on failure: the confirmed session lingers until the clear timer
    assert!(d.host.session().unwrap().is_confirmed());
    tokio::time::sleep(Duration::from_millis(1001)).await;
    assert!(d.host.session().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_reopen_while_closing() {
    let d = dashboard();
    let first_runs = Arc::new(AtomicUsize::new(0));
    let second_runs = Arc::new(AtomicUsize::new(0));

    let first = spawn_counting_flow(&d.coordinator, "First", Arc::clone(&first_runs), false, None);
    settle().await;
    d.host.dismiss();
    assert_eq!(first.await.unwrap(), FlowOutcome::Canceled);
    assert!(d.host.has_pending_clear());

    tokio::time::sleep(Duration::from_millis(300)).await;
    let second = spawn_counting_flow(&d.coordinator, "Second", Arc::clone(&second_runs), false, None);
    settle().await;
    assert!(!d.host.has_pending_clear());
    assert_eq!(d.host.session().unwrap().title(), "Second");

    d.host.dismiss();
    assert_eq!(second.await.unwrap(), FlowOutcome::Canceled);

    // Only the second session is shown while closing, even past the first deadline
    tokio::time::sleep(Duration::from_millis(800)).await;
    assert_eq!(d.host.visibility(), Visibility::Closing);
    assert_eq!(d.host.session().unwrap().title(), "Second");

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(d.host.session().is_none());
    assert_eq!(first_runs.load(Ordering::SeqCst) + second_runs.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_confirm_runs_action_once() {
    let d = dashboard();
    let runs = Arc::new(AtomicUsize::new(0));

    let flow = spawn_counting_flow(&d.coordinator, "Delete schedule", Arc::clone(&runs), false, None);
    settle().await;

    d.host.confirm().unwrap();
    let _ = d.host.confirm();
    let _ = d.host.confirm();

    assert_eq!(flow.await.unwrap(), FlowOutcome::Completed);
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(d.recorder.count("confirm"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_at_most_one_session() {
    let d = dashboard();
    let mut flows = Vec::new();

    for title in ["One", "Two", "Three"] {
        flows.push(spawn_counting_flow(
            &d.coordinator,
            title,
            Arc::new(AtomicUsize::new(0)),
            false,
            None,
        ));
        settle().await;
        assert_eq!(d.host.session().unwrap().title(), title);
    }

    // One dismissal closes the single visible dialog and cancels every waiting flow
    d.host.dismiss();
    for flow in flows {
        assert_eq!(flow.await.unwrap(), FlowOutcome::Canceled);
    }
    assert_eq!(d.recorder.count("is_open:true"), 1);
    assert_eq!(d.recorder.count("is_open:false"), 1);
    assert_eq!(d.host.session().unwrap().title(), "Three");
}

#[tokio::test(start_paused = true)]
async fn test_every_flow_closes_exactly_once() {
    let d = dashboard();

    // Confirmed: the host never publishes close itself
    let flow = spawn_counting_flow(&d.coordinator, "Ok", Arc::new(AtomicUsize::new(0)), false, None);
    settle().await;
    d.host.confirm().unwrap();
    flow.await.unwrap();
    assert_eq!(d.recorder.count("close"), 1);

    d.recorder.clear();
    let flow = spawn_counting_flow(&d.coordinator, "Err", Arc::new(AtomicUsize::new(0)), true, None);
    settle().await;
    d.host.confirm().unwrap();
    flow.await.unwrap();
    assert_eq!(d.recorder.count("close"), 1);

    // Canceled: one close from the dismissal, one from the flow
    d.recorder.clear();
    let flow = spawn_counting_flow(&d.coordinator, "Cancel", Arc::new(AtomicUsize::new(0)), false, None);
    settle().await;
    d.host.dismiss();
    flow.await.unwrap();
    assert_eq!(d.recorder.count("close"), 2);

    // Finished flows leave only the recorder and the host subscribed
    assert_eq!(d.bus.confirm.subscriber_count(), 1);
    assert_eq!(d.bus.close.subscriber_count(), 2);
}
