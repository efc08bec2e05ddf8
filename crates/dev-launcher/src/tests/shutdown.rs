//! Interrupt-driven shutdown and the failure paths.

use super::harness::{
    broken_interrupt, full_project, interrupt_after, launcher, no_interrupt, FakeSpawner,
};
use crate::launcher::{run_guarded, LaunchOutcome};
use dev_process_manager::BufferSink;
use project_layout::ServiceRole;
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn interrupt_terminates_both_children_once() {
    let project = full_project();
    let spawner = FakeSpawner::new();
    let sink = BufferSink::new();

    let outcome = launcher(&spawner, &sink)
        .run(project.path(), interrupt_after(5000))
        .await;

    assert_eq!(outcome, LaunchOutcome::Stopped);
    assert_eq!(spawner.termination_count(ServiceRole::Frontend), 1);
    assert_eq!(spawner.termination_count(ServiceRole::Backend), 1);

    let stopping = sink.position("Stopping services...").unwrap();
    let stopped = sink.position("Services stopped.").unwrap();
    assert!(stopping < stopped);
}

#[tokio::test(start_paused = true)]
async fn interrupt_during_stagger_never_spawns_backend() {
    let project = full_project();
    let spawner = FakeSpawner::new();
    let sink = BufferSink::new();

    let started = Instant::now();
    let outcome = launcher(&spawner, &sink)
        .run(project.path(), interrupt_after(1000))
        .await;
    let elapsed = started.elapsed().as_millis();

    assert_eq!(outcome, LaunchOutcome::Stopped);
    assert_eq!(spawner.spawned_roles(), vec![ServiceRole::Frontend]);
    assert_eq!(spawner.terminations(), vec![ServiceRole::Frontend]);
    assert!(!sink.contains("SERVICES RUNNING"));
    assert!(
        (1500..1600).contains(&elapsed),
        "exited after {}ms",
        elapsed
    );
}

#[tokio::test(start_paused = true)]
async fn repeated_shutdown_requests_are_ignored() {
    let project = full_project();
    let spawner = FakeSpawner::new();
    let sink = BufferSink::new();
    let launcher = launcher(&spawner, &sink);
    let signal = launcher.shutdown_signal();

    let triggers = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(4000)).await;
        let first = signal.trigger();
        tokio::time::sleep(Duration::from_millis(100)).await;
        (first, signal.trigger(), signal.trigger())
    });

    let outcome = launcher.run(project.path(), interrupt_after(4200)).await;

    assert_eq!(outcome, LaunchOutcome::Stopped);
    assert_eq!(triggers.await.unwrap(), (true, false, false));
    assert_eq!(spawner.termination_count(ServiceRole::Frontend), 1);
    assert_eq!(spawner.termination_count(ServiceRole::Backend), 1);
    let confirmations = sink
        .stdout_lines()
        .iter()
        .filter(|line| line.contains("Services stopped."))
        .count();
    assert_eq!(confirmations, 1);
}

#[tokio::test(start_paused = true)]
async fn broken_interrupt_handler_fails_the_run() {
    let project = full_project();
    let spawner = FakeSpawner::new();
    let sink = BufferSink::new();

    let outcome = launcher(&spawner, &sink)
        .run(project.path(), broken_interrupt())
        .await;

    assert_eq!(outcome, LaunchOutcome::Failed);
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(spawner.terminations(), vec![ServiceRole::Frontend]);
    assert!(sink.contains("Uncaught error"));
    assert!(sink.contains("signal driver unavailable"));
    assert!(!sink.contains("Services stopped."));
}

#[tokio::test(start_paused = true)]
async fn panic_terminates_held_children() {
    let project = full_project();
    let spawner = FakeSpawner::new();
    spawner.panic_on(ServiceRole::Backend);
    let sink = BufferSink::new();

    let outcome = run_guarded(
        launcher(&spawner, &sink),
        project.path().to_path_buf(),
        no_interrupt(),
    )
    .await;

    assert_eq!(outcome, LaunchOutcome::Failed);
    assert_eq!(spawner.terminations(), vec![ServiceRole::Frontend]);
    assert!(sink
        .stderr_lines()
        .iter()
        .any(|line| line.contains("Uncaught error") && line.contains("panicked")));
}

#[tokio::test(start_paused = true)]
async fn run_guarded_passes_through_normal_outcome() {
    let project = full_project();
    let spawner = FakeSpawner::new();
    let sink = BufferSink::new();

    let outcome = run_guarded(
        launcher(&spawner, &sink),
        project.path().to_path_buf(),
        interrupt_after(3000),
    )
    .await;

    assert_eq!(outcome, LaunchOutcome::Stopped);
    assert_eq!(spawner.terminations().len(), 2);
}
