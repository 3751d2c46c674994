//! Interactive flow specs
//!
//! An operator selects nodes, submits a schedule, acknowledges the
//! visualization, and steers the flow through its gates.

use crate::prelude::*;
use ranflow_engine::GateAnswer;
use std::time::Duration;

#[tokio::test]
async fn recurring_flow_with_policy_flip_runs_to_completion() {
    let world = World::new();
    let mut exec = world.execution();
    let spec = ScheduleSpec {
        start: StartTime::Immediately,
        recurrence: Recurrence::Recurring {
            pattern: RecurrencePattern::Every30Seconds,
            stop: RecurrenceStop::AfterOccurrences(4),
        },
    };
    exec.submit_schedule(&spec, ApplyPolicy::AutoApply).unwrap();
    let handle = exec.handle();
    let run = tokio::spawn(exec.run());

    resolve(&handle, TASK_VISUALIZE_TRIGGER_UE, GateAnswer::Acknowledged).await;
    // Flip to manual confirmation after the first occurrence.
    resolve(&handle, TASK_RESULTS_CONFIGURATION, GateAnswer::YesNo(true)).await;
    resolve(&handle, TASK_CONFIRM_CONFIGURATION, GateAnswer::YesNo(true)).await;
    resolve(&handle, TASK_CONFIRM_CONFIGURATION, GateAnswer::YesNo(false)).await;
    // Decline a second flip; occurrence 4 still asks.
    resolve(&handle, TASK_RESULTS_CONFIGURATION, GateAnswer::YesNo(false)).await;
    resolve(&handle, TASK_CONFIRM_CONFIGURATION, GateAnswer::YesNo(true)).await;
    let report = run.await.unwrap().unwrap();

    assert_eq!(report.header.status, ExecutionStatus::Completed);
    assert_eq!(report.summary.as_deref(), Some(SUMMARY_OCCURRENCES_COMPLETED));
    // Occurrences 1 (auto), 2 (accepted) and 4 (accepted) deployed; 3 dropped.
    assert_eq!(world.deployment.applied().len(), 3);
    assert!(report
        .find(Severity::Info, &format!("{}{MSG_DROPPED_CONFIGURATION}", occurrence_prefix(3)))
        .is_some());
    // One optimization job across all four occurrences.
    assert_eq!(world.optimization.create_calls(), 1);
    assert_eq!(world.optimization.start_calls(), 4);
    assert_eq!(world.measurement.trigger_calls(), 4);
}

#[tokio::test]
async fn graceful_stop_mid_flow_reports_stopped_summary() {
    let world = World::new();
    let mut exec = world.execution();
    let spec = ScheduleSpec {
        start: StartTime::Immediately,
        recurrence: Recurrence::Recurring {
            pattern: RecurrencePattern::Daily,
            stop: RecurrenceStop::AfterOccurrences(14),
        },
    };
    exec.submit_schedule(&spec, ApplyPolicy::RequireConfirmation).unwrap();
    let handle = exec.handle();
    let run = tokio::spawn(exec.run());

    resolve(&handle, TASK_VISUALIZE_TRIGGER_UE, GateAnswer::Acknowledged).await;
    handle.wait_for(TASK_CONFIRM_CONFIGURATION).await;
    handle.request_stop();
    resolve(&handle, TASK_CONFIRM_STOP, GateAnswer::YesNo(true)).await;
    let report = run.await.unwrap().unwrap();

    assert_eq!(report.header.status, ExecutionStatus::Completed);
    assert_eq!(report.summary.as_deref(), Some(SUMMARY_STOPPED_GRACEFULLY));
    assert_eq!(world.optimization.stop_calls(), 1);
    assert!(world.deployment.applied().is_empty());
}

#[tokio::test]
async fn window_closing_during_visualization_ends_without_optimizing() {
    let world = World::new();
    let mut exec = world.execution();
    let spec = ScheduleSpec {
        start: StartTime::Immediately,
        recurrence: Recurrence::Recurring {
            pattern: RecurrencePattern::Every30Seconds,
            stop: RecurrenceStop::EndBy(world.clock.epoch_ms() + 20_000),
        },
    };
    exec.submit_schedule(&spec, ApplyPolicy::AutoApply).unwrap();
    let handle = exec.handle();
    let run = tokio::spawn(exec.run());

    handle.wait_for(TASK_VISUALIZE_TRIGGER_UE).await;
    world.clock.advance(Duration::from_secs(60));
    handle
        .resolve(TASK_VISUALIZE_TRIGGER_UE, GateAnswer::Acknowledged)
        .unwrap();
    let report = run.await.unwrap().unwrap();

    assert_eq!(report.header.status, ExecutionStatus::Completed);
    assert_eq!(report.summary.as_deref(), Some(MSG_END_DATE_PASSED));
    assert_eq!(world.optimization.create_calls(), 0);
}
