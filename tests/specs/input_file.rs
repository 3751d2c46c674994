//! Input-file flow specs
//!
//! The whole flow input arrives as one JSON document and the run is
//! non-interactive: a rejected schedule cannot be corrected and fails the
//! execution outright.

use crate::prelude::*;
use ranflow_engine::{FlowInput, GateAnswer};

const VALID_INPUT: &str = r#"{
    "nodes": [
        { "gnbName": "gnb-1", "gnbId": 1 },
        { "gnbName": "gnb-2", "gnbId": 2 }
    ],
    "schedule": {
        "start": "immediately",
        "recurrence": {
            "recurring": {
                "pattern": "daily",
                "stop": { "after_occurrences": 2 }
            }
        }
    },
    "applyPolicy": "auto_apply"
}"#;

const NO_END_INPUT: &str = r#"{
    "nodes": [{ "gnbName": "gnb-1", "gnbId": 1 }],
    "schedule": {
        "start": "immediately",
        "recurrence": { "recurring": { "pattern": "hourly", "stop": "no_end" } }
    },
    "applyPolicy": "require_confirmation"
}"#;

#[tokio::test]
async fn valid_input_file_runs_to_completion() {
    let world = World::new();
    let exec = world.execution();
    let handle = exec.handle();
    let input: FlowInput = serde_json::from_str(VALID_INPUT).unwrap();
    let run = tokio::spawn(exec.run_noninteractive(input));

    resolve(&handle, TASK_VISUALIZE_TRIGGER_UE, GateAnswer::Acknowledged).await;
    resolve(&handle, TASK_RESULTS_CONFIGURATION, GateAnswer::YesNo(false)).await;
    let report = run.await.unwrap().unwrap();

    assert_eq!(report.header.status, ExecutionStatus::Completed);
    assert_eq!(world.deployment.applied().len(), 2);

    // Report JSON carries the camelCase header contract.
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["header"]["status"], "COMPLETED");
    assert!(json["header"]["startTime"].is_u64());
    assert!(json["header"]["endTime"].is_u64());
    assert!(json["events"][0]["timestamp"].is_u64());
    assert_eq!(json["events"][0]["severity"], "INFO");
}

#[tokio::test]
async fn no_end_schedule_fails_the_run() {
    let world = World::new();
    let exec = world.execution();
    let input: FlowInput = serde_json::from_str(NO_END_INPUT).unwrap();
    let report = exec.run_noninteractive(input).await.unwrap();

    assert_eq!(report.header.status, ExecutionStatus::Failed);
    assert_eq!(
        report.summary.as_deref(),
        Some("Recurrence without end date is not supported")
    );
    let event = report
        .find(Severity::Error, "Recurrence without end date is not supported")
        .unwrap();
    assert_eq!(event.step.as_deref(), Some(STEP_VALIDATE_SCHEDULE));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["header"]["status"], "FAILED");
    assert!(world.deployment.applied().is_empty());
}
