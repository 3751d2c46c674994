// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message catalog for execution events and report summaries.
//!
//! Single source for every user-visible string the orchestrator records, so
//! tests assert against the same constants the engine emits. Step labels
//! group events in the report timeline; messages are the event bodies.

// Human task names (gates)
pub const TASK_VISUALIZE_TRIGGER_UE: &str = "Visualize gNB to Trigger UE Measurement";
pub const TASK_CONFIRM_CONFIGURATION: &str = "Confirm Configuration";
pub const TASK_RESULTS_CONFIGURATION: &str = "Optimization Results Configuration";
pub const TASK_CONFIRM_STOP: &str = "Confirm Stop Instance";

// Step labels
pub const STEP_VALIDATE_SCHEDULE: &str = "Validate Execution Schedule";
pub const STEP_TRIGGER_UE_MEASUREMENT: &str = "Trigger UE Measurement";
pub const STEP_ASSIGN_OPTIMIZATION_ID: &str = "Assign Optimization ID";
pub const STEP_START_OPTIMIZATION: &str = "Start Optimization";
pub const STEP_OPTIMIZATION: &str = "Optimization";
pub const STEP_DEPLOYMENT: &str = "Deployment";
pub const STEP_STOP_EXTERNAL_SERVICES: &str = "Stop External Services";

// Cycle events
pub const MSG_CONNECTION_ESTABLISHED: &str = "Connection to NCMP established";
pub const MSG_NO_NODES_RESOLVED: &str = "No gNB nodes could be resolved in topology";
pub const MSG_UE_MEASUREMENT_TRIGGERED: &str = "UE measurement initiation succeeded";
pub const MSG_OPTIMIZATION_ID_ASSIGNED: &str = "Optimization instance created successfully";
pub const MSG_OPTIMIZATION_STARTED: &str = "Optimization started successfully";
pub const MSG_OPTIMIZATION_FINISHED: &str = "Optimization finished";
pub const MSG_APPLYING_AUTO_CONFIGURATION: &str = "Applying optimization results automatically";
pub const MSG_ACCEPTED_CONFIGURATION: &str = "Configuration accepted by user";
pub const MSG_DROPPED_CONFIGURATION: &str = "Configuration dropped by user";
pub const MSG_SENT_CONFIGURATION: &str = "Configuration sent for deployment";
pub const MSG_RECEIVED_CONFIGURATION: &str = "Configuration received by deployment service";

// Termination
pub const MSG_END_DATE_PASSED: &str = "Schedule end date already passed before optimization start";
pub const MSG_STOP_SERVICES_START: &str = "Stopping external services";
pub const MSG_STOP_SERVICES_SUCCESS: &str = "External services stopped successfully";
pub const MSG_STOP_OPTIMIZATION_ACK: &str = "Optimization stop request acknowledged";
pub const SUMMARY_STOPPED_GRACEFULLY: &str = "Flow stopped gracefully";
pub const SUMMARY_DEPLOYMENT_FINISHED: &str = "Configuration deployment finished";
pub const SUMMARY_OCCURRENCES_COMPLETED: &str = "All scheduled occurrences completed";

/// Prefix carried by every per-occurrence event message.
pub fn occurrence_prefix(n: u32) -> String {
    format!("Occurrence number: {n}; ")
}

pub fn node_not_resolved(gnb_name: &str) -> String {
    format!("gNB not found in topology: {gnb_name}")
}

pub fn handle_not_found(cm_handle: &str) -> String {
    format!("CM handle not known by NCMP: {cm_handle}")
}
