// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The execution orchestrator.
//!
//! One [`Execution`] drives one workflow instance end to end: schedule
//! acceptance, topology setup, the recurring optimization cycle with its
//! human gates, and graceful stop. All suspension points are cooperative
//! (clock sleeps, status-poll backoff, gate channels), so an execution is a
//! single logical task and independent executions share nothing.
//!
//! Stop requests arrive on a side channel and are honored at the top of the
//! scheduling loop, during schedule and poll waits, and while any gate is
//! pending. A stop request always raises the confirm-stop gate first; a
//! declined stop leaves the state machine exactly where it was, including a
//! preempted pending gate.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::gate::{GateAnswer, GateError, GateHub, GateSchema};
use ranflow_adapters::{
    AdapterError, CmHandle, DeploymentService, Gnbdu, LinkConstraints, MeasurementService,
    NodeRef, OptimizationJobId, OptimizationService, OptimizationStatus, TopologyService,
};
use ranflow_core::messages::{
    handle_not_found, node_not_resolved, occurrence_prefix, MSG_ACCEPTED_CONFIGURATION,
    MSG_APPLYING_AUTO_CONFIGURATION, MSG_CONNECTION_ESTABLISHED, MSG_DROPPED_CONFIGURATION,
    MSG_END_DATE_PASSED, MSG_NO_NODES_RESOLVED, MSG_OPTIMIZATION_FINISHED,
    MSG_OPTIMIZATION_ID_ASSIGNED, MSG_OPTIMIZATION_STARTED, MSG_RECEIVED_CONFIGURATION,
    MSG_SENT_CONFIGURATION, MSG_STOP_OPTIMIZATION_ACK, MSG_STOP_SERVICES_START,
    MSG_STOP_SERVICES_SUCCESS, MSG_UE_MEASUREMENT_TRIGGERED, STEP_ASSIGN_OPTIMIZATION_ID,
    STEP_DEPLOYMENT, STEP_OPTIMIZATION, STEP_START_OPTIMIZATION, STEP_STOP_EXTERNAL_SERVICES,
    STEP_TRIGGER_UE_MEASUREMENT, STEP_VALIDATE_SCHEDULE, SUMMARY_DEPLOYMENT_FINISHED,
    SUMMARY_OCCURRENCES_COMPLETED, SUMMARY_STOPPED_GRACEFULLY, TASK_CONFIRM_CONFIGURATION,
    TASK_CONFIRM_STOP, TASK_RESULTS_CONFIGURATION, TASK_VISUALIZE_TRIGGER_UE,
};
use ranflow_core::{
    validate, ApplyPolicy, Clock, EventLog, ExecutionEvent, ExecutionId, ExecutionReport,
    ExecutionStatus, NextAction, OccurrenceClock, ScheduleSpec, Severity,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::Instrument;

/// The external collaborators an execution runs against.
#[derive(Clone)]
pub struct Services {
    pub topology: Arc<dyn TopologyService>,
    pub measurement: Arc<dyn MeasurementService>,
    pub optimization: Arc<dyn OptimizationService>,
    pub deployment: Arc<dyn DeploymentService>,
}

/// Complete flow input for non-interactive (file-fed) runs: node selection,
/// link constraints, schedule and initial apply policy in one document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowInput {
    pub nodes: Vec<NodeRef>,
    #[serde(default)]
    pub constraints: LinkConstraints,
    pub schedule: ScheduleSpec,
    pub apply_policy: ApplyPolicy,
}

/// Clone-side of an execution: resolves gates and requests stop while the
/// execution itself runs elsewhere.
#[derive(Clone)]
pub struct ExecutionHandle {
    id: ExecutionId,
    gates: GateHub,
    stop_tx: mpsc::Sender<()>,
}

impl ExecutionHandle {
    pub fn id(&self) -> &ExecutionId {
        &self.id
    }

    pub fn resolve(&self, task: &str, answer: GateAnswer) -> Result<(), GateError> {
        self.gates.resolve(task, answer)
    }

    pub fn active_task(&self) -> Option<String> {
        self.gates.active_task()
    }

    pub async fn wait_for(&self, task: &str) {
        self.gates.wait_for(task).await;
    }

    /// Request a graceful stop. The execution raises the confirm-stop gate
    /// at its next suspension point; nothing happens until that gate is
    /// answered Yes.
    pub fn request_stop(&self) {
        // Capacity 1; a second request while one is queued is the same request.
        let _ = self.stop_tx.try_send(());
    }
}

/// What a select against the stop channel woke up for.
enum Woke<T> {
    Ready(T),
    StopRequested,
}

/// How one occurrence cycle ended.
enum CycleOutcome {
    Done,
    /// A collaborator failed; the cycle was abandoned but the execution
    /// keeps running.
    Abandoned,
    StopConfirmed,
}

/// What the scheduling loop should do after a checkpoint.
enum Flow {
    Continue,
    StopConfirmed,
}

pub struct Execution<C: Clock> {
    id: ExecutionId,
    clock: C,
    config: EngineConfig,
    services: Services,
    nodes: Vec<NodeRef>,
    constraints: LinkConstraints,
    gates: GateHub,
    stop_tx: mpsc::Sender<()>,
    stop_rx: mpsc::Receiver<()>,
    log: EventLog,
    status: ExecutionStatus,
    summary: Option<String>,
    started_at_ms: u64,
    ended_at_ms: Option<u64>,
    apply_policy: ApplyPolicy,
    occurrences: Option<OccurrenceClock>,
    job_id: Option<OptimizationJobId>,
}

impl<C: Clock> Execution<C> {
    pub fn new(
        clock: C,
        config: EngineConfig,
        services: Services,
        nodes: Vec<NodeRef>,
        constraints: LinkConstraints,
    ) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel(1);
        let started_at_ms = clock.epoch_ms();
        Self {
            id: ExecutionId::new(),
            clock,
            config,
            services,
            nodes,
            constraints,
            gates: GateHub::new(),
            stop_tx,
            stop_rx,
            log: EventLog::new(),
            status: ExecutionStatus::Active,
            summary: None,
            started_at_ms,
            ended_at_ms: None,
            apply_policy: ApplyPolicy::AutoApply,
            occurrences: None,
            job_id: None,
        }
    }

    pub fn id(&self) -> &ExecutionId {
        &self.id
    }

    pub fn handle(&self) -> ExecutionHandle {
        ExecutionHandle {
            id: self.id.clone(),
            gates: self.gates.clone(),
            stop_tx: self.stop_tx.clone(),
        }
    }

    /// Current report: header plus the full timeline. Derived fresh on every
    /// call, so it always reflects the latest recorded state.
    pub fn report(&self) -> ExecutionReport {
        ExecutionReport::build(
            &self.log,
            self.started_at_ms,
            self.ended_at_ms,
            self.status,
            self.summary.clone(),
        )
    }

    /// Accept (or reject) a submitted schedule.
    ///
    /// Rejection records the exact validation message as an ERROR event at
    /// the validate step and leaves the execution ACTIVE: the schedule may
    /// be corrected and resubmitted. Acceptance arms the occurrence clock
    /// and fixes the initial apply policy; the schedule itself is immutable
    /// from then on.
    pub fn submit_schedule(
        &mut self,
        spec: &ScheduleSpec,
        policy: ApplyPolicy,
    ) -> Result<(), EngineError> {
        let now_ms = self.clock.epoch_ms();
        match validate(spec, &self.config.schedule, now_ms) {
            Ok(schedule) => {
                tracing::info!(id = %self.id, ?policy, "schedule accepted");
                self.occurrences = Some(OccurrenceClock::new(schedule));
                self.apply_policy = policy;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(id = %self.id, %err, "schedule rejected");
                self.record_error(Some(STEP_VALIDATE_SCHEDULE), err.to_string());
                Err(EngineError::ScheduleNotAccepted(err))
            }
        }
    }

    /// Drive the execution to a terminal state and return the final report.
    pub async fn run(self) -> Result<ExecutionReport, EngineError> {
        let span = tracing::info_span!("execution", id = %self.id);
        self.run_inner().instrument(span).await
    }

    /// File-fed mode: the complete flow input arrives in one document, with
    /// no opportunity to correct a rejected schedule. Validation failure
    /// terminates the execution FAILED with the validation message as the
    /// report summary.
    pub async fn run_noninteractive(
        mut self,
        input: FlowInput,
    ) -> Result<ExecutionReport, EngineError> {
        self.nodes = input.nodes;
        self.constraints = input.constraints;
        match self.submit_schedule(&input.schedule, input.apply_policy) {
            Ok(()) => self.run().await,
            Err(EngineError::ScheduleNotAccepted(err)) => {
                self.finish(ExecutionStatus::Failed, err.to_string());
                Ok(self.report())
            }
            Err(err) => Err(err),
        }
    }

    async fn run_inner(mut self) -> Result<ExecutionReport, EngineError> {
        let Some(mut occurrences) = self.occurrences.take() else {
            return Err(EngineError::NotScheduled);
        };

        // Setup: resolve the selected nodes and let the operator inspect the
        // topology before any measurement is triggered.
        let selected = match self.services.topology.resolve(&self.nodes).await {
            Ok(outcome) => {
                for node in &outcome.unresolved {
                    self.record_error(None, node_not_resolved(&node.gnb_name));
                }
                outcome.resolved
            }
            Err(err) => {
                self.record_error(None, err.to_string());
                self.finish(ExecutionStatus::Failed, err.to_string());
                return Ok(self.report());
            }
        };
        if selected.is_empty() {
            self.record_error(None, MSG_NO_NODES_RESOLVED);
            self.finish(ExecutionStatus::Failed, MSG_NO_NODES_RESOLVED);
            return Ok(self.report());
        }
        self.record_info(None, MSG_CONNECTION_ESTABLISHED);

        // Offered exactly once per execution.
        match self
            .await_gate(TASK_VISUALIZE_TRIGGER_UE, GateSchema::Acknowledge)
            .await?
        {
            Woke::StopRequested => {
                self.shutdown().await;
                return Ok(self.report());
            }
            Woke::Ready(_) => {}
        }

        loop {
            if let Flow::StopConfirmed = self.stop_checkpoint().await? {
                self.shutdown().await;
                return Ok(self.report());
            }

            let now_ms = self.clock.epoch_ms();
            match occurrences.next_action(now_ms) {
                NextAction::WaitUntil(due_ms) => {
                    let wait = Duration::from_millis(due_ms.saturating_sub(now_ms));
                    if let Woke::StopRequested = self.sleep_or_stop(wait).await {
                        if self.confirm_stop().await? {
                            self.shutdown().await;
                            return Ok(self.report());
                        }
                    }
                }
                NextAction::EndReached => {
                    if occurrences.completed() == 0 {
                        // The whole window elapsed before anything ran: no
                        // optimization is ever created.
                        self.record_info(None, MSG_END_DATE_PASSED);
                        self.finish(ExecutionStatus::Completed, MSG_END_DATE_PASSED);
                    } else {
                        self.finish(ExecutionStatus::Completed, SUMMARY_DEPLOYMENT_FINISHED);
                    }
                    return Ok(self.report());
                }
                NextAction::OccurrencesExhausted => {
                    self.finish(ExecutionStatus::Completed, SUMMARY_OCCURRENCES_COMPLETED);
                    return Ok(self.report());
                }
                NextAction::RunOccurrence => {
                    let occurrence = occurrences.occurrence();
                    match self.run_cycle(occurrence, &selected).await? {
                        CycleOutcome::StopConfirmed => {
                            self.shutdown().await;
                            return Ok(self.report());
                        }
                        // Abandoned cycles still consume their occurrence.
                        CycleOutcome::Done | CycleOutcome::Abandoned => {
                            occurrences.complete_occurrence();
                        }
                    }
                    if occurrence % 2 == 1 && occurrences.will_recur(self.clock.epoch_ms()) {
                        if let Flow::StopConfirmed = self.offer_policy_gate().await? {
                            self.shutdown().await;
                            return Ok(self.report());
                        }
                    }
                }
            }
        }
    }

    /// One optimization cycle. Collaborator failures are recorded as ERROR
    /// events and abandon this cycle only.
    async fn run_cycle(
        &mut self,
        occurrence: u32,
        selected: &[Gnbdu],
    ) -> Result<CycleOutcome, EngineError> {
        let prefix = occurrence_prefix(occurrence);
        tracing::info!(occurrence, "cycle started");

        let handles: Vec<CmHandle> =
            selected.iter().map(|g| g.gnb_cm_handle.clone()).collect();
        let outcome = match self.services.measurement.trigger(&handles).await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.record_error(Some(STEP_TRIGGER_UE_MEASUREMENT), format!("{prefix}{err}"));
                return Ok(CycleOutcome::Abandoned);
            }
        };
        for handle in &outcome.not_found {
            self.record_error(
                Some(STEP_TRIGGER_UE_MEASUREMENT),
                format!("{prefix}{}", handle_not_found(handle.as_str())),
            );
        }
        self.record_info(
            Some(STEP_TRIGGER_UE_MEASUREMENT),
            format!("{prefix}{MSG_UE_MEASUREMENT_TRIGGERED}"),
        );

        // One optimization job per execution, created lazily on the first
        // cycle that gets this far and reused afterwards.
        if self.job_id.is_none() {
            match self
                .services
                .optimization
                .create(selected, &self.constraints)
                .await
            {
                Ok(job_id) => {
                    self.record_info(
                        Some(STEP_ASSIGN_OPTIMIZATION_ID),
                        format!("{prefix}{MSG_OPTIMIZATION_ID_ASSIGNED}"),
                    );
                    self.job_id = Some(job_id);
                }
                Err(err) => {
                    self.record_error(
                        Some(STEP_ASSIGN_OPTIMIZATION_ID),
                        format!("{prefix}{err}"),
                    );
                    return Ok(CycleOutcome::Abandoned);
                }
            }
        }
        let Some(job_id) = self.job_id.clone() else {
            return Ok(CycleOutcome::Abandoned);
        };

        if let Err(err) = self.services.optimization.start(&job_id).await {
            self.record_error(Some(STEP_START_OPTIMIZATION), format!("{prefix}{err}"));
            return Ok(CycleOutcome::Abandoned);
        }
        self.record_info(
            Some(STEP_START_OPTIMIZATION),
            format!("{prefix}{MSG_OPTIMIZATION_STARTED}"),
        );

        let result = match self.poll_optimization(&job_id, &prefix).await? {
            Woke::StopRequested => return Ok(CycleOutcome::StopConfirmed),
            Woke::Ready(Some(result)) => result,
            Woke::Ready(None) => return Ok(CycleOutcome::Abandoned),
        };
        self.record_info(
            Some(STEP_OPTIMIZATION),
            format!("{prefix}{MSG_OPTIMIZATION_FINISHED}"),
        );

        match self.apply_policy {
            ApplyPolicy::AutoApply => {
                self.record_info(
                    Some(STEP_DEPLOYMENT),
                    format!("{prefix}{MSG_APPLYING_AUTO_CONFIGURATION}"),
                );
            }
            ApplyPolicy::RequireConfirmation => {
                let accepted = match self
                    .await_gate(TASK_CONFIRM_CONFIGURATION, GateSchema::YesNo)
                    .await?
                {
                    Woke::StopRequested => return Ok(CycleOutcome::StopConfirmed),
                    Woke::Ready(answer) => matches!(answer, GateAnswer::YesNo(true)),
                };
                if !accepted {
                    self.record_info(
                        Some(STEP_DEPLOYMENT),
                        format!("{prefix}{MSG_DROPPED_CONFIGURATION}"),
                    );
                    return Ok(CycleOutcome::Done);
                }
                self.record_info(
                    Some(STEP_DEPLOYMENT),
                    format!("{prefix}{MSG_ACCEPTED_CONFIGURATION}"),
                );
            }
        }

        if let Err(err) = self.services.deployment.apply(&result.configuration).await {
            self.record_error(Some(STEP_DEPLOYMENT), format!("{prefix}{err}"));
            return Ok(CycleOutcome::Abandoned);
        }
        self.record_info(
            Some(STEP_DEPLOYMENT),
            format!("{prefix}{MSG_SENT_CONFIGURATION}"),
        );
        self.record_info(
            Some(STEP_DEPLOYMENT),
            format!("{prefix}{MSG_RECEIVED_CONFIGURATION}"),
        );

        Ok(CycleOutcome::Done)
    }

    /// Poll the optimization job with bounded exponential backoff.
    ///
    /// `Ready(Some)` is the finished result; `Ready(None)` means the cycle
    /// should be abandoned (poll error or budget exhausted, already
    /// recorded).
    async fn poll_optimization(
        &mut self,
        job_id: &OptimizationJobId,
        prefix: &str,
    ) -> Result<Woke<Option<ranflow_adapters::OptimizationResult>>, EngineError> {
        let mut delay_ms = self.config.poll_initial_ms;
        for _attempt in 0..self.config.poll_max_attempts {
            match self.services.optimization.status(job_id).await {
                Ok(OptimizationStatus::Finished(result)) => {
                    return Ok(Woke::Ready(Some(result)));
                }
                Ok(OptimizationStatus::InProgress) => {}
                Err(err) => {
                    self.record_error(Some(STEP_OPTIMIZATION), format!("{prefix}{err}"));
                    return Ok(Woke::Ready(None));
                }
            }
            if let Woke::StopRequested = self.sleep_or_stop(Duration::from_millis(delay_ms)).await
            {
                if self.confirm_stop().await? {
                    return Ok(Woke::StopRequested);
                }
            }
            delay_ms = (delay_ms * 2).min(self.config.poll_max_ms);
        }
        let timeout = AdapterError::PollTimeout { attempts: self.config.poll_max_attempts };
        self.record_error(Some(STEP_OPTIMIZATION), format!("{prefix}{timeout}"));
        Ok(Woke::Ready(None))
    }

    /// Offer the results-configuration gate; answering Yes flips the apply
    /// policy for subsequent occurrences.
    async fn offer_policy_gate(&mut self) -> Result<Flow, EngineError> {
        match self
            .await_gate(TASK_RESULTS_CONFIGURATION, GateSchema::YesNo)
            .await?
        {
            Woke::StopRequested => Ok(Flow::StopConfirmed),
            Woke::Ready(GateAnswer::YesNo(true)) => {
                self.apply_policy = match self.apply_policy {
                    ApplyPolicy::AutoApply => ApplyPolicy::RequireConfirmation,
                    ApplyPolicy::RequireConfirmation => ApplyPolicy::AutoApply,
                };
                tracing::info!(policy = ?self.apply_policy, "apply policy changed");
                Ok(Flow::Continue)
            }
            Woke::Ready(_) => Ok(Flow::Continue),
        }
    }

    /// Register a gate and await its answer, yielding to a stop request.
    ///
    /// A stop request preempts the pending gate while the confirm-stop gate
    /// is up; if the stop is declined the original gate is restored intact
    /// and the wait resumes.
    async fn await_gate(
        &mut self,
        task: &str,
        schema: GateSchema,
    ) -> Result<Woke<GateAnswer>, EngineError> {
        let mut rx = self.gates.register(task, schema);
        loop {
            let woke = tokio::select! {
                answer = &mut rx => Woke::Ready(answer),
                _ = self.stop_rx.recv() => Woke::StopRequested,
            };
            match woke {
                Woke::Ready(answer) => {
                    let answer = answer.map_err(|_| EngineError::GateClosed {
                        task: task.to_string(),
                    })?;
                    return Ok(Woke::Ready(answer));
                }
                Woke::StopRequested => {
                    let preempted = self.gates.take_pending();
                    if self.confirm_stop().await? {
                        return Ok(Woke::StopRequested);
                    }
                    if let Some(pending) = preempted {
                        self.gates.restore(pending);
                    }
                }
            }
        }
    }

    /// Non-blocking stop check for loop-top checkpoints.
    async fn stop_checkpoint(&mut self) -> Result<Flow, EngineError> {
        if self.stop_rx.try_recv().is_err() {
            return Ok(Flow::Continue);
        }
        if self.confirm_stop().await? {
            Ok(Flow::StopConfirmed)
        } else {
            Ok(Flow::Continue)
        }
    }

    /// Sleep cooperatively, waking early on a stop request.
    async fn sleep_or_stop(&mut self, duration: Duration) -> Woke<()> {
        let clock = self.clock.clone();
        tokio::select! {
            () = clock.sleep(duration) => Woke::Ready(()),
            _ = self.stop_rx.recv() => Woke::StopRequested,
        }
    }

    /// Raise the confirm-stop gate and await the decision.
    async fn confirm_stop(&mut self) -> Result<bool, EngineError> {
        tracing::info!("stop requested, awaiting confirmation");
        let rx = self.gates.register(TASK_CONFIRM_STOP, GateSchema::YesNo);
        let answer = rx.await.map_err(|_| EngineError::GateClosed {
            task: TASK_CONFIRM_STOP.to_string(),
        })?;
        Ok(matches!(answer, GateAnswer::YesNo(true)))
    }

    /// Graceful-stop shutdown sequence. Collaborator errors are recorded but
    /// never prevent the execution from completing.
    async fn shutdown(&mut self) {
        self.record_info(Some(STEP_STOP_EXTERNAL_SERVICES), MSG_STOP_SERVICES_START);
        if let Some(job_id) = self.job_id.clone() {
            match self.services.optimization.stop(&job_id).await {
                Ok(()) => {
                    self.record_info(Some(STEP_STOP_EXTERNAL_SERVICES), MSG_STOP_OPTIMIZATION_ACK);
                }
                Err(err) => {
                    self.record_error(Some(STEP_STOP_EXTERNAL_SERVICES), err.to_string());
                }
            }
        }
        self.record_info(Some(STEP_STOP_EXTERNAL_SERVICES), MSG_STOP_SERVICES_SUCCESS);
        self.finish(ExecutionStatus::Completed, SUMMARY_STOPPED_GRACEFULLY);
    }

    fn finish(&mut self, status: ExecutionStatus, summary: impl Into<String>) {
        self.status = status;
        self.summary = Some(summary.into());
        self.ended_at_ms = Some(self.clock.epoch_ms());
        tracing::info!(status = %self.status, "execution finished");
    }

    fn record_info(&mut self, step: Option<&str>, message: impl Into<String>) {
        self.record(Severity::Info, step, message.into());
    }

    fn record_error(&mut self, step: Option<&str>, message: impl Into<String>) {
        self.record(Severity::Error, step, message.into());
    }

    fn record(&mut self, severity: Severity, step: Option<&str>, message: String) {
        self.log.record(ExecutionEvent {
            severity,
            message,
            step: step.map(str::to_string),
            at_ms: self.clock.epoch_ms(),
        });
    }
}

#[cfg(test)]
#[path = "execution_tests.rs"]
mod tests;
