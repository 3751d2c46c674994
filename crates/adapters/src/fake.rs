// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted in-memory fakes for the collaborator traits.
//!
//! Each fake records its calls and can be told to fail the next operation,
//! which is how engine tests exercise cycle-local error handling.

use crate::deployment::DeploymentService;
use crate::error::AdapterError;
use crate::measurement::{MeasurementOutcome, MeasurementService};
use crate::optimization::{
    Configuration, LinkConstraints, OptimizationJobId, OptimizationResult, OptimizationService,
    OptimizationStatus,
};
use crate::topology::{CmHandle, Gnbdu, NodeRef, ResolveOutcome, TopologyService};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Resolves references against a fixed set of known nodes.
#[derive(Clone, Default)]
pub struct FakeTopology {
    known: Arc<Mutex<Vec<Gnbdu>>>,
}

impl FakeTopology {
    pub fn with_nodes(nodes: Vec<Gnbdu>) -> Self {
        Self { known: Arc::new(Mutex::new(nodes)) }
    }
}

#[async_trait]
impl TopologyService for FakeTopology {
    async fn resolve(&self, nodes: &[NodeRef]) -> Result<ResolveOutcome, AdapterError> {
        let known = self.known.lock();
        let mut outcome = ResolveOutcome::default();
        for node in nodes {
            match known.iter().find(|g| g.gnb_id == node.gnb_id) {
                Some(g) => outcome.resolved.push(g.clone()),
                None => outcome.unresolved.push(node.clone()),
            }
        }
        Ok(outcome)
    }
}

#[derive(Default)]
struct MeasurementState {
    trigger_calls: u32,
    not_found: Vec<CmHandle>,
    fail_next: bool,
}

/// Accepts every handle unless told otherwise.
#[derive(Clone, Default)]
pub struct FakeMeasurement {
    state: Arc<Mutex<MeasurementState>>,
}

impl FakeMeasurement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles to report back as unknown on every trigger.
    pub fn report_not_found(&self, handles: Vec<CmHandle>) {
        self.state.lock().not_found = handles;
    }

    pub fn fail_next(&self) {
        self.state.lock().fail_next = true;
    }

    pub fn trigger_calls(&self) -> u32 {
        self.state.lock().trigger_calls
    }
}

#[async_trait]
impl MeasurementService for FakeMeasurement {
    async fn trigger(&self, handles: &[CmHandle]) -> Result<MeasurementOutcome, AdapterError> {
        let mut state = self.state.lock();
        state.trigger_calls += 1;
        if std::mem::take(&mut state.fail_next) {
            return Err(AdapterError::unavailable("measurement", "scripted failure"));
        }
        let not_found = state.not_found.clone();
        let enabled = handles
            .iter()
            .filter(|h| !not_found.contains(h))
            .cloned()
            .collect();
        Ok(MeasurementOutcome { enabled, not_found })
    }
}

#[derive(Default)]
struct OptimizationState {
    create_calls: u32,
    start_calls: u32,
    status_calls: u32,
    stop_calls: u32,
    polls_until_finished: u32,
    polls_remaining: u32,
    fail_next_start: bool,
    result: Configuration,
}

/// One job per create; finishes after a scripted number of status polls.
#[derive(Clone, Default)]
pub struct FakeOptimization {
    state: Arc<Mutex<OptimizationState>>,
}

impl FakeOptimization {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of InProgress polls before a started job reports Finished.
    pub fn finish_after_polls(&self, polls: u32) {
        let mut state = self.state.lock();
        state.polls_until_finished = polls;
        state.polls_remaining = polls;
    }

    pub fn with_result(&self, configuration: Configuration) {
        self.state.lock().result = configuration;
    }

    pub fn fail_next_start(&self) {
        self.state.lock().fail_next_start = true;
    }

    pub fn create_calls(&self) -> u32 {
        self.state.lock().create_calls
    }

    pub fn start_calls(&self) -> u32 {
        self.state.lock().start_calls
    }

    pub fn status_calls(&self) -> u32 {
        self.state.lock().status_calls
    }

    pub fn stop_calls(&self) -> u32 {
        self.state.lock().stop_calls
    }
}

#[async_trait]
impl OptimizationService for FakeOptimization {
    async fn create(
        &self,
        _selected: &[Gnbdu],
        _constraints: &LinkConstraints,
    ) -> Result<OptimizationJobId, AdapterError> {
        let mut state = self.state.lock();
        state.create_calls += 1;
        Ok(OptimizationJobId::new(format!("opt-{}", state.create_calls)))
    }

    async fn start(&self, _job: &OptimizationJobId) -> Result<(), AdapterError> {
        let mut state = self.state.lock();
        state.start_calls += 1;
        if std::mem::take(&mut state.fail_next_start) {
            return Err(AdapterError::unavailable("optimization", "scripted start failure"));
        }
        state.polls_remaining = state.polls_until_finished;
        Ok(())
    }

    async fn status(&self, _job: &OptimizationJobId) -> Result<OptimizationStatus, AdapterError> {
        let mut state = self.state.lock();
        state.status_calls += 1;
        if state.polls_remaining > 0 {
            state.polls_remaining -= 1;
            return Ok(OptimizationStatus::InProgress);
        }
        Ok(OptimizationStatus::Finished(OptimizationResult {
            configuration: state.result.clone(),
        }))
    }

    async fn stop(&self, _job: &OptimizationJobId) -> Result<(), AdapterError> {
        self.state.lock().stop_calls += 1;
        Ok(())
    }
}

#[derive(Default)]
struct DeploymentState {
    applied: Vec<Configuration>,
    fail_next: bool,
}

/// Records every applied configuration.
#[derive(Clone, Default)]
pub struct FakeDeployment {
    state: Arc<Mutex<DeploymentState>>,
}

impl FakeDeployment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self) {
        self.state.lock().fail_next = true;
    }

    pub fn applied(&self) -> Vec<Configuration> {
        self.state.lock().applied.clone()
    }
}

#[async_trait]
impl DeploymentService for FakeDeployment {
    async fn apply(&self, configuration: &Configuration) -> Result<(), AdapterError> {
        let mut state = self.state.lock();
        if std::mem::take(&mut state.fail_next) {
            return Err(AdapterError::unavailable("deployment", "scripted failure"));
        }
        state.applied.push(configuration.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
