// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ranflow-adapters: trait boundaries for the external collaborators the
//! orchestrator consumes (topology, measurement, optimization, deployment),
//! plus scripted fakes behind the `test-support` feature.

pub mod deployment;
pub mod error;
pub mod measurement;
pub mod optimization;
pub mod topology;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use deployment::DeploymentService;
pub use error::AdapterError;
pub use measurement::{MeasurementOutcome, MeasurementService};
pub use optimization::{
    BbLink, Configuration, LinkConstraints, LinkPair, OptimizationJobId, OptimizationResult,
    OptimizationService, OptimizationStatus,
};
pub use topology::{CmHandle, Gnbdu, NodeRef, ResolveOutcome, TopologyService};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeDeployment, FakeMeasurement, FakeOptimization, FakeTopology};
