// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Optimization job contract: an opaque computation with
//! create/start/poll-status/stop operations.

use crate::error::AdapterError;
use crate::topology::Gnbdu;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Identifier assigned by the optimization service at create time. One job
/// is created per execution and reused across all occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptimizationJobId(pub SmolStr);

impl OptimizationJobId {
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OptimizationJobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A directed baseband link between two gNBs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkPair {
    pub primary_gnb_id: u64,
    pub secondary_gnb_id: u64,
}

/// Link constraints the user selected during setup: pairs that must not be
/// linked, and pairs that must be.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConstraints {
    pub excluded: Vec<LinkPair>,
    pub mandatory: Vec<LinkPair>,
}

/// One proposed baseband pairing in an optimization result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BbLink {
    pub primary_gnb_id: u64,
    pub secondary_gnb_id: u64,
}

/// The configuration an optimization run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub bb_links: Vec<BbLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizationResult {
    pub configuration: Configuration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizationStatus {
    InProgress,
    Finished(OptimizationResult),
}

#[async_trait]
pub trait OptimizationService: Send + Sync {
    async fn create(
        &self,
        selected: &[Gnbdu],
        constraints: &LinkConstraints,
    ) -> Result<OptimizationJobId, AdapterError>;

    async fn start(&self, job: &OptimizationJobId) -> Result<(), AdapterError>;

    async fn status(&self, job: &OptimizationJobId) -> Result<OptimizationStatus, AdapterError>;

    async fn stop(&self, job: &OptimizationJobId) -> Result<(), AdapterError>;
}
