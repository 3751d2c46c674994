// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Topology lookup: resolves user-selected gNB references to CM handles.

use crate::error::AdapterError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Configuration-management handle for one gNB, assigned by the topology
/// service (opaque hex string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CmHandle(pub SmolStr);

impl CmHandle {
    pub fn new(handle: impl Into<SmolStr>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CmHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// User-facing reference to a gNB node, as entered at selection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRef {
    pub gnb_name: String,
    pub gnb_id: u64,
}

/// Fully resolved gNB with its CM handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gnbdu {
    pub gnb_name: String,
    pub gnb_id: u64,
    pub gnb_cm_handle: CmHandle,
}

/// Result of a resolve call. Unresolvable nodes are reported, not fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOutcome {
    pub resolved: Vec<Gnbdu>,
    pub unresolved: Vec<NodeRef>,
}

#[async_trait]
pub trait TopologyService: Send + Sync {
    async fn resolve(&self, nodes: &[NodeRef]) -> Result<ResolveOutcome, AdapterError>;
}
