// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! UE coverage-measurement triggering over NCMP.

use crate::error::AdapterError;
use crate::topology::CmHandle;
use async_trait::async_trait;

/// Which targets accepted the measurement trigger. Handles the service does
/// not know about are reported back, not treated as a hard failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasurementOutcome {
    pub enabled: Vec<CmHandle>,
    pub not_found: Vec<CmHandle>,
}

#[async_trait]
pub trait MeasurementService: Send + Sync {
    async fn trigger(&self, handles: &[CmHandle]) -> Result<MeasurementOutcome, AdapterError>;
}
