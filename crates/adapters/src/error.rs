// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter error type.
//!
//! Adapter failures are cycle-local from the orchestrator's point of view:
//! they are recorded as ERROR events and abandon the current cycle, never
//! the execution. Retry policy, if any, lives behind the adapter boundary.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AdapterError {
    #[error("{service} unavailable: {reason}")]
    Unavailable { service: &'static str, reason: String },

    #[error("{service} rejected the request: {reason}")]
    Rejected { service: &'static str, reason: String },

    #[error("optimization status polling gave up after {attempts} attempts")]
    PollTimeout { attempts: u32 },
}

impl AdapterError {
    pub fn unavailable(service: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable { service, reason: reason.into() }
    }

    pub fn rejected(service: &'static str, reason: impl Into<String>) -> Self {
        Self::Rejected { service, reason: reason.into() }
    }
}
