// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution event timeline.
//!
//! Events are append-only: once recorded they are never mutated or removed.
//! The report built from them is derived on demand (see [`crate::report`]).

use serde::{Deserialize, Serialize};

/// Event severity as it appears in the report timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Error,
}

crate::simple_display! {
    Severity {
        Info => "INFO",
        Error => "ERROR",
    }
}

/// One entry in the execution timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionEvent {
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    #[serde(rename = "timestamp")]
    pub at_ms: u64,
}

/// Terminal or in-flight state of one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExecutionStatus {
    Active,
    Completed,
    Failed,
}

crate::simple_display! {
    ExecutionStatus {
        Active => "ACTIVE",
        Completed => "COMPLETED",
        Failed => "FAILED",
    }
}

/// Append-only ordered sequence of execution events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<ExecutionEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: ExecutionEvent) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExecutionEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[ExecutionEvent] {
        &self.events
    }

    /// Find the first event whose message contains `needle`.
    pub fn find(&self, severity: Severity, needle: &str) -> Option<&ExecutionEvent> {
        self.events
            .iter()
            .find(|e| e.severity == severity && e.message.contains(needle))
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
