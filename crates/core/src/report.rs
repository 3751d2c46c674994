// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution summary report, derived from the event log on demand.

use crate::event::{EventLog, ExecutionEvent, ExecutionStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHeader {
    pub start_time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u64>,
    pub status: ExecutionStatus,
}

/// Header plus the full timeline. Never materialized incrementally; built
/// fresh from the log each time so it always reflects the latest state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
    pub header: ReportHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub events: Vec<ExecutionEvent>,
}

impl ExecutionReport {
    pub fn build(
        log: &EventLog,
        start_time: u64,
        end_time: Option<u64>,
        status: ExecutionStatus,
        summary: Option<String>,
    ) -> Self {
        Self {
            header: ReportHeader { start_time, end_time, status },
            summary,
            events: log.events().to_vec(),
        }
    }

    /// First event matching severity and message substring, if any.
    pub fn find(
        &self,
        severity: crate::Severity,
        needle: &str,
    ) -> Option<&ExecutionEvent> {
        self.events
            .iter()
            .find(|e| e.severity == severity && e.message.contains(needle))
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
