// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ranflow-core: schedule validation, recurrence clock, and the execution
//! event timeline for the ranflow optimization workflow engine.

pub mod macros;

pub mod clock;
pub mod event;
pub mod id;
pub mod messages;
pub mod recurrence;
pub mod report;
pub mod schedule;

pub use clock::{Clock, FakeClock, SystemClock};
pub use event::{EventLog, ExecutionEvent, ExecutionStatus, Severity};
pub use id::ExecutionId;
pub use recurrence::{NextAction, OccurrenceClock};
pub use report::{ExecutionReport, ReportHeader};
pub use schedule::{
    validate, ApplyPolicy, NormalizedSchedule, Recurrence, RecurrencePattern, RecurrenceStop,
    ScheduleError, ScheduleLimits, ScheduleSpec, StartTime,
};
