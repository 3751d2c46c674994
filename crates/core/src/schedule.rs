// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule specification and validation.
//!
//! A [`ScheduleSpec`] is what the user submits; [`validate`] either rejects
//! it with a [`ScheduleError`] (whose Display string is the exact message
//! surfaced in the execution timeline) or normalizes it into a
//! [`NormalizedSchedule`] with absolute start/end times. The schedule itself
//! is immutable after acceptance; only the apply policy can change later.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MS_PER_SECOND: u64 = 1_000;
pub const MS_PER_HOUR: u64 = 3_600 * MS_PER_SECOND;
pub const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;
pub const TWO_WEEKS_MS: u64 = 14 * MS_PER_DAY;
pub const ONE_MONTH_MS: u64 = 30 * MS_PER_DAY;

/// When the first occurrence should run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartTime {
    Immediately,
    HoursLater(u32),
    /// Absolute epoch milliseconds.
    At(u64),
}

/// How often a recurring schedule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrencePattern {
    Every30Seconds,
    Hourly,
    Daily,
}

crate::simple_display! {
    RecurrencePattern {
        Every30Seconds => "Every 30 seconds",
        Hourly => "Hourly",
        Daily => "Daily",
    }
}

impl RecurrencePattern {
    pub fn interval_ms(&self) -> u64 {
        match self {
            RecurrencePattern::Every30Seconds => 30 * MS_PER_SECOND,
            RecurrencePattern::Hourly => MS_PER_HOUR,
            RecurrencePattern::Daily => MS_PER_DAY,
        }
    }
}

/// When a recurring schedule stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceStop {
    AfterOccurrences(u32),
    /// Absolute epoch milliseconds.
    EndBy(u64),
    NoEnd,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    None,
    Recurring { pattern: RecurrencePattern, stop: RecurrenceStop },
}

/// User-submitted schedule, created once per execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSpec {
    pub start: StartTime,
    pub recurrence: Recurrence,
}

/// Whether optimization results are deployed without asking.
///
/// Initial value is chosen at schedule acceptance; the orchestrator may flip
/// it between occurrences through the results-configuration gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyPolicy {
    AutoApply,
    RequireConfirmation,
}

/// Validation thresholds.
///
/// The two-week window and one-month start delay come from business rules;
/// they are configuration values with defaults, not hard-coded in the rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleLimits {
    pub max_start_delay_ms: u64,
    pub max_window_ms: u64,
}

impl Default for ScheduleLimits {
    fn default() -> Self {
        Self { max_start_delay_ms: ONE_MONTH_MS, max_window_ms: TWO_WEEKS_MS }
    }
}

/// Schedule with absolute times, owned by the recurrence clock.
///
/// `end_ms` is always present for recurring schedules. `max_occurrences` is
/// set only when the stop condition was given as an occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSchedule {
    pub start_ms: u64,
    pub pattern: Option<RecurrencePattern>,
    pub end_ms: Option<u64>,
    pub max_occurrences: Option<u32>,
}

/// Why a submitted schedule was rejected.
///
/// The two-week violation names the recurrence pattern only when the stop
/// condition was an occurrence count: the clause tells the user why their
/// count was too large, but an explicitly chosen end date is not
/// second-guessed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Start date is in the past")]
    StartInPast,
    #[error("Start date is more than one month ahead")]
    StartTooFarInFuture,
    #[error("End date cannot be before start date")]
    EndBeforeStart,
    #[error("End date is more than two weeks after start date{}", occurrences_clause(.pattern))]
    EndAfterTwoWeeks { pattern: Option<RecurrencePattern> },
    #[error("Recurrence without end date is not supported")]
    UnsupportedNoEnd,
}

fn occurrences_clause(pattern: &Option<RecurrencePattern>) -> String {
    match pattern {
        Some(p) => format!(
            ": the requested number of {p} occurrences ends more than two weeks after the start date"
        ),
        None => String::new(),
    }
}

/// Validate a schedule against `now` and normalize it.
///
/// Rules run in a fixed order; the first violation wins.
pub fn validate(
    spec: &ScheduleSpec,
    limits: &ScheduleLimits,
    now_ms: u64,
) -> Result<NormalizedSchedule, ScheduleError> {
    let start_ms = match spec.start {
        StartTime::Immediately => now_ms,
        StartTime::HoursLater(h) => now_ms + u64::from(h) * MS_PER_HOUR,
        StartTime::At(t) => {
            if t < now_ms {
                return Err(ScheduleError::StartInPast);
            }
            if t > now_ms + limits.max_start_delay_ms {
                return Err(ScheduleError::StartTooFarInFuture);
            }
            t
        }
    };

    let (pattern, stop) = match &spec.recurrence {
        Recurrence::None => {
            return Ok(NormalizedSchedule {
                start_ms,
                pattern: None,
                end_ms: None,
                max_occurrences: None,
            });
        }
        Recurrence::Recurring { pattern, stop } => (*pattern, stop),
    };

    let (end_ms, max_occurrences) = match *stop {
        RecurrenceStop::NoEnd => return Err(ScheduleError::UnsupportedNoEnd),
        RecurrenceStop::EndBy(t) => (t, None),
        RecurrenceStop::AfterOccurrences(n) => {
            (start_ms + u64::from(n) * pattern.interval_ms(), Some(n))
        }
    };

    if end_ms < start_ms {
        return Err(ScheduleError::EndBeforeStart);
    }
    if end_ms > start_ms + limits.max_window_ms {
        // The pattern clause only applies to occurrence-count stops.
        return Err(ScheduleError::EndAfterTwoWeeks {
            pattern: max_occurrences.map(|_| pattern),
        });
    }

    Ok(NormalizedSchedule { start_ms, pattern: Some(pattern), end_ms: Some(end_ms), max_occurrences })
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
