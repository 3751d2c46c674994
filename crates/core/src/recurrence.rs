// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recurrence clock: decides, per cycle, whether to wait, run, or stop.
//!
//! End conditions are re-evaluated from the wall clock on every call rather
//! than pre-computed once. Cycles can stall arbitrarily long on a pending
//! human gate, and a cycle whose window has already closed must never be
//! launched.

use crate::schedule::NormalizedSchedule;

/// What the orchestrator should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    /// The next occurrence is due at this epoch-ms instant.
    WaitUntil(u64),
    RunOccurrence,
    /// The schedule end date has passed, or the next occurrence would fall
    /// outside the window.
    EndReached,
    /// Non-recurring schedule already ran, or the occurrence count is spent.
    OccurrencesExhausted,
}

/// Owns the normalized schedule for the lifetime of one execution and
/// tracks the occurrence counter (starts at 1).
#[derive(Debug, Clone)]
pub struct OccurrenceClock {
    schedule: NormalizedSchedule,
    next: u32,
}

impl OccurrenceClock {
    pub fn new(schedule: NormalizedSchedule) -> Self {
        Self { schedule, next: 1 }
    }

    /// Occurrence number of the cycle that would run next (1-based).
    pub fn occurrence(&self) -> u32 {
        self.next
    }

    /// Number of cycle attempts completed so far.
    pub fn completed(&self) -> u32 {
        self.next - 1
    }

    /// Mark the current occurrence attempt as completed.
    pub fn complete_occurrence(&mut self) {
        self.next += 1;
    }

    /// Evaluate the schedule against `now`. Never cached; call fresh at the
    /// top of every cycle.
    pub fn next_action(&self, now_ms: u64) -> NextAction {
        let s = &self.schedule;
        let Some(pattern) = s.pattern else {
            // Single occurrence, no end condition.
            if self.next > 1 {
                return NextAction::OccurrencesExhausted;
            }
            if now_ms < s.start_ms {
                return NextAction::WaitUntil(s.start_ms);
            }
            return NextAction::RunOccurrence;
        };

        if let Some(max) = s.max_occurrences {
            if self.next > max {
                return NextAction::OccurrencesExhausted;
            }
        }
        // Recurring schedules always carry an end time after validation.
        let end_ms = s.end_ms.unwrap_or(u64::MAX);
        if now_ms >= end_ms {
            return NextAction::EndReached;
        }
        let due = s.start_ms + u64::from(self.next - 1) * pattern.interval_ms();
        if due >= end_ms {
            // Waiting for the next tick would overshoot the window.
            return NextAction::EndReached;
        }
        if now_ms < due {
            return NextAction::WaitUntil(due);
        }
        NextAction::RunOccurrence
    }

    /// Whether another occurrence would still run at `now`. Used to decide
    /// whether offering a between-occurrence gate makes sense.
    pub fn will_recur(&self, now_ms: u64) -> bool {
        matches!(
            self.next_action(now_ms),
            NextAction::RunOccurrence | NextAction::WaitUntil(_)
        )
    }
}

#[cfg(test)]
#[path = "recurrence_tests.rs"]
mod tests;
