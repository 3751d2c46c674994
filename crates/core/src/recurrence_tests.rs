// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::schedule::{
    validate, Recurrence, RecurrencePattern, RecurrenceStop, ScheduleLimits, ScheduleSpec,
    StartTime, MS_PER_SECOND,
};
use crate::NextAction::{EndReached, OccurrencesExhausted, RunOccurrence, WaitUntil};

const NOW: u64 = 1_700_000_000_000;
const INTERVAL: u64 = 30 * MS_PER_SECOND;

fn clock_for(start: StartTime, recurrence: Recurrence) -> OccurrenceClock {
    let spec = ScheduleSpec { start, recurrence };
    let norm = validate(&spec, &ScheduleLimits::default(), NOW).unwrap();
    OccurrenceClock::new(norm)
}

fn recurring_em(stop: RecurrenceStop) -> Recurrence {
    Recurrence::Recurring { pattern: RecurrencePattern::Every30Seconds, stop }
}

#[test]
fn single_occurrence_runs_once_then_exhausts() {
    let mut clock = clock_for(StartTime::Immediately, Recurrence::None);
    assert_eq!(clock.occurrence(), 1);
    assert_eq!(clock.next_action(NOW), RunOccurrence);
    clock.complete_occurrence();
    assert_eq!(clock.next_action(NOW), OccurrencesExhausted);
    assert_eq!(clock.completed(), 1);
}

#[test]
fn waits_for_a_future_start() {
    let clock = clock_for(StartTime::At(NOW + 10_000), Recurrence::None);
    assert_eq!(clock.next_action(NOW), WaitUntil(NOW + 10_000));
    assert_eq!(clock.next_action(NOW + 10_000), RunOccurrence);
}

#[test]
fn count_bounded_schedule_exhausts_after_max() {
    let mut clock = clock_for(
        StartTime::Immediately,
        recurring_em(RecurrenceStop::AfterOccurrences(4)),
    );
    let mut now = NOW;
    for n in 1..=4 {
        assert_eq!(clock.occurrence(), n);
        assert_eq!(clock.next_action(now), RunOccurrence);
        clock.complete_occurrence();
        now += INTERVAL;
    }
    assert_eq!(clock.next_action(now), OccurrencesExhausted);
}

#[test]
fn occurrences_are_due_at_interval_ticks() {
    let mut clock = clock_for(
        StartTime::Immediately,
        recurring_em(RecurrenceStop::AfterOccurrences(4)),
    );
    assert_eq!(clock.next_action(NOW), RunOccurrence);
    clock.complete_occurrence();
    // Second occurrence is due one interval after the start, not immediately.
    assert_eq!(clock.next_action(NOW + 1), WaitUntil(NOW + INTERVAL));
    assert_eq!(clock.next_action(NOW + INTERVAL), RunOccurrence);
}

#[test]
fn end_date_is_rechecked_at_cycle_start() {
    let clock = clock_for(
        StartTime::Immediately,
        recurring_em(RecurrenceStop::EndBy(NOW + 10_000)),
    );
    // Valid at submission time, but the first cycle stalls (e.g. on a gate)
    // until after the window closed.
    assert_eq!(clock.next_action(NOW), RunOccurrence);
    assert_eq!(clock.next_action(NOW + 15_000), EndReached);
    assert_eq!(clock.completed(), 0);
}

#[test]
fn ends_when_the_next_tick_would_overshoot_the_window() {
    let mut clock = clock_for(
        StartTime::Immediately,
        recurring_em(RecurrenceStop::EndBy(NOW + 20_000)),
    );
    assert_eq!(clock.next_action(NOW), RunOccurrence);
    clock.complete_occurrence();
    // Next tick would be at NOW+30s, past the 20s end date: stop now rather
    // than sleeping past the window.
    assert_eq!(clock.next_action(NOW + 1_000), EndReached);
}

#[test]
fn stalled_occurrence_still_runs_when_window_is_open() {
    let mut clock = clock_for(
        StartTime::Immediately,
        recurring_em(RecurrenceStop::AfterOccurrences(40_320)),
    );
    clock.complete_occurrence();
    // A gate stalled us two intervals; the due time is in the past, run now.
    assert_eq!(clock.next_action(NOW + 2 * INTERVAL + 5), RunOccurrence);
}

#[test]
fn will_recur_reflects_remaining_budget() {
    let mut clock = clock_for(
        StartTime::Immediately,
        recurring_em(RecurrenceStop::AfterOccurrences(2)),
    );
    clock.complete_occurrence();
    assert!(clock.will_recur(NOW + INTERVAL));
    clock.complete_occurrence();
    assert!(!clock.will_recur(NOW + 2 * INTERVAL));
}

#[test]
fn will_recur_is_false_when_window_closes_before_next_tick() {
    let mut clock = clock_for(
        StartTime::Immediately,
        recurring_em(RecurrenceStop::EndBy(NOW + 20_000)),
    );
    clock.complete_occurrence();
    assert!(!clock.will_recur(NOW + 1_000));
}

#[test]
fn non_recurring_never_recurs() {
    let mut clock = clock_for(StartTime::Immediately, Recurrence::None);
    clock.complete_occurrence();
    assert!(!clock.will_recur(NOW));
}
