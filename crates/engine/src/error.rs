// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine error type.
//!
//! Gate misuse is not represented here: it surfaces synchronously as
//! [`crate::gate::GateError`] from the resolving side.

use ranflow_core::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Schedule validation rejected the submitted spec. The composed message
    /// has already been recorded as an ERROR event on the timeline.
    #[error("schedule not accepted: {0}")]
    ScheduleNotAccepted(#[from] ScheduleError),

    /// `run` was called before any schedule was accepted.
    #[error("no accepted schedule; submit one first")]
    NotScheduled,

    /// A pending gate's answer channel closed without a resolution.
    #[error("gate channel closed while awaiting {task}")]
    GateClosed { task: String },

    #[error("invalid engine config: {0}")]
    Config(#[from] toml::de::Error),
}
