// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human task gates.
//!
//! A gate is a named suspension point: the orchestrator registers it and
//! awaits the answer; an operator (or a test) resolves it by task name. At
//! most one gate is pending per execution, but the same task name can be
//! offered repeatedly, so each offer also carries a running instance index.
//! Suspension is indefinite — gates never time out.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{oneshot, Notify};

/// What kind of answer a gate accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateSchema {
    Acknowledge,
    YesNo,
}

/// An operator's answer to a pending gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAnswer {
    Acknowledged,
    YesNo(bool),
}

impl GateAnswer {
    fn matches(&self, schema: GateSchema) -> bool {
        matches!(
            (self, schema),
            (GateAnswer::Acknowledged, GateSchema::Acknowledge)
                | (GateAnswer::YesNo(_), GateSchema::YesNo)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// No gate with this task name is currently pending.
    #[error("no pending gate named {task:?}")]
    NotActive { task: String },

    /// The answer does not fit the pending gate's schema.
    #[error("answer does not match the schema of gate {task:?}")]
    SchemaViolation { task: String },
}

/// A registered gate waiting for its answer.
pub(crate) struct Pending {
    task: String,
    schema: GateSchema,
    tx: oneshot::Sender<GateAnswer>,
}

#[derive(Default)]
struct HubState {
    pending: Option<Pending>,
    /// Times each task name has been offered over the execution's lifetime.
    offers: HashMap<String, u32>,
}

/// Shared registry of the (at most one) pending gate for an execution.
#[derive(Clone, Default)]
pub struct GateHub {
    state: Arc<Mutex<HubState>>,
    notify: Arc<Notify>,
}

impl GateHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a gate and get the channel its answer will arrive on.
    ///
    /// Replaces any previously pending gate; the orchestrator never offers
    /// two at once, except when a stop request preempts one (see
    /// [`GateHub::take_pending`]).
    pub fn register(&self, task: &str, schema: GateSchema) -> oneshot::Receiver<GateAnswer> {
        let (tx, rx) = oneshot::channel();
        let mut state = self.state.lock();
        *state.offers.entry(task.to_string()).or_insert(0) += 1;
        let instance = state.offers[task];
        state.pending = Some(Pending { task: task.to_string(), schema, tx });
        drop(state);
        tracing::debug!(task, instance, "gate offered");
        self.notify.notify_waiters();
        rx
    }

    /// Resolve the pending gate by name. Fails synchronously if no gate with
    /// that name is pending or the answer violates its schema.
    pub fn resolve(&self, task: &str, answer: GateAnswer) -> Result<(), GateError> {
        let mut state = self.state.lock();
        match &state.pending {
            Some(p) if p.task == task => {
                if !answer.matches(p.schema) {
                    return Err(GateError::SchemaViolation { task: task.to_string() });
                }
            }
            _ => return Err(GateError::NotActive { task: task.to_string() }),
        }
        // Checked above; receiver drop just discards the answer.
        if let Some(p) = state.pending.take() {
            let _ = p.tx.send(answer);
        }
        drop(state);
        tracing::debug!(task, "gate resolved");
        self.notify.notify_waiters();
        Ok(())
    }

    /// Name of the currently pending gate, if any.
    pub fn active_task(&self) -> Option<String> {
        self.state.lock().pending.as_ref().map(|p| p.task.clone())
    }

    /// How many times a task name has been offered so far.
    pub fn offer_count(&self, task: &str) -> u32 {
        self.state.lock().offers.get(task).copied().unwrap_or(0)
    }

    /// Wait until a gate with this task name is pending.
    pub async fn wait_for(&self, task: &str) {
        loop {
            let notified = self.notify.notified();
            if self.active_task().as_deref() == Some(task) {
                return;
            }
            notified.await;
        }
    }

    /// Detach the pending gate without answering it, keeping its channel
    /// intact. Used when a stop request preempts a pending gate: if the stop
    /// is declined the gate is put back with [`GateHub::restore`].
    pub(crate) fn take_pending(&self) -> Option<Pending> {
        let taken = self.state.lock().pending.take();
        if taken.is_some() {
            self.notify.notify_waiters();
        }
        taken
    }

    pub(crate) fn restore(&self, pending: Pending) {
        self.state.lock().pending = Some(pending);
        self.notify.notify_waiters();
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
