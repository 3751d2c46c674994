// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ranflow-engine: the execution orchestrator.
//!
//! An [`Execution`] drives one workflow instance: schedule acceptance, the
//! recurring optimization cycle, human task gates, and graceful stop. The
//! engine is a library; callers own the task the execution runs on and talk
//! to it through an [`ExecutionHandle`].

pub mod config;
pub mod error;
pub mod execution;
pub mod gate;

pub use config::EngineConfig;
pub use error::EngineError;
pub use execution::{Execution, ExecutionHandle, FlowInput, Services};
pub use gate::{GateAnswer, GateError, GateHub, GateSchema};
