// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine configuration.
//!
//! Everything has a default; a config file only needs the keys it overrides.

use crate::error::EngineError;
use ranflow_core::ScheduleLimits;
use serde::Deserialize;

const DEFAULT_POLL_INITIAL_MS: u64 = 1_000;
const DEFAULT_POLL_MAX_MS: u64 = 30_000;
const DEFAULT_POLL_MAX_ATTEMPTS: u32 = 120;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Schedule validation thresholds.
    pub schedule: ScheduleLimits,
    /// First optimization status-poll delay; doubles up to `poll_max_ms`.
    pub poll_initial_ms: u64,
    pub poll_max_ms: u64,
    /// Polls per occurrence before the cycle is abandoned.
    pub poll_max_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            schedule: ScheduleLimits::default(),
            poll_initial_ms: DEFAULT_POLL_INITIAL_MS,
            poll_max_ms: DEFAULT_POLL_MAX_MS,
            poll_max_attempts: DEFAULT_POLL_MAX_ATTEMPTS,
        }
    }
}

impl EngineConfig {
    pub fn from_toml(text: &str) -> Result<Self, EngineError> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
