// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration deployment towards the network.

use crate::error::AdapterError;
use crate::optimization::Configuration;
use async_trait::async_trait;

#[async_trait]
pub trait DeploymentService: Send + Sync {
    async fn apply(&self, configuration: &Configuration) -> Result<(), AdapterError>;
}
