//! Shared harness for end-to-end specs.

use ranflow_adapters::fake::{FakeDeployment, FakeMeasurement, FakeOptimization, FakeTopology};
use ranflow_adapters::{CmHandle, Gnbdu, LinkConstraints, NodeRef};
use ranflow_core::FakeClock;
use ranflow_engine::{EngineConfig, Execution, ExecutionHandle, GateAnswer, Services};
use std::sync::Arc;

pub use ranflow_core::messages::*;
pub use ranflow_core::{
    ApplyPolicy, Clock, ExecutionStatus, Recurrence, RecurrencePattern, RecurrenceStop,
    ScheduleSpec, Severity, StartTime,
};

pub struct World {
    pub clock: FakeClock,
    pub topology: FakeTopology,
    pub measurement: FakeMeasurement,
    pub optimization: FakeOptimization,
    pub deployment: FakeDeployment,
}

impl World {
    pub fn new() -> Self {
        let nodes = (1..=3).map(gnbdu).collect();
        Self {
            clock: FakeClock::new(),
            topology: FakeTopology::with_nodes(nodes),
            measurement: FakeMeasurement::new(),
            optimization: FakeOptimization::new(),
            deployment: FakeDeployment::new(),
        }
    }

    pub fn execution(&self) -> Execution<FakeClock> {
        Execution::new(
            self.clock.clone(),
            EngineConfig::default(),
            self.services(),
            vec![node_ref(1), node_ref(2), node_ref(3)],
            LinkConstraints::default(),
        )
    }

    pub fn services(&self) -> Services {
        Services {
            topology: Arc::new(self.topology.clone()),
            measurement: Arc::new(self.measurement.clone()),
            optimization: Arc::new(self.optimization.clone()),
            deployment: Arc::new(self.deployment.clone()),
        }
    }
}

pub fn gnbdu(id: u64) -> Gnbdu {
    Gnbdu {
        gnb_name: format!("gnb-{id}"),
        gnb_id: id,
        gnb_cm_handle: CmHandle::new(format!("handle-{id}")),
    }
}

pub fn node_ref(id: u64) -> NodeRef {
    NodeRef { gnb_name: format!("gnb-{id}"), gnb_id: id }
}

pub async fn resolve(handle: &ExecutionHandle, task: &str, answer: GateAnswer) {
    handle.wait_for(task).await;
    handle.resolve(task, answer).unwrap();
}
