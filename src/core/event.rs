use super::product::ProductId;
use super::resource_pool::{MachineId, OperatorId};

/// The closed set of event kinds the driver dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    StartProcess,
    EndProcess,
    MachineFailure,
    Maintenance,
}

/// A scheduled occurrence in simulated time.
///
/// Events are immutable once created; the scheduler owns them until popped.
/// Which optional refs are populated depends on the kind: process events
/// carry a product, end-process and failure events carry a machine.
#[derive(Debug, Clone, PartialEq)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub product: Option<ProductId>,
    pub machine: Option<MachineId>,
    pub operator: Option<OperatorId>,
}

impl SimEvent {
    pub fn start_process(time: f64, product: ProductId) -> Self {
        Self {
            time,
            kind: EventKind::StartProcess,
            product: Some(product),
            machine: None,
            operator: None,
        }
    }

    pub fn end_process(
        time: f64,
        product: ProductId,
        machine: MachineId,
        operator: OperatorId,
    ) -> Self {
        Self {
            time,
            kind: EventKind::EndProcess,
            product: Some(product),
            machine: Some(machine),
            operator: Some(operator),
        }
    }

    pub fn machine_failure(time: f64, machine: MachineId) -> Self {
        Self {
            time,
            kind: EventKind::MachineFailure,
            product: None,
            machine: Some(machine),
            operator: None,
        }
    }

    pub fn maintenance(time: f64, machine: MachineId) -> Self {
        Self {
            time,
            kind: EventKind::Maintenance,
            product: None,
            machine: Some(machine),
            operator: None,
        }
    }
}
