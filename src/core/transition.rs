use serde::{Deserialize, Serialize};

use super::product::ProductId;
use super::resource_pool::{MachineId, OperatorId};

/// One entry in the engine's state-transition log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub time: f64,
    pub kind: TransitionKind,
}

/// Every state change the engine reports to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// A product acquired a machine and an operator and began a stage
    ProcessStarted {
        product: ProductId,
        machine: MachineId,
        operator: OperatorId,
    },
    /// A product completed a stage and released its resources
    ProcessEnded {
        product: ProductId,
        machine: MachineId,
        operator: OperatorId,
        stage: u32,
    },
    /// No machine/operator pair was free; the product joined the waiting queue
    ProductQueued { product: ProductId },
    /// A product completed its last stage and left the line
    ProductFinished { product: ProductId },
    /// A machine broke down and became unassignable
    MachineFailed { machine: MachineId },
    /// Maintenance finished; the machine is assignable again
    MachineRepaired { machine: MachineId },
}
