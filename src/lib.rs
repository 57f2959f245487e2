pub mod core;

// Re-export commonly used types
pub use crate::core::config::{SimulationConfig, ValueRange};
pub use crate::core::error::SimulationError;
pub use crate::core::event::{EventKind, SimEvent};
pub use crate::core::product::{CompletionRecord, Product, ProductId, ProductState};
pub use crate::core::replicas::{run_replicas, ConcurrencyMode, ReplicaOutcome};
pub use crate::core::resource_pool::{MachineId, OperatorId};
pub use crate::core::simulation_engine::{Simulation, SimulationObserver};
pub use crate::core::transition::{Transition, TransitionKind};
