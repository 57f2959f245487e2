/// Errors that can occur while building or running a simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// Rejected configuration: zero-sized pools, bad horizon, malformed ranges
    InvalidConfiguration(String),
    /// Broken engine invariant; indicates a bug in the caller or the engine
    InvariantViolation(String),
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::InvalidConfiguration(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
            SimulationError::InvariantViolation(msg) => {
                write!(f, "Invariant violation: {}", msg)
            }
        }
    }
}

impl std::error::Error for SimulationError {}
