//! Running many independent replicas of one configuration.
//!
//! Each replica owns its own clock, event queue and resource pool; no state
//! is shared, so replicas can run on separate threads to gather statistics
//! across seeds.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::config::SimulationConfig;
use super::error::SimulationError;
use super::product::CompletionRecord;
use super::simulation_engine::Simulation;

/// Enumeration of supported concurrency modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcurrencyMode {
    /// Sequential execution mode - replicas run in order within a single thread
    Sequential,
    /// Parallel execution mode using Rayon - replicas run concurrently
    Rayon,
}

impl Default for ConcurrencyMode {
    fn default() -> Self {
        ConcurrencyMode::Sequential
    }
}

/// Result of one replica: the seed it ran under and what it completed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicaOutcome {
    pub seed: u64,
    pub completions: Vec<CompletionRecord>,
}

/// Run one replica per seed, each from a fresh simulation instance.
///
/// `populate` is invoked on every replica before its run, typically to add
/// the product batch. Outcomes come back in seed order regardless of mode.
pub fn run_replicas<F>(
    config: &SimulationConfig,
    seeds: &[u64],
    mode: ConcurrencyMode,
    populate: F,
) -> Result<Vec<ReplicaOutcome>, SimulationError>
where
    F: Fn(&mut Simulation) -> Result<(), SimulationError> + Sync,
{
    let run_one = |seed: u64| -> Result<ReplicaOutcome, SimulationError> {
        let mut simulation = Simulation::from_seed(config.clone(), seed)?;
        populate(&mut simulation)?;
        simulation.run()?;
        Ok(ReplicaOutcome {
            seed,
            completions: simulation.completion_records().to_vec(),
        })
    };

    match mode {
        ConcurrencyMode::Sequential => seeds.iter().map(|&seed| run_one(seed)).collect(),
        ConcurrencyMode::Rayon => seeds.par_iter().map(|&seed| run_one(seed)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concurrency_mode_default() {
        assert_eq!(ConcurrencyMode::default(), ConcurrencyMode::Sequential);
    }
}
