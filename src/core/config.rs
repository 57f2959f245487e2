use serde::{Deserialize, Serialize};

use super::error::SimulationError;

/// Inclusive range a per-machine parameter is drawn from at construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range collapsed to a single value, handy for deterministic setups
    pub fn fixed(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    fn validate(&self, name: &str) -> Result<(), SimulationError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(SimulationError::InvalidConfiguration(format!(
                "{} range must be finite",
                name
            )));
        }
        if self.min < 0.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "{} range must not have negative bounds",
                name
            )));
        }
        if self.min > self.max {
            return Err(SimulationError::InvalidConfiguration(format!(
                "{} range min cannot exceed max",
                name
            )));
        }
        Ok(())
    }
}

/// Static configuration for one simulation run.
///
/// Defaults carry the reference line: 3 machines, 10 operators, a 24-hour
/// (1440 minute) horizon, 4 stages, process times uniform in [5,15],
/// failure probabilities in [0.01,0.05] and maintenance durations in [10,30].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub machine_count: usize,
    pub operator_count: usize,
    pub time_horizon: f64,
    pub stage_count: u32,
    pub process_time: ValueRange,
    pub failure_probability: ValueRange,
    pub maintenance_duration: ValueRange,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            machine_count: 3,
            operator_count: 10,
            time_horizon: 24.0 * 60.0,
            stage_count: 4,
            process_time: ValueRange::new(5.0, 15.0),
            failure_probability: ValueRange::new(0.01, 0.05),
            maintenance_duration: ValueRange::new(10.0, 30.0),
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_machine_count(mut self, count: usize) -> Self {
        self.machine_count = count;
        self
    }

    pub fn with_operator_count(mut self, count: usize) -> Self {
        self.operator_count = count;
        self
    }

    pub fn with_time_horizon(mut self, horizon: f64) -> Self {
        self.time_horizon = horizon;
        self
    }

    pub fn with_stage_count(mut self, stages: u32) -> Self {
        self.stage_count = stages;
        self
    }

    pub fn with_process_time(mut self, range: ValueRange) -> Self {
        self.process_time = range;
        self
    }

    pub fn with_failure_probability(mut self, range: ValueRange) -> Self {
        self.failure_probability = range;
        self
    }

    pub fn with_maintenance_duration(mut self, range: ValueRange) -> Self {
        self.maintenance_duration = range;
        self
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.machine_count == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "machine count must be greater than 0".to_string(),
            ));
        }
        if self.operator_count == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "operator count must be greater than 0".to_string(),
            ));
        }
        if !self.time_horizon.is_finite() || self.time_horizon <= 0.0 {
            return Err(SimulationError::InvalidConfiguration(
                "time horizon must be a positive finite value".to_string(),
            ));
        }
        if self.stage_count == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "stage count must be greater than 0".to_string(),
            ));
        }

        self.process_time.validate("process time")?;
        if self.process_time.min <= 0.0 {
            return Err(SimulationError::InvalidConfiguration(
                "process time range must be positive".to_string(),
            ));
        }

        self.maintenance_duration.validate("maintenance duration")?;
        if self.maintenance_duration.min <= 0.0 {
            return Err(SimulationError::InvalidConfiguration(
                "maintenance duration range must be positive".to_string(),
            ));
        }

        self.failure_probability.validate("failure probability")?;
        if self.failure_probability.max > 1.0 {
            return Err(SimulationError::InvalidConfiguration(
                "failure probability range must stay within [0, 1]".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.machine_count, 3);
        assert_eq!(config.operator_count, 10);
        assert_eq!(config.time_horizon, 1440.0);
        assert_eq!(config.stage_count, 4);
        assert_eq!(config.process_time, ValueRange::new(5.0, 15.0));
        assert_eq!(config.failure_probability, ValueRange::new(0.01, 0.05));
        assert_eq!(config.maintenance_duration, ValueRange::new(10.0, 30.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SimulationConfig::new()
            .with_machine_count(1)
            .with_operator_count(1)
            .with_time_horizon(1000.0)
            .with_stage_count(1)
            .with_process_time(ValueRange::fixed(10.0))
            .with_failure_probability(ValueRange::fixed(0.0));

        assert_eq!(config.machine_count, 1);
        assert_eq!(config.operator_count, 1);
        assert_eq!(config.time_horizon, 1000.0);
        assert_eq!(config.stage_count, 1);
        assert_eq!(config.process_time, ValueRange::fixed(10.0));
        assert_eq!(config.failure_probability, ValueRange::fixed(0.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_counts_rejected() {
        let config = SimulationConfig::new().with_machine_count(0);
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfiguration(_))
        ));

        let config = SimulationConfig::new().with_operator_count(0);
        assert!(config.validate().is_err());

        let config = SimulationConfig::new().with_stage_count(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_horizon_rejected() {
        assert!(SimulationConfig::new()
            .with_time_horizon(0.0)
            .validate()
            .is_err());
        assert!(SimulationConfig::new()
            .with_time_horizon(-5.0)
            .validate()
            .is_err());
        assert!(SimulationConfig::new()
            .with_time_horizon(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_malformed_ranges_rejected() {
        assert!(SimulationConfig::new()
            .with_process_time(ValueRange::new(-1.0, 5.0))
            .validate()
            .is_err());
        assert!(SimulationConfig::new()
            .with_process_time(ValueRange::new(10.0, 5.0))
            .validate()
            .is_err());
        assert!(SimulationConfig::new()
            .with_process_time(ValueRange::fixed(0.0))
            .validate()
            .is_err());
        assert!(SimulationConfig::new()
            .with_failure_probability(ValueRange::new(0.5, 1.5))
            .validate()
            .is_err());
        assert!(SimulationConfig::new()
            .with_maintenance_duration(ValueRange::fixed(0.0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_failure_probability_extremes_allowed() {
        assert!(SimulationConfig::new()
            .with_failure_probability(ValueRange::fixed(0.0))
            .validate()
            .is_ok());
        assert!(SimulationConfig::new()
            .with_failure_probability(ValueRange::fixed(1.0))
            .validate()
            .is_ok());
    }
}
