use serde::{Deserialize, Serialize};

use super::error::SimulationError;

/// Index of a machine in the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MachineId(pub usize);

impl std::fmt::Display for MachineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of an operator in the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OperatorId(pub usize);

impl std::fmt::Display for OperatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A machine with per-machine parameters drawn once at construction.
///
/// The single `busy` flag covers both "processing a product" and
/// "failed / under maintenance" — the pool only ever asks whether a machine
/// is assignable, never why it is not.
#[derive(Debug, Clone)]
pub struct Machine {
    pub id: MachineId,
    pub process_time: f64,
    pub failure_probability: f64,
    pub maintenance_duration: f64,
    busy: bool,
}

impl Machine {
    pub fn new(
        id: MachineId,
        process_time: f64,
        failure_probability: f64,
        maintenance_duration: f64,
    ) -> Self {
        Self {
            id,
            process_time,
            failure_probability,
            maintenance_duration,
            busy: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

/// An operator; same exclusivity rule as machines but no failure model
#[derive(Debug, Clone)]
pub struct Operator {
    pub id: OperatorId,
    busy: bool,
}

impl Operator {
    pub fn new(id: OperatorId) -> Self {
        Self { id, busy: false }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

/// Fixed sets of machines and operators whose availability gates every
/// processing attempt.
pub struct ResourcePool {
    machines: Vec<Machine>,
    operators: Vec<Operator>,
}

impl ResourcePool {
    pub fn new(machines: Vec<Machine>, operators: Vec<Operator>) -> Self {
        Self {
            machines,
            operators,
        }
    }

    /// First free machine in pool iteration order, if any
    pub fn find_free_machine(&self) -> Option<MachineId> {
        self.machines.iter().find(|m| !m.busy).map(|m| m.id)
    }

    /// First free operator in pool iteration order, if any
    pub fn find_free_operator(&self) -> Option<OperatorId> {
        self.operators.iter().find(|o| !o.busy).map(|o| o.id)
    }

    /// Mark a machine/operator pair busy.
    ///
    /// Callers pass ids returned by the `find_free_*` scans within the same
    /// handler, so hitting an already-busy resource here means the engine
    /// itself is broken.
    pub fn acquire(
        &mut self,
        machine: MachineId,
        operator: OperatorId,
    ) -> Result<(), SimulationError> {
        if self.machines[machine.0].busy {
            return Err(SimulationError::InvariantViolation(format!(
                "machine {} acquired while busy",
                machine
            )));
        }
        if self.operators[operator.0].busy {
            return Err(SimulationError::InvariantViolation(format!(
                "operator {} acquired while busy",
                operator
            )));
        }
        self.machines[machine.0].busy = true;
        self.operators[operator.0].busy = true;
        Ok(())
    }

    /// Mark a machine/operator pair free.
    ///
    /// Idempotent: a maintenance completion can overlap a job that
    /// re-acquired the machine after the failure was rolled.
    pub fn release(&mut self, machine: MachineId, operator: OperatorId) {
        self.machines[machine.0].busy = false;
        self.operators[operator.0].busy = false;
    }

    /// Take a failed machine out of circulation
    pub fn mark_machine_down(&mut self, machine: MachineId) {
        self.machines[machine.0].busy = true;
    }

    /// Return a repaired machine to circulation
    pub fn mark_machine_up(&mut self, machine: MachineId) {
        self.machines[machine.0].busy = false;
    }

    pub fn machine(&self, id: MachineId) -> &Machine {
        &self.machines[id.0]
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn busy_machine_count(&self) -> usize {
        self.machines.iter().filter(|m| m.busy).count()
    }

    pub fn busy_operator_count(&self) -> usize {
        self.operators.iter().filter(|o| o.busy).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(machine_count: usize, operator_count: usize) -> ResourcePool {
        let machines = (0..machine_count)
            .map(|i| Machine::new(MachineId(i), 10.0, 0.0, 20.0))
            .collect();
        let operators = (0..operator_count)
            .map(|i| Operator::new(OperatorId(i)))
            .collect();
        ResourcePool::new(machines, operators)
    }

    #[test]
    fn test_first_free_in_iteration_order() {
        let mut pool = pool(2, 2);
        assert_eq!(pool.find_free_machine(), Some(MachineId(0)));

        pool.acquire(MachineId(0), OperatorId(0)).unwrap();
        assert_eq!(pool.find_free_machine(), Some(MachineId(1)));
        assert_eq!(pool.find_free_operator(), Some(OperatorId(1)));
    }

    #[test]
    fn test_acquire_busy_resource_is_invariant_violation() {
        let mut pool = pool(1, 2);
        pool.acquire(MachineId(0), OperatorId(0)).unwrap();

        let err = pool.acquire(MachineId(0), OperatorId(1)).unwrap_err();
        assert!(matches!(err, SimulationError::InvariantViolation(_)));
    }

    #[test]
    fn test_release_frees_both() {
        let mut pool = pool(1, 1);
        pool.acquire(MachineId(0), OperatorId(0)).unwrap();
        assert_eq!(pool.find_free_machine(), None);
        assert_eq!(pool.find_free_operator(), None);

        pool.release(MachineId(0), OperatorId(0));
        assert_eq!(pool.find_free_machine(), Some(MachineId(0)));
        assert_eq!(pool.find_free_operator(), Some(OperatorId(0)));
        assert_eq!(pool.busy_machine_count(), 0);
    }

    #[test]
    fn test_down_machine_is_not_assignable() {
        let mut pool = pool(1, 1);
        pool.mark_machine_down(MachineId(0));
        assert_eq!(pool.find_free_machine(), None);
        assert_eq!(pool.find_free_operator(), Some(OperatorId(0)));

        pool.mark_machine_up(MachineId(0));
        assert_eq!(pool.find_free_machine(), Some(MachineId(0)));
    }
}
