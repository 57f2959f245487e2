use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, VecDeque};

use super::config::SimulationConfig;
use super::error::SimulationError;
use super::event::{EventKind, SimEvent};
use super::event_scheduler::EventScheduler;
use super::product::{CompletionRecord, Product, ProductId, ProductState};
use super::resource_pool::{Machine, MachineId, Operator, OperatorId, ResourcePool};
use super::transition::{Transition, TransitionKind};

/// Observer hooks for callers that want to watch a run without owning it
pub trait SimulationObserver {
    /// Called when the simulation clock advances to a new timestamp
    fn on_clock_advance(&mut self, old_time: f64, new_time: f64);

    /// Called for every transition the engine records
    fn on_transition(&mut self, transition: &Transition);
}

/// A single production-line simulation instance.
///
/// Owns the clock, the event queue, the resource pool and all product state;
/// nothing is shared between instances, so independent replicas can run on
/// separate threads. Generic over the random source so tests can inject a
/// deterministic generator; `from_seed` gives the usual seeded `StdRng`.
pub struct Simulation<R: Rng = StdRng> {
    config: SimulationConfig,
    clock: f64,
    scheduler: EventScheduler,
    pool: ResourcePool,
    products: HashMap<ProductId, Product>,
    waiting_products: VecDeque<ProductId>,
    completions: Vec<CompletionRecord>,
    transitions: Vec<Transition>,
    observers: Vec<Box<dyn SimulationObserver>>,
    rng: R,
}

impl<R: Rng> std::fmt::Debug for Simulation<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .field("products", &self.products.len())
            .field("waiting_products", &self.waiting_products.len())
            .field("completions", &self.completions.len())
            .field("transitions", &self.transitions.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Simulation<StdRng> {
    /// Build a simulation whose stochastic draws come from a seeded `StdRng`
    pub fn from_seed(config: SimulationConfig, seed: u64) -> Result<Self, SimulationError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Build a simulation with a caller-supplied random source.
    ///
    /// Per-machine parameters are drawn here, once, in pool order: process
    /// time, then failure probability, then maintenance duration. They never
    /// change for the lifetime of the run.
    pub fn with_rng(config: SimulationConfig, mut rng: R) -> Result<Self, SimulationError> {
        config.validate()?;

        let machines = (0..config.machine_count)
            .map(|i| {
                let process_time =
                    rng.gen_range(config.process_time.min..=config.process_time.max);
                let failure_probability = rng
                    .gen_range(config.failure_probability.min..=config.failure_probability.max);
                let maintenance_duration = rng
                    .gen_range(config.maintenance_duration.min..=config.maintenance_duration.max);
                Machine::new(
                    MachineId(i),
                    process_time,
                    failure_probability,
                    maintenance_duration,
                )
            })
            .collect();
        let operators = (0..config.operator_count)
            .map(|i| Operator::new(OperatorId(i)))
            .collect();

        Ok(Self {
            config,
            clock: 0.0,
            scheduler: EventScheduler::new(),
            pool: ResourcePool::new(machines, operators),
            products: HashMap::new(),
            waiting_products: VecDeque::new(),
            completions: Vec::new(),
            transitions: Vec::new(),
            observers: Vec::new(),
            rng,
        })
    }

    /// Current simulated time
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    /// Completion records in completion order (not product-id order)
    pub fn completion_records(&self) -> &[CompletionRecord] {
        &self.completions
    }

    /// Every state transition recorded so far, in occurrence order
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Products currently waiting for a free machine/operator pair
    pub fn waiting_count(&self) -> usize {
        self.waiting_products.len()
    }

    /// Products added but not yet finished
    pub fn live_product_count(&self) -> usize {
        self.products.len()
    }

    pub fn pending_event_count(&self) -> usize {
        self.scheduler.len()
    }

    /// Add an observer to the simulation
    pub fn add_observer(&mut self, observer: Box<dyn SimulationObserver>) {
        self.observers.push(observer);
    }

    /// Register a new product and schedule its first allocation attempt at
    /// the current clock time. Callable before a run or between steps.
    pub fn add_product(&mut self, id: ProductId) -> Result<(), SimulationError> {
        if self.products.contains_key(&id) {
            return Err(SimulationError::InvariantViolation(format!(
                "product {} already exists",
                id
            )));
        }
        self.products.insert(id, Product::new(id));
        self.scheduler.schedule(SimEvent::start_process(self.clock, id));
        Ok(())
    }

    /// Execute the event loop until the queue empties or the horizon is hit
    pub fn run(&mut self) -> Result<(), SimulationError> {
        while self.step()? {}
        Ok(())
    }

    /// Process the next event. Returns false when the queue is empty or the
    /// earliest event lies beyond the horizon (that event is discarded
    /// unprocessed and the run is over).
    pub fn step(&mut self) -> Result<bool, SimulationError> {
        let event = match self.scheduler.next() {
            Some(event) => event,
            None => return Ok(false),
        };

        if event.time > self.config.time_horizon {
            debug!(
                "discarding {:?} at {:.2}, past horizon {:.2}",
                event.kind, event.time, self.config.time_horizon
            );
            return Ok(false);
        }

        if event.time != self.clock {
            let old_time = self.clock;
            self.clock = event.time;
            debug!("=== clock advanced to {:.2} ===", self.clock);
            for observer in &mut self.observers {
                observer.on_clock_advance(old_time, event.time);
            }
        }

        self.dispatch(event)?;
        Ok(true)
    }

    fn dispatch(&mut self, event: SimEvent) -> Result<(), SimulationError> {
        match event.kind {
            EventKind::StartProcess => {
                let product = Self::required_product(&event)?;
                self.start_process(product)
            }
            EventKind::EndProcess => {
                let product = Self::required_product(&event)?;
                let machine = Self::required_machine(&event)?;
                let operator = event.operator.ok_or_else(|| {
                    SimulationError::InvariantViolation(
                        "end-process event without an operator".to_string(),
                    )
                })?;
                self.end_process(product, machine, operator)
            }
            EventKind::MachineFailure => {
                let machine = Self::required_machine(&event)?;
                self.handle_machine_failure(machine)
            }
            EventKind::Maintenance => {
                let machine = Self::required_machine(&event)?;
                self.perform_maintenance(machine)
            }
        }
    }

    /// Try to put a product on a machine. Exhausted resources are not an
    /// error: the product joins the waiting queue and is retried when a
    /// release next frees something up.
    fn start_process(&mut self, product_id: ProductId) -> Result<(), SimulationError> {
        if !self.products.contains_key(&product_id) {
            return Err(SimulationError::InvariantViolation(format!(
                "unknown product {}",
                product_id
            )));
        }

        let (machine_id, operator_id) = match (
            self.pool.find_free_machine(),
            self.pool.find_free_operator(),
        ) {
            (Some(machine), Some(operator)) => (machine, operator),
            _ => {
                debug!(
                    "no available machine or operator for product {} at {:.2}",
                    product_id, self.clock
                );
                self.waiting_products.push_back(product_id);
                self.record(TransitionKind::ProductQueued {
                    product: product_id,
                });
                return Ok(());
            }
        };

        self.pool.acquire(machine_id, operator_id)?;
        if let Some(product) = self.products.get_mut(&product_id) {
            product.state = ProductState::Processing;
        }
        let process_time = self.pool.machine(machine_id).process_time;

        info!(
            "starting process for product {} at {:.2} on machine {} with operator {}",
            product_id, self.clock, machine_id, operator_id
        );
        self.scheduler.schedule(SimEvent::end_process(
            self.clock + process_time,
            product_id,
            machine_id,
            operator_id,
        ));
        self.record(TransitionKind::ProcessStarted {
            product: product_id,
            machine: machine_id,
            operator: operator_id,
        });
        Ok(())
    }

    /// Finish a stage: release resources, advance the product, retry one
    /// waiting product, then roll the failure die for the machine that just
    /// finished. The order matters and is part of the engine's contract.
    fn end_process(
        &mut self,
        product_id: ProductId,
        machine_id: MachineId,
        operator_id: OperatorId,
    ) -> Result<(), SimulationError> {
        info!(
            "ending process for product {} at {:.2} on machine {} with operator {}",
            product_id, self.clock, machine_id, operator_id
        );
        self.pool.release(machine_id, operator_id);

        let stage_count = self.config.stage_count;
        let new_stage = {
            let product = self.products.get_mut(&product_id).ok_or_else(|| {
                SimulationError::InvariantViolation(format!("unknown product {}", product_id))
            })?;
            if product.stage >= stage_count {
                return Err(SimulationError::InvariantViolation(format!(
                    "product {} advanced past its final stage",
                    product_id
                )));
            }
            product.stage += 1;
            product.stage
        };
        self.record(TransitionKind::ProcessEnded {
            product: product_id,
            machine: machine_id,
            operator: operator_id,
            stage: new_stage,
        });

        if new_stage < stage_count {
            // Zero-duration hand-off: the next stage's allocation attempt
            // happens at the completion timestamp, before any waiting product
            // is retried.
            self.start_process(product_id)?;
        } else {
            self.products.remove(&product_id);
            self.completions.push(CompletionRecord {
                product_id,
                completion_time: self.clock,
            });
            info!("product {} finished at {:.2}", product_id, self.clock);
            self.record(TransitionKind::ProductFinished {
                product: product_id,
            });
        }

        self.retry_one_waiting()?;

        // Failures are rolled only when a machine finishes a job, never
        // mid-job and never for idle machines.
        let failure_probability = self.pool.machine(machine_id).failure_probability;
        if self.rng.gen::<f64>() < failure_probability {
            info!("machine {} failed at {:.2}", machine_id, self.clock);
            self.scheduler
                .schedule(SimEvent::machine_failure(self.clock, machine_id));
        }
        Ok(())
    }

    /// A failed machine leaves circulation until its maintenance completes
    fn handle_machine_failure(&mut self, machine_id: MachineId) -> Result<(), SimulationError> {
        info!(
            "handling failure for machine {} at {:.2}",
            machine_id, self.clock
        );
        self.pool.mark_machine_down(machine_id);
        let maintenance_duration = self.pool.machine(machine_id).maintenance_duration;
        self.scheduler.schedule(SimEvent::maintenance(
            self.clock + maintenance_duration,
            machine_id,
        ));
        self.record(TransitionKind::MachineFailed {
            machine: machine_id,
        });
        Ok(())
    }

    fn perform_maintenance(&mut self, machine_id: MachineId) -> Result<(), SimulationError> {
        info!(
            "performing maintenance on machine {} at {:.2}",
            machine_id, self.clock
        );
        self.pool.mark_machine_up(machine_id);
        self.record(TransitionKind::MachineRepaired {
            machine: machine_id,
        });
        self.retry_one_waiting()
    }

    /// At most one waiting product is retried per resource release. A retry
    /// that finds nothing free re-queues the product at the back.
    fn retry_one_waiting(&mut self) -> Result<(), SimulationError> {
        if let Some(next_product) = self.waiting_products.pop_front() {
            self.start_process(next_product)?;
        }
        Ok(())
    }

    fn record(&mut self, kind: TransitionKind) {
        let transition = Transition {
            time: self.clock,
            kind,
        };
        for observer in &mut self.observers {
            observer.on_transition(&transition);
        }
        self.transitions.push(transition);
    }

    fn required_product(event: &SimEvent) -> Result<ProductId, SimulationError> {
        event.product.ok_or_else(|| {
            SimulationError::InvariantViolation(format!("{:?} event without a product", event.kind))
        })
    }

    fn required_machine(event: &SimEvent) -> Result<MachineId, SimulationError> {
        event.machine.ok_or_else(|| {
            SimulationError::InvariantViolation(format!("{:?} event without a machine", event.kind))
        })
    }
}
