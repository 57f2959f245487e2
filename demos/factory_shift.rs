//! A one-day shift on the reference production line.
//!
//! Plays the caller role the engine leaves out: picks the parameters, draws
//! the day's order influx, feeds products in at shift start and tabulates
//! the completion records afterwards.

use linesim::{ProductId, Simulation, SimulationConfig};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use uuid::Uuid;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let run_id = Uuid::new_v4();
    let config = SimulationConfig::new()
        .with_machine_count(3)
        .with_operator_count(10)
        .with_time_horizon(24.0 * 60.0);

    let mut simulation = Simulation::from_seed(config, 42)?;

    // How many orders land today is the caller's concern, not the engine's.
    let mut arrival_rng = StdRng::seed_from_u64(7);
    let influx = Normal::<f64>::new(10.0, 2.0)?;
    let orders = influx.sample(&mut arrival_rng).round().max(1.0) as u64;
    info!("run {}: {} orders at shift start", run_id, orders);

    for i in 0..orders {
        simulation.add_product(ProductId(i))?;
    }
    simulation.run()?;

    println!("run {}", run_id);
    println!("{:>10}  {:>15}", "product", "completed at");
    for record in simulation.completion_records() {
        println!(
            "{:>10}  {:>15.2}",
            record.product_id.to_string(),
            record.completion_time
        );
    }
    println!(
        "{} of {} products finished before minute {}",
        simulation.completion_records().len(),
        orders,
        simulation.config().time_horizon
    );

    Ok(())
}
