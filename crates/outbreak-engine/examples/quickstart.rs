//! Outbreak quickstart: run a seeded outbreak and print the head count.
//!
//! Demonstrates:
//!   1. Installing a tracing subscriber (`RUST_LOG=outbreak=debug` for per-step logs)
//!   2. Building a SimConfig and Simulation
//!   3. Stepping, reading snapshots and metrics, and resetting
//!
//! Run with:
//!   cargo run --example quickstart

use outbreak_core::InfectionState;
use outbreak_engine::{SimConfig, Simulation};
use tracing_subscriber::EnvFilter;

const POPULATION: usize = 400;
const SEED: u64 = 2024;
const MAX_STEPS: u64 = 2_000;
const REPORT_EVERY: u64 = 100;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("outbreak=info")),
        )
        .init();

    let config = SimConfig {
        population: POPULATION,
        initial_infected: 2,
        seed: SEED,
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(config)?;

    println!("tick   uninfected infected zombie dead");
    while sim.tick().0 < MAX_STEPS {
        let m = sim.step();
        if m.tick.0 % REPORT_EVERY == 0 || sim.is_settled() {
            let c = m.counts;
            println!(
                "{:>5}  {:>10} {:>8} {:>6} {:>4}",
                m.tick.0, c.uninfected, c.infected, c.zombie, c.dead
            );
        }
        if sim.is_settled() {
            break;
        }
    }

    let snap = sim.snapshot();
    let tally = snap.tally();
    println!(
        "\nafter {} steps: deaths={} attacked={} threat={}",
        snap.tick(),
        tally.deaths(),
        tally.attacked(),
        tally.threat()
    );

    // A renderer would colour each agent by state.
    for state in InfectionState::ALL {
        println!("  {:<10} {:>4}  ({})", state, snap.counts().get(state), state.color_name());
    }

    // Reset with the same seed reproduces the first step exactly.
    sim.reset(SEED)?;
    sim.step();
    let first = sim.snapshot().to_owned_snapshot();
    sim.reset(SEED)?;
    sim.step();
    assert_eq!(sim.snapshot().to_owned_snapshot(), first);
    println!("\nreset to seed {SEED}: first step reproduced for {} agents", first.positions.len());

    Ok(())
}
