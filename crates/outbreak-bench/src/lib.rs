//! Benchmark profiles for the Outbreak simulation.
//!
//! - [`reference_profile`]: the largest accepted population (1000 agents)
//!   on the default 100×100 plane
//! - [`dense_profile`]: 1000 agents on a 30×30 plane, so most agents are
//!   within sense range of a zombie and encounters dominate
//! - [`scattered_population`]: deterministic positions and states for
//!   spatial-query benchmarks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use outbreak_core::{InfectionState, RandomSource, SeededRandom, Vec2};
use outbreak_engine::{SimConfig, MAX_POPULATION};

/// 1000 agents, default parameters, ten patient zeros.
pub fn reference_profile(seed: u64) -> SimConfig {
    SimConfig {
        population: MAX_POPULATION,
        initial_infected: 10,
        seed,
        ..SimConfig::default()
    }
}

/// 1000 agents crowded onto a 30×30 plane.
pub fn dense_profile(seed: u64) -> SimConfig {
    SimConfig {
        grid_size: 30.0,
        ..reference_profile(seed)
    }
}

/// `n` uniform positions on a `size` plane with roughly one zombie in
/// ten, one infected in twenty and the rest uninfected.
pub fn scattered_population(n: usize, size: f64, seed: u64) -> (Vec<Vec2>, Vec<InfectionState>) {
    let mut rng = SeededRandom::new(seed);
    let positions = (0..n).map(|_| rng.point_in(size)).collect();
    let states = (0..n)
        .map(|_| {
            let u = rng.next_f64();
            if u < 0.1 {
                InfectionState::Zombie
            } else if u < 0.15 {
                InfectionState::Infected
            } else {
                InfectionState::Uninfected
            }
        })
        .collect();
    (positions, states)
}
