//! Simulation engine for Outbreak populations.
//!
//! [`Simulation`] owns an [`AgentPopulation`], its
//! [`PopulationState`](outbreak_core::PopulationState) counters and an
//! injected random source. Each [`step()`](Simulation::step) advances
//! every agent once, in ascending index order, and returns
//! [`StepMetrics`] for the step; [`snapshot()`](Simulation::snapshot)
//! exposes a read-only view for renderers, and [`snapshot_hash`] /
//! [`compare_snapshot`] check two runs for bit-identical agreement.
//!
//! Single-threaded and synchronous: no operation blocks and there is no
//! I/O. Stop calling `step()` to stop the simulation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod config;
pub mod metrics;
pub mod population;
pub mod simulation;
pub mod step;

pub use compare::{
    compare_snapshot, snapshot_hash, AgentDivergence, DivergenceKind, DivergenceReport,
};
pub use config::{ConfigError, SimConfig, MAX_POPULATION, MIN_POPULATION};
pub use metrics::StepMetrics;
pub use population::AgentPopulation;
pub use simulation::{create_simulation, create_simulation_seeded, Simulation};
