//! Outbreak: an agent-based zombie outbreak simulation.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Outbreak sub-crates. For most users, adding `outbreak` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use outbreak::prelude::*;
//!
//! // 200 agents, one patient zero, a fixed seed.
//! let mut sim = create_simulation_seeded(200, 42).unwrap();
//! for _ in 0..50 {
//!     sim.step();
//! }
//!
//! let snap = sim.snapshot();
//! assert_eq!(snap.tick(), TickId(50));
//! assert_eq!(snap.counts().total(), 200);
//! for (pos, state) in snap.positions().iter().zip(snap.states()) {
//!     // Renderers colour each agent by state.
//!     let _ = (pos.x, pos.y, state.color_name());
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `outbreak-core` | IDs, geometry, states, counters, snapshots, random sources |
//! | [`space`] | `outbreak-space` | The bounded plane and neighbour queries |
//! | [`policies`] | `outbreak-policies` | Movement policies, encounter resolution, kill vote |
//! | [`engine`] | `outbreak-engine` | Configuration, population storage, the step driver, determinism checks |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`outbreak-core`).
///
/// Contains [`types::Vec2`], the agent enums, [`types::PopulationState`],
/// the [`types::RandomSource`] trait and [`types::Snapshot`].
pub use outbreak_core as types;

/// The plane and neighbour queries (`outbreak-space`).
pub use outbreak_space as space;

/// Movement policies and encounter resolution (`outbreak-policies`).
pub use outbreak_policies as policies;

/// Simulation engine (`outbreak-engine`).
///
/// [`engine::Simulation`] owns a population and advances it one step at
/// a time.
pub use outbreak_engine as engine;

/// Common imports for typical Outbreak usage.
///
/// ```rust
/// use outbreak::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use outbreak_core::{
        AgentId, InfectionState, OwnedSnapshot, PopulationState, RandomSource, SeededRandom,
        Snapshot, StateCounts, Strategy, ThreatConfig, TickId, Vec2,
    };

    // Policies
    pub use outbreak_policies::EncounterTable;

    // Engine
    pub use outbreak_engine::{
        create_simulation, create_simulation_seeded, ConfigError, SimConfig, Simulation,
        StepMetrics,
    };
}
