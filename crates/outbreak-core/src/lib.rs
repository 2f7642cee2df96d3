//! Core types and traits for the Outbreak simulation.
//!
//! This is the leaf crate of the workspace. It defines the agent data
//! model (identifiers, infection states, strategies, planar vectors), the
//! injected [`RandomSource`] capability, the process-wide
//! [`PopulationState`] counters, and the read-only [`Snapshot`] view a
//! rendering layer consumes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod geometry;
pub mod id;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod tally;

pub use geometry::Vec2;
pub use id::{AgentId, TickId};
pub use rng::{RandomSource, SeededRandom};
pub use snapshot::{OwnedSnapshot, Snapshot, StateCounts};
pub use state::{InfectionState, Strategy};
pub use tally::{PopulationState, ThreatConfig};
