//! Spatial queries for Outbreak simulations.
//!
//! Agents live on a bounded, continuous square [`Plane`]. Neighbour
//! detection is a linear scan through [`SpatialQuery`]; results are
//! always returned in ascending agent order so that "the first sensed
//! agent" is well defined and stable for a fixed input.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod plane;
pub mod query;

pub use error::SpaceError;
pub use plane::Plane;
pub use query::{Neighbors, SpatialQuery};
