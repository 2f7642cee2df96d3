//! Movement policies and encounter resolution.
//!
//! Everything here is a pure function of its inputs plus draws from an
//! injected [`RandomSource`](outbreak_core::RandomSource):
//!
//! - [`movement`]: wander, seek-target, flee, pursue and chase, each
//!   returning a position delta for the caller to apply.
//! - [`encounter`]: the stochastic outcome table for an uninfected agent
//!   meeting a zombie, and the group kill vote held around an infected
//!   agent.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod encounter;
pub mod movement;

pub use encounter::{kill_vote, resolve_encounter, EncounterOutcome, EncounterTable, KillVote};
pub use movement::{chase, flee, pursue, seek_target, wander, ChaseStep, SeekStep};
