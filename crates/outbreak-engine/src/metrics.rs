//! Per-step counters for the simulation engine.
//!
//! [`StepMetrics`] records what happened during a single step. The
//! engine fills one in on every [`step()`](crate::Simulation::step) call
//! and keeps the most recent one for later inspection.

use outbreak_core::{StateCounts, TickId};

/// Counters and timing collected during a single step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Tick reached by the step.
    pub tick: TickId,
    /// Head count per state after the step.
    pub counts: StateCounts,
    /// Encounters resolved, counting a doubly-resolved pair twice.
    pub encounters: u32,
    /// Kill votes held around infected agents.
    pub kill_votes: u32,
    /// Infected agents killed by a vote.
    pub executions: u32,
    /// Infected agents that turned into zombies.
    pub escalations: u32,
    /// Uninfected agents that reached their target and picked a new one.
    pub target_rerolls: u32,
    /// Whether the threat latch tripped at the start of this step.
    pub threat_latched: bool,
    /// Wall-clock time for the step, in microseconds.
    pub total_us: u64,
}
