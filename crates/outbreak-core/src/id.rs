//! Strongly-typed identifiers.

use std::fmt;

/// Identifies an agent within a population.
///
/// Agents have no identity beyond their index: `AgentId(n)` is the n-th
/// slot of every per-agent array, and it never changes for the lifetime
/// of the population (dead agents keep their slot).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u32);

impl AgentId {
    /// The agent's slot in the per-agent arrays.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AgentId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing step counter.
///
/// Zero before the first step; incremented each time the simulation
/// advances one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick following this one.
    #[inline]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
