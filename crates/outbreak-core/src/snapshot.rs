//! Read-only views of a population for renderers and analysis.
//!
//! [`Snapshot`] borrows the live per-agent arrays, so a caller holding
//! one cannot step the simulation until it is dropped. [`OwnedSnapshot`]
//! is the detached copy for keeping frames around.

use crate::geometry::Vec2;
use crate::id::{AgentId, TickId};
use crate::state::{InfectionState, Strategy};
use crate::tally::PopulationState;

/// Number of agents in each [`InfectionState`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateCounts {
    /// Agents still uninfected.
    pub uninfected: usize,
    /// Agents infected but not yet turned.
    pub infected: usize,
    /// Active zombies.
    pub zombie: usize,
    /// Dead agents.
    pub dead: usize,
}

impl StateCounts {
    /// Tally a slice of states.
    pub fn from_states(states: &[InfectionState]) -> Self {
        let mut counts = Self::default();
        for &s in states {
            match s {
                InfectionState::Uninfected => counts.uninfected += 1,
                InfectionState::Infected => counts.infected += 1,
                InfectionState::Zombie => counts.zombie += 1,
                InfectionState::Dead => counts.dead += 1,
            }
        }
        counts
    }

    /// Count for one state.
    pub fn get(&self, state: InfectionState) -> usize {
        match state {
            InfectionState::Uninfected => self.uninfected,
            InfectionState::Infected => self.infected,
            InfectionState::Zombie => self.zombie,
            InfectionState::Dead => self.dead,
        }
    }

    /// Total population.
    pub fn total(&self) -> usize {
        self.uninfected + self.infected + self.zombie + self.dead
    }
}

/// Borrowed, immutable view of the population after a step.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    tick: TickId,
    positions: &'a [Vec2],
    states: &'a [InfectionState],
    strategies: &'a [Strategy],
    tally: PopulationState,
}

impl<'a> Snapshot<'a> {
    /// Assemble a view over per-agent slices of equal length.
    ///
    /// Typically called by the engine, not by consumers directly.
    pub fn new(
        tick: TickId,
        positions: &'a [Vec2],
        states: &'a [InfectionState],
        strategies: &'a [Strategy],
        tally: PopulationState,
    ) -> Self {
        debug_assert_eq!(positions.len(), states.len());
        debug_assert_eq!(positions.len(), strategies.len());
        Self {
            tick,
            positions,
            states,
            strategies,
            tally,
        }
    }

    /// Steps completed when this view was taken.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Number of agents.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Agent positions, indexed by [`AgentId::index`].
    pub fn positions(&self) -> &'a [Vec2] {
        self.positions
    }

    /// Agent infection states.
    pub fn states(&self) -> &'a [InfectionState] {
        self.states
    }

    /// Agent strategies.
    pub fn strategies(&self) -> &'a [Strategy] {
        self.strategies
    }

    /// Outbreak counters at the time of the view.
    pub fn tally(&self) -> PopulationState {
        self.tally
    }

    /// Position of one agent.
    pub fn position(&self, id: AgentId) -> Option<Vec2> {
        self.positions.get(id.index()).copied()
    }

    /// State of one agent.
    pub fn state(&self, id: AgentId) -> Option<InfectionState> {
        self.states.get(id.index()).copied()
    }

    /// Per-state head count.
    pub fn counts(&self) -> StateCounts {
        StateCounts::from_states(self.states)
    }

    /// Detach the view into an owned copy.
    pub fn to_owned_snapshot(&self) -> OwnedSnapshot {
        OwnedSnapshot {
            tick: self.tick,
            positions: self.positions.to_vec(),
            states: self.states.to_vec(),
            strategies: self.strategies.to_vec(),
            tally: self.tally,
        }
    }
}

/// Owned copy of a [`Snapshot`].
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedSnapshot {
    /// Steps completed when the snapshot was taken.
    pub tick: TickId,
    /// Agent positions.
    pub positions: Vec<Vec2>,
    /// Agent infection states.
    pub states: Vec<InfectionState>,
    /// Agent strategies.
    pub strategies: Vec<Strategy>,
    /// Outbreak counters.
    pub tally: PopulationState,
}

impl OwnedSnapshot {
    /// Borrow as a [`Snapshot`] view.
    pub fn as_snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(
            self.tick,
            &self.positions,
            &self.states,
            &self.strategies,
            self.tally,
        )
    }
}
