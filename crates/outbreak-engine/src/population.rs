//! Struct-of-arrays storage for every agent of one simulation.
//!
//! Agent `i` is described by index `i` of each parallel vector. The
//! vectors never change length after construction; agents are never
//! added or removed, only moved between states.

use outbreak_core::{
    AgentId, InfectionState, PopulationState, RandomSource, Snapshot, StateCounts, Strategy,
    TickId, Vec2,
};
use outbreak_space::{Plane, SpatialQuery};

use crate::config::{ConfigError, SimConfig};

/// Every agent's state, strategy, infection timer, position and target.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentPopulation {
    plane: Plane,
    states: Vec<InfectionState>,
    strategies: Vec<Strategy>,
    infection_timers: Vec<u32>,
    positions: Vec<Vec2>,
    targets: Vec<Vec2>,
}

impl AgentPopulation {
    /// Build a random population from a validated configuration.
    ///
    /// Random draws happen in a fixed order: the patient-zero set, one
    /// strategy draw per agent, one position per agent, then one target
    /// per agent. A fixed seed therefore always yields the same
    /// population.
    ///
    /// # Errors
    ///
    /// Any [`SimConfig::validate`] failure.
    pub fn create(config: &SimConfig, rng: &mut dyn RandomSource) -> Result<Self, ConfigError> {
        config.validate()?;
        let plane = Plane::new(config.grid_size)?;
        let n = config.population;

        let mut states = vec![InfectionState::Uninfected; n];
        for i in rng.choose_distinct(n, config.initial_infected) {
            if let Some(s) = states.get_mut(i) {
                *s = InfectionState::Zombie;
            }
        }

        let strategies = (0..n)
            .map(|_| {
                if rng.chance(config.fight_strategy_probability) {
                    Strategy::Fight
                } else {
                    Strategy::Flee
                }
            })
            .collect();
        let positions = (0..n).map(|_| rng.point_in(plane.size())).collect();
        let targets = (0..n).map(|_| rng.point_in(plane.size())).collect();

        Ok(Self {
            plane,
            states,
            strategies,
            infection_timers: vec![0; n],
            positions,
            targets,
        })
    }

    /// Assemble a population from explicit per-agent arrays.
    ///
    /// Infection timers start at zero. Positions outside the plane are
    /// clamped onto it.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyPopulation`] for zero agents,
    /// [`ConfigError::LengthMismatch`] if the arrays disagree in length,
    /// [`ConfigError::Space`] for a bad grid size.
    pub fn from_parts(
        grid_size: f64,
        states: Vec<InfectionState>,
        strategies: Vec<Strategy>,
        positions: Vec<Vec2>,
        targets: Vec<Vec2>,
    ) -> Result<Self, ConfigError> {
        let plane = Plane::new(grid_size)?;
        let n = states.len();
        if n == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if u32::try_from(n).is_err() {
            return Err(ConfigError::PopulationOverflow { value: n });
        }
        for (field, actual) in [
            ("strategies", strategies.len()),
            ("positions", positions.len()),
            ("targets", targets.len()),
        ] {
            if actual != n {
                return Err(ConfigError::LengthMismatch {
                    field,
                    expected: n,
                    actual,
                });
            }
        }

        let mut population = Self {
            plane,
            states,
            strategies,
            infection_timers: vec![0; n],
            positions,
            targets,
        };
        population.clamp_all();
        Ok(population)
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Number of agents.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always `false` for a constructed population.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The plane the agents live on.
    pub fn plane(&self) -> Plane {
        self.plane
    }

    /// Every agent id, in processing order.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> {
        (0..self.len() as u32).map(AgentId)
    }

    /// State of one agent.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range. The same holds for every other
    /// per-agent accessor and setter.
    pub fn state(&self, id: AgentId) -> InfectionState {
        self.states[id.index()]
    }

    /// Strategy of one agent.
    pub fn strategy(&self, id: AgentId) -> Strategy {
        self.strategies[id.index()]
    }

    /// Position of one agent.
    pub fn position(&self, id: AgentId) -> Vec2 {
        self.positions[id.index()]
    }

    /// Personal destination of one agent.
    pub fn target(&self, id: AgentId) -> Vec2 {
        self.targets[id.index()]
    }

    /// Steps spent infected so far.
    pub fn infection_timer(&self, id: AgentId) -> u32 {
        self.infection_timers[id.index()]
    }

    /// All states.
    pub fn states(&self) -> &[InfectionState] {
        &self.states
    }

    /// All strategies.
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// All positions.
    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    /// All targets.
    pub fn targets(&self) -> &[Vec2] {
        &self.targets
    }

    /// Head count per state.
    pub fn counts(&self) -> StateCounts {
        StateCounts::from_states(&self.states)
    }

    /// Neighbour lookup over the current positions and states.
    pub fn query(&self) -> SpatialQuery<'_> {
        SpatialQuery::new(&self.positions, &self.states)
    }

    /// Immutable view for renderers.
    pub fn snapshot(&self, tick: TickId, tally: PopulationState) -> Snapshot<'_> {
        Snapshot::new(tick, &self.positions, &self.states, &self.strategies, tally)
    }

    // ── Mutation ────────────────────────────────────────────────────

    /// Overwrite the state of one agent.
    pub fn set_state(&mut self, id: AgentId, state: InfectionState) {
        self.states[id.index()] = state;
    }

    /// Overwrite the destination of one agent.
    pub fn set_target(&mut self, id: AgentId, target: Vec2) {
        self.targets[id.index()] = target;
    }

    /// Overwrite the infection timer of one agent.
    pub fn set_infection_timer(&mut self, id: AgentId, steps: u32) {
        self.infection_timers[id.index()] = steps;
    }

    /// Pick a fresh uniform destination for one agent.
    pub fn reroll_target(&mut self, id: AgentId, rng: &mut dyn RandomSource) {
        self.targets[id.index()] = rng.point_in(self.plane.size());
    }

    /// Clamp every position into `[0, grid_size]` per axis.
    pub fn clamp_all(&mut self) {
        self.plane.clamp_all(&mut self.positions);
    }

    /// Move an agent without clamping; the step clamps once at the end.
    pub(crate) fn displace(&mut self, id: AgentId, delta: Vec2) {
        self.positions[id.index()] += delta;
    }

    /// Disjoint borrows for the encounter resolver.
    pub(crate) fn encounter_view(&mut self) -> (&mut [InfectionState], &[Strategy]) {
        (&mut self.states, &self.strategies)
    }
}
