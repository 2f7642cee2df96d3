//! The simulation front end.
//!
//! [`Simulation`] owns the population, its outbreak counters and the
//! random source, and advances them one step per
//! [`step()`](Simulation::step) call. [`create_simulation`] is the
//! entry point for hosts that only care about the population size.

use outbreak_core::{
    AgentId, InfectionState, PopulationState, RandomSource, SeededRandom, Snapshot, TickId,
};
use outbreak_policies::EncounterOutcome;
use tracing::info;

use crate::config::{ConfigError, SimConfig};
use crate::metrics::StepMetrics;
use crate::population::AgentPopulation;
use crate::step;

// Compile-time assertion: a seeded Simulation can move across threads.
const _: () = {
    fn _assert_send<T: Send>() {}
    fn _check() {
        _assert_send::<Simulation>();
    }
};

/// Create a simulation of `population_size` agents with default
/// parameters and a fresh entropy seed.
///
/// The chosen seed is logged at `info` level and available from
/// [`Simulation::seed`], so the run can be reproduced with
/// [`create_simulation_seeded`].
///
/// # Errors
///
/// [`ConfigError::PopulationOutOfRange`] unless
/// `10 <= population_size <= 1000`.
pub fn create_simulation(population_size: usize) -> Result<Simulation, ConfigError> {
    SimConfig::check_population_range(population_size)?;
    let rng = SeededRandom::from_entropy();
    let config = SimConfig::with_population(population_size, rng.seed());
    Simulation::with_rng(config, rng)
}

/// Like [`create_simulation`] with an explicit seed.
pub fn create_simulation_seeded(
    population_size: usize,
    seed: u64,
) -> Result<Simulation, ConfigError> {
    SimConfig::check_population_range(population_size)?;
    Simulation::new(SimConfig::with_population(population_size, seed))
}

/// A running outbreak.
///
/// Single-threaded and synchronous. A [`Snapshot`] borrows the
/// simulation, so it must be dropped before the next step.
#[derive(Debug)]
pub struct Simulation<R: RandomSource = SeededRandom> {
    config: SimConfig,
    population: AgentPopulation,
    tally: PopulationState,
    rng: R,
    tick: TickId,
    last_metrics: StepMetrics,
}

impl Simulation<SeededRandom> {
    /// Create a simulation seeded from [`SimConfig::seed`].
    ///
    /// # Errors
    ///
    /// Any [`SimConfig::validate`] failure.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let rng = SeededRandom::new(config.seed);
        Self::with_rng(config, rng)
    }

    /// Rebuild the population from scratch with a new seed.
    ///
    /// Tick, counters and metrics return to their initial values.
    pub fn reset(&mut self, seed: u64) -> Result<(), ConfigError> {
        let config = SimConfig {
            seed,
            ..self.config.clone()
        };
        *self = Self::new(config)?;
        Ok(())
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Create a simulation drawing from an injected random source.
    ///
    /// [`SimConfig::seed`] is kept for reporting only; `rng` decides
    /// every draw.
    pub fn with_rng(config: SimConfig, mut rng: R) -> Result<Self, ConfigError> {
        let population = AgentPopulation::create(&config, &mut rng)?;
        info!(
            target: "outbreak::simulation",
            population = config.population,
            initial_infected = config.initial_infected,
            seed = config.seed,
            "simulation created"
        );
        Ok(Self {
            config,
            population,
            tally: PopulationState::new(),
            rng,
            tick: TickId::default(),
            last_metrics: StepMetrics::default(),
        })
    }

    /// Wrap an explicitly built population, for tools and scenario tests.
    ///
    /// `config.population` and `config.grid_size` are overwritten from
    /// the population; everything else is validated as usual.
    pub fn from_population(
        mut config: SimConfig,
        population: AgentPopulation,
        tally: PopulationState,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.population = population.len();
        config.grid_size = population.plane().size();
        config.initial_infected = config.initial_infected.min(config.population);
        config.validate()?;
        Ok(Self {
            config,
            population,
            tally,
            rng,
            tick: TickId::default(),
            last_metrics: StepMetrics::default(),
        })
    }

    /// Advance exactly one step.
    pub fn step(&mut self) -> StepMetrics {
        self.tick = self.tick.next();
        let metrics = step::advance(
            &mut self.population,
            &mut self.tally,
            &self.config,
            &mut self.rng,
            self.tick,
        );
        self.last_metrics = metrics.clone();
        metrics
    }

    /// Advance `n` steps, returning the metrics of the last one.
    pub fn run(&mut self, n: u64) -> Option<StepMetrics> {
        (0..n).map(|_| self.step()).last()
    }

    /// Resolve one encounter outside the step loop.
    ///
    /// Returns `None` unless `uninfected` is currently uninfected and
    /// `zombie` is currently a zombie.
    pub fn resolve_encounter(
        &mut self,
        uninfected: AgentId,
        zombie: AgentId,
    ) -> Option<EncounterOutcome> {
        let n = self.population.len();
        if uninfected.index() >= n || zombie.index() >= n {
            return None;
        }
        if self.population.state(uninfected) != InfectionState::Uninfected
            || self.population.state(zombie) != InfectionState::Zombie
        {
            return None;
        }
        let (states, strategies) = self.population.encounter_view();
        Some(outbreak_policies::resolve_encounter(
            states,
            strategies,
            uninfected,
            zombie,
            &mut self.tally,
            &self.config.encounters,
            &mut self.rng,
        ))
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> Snapshot<'_> {
        self.population.snapshot(self.tick, self.tally)
    }

    /// Steps completed so far.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Seed recorded in the configuration.
    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    /// The validated configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The agents.
    pub fn population(&self) -> &AgentPopulation {
        &self.population
    }

    /// Outbreak counters.
    pub fn population_state(&self) -> PopulationState {
        self.tally
    }

    /// Metrics of the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// No infected agents and no zombies remain, so no state can change
    /// any more.
    pub fn is_settled(&self) -> bool {
        let counts = self.population.counts();
        counts.infected == 0 && counts.zombie == 0
    }
}
