//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] carries every tunable of a run. Every constructor calls
//! [`validate()`](SimConfig::validate) first, so a [`Simulation`] never
//! exists in a half-valid state.
//!
//! [`Simulation`]: crate::Simulation

use std::error::Error;
use std::fmt;

use outbreak_core::ThreatConfig;
use outbreak_policies::EncounterTable;
use outbreak_space::SpaceError;

/// Smallest population accepted by [`create_simulation`](crate::create_simulation).
pub const MIN_POPULATION: usize = 10;

/// Largest population accepted by [`create_simulation`](crate::create_simulation).
pub const MAX_POPULATION: usize = 1000;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a [`SimConfig`] or assembling a
/// population.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Population size outside the range accepted by the convenience
    /// constructors.
    PopulationOutOfRange {
        /// The requested size.
        value: usize,
        /// Inclusive lower bound.
        min: usize,
        /// Inclusive upper bound.
        max: usize,
    },
    /// Population of zero agents.
    EmptyPopulation,
    /// Population does not fit in an [`AgentId`](outbreak_core::AgentId).
    PopulationOverflow {
        /// The requested size.
        value: usize,
    },
    /// More patient-zero agents than agents.
    TooManyInitialInfected {
        /// Requested patient-zero count.
        initial_infected: usize,
        /// Population size.
        population: usize,
    },
    /// The grid size was rejected by the plane.
    Space(SpaceError),
    /// A speed, radius or distance is negative or not finite.
    InvalidParameter {
        /// Field name.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// A probability lies outside `[0, 1]`.
    InvalidProbability {
        /// Field name.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// Per-agent arrays passed to
    /// [`AgentPopulation::from_parts`](crate::AgentPopulation::from_parts)
    /// disagree in length.
    LengthMismatch {
        /// Which array.
        field: &'static str,
        /// Expected length (the number of states).
        expected: usize,
        /// Actual length.
        actual: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PopulationOutOfRange { value, min, max } => {
                write!(f, "population {value} is outside [{min}, {max}]")
            }
            Self::EmptyPopulation => write!(f, "population must contain at least one agent"),
            Self::PopulationOverflow { value } => {
                write!(f, "population {value} exceeds u32::MAX")
            }
            Self::TooManyInitialInfected {
                initial_infected,
                population,
            } => write!(
                f,
                "initial_infected {initial_infected} exceeds population {population}"
            ),
            Self::Space(e) => write!(f, "space: {e}"),
            Self::InvalidParameter { name, value } => {
                write!(f, "{name} must be finite and non-negative, got {value}")
            }
            Self::InvalidProbability { name, value } => {
                write!(f, "{name} must be a probability in [0, 1], got {value}")
            }
            Self::LengthMismatch {
                field,
                expected,
                actual,
            } => write!(f, "{field} has {actual} entries, expected {expected}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Complete configuration for one simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Number of agents. Default: 100.
    pub population: usize,
    /// Agents that start as zombies. Default: 1.
    pub initial_infected: usize,
    /// Side length of the square plane. Default: 100.0.
    pub grid_size: f64,
    /// Radius within which a zombie senses uninfected agents. Default: 15.0.
    pub zombie_sense: f64,
    /// Zombie stride per step. Default: 1.0.
    pub zombie_speed: f64,
    /// Radius within which an uninfected agent senses zombies. Default: 12.0.
    pub uninfected_sense: f64,
    /// Uninfected stride per step when fleeing or pursuing. Default: 0.8.
    pub uninfected_speed: f64,
    /// Distance at which agents interact. Default: 1.0.
    pub encounter_distance: f64,
    /// Steps an infected agent survives before turning. Default: 60.
    pub infection_limit: u32,
    /// Chance that an agent is assigned [`Strategy::Fight`](outbreak_core::Strategy::Fight).
    /// Default: 0.2.
    pub fight_strategy_probability: f64,
    /// When the population starts reacting to zombies.
    pub threat: ThreatConfig,
    /// Encounter and kill-vote probabilities.
    pub encounters: EncounterTable,
    /// Seed for [`SeededRandom`](outbreak_core::SeededRandom). Default: 0.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            population: 100,
            initial_infected: 1,
            grid_size: 100.0,
            zombie_sense: 15.0,
            zombie_speed: 1.0,
            uninfected_sense: 12.0,
            uninfected_speed: 0.8,
            encounter_distance: 1.0,
            infection_limit: 60,
            fight_strategy_probability: 0.2,
            threat: ThreatConfig::default(),
            encounters: EncounterTable::default(),
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Default configuration with the given population and seed.
    pub fn with_population(population: usize, seed: u64) -> Self {
        Self {
            population,
            seed,
            ..Self::default()
        }
    }

    /// Check the population size against the range accepted by the
    /// convenience constructors.
    pub fn check_population_range(population: usize) -> Result<(), ConfigError> {
        if !(MIN_POPULATION..=MAX_POPULATION).contains(&population) {
            return Err(ConfigError::PopulationOutOfRange {
                value: population,
                min: MIN_POPULATION,
                max: MAX_POPULATION,
            });
        }
        Ok(())
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Population: non-empty, addressable, patient zero fits.
        if self.population == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if u32::try_from(self.population).is_err() {
            return Err(ConfigError::PopulationOverflow {
                value: self.population,
            });
        }
        if self.initial_infected > self.population {
            return Err(ConfigError::TooManyInitialInfected {
                initial_infected: self.initial_infected,
                population: self.population,
            });
        }
        // 2. Plane.
        outbreak_space::Plane::new(self.grid_size)?;
        // 3. Speeds and radii.
        for (name, value) in [
            ("zombie_sense", self.zombie_sense),
            ("zombie_speed", self.zombie_speed),
            ("uninfected_sense", self.uninfected_sense),
            ("uninfected_speed", self.uninfected_speed),
            ("encounter_distance", self.encounter_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }
        // 4. Probabilities.
        let fight = ("fight_strategy_probability", self.fight_strategy_probability);
        for (name, value) in std::iter::once(fight).chain(self.encounters.probabilities()) {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        Ok(())
    }
}
