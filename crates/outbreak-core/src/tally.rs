//! Population-wide outbreak counters and the sticky threat latch.

/// Thresholds at which the population recognises the outbreak.
///
/// The latch trips once `deaths > deaths_above` or
/// `attacked >= attacked_at_least`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThreatConfig {
    /// Deaths must strictly exceed this count. Default: 1.
    pub deaths_above: u64,
    /// Infections by encounter at or above this count. Default: 5.
    pub attacked_at_least: u64,
}

impl Default for ThreatConfig {
    fn default() -> Self {
        Self {
            deaths_above: 1,
            attacked_at_least: 5,
        }
    }
}

/// Counters shared by every agent of one simulation.
///
/// Owned by the simulation alongside its population and passed by
/// reference into each step. `deaths` and `attacked` only ever grow;
/// `threat` only ever turns on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PopulationState {
    deaths: u64,
    attacked: u64,
    threat: bool,
}

impl PopulationState {
    /// Fresh counters: no deaths, no attacks, no threat.
    pub fn new() -> Self {
        Self::default()
    }

    /// Agents killed in a losing encounter.
    pub fn deaths(&self) -> u64 {
        self.deaths
    }

    /// Agents infected through an encounter.
    pub fn attacked(&self) -> u64 {
        self.attacked
    }

    /// Whether uninfected agents react to sensed zombies.
    pub fn threat(&self) -> bool {
        self.threat
    }

    /// Record an uninfected agent killed by a zombie.
    pub fn record_death(&mut self) {
        self.deaths += 1;
    }

    /// Record an uninfected agent infected during an encounter.
    pub fn record_attack(&mut self) {
        self.attacked += 1;
    }

    /// Re-evaluate the threat latch.
    ///
    /// Returns `true` only on the call that trips the latch. Once set,
    /// the latch stays set regardless of the counters.
    pub fn update_threat(&mut self, config: &ThreatConfig) -> bool {
        if self.threat {
            return false;
        }
        if self.deaths > config.deaths_above || self.attacked >= config.attacked_at_least {
            self.threat = true;
            return true;
        }
        false
    }

    /// Rebuild counters from explicit values, e.g. to restore a scenario.
    pub fn from_parts(deaths: u64, attacked: u64, threat: bool) -> Self {
        Self {
            deaths,
            attacked,
            threat,
        }
    }
}
