//! Encounter resolution and the infected-agent kill vote.
//!
//! An encounter is an uninfected agent and a zombie within encounter
//! distance of each other. The outcome depends on the uninfected agent's
//! [`Strategy`] and, for fighters, on whether anyone has died yet: the
//! population only arms itself properly after the first fatality.
//!
//! ```text
//! Flee ── bitten ──► Infected (+attacked) ── zombie_destroyed_while_bitten ──► zombie Dead
//!      └─ else ────► Dead (+deaths)
//!
//! Fight, deaths == 0 ── untrained_win ──► zombie Dead ── untrained_infection ──► Infected (+attacked)
//!                    └─ else ──────────► stalemate
//!
//! Fight, deaths > 0 ─── armed_win ──► zombie Dead ── armed_infection ──► Infected (+attacked)
//!                   └── else ─── armed_loss_death ──► Dead (+deaths)
//!                            └── else ─────────────► Infected (+attacked)
//! ```

use outbreak_core::{AgentId, InfectionState, PopulationState, RandomSource, Strategy};

/// Probabilities driving [`resolve_encounter`] and [`kill_vote`].
#[derive(Clone, Debug, PartialEq)]
pub struct EncounterTable {
    /// Fleeing agent caught and bitten (else killed). Default: 0.5.
    pub bitten: f64,
    /// Zombie destroyed while biting a fleeing agent. Default: 0.3.
    pub zombie_destroyed_while_bitten: f64,
    /// Fighter destroys the zombie before any death. Default: 0.5.
    pub untrained_win: f64,
    /// Winning untrained fighter infected in the struggle. Default: 0.75.
    pub untrained_infection: f64,
    /// Fighter destroys the zombie once deaths have occurred. Default: 0.7.
    pub armed_win: f64,
    /// Winning armed fighter infected in the struggle. Default: 0.3.
    pub armed_infection: f64,
    /// Losing armed fighter killed (else infected). Default: 0.3.
    pub armed_loss_death: f64,
    /// Chance that one bystander votes to kill an infected agent. Default: 0.5.
    pub kill_vote: f64,
}

impl Default for EncounterTable {
    fn default() -> Self {
        Self {
            bitten: 0.5,
            zombie_destroyed_while_bitten: 0.3,
            untrained_win: 0.5,
            untrained_infection: 0.75,
            armed_win: 0.7,
            armed_infection: 0.3,
            armed_loss_death: 0.3,
            kill_vote: 0.5,
        }
    }
}

impl EncounterTable {
    /// Every probability with its field name, for validation.
    pub fn probabilities(&self) -> [(&'static str, f64); 8] {
        [
            ("bitten", self.bitten),
            (
                "zombie_destroyed_while_bitten",
                self.zombie_destroyed_while_bitten,
            ),
            ("untrained_win", self.untrained_win),
            ("untrained_infection", self.untrained_infection),
            ("armed_win", self.armed_win),
            ("armed_infection", self.armed_infection),
            ("armed_loss_death", self.armed_loss_death),
            ("kill_vote", self.kill_vote),
        ]
    }
}

/// States of both parties after an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncounterOutcome {
    /// The uninfected party: `Uninfected` (stalemate), `Infected`, or `Dead`.
    pub uninfected: InfectionState,
    /// The zombie party: `Zombie` or `Dead`.
    pub zombie: InfectionState,
}

impl EncounterOutcome {
    /// Neither party changed state.
    pub fn is_stalemate(&self) -> bool {
        self.uninfected == InfectionState::Uninfected && self.zombie == InfectionState::Zombie
    }

    /// The zombie was destroyed.
    pub fn zombie_destroyed(&self) -> bool {
        self.zombie == InfectionState::Dead
    }
}

/// Resolve one uninfected/zombie encounter in place.
///
/// Mutates `states` for both parties and records deaths and infections
/// in `tally`. Called both from the per-agent dispatch and inline from
/// the pursue and chase policies; it does not deduplicate, so the same
/// pair may be resolved twice in one step.
pub fn resolve_encounter(
    states: &mut [InfectionState],
    strategies: &[Strategy],
    uninfected: AgentId,
    zombie: AgentId,
    tally: &mut PopulationState,
    table: &EncounterTable,
    rng: &mut dyn RandomSource,
) -> EncounterOutcome {
    let (u, z) = (uninfected.index(), zombie.index());
    debug_assert_eq!(states[u], InfectionState::Uninfected);
    debug_assert_eq!(states[z], InfectionState::Zombie);

    match strategies[u] {
        Strategy::Flee => {
            if rng.chance(table.bitten) {
                states[u] = InfectionState::Infected;
                tally.record_attack();
                if rng.chance(table.zombie_destroyed_while_bitten) {
                    states[z] = InfectionState::Dead;
                }
            } else {
                states[u] = InfectionState::Dead;
                tally.record_death();
            }
        }
        Strategy::Fight if tally.deaths() == 0 => {
            if rng.chance(table.untrained_win) {
                states[z] = InfectionState::Dead;
                if rng.chance(table.untrained_infection) {
                    states[u] = InfectionState::Infected;
                    tally.record_attack();
                }
            }
        }
        Strategy::Fight => {
            if rng.chance(table.armed_win) {
                states[z] = InfectionState::Dead;
                if rng.chance(table.armed_infection) {
                    states[u] = InfectionState::Infected;
                    tally.record_attack();
                }
            } else if rng.chance(table.armed_loss_death) {
                states[u] = InfectionState::Dead;
                tally.record_death();
            } else {
                states[u] = InfectionState::Infected;
                tally.record_attack();
            }
        }
    }

    EncounterOutcome {
        uninfected: states[u],
        zombie: states[z],
    }
}

/// Result of a group kill vote around an infected agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KillVote {
    /// Uninfected agents taking part.
    pub voters: usize,
    /// Votes cast to kill.
    pub votes: usize,
}

impl KillVote {
    /// Strict majority over `voters / 2` (integer division): ties spare.
    pub fn is_kill(&self) -> bool {
        self.votes > self.voters / 2
    }
}

/// Each voter independently votes to kill with probability
/// [`EncounterTable::kill_vote`].
pub fn kill_vote(voters: usize, table: &EncounterTable, rng: &mut dyn RandomSource) -> KillVote {
    let votes = (0..voters).filter(|_| rng.chance(table.kill_vote)).count();
    KillVote { voters, votes }
}
