//! One simulation step.
//!
//! [`advance`] recomputes the threat latch, gives every agent one turn in
//! ascending index order, then clamps all positions onto the plane.
//! Each turn dispatches on the agent's state at the start of that turn
//! and sees every mutation made by lower-index agents earlier in the
//! same step.
//!
//! Encounters are resolved wherever they arise: from an uninfected
//! fighter's turn, inline after a pursue or chase move, or from a
//! zombie's turn. Nothing deduplicates them, so a pair can be resolved
//! twice in one step, once by each party.

use std::time::Instant;

use outbreak_core::{
    AgentId, InfectionState, PopulationState, RandomSource, Strategy, TickId, Vec2,
};
use outbreak_policies::{
    chase, flee, kill_vote, pursue, resolve_encounter, seek_target, wander, ChaseStep, SeekStep,
};
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::config::SimConfig;
use crate::metrics::StepMetrics;
use crate::population::AgentPopulation;

/// Advance the population by one step and report what happened.
///
/// `tick` is the tick being produced (the caller's counter after
/// incrementing).
pub fn advance(
    population: &mut AgentPopulation,
    tally: &mut PopulationState,
    config: &SimConfig,
    rng: &mut dyn RandomSource,
    tick: TickId,
) -> StepMetrics {
    let start = Instant::now();
    let mut stepper = Stepper {
        population: &mut *population,
        tally: &mut *tally,
        config,
        rng: &mut *rng,
        metrics: StepMetrics {
            tick,
            ..StepMetrics::default()
        },
    };

    if stepper.tally.update_threat(&config.threat) {
        stepper.metrics.threat_latched = true;
        info!(
            target: "outbreak::step",
            tick = tick.0,
            deaths = stepper.tally.deaths(),
            attacked = stepper.tally.attacked(),
            "threat latched; population is now reacting to zombies"
        );
    }

    let ids: Vec<AgentId> = stepper.population.ids().collect();
    for id in ids {
        match stepper.population.state(id) {
            InfectionState::Uninfected => stepper.uninfected_turn(id),
            InfectionState::Infected => stepper.infected_turn(id),
            InfectionState::Zombie => stepper.zombie_turn(id),
            InfectionState::Dead => {}
        }
    }

    stepper.population.clamp_all();

    let mut metrics = stepper.metrics;
    metrics.counts = population.counts();
    metrics.total_us = start.elapsed().as_micros() as u64;
    debug!(
        target: "outbreak::step",
        tick = tick.0,
        uninfected = metrics.counts.uninfected,
        infected = metrics.counts.infected,
        zombie = metrics.counts.zombie,
        dead = metrics.counts.dead,
        encounters = metrics.encounters,
        "step complete"
    );
    metrics
}

/// Mutable borrows of everything one step touches.
struct Stepper<'a> {
    population: &'a mut AgentPopulation,
    tally: &'a mut PopulationState,
    config: &'a SimConfig,
    rng: &'a mut dyn RandomSource,
    metrics: StepMetrics,
}

impl Stepper<'_> {
    fn uninfected_turn(&mut self, id: AgentId) {
        let cfg = self.config;
        let sensed = self
            .population
            .query()
            .neighbors(id, InfectionState::Zombie, cfg.uninfected_sense);

        if sensed.is_empty() || !self.tally.threat() {
            self.seek(id);
            return;
        }

        match self.population.strategy(id) {
            Strategy::Flee => {
                let threats: SmallVec<[Vec2; 8]> =
                    sensed.iter().map(|&z| self.population.position(z)).collect();
                let delta = flee(
                    self.population.position(id),
                    &threats,
                    cfg.uninfected_speed,
                    &mut *self.rng,
                );
                self.population.displace(id, delta);
            }
            Strategy::Fight => self.engage(id, sensed[0]),
        }
    }

    fn seek(&mut self, id: AgentId) {
        let pos = self.population.position(id);
        match seek_target(pos, self.population.target(id), self.config.uninfected_speed) {
            SeekStep::Arrived => {
                self.population.reroll_target(id, &mut *self.rng);
                self.metrics.target_rerolls += 1;
            }
            SeekStep::Advance(delta) => self.population.displace(id, delta),
        }
    }

    /// Fighter with a threat in sense range: fight whoever is in reach,
    /// else close on the first sensed zombie.
    fn engage(&mut self, id: AgentId, quarry: AgentId) {
        let reach = self.config.encounter_distance;
        let in_reach = self
            .population
            .query()
            .neighbors(id, InfectionState::Zombie, reach);
        if let Some(&zombie) = in_reach.first() {
            self.encounter(id, zombie);
            return;
        }

        let pos = self.population.position(id);
        let quarry_pos = self.population.position(quarry);
        // Standing on the quarry: no move, the reach check below fires.
        if let Some(delta) = pursue(pos, quarry_pos, self.config.uninfected_speed) {
            self.population.displace(id, delta);
        }
        if self.population.position(id).distance(quarry_pos) <= reach {
            self.encounter(id, quarry);
        }
    }

    fn infected_turn(&mut self, id: AgentId) {
        let voters = self
            .population
            .query()
            .neighbors(id, InfectionState::Uninfected, self.config.encounter_distance)
            .len();

        if voters > 0 {
            let vote = kill_vote(voters, &self.config.encounters, &mut *self.rng);
            self.metrics.kill_votes += 1;
            trace!(
                target: "outbreak::step",
                agent = %id,
                voters = vote.voters,
                votes = vote.votes,
                kill = vote.is_kill(),
                "kill vote"
            );
            if vote.is_kill() {
                self.population.set_state(id, InfectionState::Dead);
                self.metrics.executions += 1;
                return;
            }
        }

        let timer = self.population.infection_timer(id);
        if timer >= self.config.infection_limit {
            self.population.set_state(id, InfectionState::Zombie);
            self.metrics.escalations += 1;
        } else {
            self.population.set_infection_timer(id, timer + 1);
        }
    }

    fn zombie_turn(&mut self, id: AgentId) {
        let cfg = self.config;
        let query = self.population.query();
        let sensed = query.neighbors(id, InfectionState::Uninfected, cfg.zombie_sense);
        if sensed.is_empty() {
            let delta = wander(cfg.zombie_speed, &mut *self.rng);
            self.population.displace(id, delta);
            return;
        }

        let in_reach = query.neighbors(id, InfectionState::Uninfected, cfg.encounter_distance);
        if let Some(&victim) = in_reach.first() {
            self.encounter(victim, id);
            return;
        }

        let Some((quarry, _)) = query.nearest(id, InfectionState::Uninfected, cfg.zombie_sense)
        else {
            return;
        };
        let pos = self.population.position(id);
        let quarry_pos = self.population.position(quarry);
        match chase(pos, quarry_pos, cfg.zombie_speed, cfg.encounter_distance) {
            ChaseStep::Stride(delta) => self.population.displace(id, delta),
            ChaseStep::Close(delta) => {
                self.population.displace(id, delta);
                self.encounter(quarry, id);
            }
        }
    }

    fn encounter(&mut self, uninfected: AgentId, zombie: AgentId) {
        let (states, strategies) = self.population.encounter_view();
        let outcome = resolve_encounter(
            states,
            strategies,
            uninfected,
            zombie,
            self.tally,
            &self.config.encounters,
            &mut *self.rng,
        );
        self.metrics.encounters += 1;
        trace!(
            target: "outbreak::step",
            uninfected = %uninfected,
            zombie = %zombie,
            uninfected_after = %outcome.uninfected,
            zombie_after = %outcome.zombie,
            "encounter resolved"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_test_utils::{ConstRandom, ScriptedRandom};
    use InfectionState::*;

    /// Targets equal positions, so a seeking agent re-rolls on its first turn.
    fn pop(
        states: Vec<InfectionState>,
        strategies: Vec<Strategy>,
        positions: Vec<Vec2>,
    ) -> AgentPopulation {
        let targets = positions.clone();
        AgentPopulation::from_parts(100.0, states, strategies, positions, targets).unwrap()
    }

    fn threatened() -> PopulationState {
        PopulationState::from_parts(0, 0, true)
    }

    #[test]
    fn dead_agents_do_not_move() {
        let mut p = pop(
            vec![Dead, Dead],
            vec![Strategy::Flee; 2],
            vec![Vec2::new(5.0, 5.0), Vec2::new(5.5, 5.0)],
        );
        let before = p.clone();
        let mut tally = PopulationState::new();
        let mut rng = ScriptedRandom::strict(std::iter::empty());
        let m = advance(&mut p, &mut tally, &SimConfig::default(), &mut rng, TickId(1));
        assert_eq!(p, before);
        assert_eq!(m.counts.dead, 2);
    }

    #[test]
    fn zombie_alone_wanders() {
        let mut p = pop(vec![Zombie], vec![Strategy::Flee], vec![Vec2::new(50.0, 50.0)]);
        let mut tally = PopulationState::new();
        let mut rng = ScriptedRandom::strict([1.0, 0.0]);
        advance(&mut p, &mut tally, &SimConfig::default(), &mut rng, TickId(1));
        assert_eq!(p.position(AgentId(0)), Vec2::new(50.25, 49.75));
    }

    #[test]
    fn uninfected_ignores_zombies_before_threat() {
        // Zombie far away so it strides towards the agent.
        let mut p = pop(
            vec![Uninfected, Zombie],
            vec![Strategy::Flee; 2],
            vec![Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0)],
        );
        p.set_target(AgentId(0), Vec2::new(10.0, 20.0));
        let mut tally = PopulationState::new();
        advance(&mut p, &mut tally, &SimConfig::default(), &mut ConstRandom(0.5), TickId(1));
        let u = p.position(AgentId(0));
        assert!((u.x - 10.0).abs() < 1e-12);
        assert!((u.y - 10.4).abs() < 1e-12);
    }

    #[test]
    fn fleeing_agent_runs_once_threat_is_up() {
        let mut p = pop(
            vec![Uninfected, Zombie],
            vec![Strategy::Flee; 2],
            vec![Vec2::new(10.0, 10.0), Vec2::new(15.0, 10.0)],
        );
        let mut tally = threatened();
        // 0.5 draws make the zombie stride without any wander jitter.
        advance(&mut p, &mut tally, &SimConfig::default(), &mut ConstRandom(0.5), TickId(1));
        let u = p.position(AgentId(0));
        assert!((u.x - 9.2).abs() < 1e-12);
        assert!((u.y - 10.0).abs() < 1e-12);
    }

    #[test]
    fn arrival_rerolls_target_without_moving() {
        let mut p = pop(vec![Uninfected], vec![Strategy::Flee], vec![Vec2::new(3.0, 3.0)]);
        let mut tally = PopulationState::new();
        let mut rng = ScriptedRandom::strict([0.5, 0.25]);
        let m = advance(&mut p, &mut tally, &SimConfig::default(), &mut rng, TickId(1));
        assert_eq!(p.position(AgentId(0)), Vec2::new(3.0, 3.0));
        assert_eq!(p.target(AgentId(0)), Vec2::new(50.0, 25.0));
        assert_eq!(m.target_rerolls, 1);
    }

    #[test]
    fn infected_without_voters_counts_up_then_turns() {
        let mut p = pop(vec![Infected], vec![Strategy::Flee], vec![Vec2::new(1.0, 1.0)]);
        let cfg = SimConfig {
            infection_limit: 2,
            ..SimConfig::default()
        };
        let mut tally = PopulationState::new();
        let mut rng = ScriptedRandom::strict(std::iter::empty());
        advance(&mut p, &mut tally, &cfg, &mut rng, TickId(1));
        advance(&mut p, &mut tally, &cfg, &mut rng, TickId(2));
        assert_eq!(p.infection_timer(AgentId(0)), 2);
        assert_eq!(p.state(AgentId(0)), Infected);
        let m = advance(&mut p, &mut tally, &cfg, &mut rng, TickId(3));
        assert_eq!(p.state(AgentId(0)), Zombie);
        assert_eq!(m.escalations, 1);
    }

    #[test]
    fn kill_vote_majority_executes() {
        // Infected agent 0 with two uninfected neighbours in reach.
        let mut p = pop(
            vec![Infected, Uninfected, Uninfected],
            vec![Strategy::Flee; 3],
            vec![Vec2::new(5.0, 5.0), Vec2::new(5.5, 5.0), Vec2::new(5.0, 5.5)],
        );
        let mut tally = PopulationState::new();
        // Both vote to kill; the uninfected then re-target on arrival.
        let mut rng = ScriptedRandom::new([0.1, 0.1]);
        let m = advance(&mut p, &mut tally, &SimConfig::default(), &mut rng, TickId(1));
        assert_eq!(p.state(AgentId(0)), Dead);
        assert_eq!(m.kill_votes, 1);
        assert_eq!(m.executions, 1);
        assert_eq!(tally.deaths(), 0);
    }

    #[test]
    fn kill_vote_tie_spares() {
        let mut p = pop(
            vec![Infected, Uninfected, Uninfected],
            vec![Strategy::Flee; 3],
            vec![Vec2::new(5.0, 5.0), Vec2::new(5.5, 5.0), Vec2::new(5.0, 5.5)],
        );
        let mut tally = PopulationState::new();
        let mut rng = ScriptedRandom::new([0.1, 0.9]);
        let m = advance(&mut p, &mut tally, &SimConfig::default(), &mut rng, TickId(1));
        assert_eq!(p.state(AgentId(0)), Infected);
        assert_eq!(p.infection_timer(AgentId(0)), 1);
        assert_eq!(m.executions, 0);
    }

    #[test]
    fn spared_infected_at_limit_escalates() {
        let mut p = pop(
            vec![Infected, Uninfected, Uninfected],
            vec![Strategy::Flee; 3],
            vec![Vec2::new(5.0, 5.0), Vec2::new(5.5, 5.0), Vec2::new(5.0, 5.5)],
        );
        let cfg = SimConfig {
            infection_limit: 0,
            ..SimConfig::default()
        };
        let mut tally = PopulationState::new();
        // Tied vote spares agent 0, which is already at the limit.
        let mut rng = ScriptedRandom::new([0.1, 0.9]);
        let m = advance(&mut p, &mut tally, &cfg, &mut rng, TickId(1));
        assert_eq!(m.kill_votes, 1);
        assert_eq!(m.executions, 0);
        assert_eq!(m.escalations, 1);
        assert_eq!(p.state(AgentId(0)), Zombie);
    }

    #[test]
    fn zombie_in_reach_resolves_with_lowest_index() {
        // Both uninfected agents are in the zombie's reach; the lower index
        // is the one resolved.
        let mut p = pop(
            vec![Uninfected, Uninfected, Zombie],
            vec![Strategy::Flee; 3],
            vec![Vec2::new(5.0, 5.0), Vec2::new(5.0, 4.5), Vec2::new(5.0, 4.75)],
        );
        let mut tally = PopulationState::new();
        // Agents 0 and 1 re-roll targets (two draws each), then the bite
        // draw 0.9 kills agent 0.
        let mut rng = ScriptedRandom::strict([0.5, 0.5, 0.5, 0.5, 0.9]);
        let m = advance(&mut p, &mut tally, &SimConfig::default(), &mut rng, TickId(1));
        assert_eq!(p.state(AgentId(0)), Dead);
        assert_eq!(p.state(AgentId(1)), Uninfected);
        assert_eq!(tally.deaths(), 1);
        assert_eq!(m.encounters, 1);
    }

    #[test]
    fn threat_latch_is_reported_once() {
        let mut p = pop(vec![Dead], vec![Strategy::Flee], vec![Vec2::ZERO]);
        let mut tally = PopulationState::from_parts(2, 0, false);
        let mut rng = ConstRandom(0.5);
        let cfg = SimConfig::default();
        assert!(advance(&mut p, &mut tally, &cfg, &mut rng, TickId(1)).threat_latched);
        assert!(tally.threat());
        assert!(!advance(&mut p, &mut tally, &cfg, &mut rng, TickId(2)).threat_latched);
    }
}
