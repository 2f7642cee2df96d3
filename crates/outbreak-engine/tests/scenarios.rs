//! Hand-built scenarios with scripted random draws.
//!
//! Each test places a few agents explicitly, scripts every draw the step
//! will make, and checks the exact outcome.

use outbreak_core::{AgentId, InfectionState, PopulationState, SeededRandom, Strategy, Vec2};
use outbreak_engine::{AgentPopulation, SimConfig, Simulation};
use outbreak_test_utils::ScriptedRandom;
use proptest::prelude::*;

use InfectionState::*;

fn population(agents: &[(InfectionState, Strategy, Vec2)]) -> AgentPopulation {
    AgentPopulation::from_parts(
        100.0,
        agents.iter().map(|a| a.0).collect(),
        agents.iter().map(|a| a.1).collect(),
        agents.iter().map(|a| a.2).collect(),
        // Far-away targets: seeking agents advance instead of re-rolling.
        vec![Vec2::new(99.0, 99.0); agents.len()],
    )
    .unwrap()
}

fn threatened() -> PopulationState {
    PopulationState::from_parts(0, 0, true)
}

#[test]
fn quiet_population_only_walks_to_targets() {
    let config = SimConfig {
        population: 10,
        initial_infected: 0,
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(config).unwrap();
    for _ in 0..25 {
        let before = sim.snapshot().to_owned_snapshot();
        let targets = sim.population().targets().to_vec();
        let m = sim.step();

        assert_eq!(m.encounters, 0);
        assert_eq!(m.kill_votes, 0);
        let after = sim.snapshot();
        assert!(after.states().iter().all(|&s| s == Uninfected));
        assert_eq!(after.tally(), PopulationState::new());

        for i in 0..10 {
            let moved = before.positions[i].distance(after.positions()[i]);
            let remaining = before.positions[i].distance(targets[i]);
            if remaining < 0.5 {
                assert_eq!(moved, 0.0, "agent {i} should re-roll in place");
            } else {
                assert!((moved - 0.4).abs() < 1e-9, "agent {i} moved {moved}");
            }
        }
    }
}

#[test]
fn encounter_is_resolved_by_both_parties() {
    // Fighter 0 and zombie 1 stand in reach. The fighter's turn ends in a
    // stalemate; the zombie's own turn resolves the same pair again.
    let pop = population(&[
        (Uninfected, Strategy::Fight, Vec2::new(20.0, 20.0)),
        (Zombie, Strategy::Flee, Vec2::new(20.5, 20.0)),
    ]);
    let rng = ScriptedRandom::strict([
        0.9, // fighter loses the untrained fight: stalemate
        0.1, // second resolution: fighter wins
        0.9, // and is not infected
    ]);
    let mut sim =
        Simulation::from_population(SimConfig::default(), pop, threatened(), rng).unwrap();
    let m = sim.step();
    assert_eq!(m.encounters, 2);
    let snap = sim.snapshot();
    assert_eq!(snap.state(AgentId(0)), Some(Uninfected));
    assert_eq!(snap.state(AgentId(1)), Some(Dead));
}

#[test]
fn pursuing_fighter_resolves_inline_after_moving() {
    let pop = population(&[
        (Uninfected, Strategy::Fight, Vec2::new(10.0, 10.0)),
        (Zombie, Strategy::Flee, Vec2::new(11.5, 10.0)),
    ]);
    let rng = ScriptedRandom::strict([0.1, 0.9]);
    let mut sim =
        Simulation::from_population(SimConfig::default(), pop, threatened(), rng).unwrap();
    let m = sim.step();
    assert_eq!(m.encounters, 1);
    let snap = sim.snapshot();
    let fighter = snap.position(AgentId(0)).unwrap();
    assert!((fighter.x - 10.8).abs() < 1e-12);
    assert_eq!(snap.state(AgentId(1)), Some(Dead));
}

#[test]
fn zombie_closes_in_without_overshooting() {
    let config = SimConfig {
        zombie_speed: 2.0,
        ..SimConfig::default()
    };
    let pop = population(&[
        (Zombie, Strategy::Flee, Vec2::new(10.0, 10.0)),
        (Uninfected, Strategy::Flee, Vec2::new(11.2, 10.0)),
    ]);
    let rng = ScriptedRandom::strict([
        0.1, // bitten
        0.9, // zombie survives
    ]);
    let mut sim = Simulation::from_population(config, pop, PopulationState::new(), rng).unwrap();
    let m = sim.step();
    assert_eq!(m.encounters, 1);
    let snap = sim.snapshot();
    let zombie = snap.position(AgentId(0)).unwrap();
    assert!((zombie.x - 10.2).abs() < 1e-12);
    assert_eq!(snap.state(AgentId(1)), Some(Infected));
    assert_eq!(snap.tally().attacked(), 1);
    // The victim's own turn came after the bite: its timer started.
    assert_eq!(sim.population().infection_timer(AgentId(1)), 1);
}

#[test]
fn kill_vote_tie_spares_the_infected() {
    let pop = population(&[
        (Infected, Strategy::Flee, Vec2::new(50.0, 50.0)),
        (Uninfected, Strategy::Flee, Vec2::new(50.5, 50.0)),
        (Uninfected, Strategy::Flee, Vec2::new(49.5, 50.0)),
        (Uninfected, Strategy::Flee, Vec2::new(50.0, 50.5)),
        (Uninfected, Strategy::Flee, Vec2::new(50.0, 49.5)),
    ]);
    // Two of four votes: not a strict majority.
    let rng = ScriptedRandom::strict([0.1, 0.9, 0.1, 0.9]);
    let mut sim =
        Simulation::from_population(SimConfig::default(), pop, PopulationState::new(), rng)
            .unwrap();
    let m = sim.step();
    assert_eq!(m.kill_votes, 1);
    assert_eq!(m.executions, 0);
    assert_eq!(sim.snapshot().state(AgentId(0)), Some(Infected));
}

#[test]
fn fleeing_agent_reacts_once_threat_latches() {
    // Five attacks on record: the first step latches the threat, so the
    // fleeing agent reacts immediately.
    let pop = population(&[
        (Uninfected, Strategy::Flee, Vec2::new(40.0, 40.0)),
        (Zombie, Strategy::Flee, Vec2::new(45.0, 40.0)),
    ]);
    let tally = PopulationState::from_parts(0, 5, false);
    let rng = ScriptedRandom::strict(std::iter::empty());
    let mut sim = Simulation::from_population(SimConfig::default(), pop, tally, rng).unwrap();
    let m = sim.step();
    assert!(m.threat_latched);
    let fled = sim.snapshot().position(AgentId(0)).unwrap();
    assert!((fled.x - 39.2).abs() < 1e-12);
    assert!(sim.population_state().threat());
}

proptest! {
    #[test]
    fn forced_fight_before_any_death_never_kills_the_fighter(seed in any::<u64>()) {
        // A fighter and a zombie side by side, plus eight bystanders far off.
        let mut agents = vec![
            (Uninfected, Strategy::Fight, Vec2::new(1.0, 1.0)),
            (Zombie, Strategy::Flee, Vec2::new(1.0, 1.0)),
        ];
        agents.extend((0..8).map(|i| {
            (Uninfected, Strategy::Flee, Vec2::new(60.0 + 4.0 * i as f64, 90.0))
        }));
        let pop = population(&agents);
        prop_assert_eq!(pop.len(), 10);
        let mut sim = Simulation::from_population(
            SimConfig::default(),
            pop,
            PopulationState::new(),
            SeededRandom::new(seed),
        )
        .unwrap();
        let outcome = sim.resolve_encounter(AgentId(0), AgentId(1)).unwrap();
        prop_assert!(matches!(outcome.uninfected, Uninfected | Infected));
        prop_assert!(matches!(outcome.zombie, Zombie | Dead));
        prop_assert_eq!(sim.population_state().deaths(), 0);
        prop_assert_eq!(sim.population().len(), 10);
        prop_assert!(sim.population().states()[2..].iter().all(|&s| s == Uninfected));
    }
}
