//! Property tests: invariants that hold for every seed and configuration.
//!
//! Each case builds a random simulation, steps it, and checks the
//! per-step invariants against the previous snapshot.

use outbreak_core::{InfectionState, OwnedSnapshot, ThreatConfig};
use outbreak_engine::{SimConfig, Simulation};
use proptest::prelude::*;

use InfectionState::*;

fn arb_config() -> impl Strategy<Value = SimConfig> {
    (
        any::<u64>(),
        10usize..60,
        1usize..5,
        0f64..=1.0,
        1u32..5,
        20f64..60.0,
    )
        .prop_map(
            |(seed, population, initial_infected, fight, infection_limit, grid_size)| SimConfig {
                population,
                initial_infected,
                fight_strategy_probability: fight,
                infection_limit,
                grid_size,
                // Low thresholds so the threat latch trips in short runs.
                threat: ThreatConfig {
                    deaths_above: 0,
                    attacked_at_least: 1,
                },
                seed,
                ..SimConfig::default()
            },
        )
}

fn legal_transition(before: InfectionState, after: InfectionState) -> bool {
    matches!(
        (before, after),
        (Uninfected, Uninfected | Infected | Dead)
            | (Infected, Infected | Zombie | Dead)
            | (Zombie, Zombie | Dead)
            | (Dead, Dead)
    )
}

fn run(config: SimConfig, steps: usize) -> Vec<OwnedSnapshot> {
    let mut sim = Simulation::new(config).unwrap();
    let mut frames = vec![sim.snapshot().to_owned_snapshot()];
    for _ in 0..steps {
        sim.step();
        frames.push(sim.snapshot().to_owned_snapshot());
    }
    frames
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn positions_stay_on_the_plane(config in arb_config(), steps in 1usize..40) {
        let size = config.grid_size;
        for frame in run(config, steps) {
            for p in &frame.positions {
                prop_assert!((0.0..=size).contains(&p.x), "x out of bounds: {p:?}");
                prop_assert!((0.0..=size).contains(&p.y), "y out of bounds: {p:?}");
            }
        }
    }

    #[test]
    fn dead_agents_never_change(config in arb_config(), steps in 1usize..40) {
        let frames = run(config, steps);
        for pair in frames.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            for i in 0..prev.states.len() {
                if prev.states[i] == Dead {
                    prop_assert_eq!(next.states[i], Dead);
                    prop_assert_eq!(next.positions[i], prev.positions[i]);
                }
            }
        }
    }

    #[test]
    fn states_only_move_forward(config in arb_config(), steps in 1usize..40) {
        let frames = run(config, steps);
        for pair in frames.windows(2) {
            for (&before, &after) in pair[0].states.iter().zip(&pair[1].states) {
                prop_assert!(
                    legal_transition(before, after),
                    "illegal transition {before} -> {after}"
                );
            }
        }
    }

    #[test]
    fn counters_grow_and_threat_sticks(config in arb_config(), steps in 1usize..40) {
        let frames = run(config, steps);
        for pair in frames.windows(2) {
            let (prev, next) = (pair[0].tally, pair[1].tally);
            prop_assert!(next.deaths() >= prev.deaths());
            prop_assert!(next.attacked() >= prev.attacked());
            prop_assert!(!prev.threat() || next.threat());
        }
    }

    #[test]
    fn population_size_is_conserved(config in arb_config(), steps in 1usize..40) {
        let n = config.population;
        for frame in run(config, steps) {
            prop_assert_eq!(frame.as_snapshot().counts().total(), n);
        }
    }

    #[test]
    fn infected_agents_turn_or_die_in_time(config in arb_config(), steps in 1usize..40) {
        // Timer counts 0..=limit across turns, then the agent turns, so no
        // agent is seen infected after more than limit + 1 consecutive steps.
        let limit = config.infection_limit as usize;
        let frames = run(config, steps);
        let n = frames[0].states.len();
        let mut streak = vec![0usize; n];
        for frame in &frames {
            for i in 0..n {
                if frame.states[i] == Infected {
                    streak[i] += 1;
                    prop_assert!(streak[i] <= limit + 1, "agent {i} infected for {} steps", streak[i]);
                } else {
                    streak[i] = 0;
                }
            }
        }
    }

    #[test]
    fn step_metrics_match_snapshot(config in arb_config(), steps in 1usize..20) {
        let mut sim = Simulation::new(config).unwrap();
        for _ in 0..steps {
            let m = sim.step();
            prop_assert_eq!(m.counts, sim.snapshot().counts());
            prop_assert_eq!(m.tick, sim.tick());
            prop_assert!(m.executions <= m.kill_votes);
        }
    }
}
