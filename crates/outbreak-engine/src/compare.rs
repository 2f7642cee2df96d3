//! Snapshot hashing and comparison for determinism checks.
//!
//! [`snapshot_hash`] is a fast FNV-1a equality check over everything a
//! snapshot exposes. [`compare_snapshot`] uses it as a fast path and
//! falls back to a per-agent bit-exact comparison on mismatch. Both work
//! on in-memory snapshots only.

use outbreak_core::{AgentId, InfectionState, PopulationState, Snapshot, Strategy, Vec2};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Hash every observable part of a snapshot.
///
/// Folds in the tick, the outbreak counters, then per agent the
/// position bits (`f64::to_bits`, x before y), the state and the
/// strategy. Agent order matters; two snapshots hash equal only if
/// they agree bit for bit. Not a cryptographic digest.
pub fn snapshot_hash(snapshot: &Snapshot<'_>) -> u64 {
    let tally = snapshot.tally();
    let mut hash = FNV_OFFSET;
    hash = fnv1a_u64(hash, snapshot.tick().0);
    hash = fnv1a_u64(hash, tally.deaths());
    hash = fnv1a_u64(hash, tally.attacked());
    hash = fnv1a_byte(hash, tally.threat() as u8);
    hash = fnv1a_u64(hash, snapshot.len() as u64);

    let agents = snapshot
        .positions()
        .iter()
        .zip(snapshot.states())
        .zip(snapshot.strategies());
    for ((p, &state), &strategy) in agents {
        hash = fnv1a_u64(hash, p.x.to_bits());
        hash = fnv1a_u64(hash, p.y.to_bits());
        hash = fnv1a_byte(hash, state as u8);
        hash = fnv1a_byte(hash, strategy as u8);
    }
    hash
}

// ── Divergence reports ──────────────────────────────────────────

/// What differs for one agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DivergenceKind {
    /// Position bits differ.
    Position {
        /// Expected position.
        expected: Vec2,
        /// Actual position.
        actual: Vec2,
    },
    /// Infection state differs.
    State {
        /// Expected state.
        expected: InfectionState,
        /// Actual state.
        actual: InfectionState,
    },
    /// Strategy differs.
    Strategy {
        /// Expected strategy.
        expected: Strategy,
        /// Actual strategy.
        actual: Strategy,
    },
}

/// A single agent-level divergence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentDivergence {
    /// The diverging agent.
    pub agent: AgentId,
    /// What differs.
    pub kind: DivergenceKind,
}

/// Everything found to differ between two snapshots.
#[derive(Clone, Debug, PartialEq)]
pub struct DivergenceReport {
    /// Tick of the actual snapshot.
    pub tick: u64,
    /// Hash of the expected snapshot.
    pub expected_hash: u64,
    /// Hash of the actual snapshot.
    pub actual_hash: u64,
    /// Expected and actual counters, when they differ.
    pub tally: Option<(PopulationState, PopulationState)>,
    /// Expected and actual population sizes, when they differ.
    pub population: Option<(usize, usize)>,
    /// Per-agent differences over the agents both sides have.
    pub divergences: Vec<AgentDivergence>,
}

/// Compare a snapshot against an expected hash.
///
/// Returns `None` when the hashes match. On mismatch, and if the
/// expected snapshot is supplied, every agent is compared bit for bit;
/// without it the report carries only the hashes.
pub fn compare_snapshot(
    actual: &Snapshot<'_>,
    expected_hash: u64,
    expected: Option<&Snapshot<'_>>,
) -> Option<DivergenceReport> {
    let actual_hash = snapshot_hash(actual);
    if actual_hash == expected_hash {
        return None;
    }

    let mut report = DivergenceReport {
        tick: actual.tick().0,
        expected_hash,
        actual_hash,
        tally: None,
        population: None,
        divergences: Vec::new(),
    };

    let Some(expected) = expected else {
        return Some(report);
    };

    if expected.tally() != actual.tally() {
        report.tally = Some((expected.tally(), actual.tally()));
    }
    if expected.len() != actual.len() {
        report.population = Some((expected.len(), actual.len()));
    }

    for i in 0..expected.len().min(actual.len()) {
        let agent = AgentId(i as u32);
        let (ep, ap) = (expected.positions()[i], actual.positions()[i]);
        if ep.x.to_bits() != ap.x.to_bits() || ep.y.to_bits() != ap.y.to_bits() {
            report.divergences.push(AgentDivergence {
                agent,
                kind: DivergenceKind::Position {
                    expected: ep,
                    actual: ap,
                },
            });
        }
        let (es, as_) = (expected.states()[i], actual.states()[i]);
        if es != as_ {
            report.divergences.push(AgentDivergence {
                agent,
                kind: DivergenceKind::State {
                    expected: es,
                    actual: as_,
                },
            });
        }
        let (eg, ag) = (expected.strategies()[i], actual.strategies()[i]);
        if eg != ag {
            report.divergences.push(AgentDivergence {
                agent,
                kind: DivergenceKind::Strategy {
                    expected: eg,
                    actual: ag,
                },
            });
        }
    }

    Some(report)
}
