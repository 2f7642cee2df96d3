//! Movement policies.
//!
//! Each policy maps the acting agent's position (plus whatever it senses)
//! to a displacement. The caller adds the displacement to the position;
//! clamping to the plane happens once at the end of the step.
//!
//! Degenerate geometry (a zero-length direction) is an ordinary branch of
//! each policy, never an error.

use outbreak_core::{RandomSource, Vec2};

/// Distance below which an agent counts as having reached its target.
pub const ARRIVAL_RADIUS: f64 = 0.5;

/// Directions shorter than this are treated as zero-length.
pub const DEGENERATE_EPSILON: f64 = 1e-6;

/// A zombie closes in instead of striding once the quarry is within
/// `zombie_speed - CLOSE_IN_MARGIN`.
pub const CLOSE_IN_MARGIN: f64 = 0.5;

/// Outcome of [`seek_target`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SeekStep {
    /// The target is reached; the caller picks a new one and does not move.
    Arrived,
    /// Move by this displacement.
    Advance(Vec2),
}

/// Outcome of [`chase`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChaseStep {
    /// Full-speed stride towards the quarry; no contact this step.
    Stride(Vec2),
    /// Move exactly into encounter range, then resolve the encounter.
    Close(Vec2),
}

/// Random roaming for a zombie that senses nobody.
///
/// Each axis moves by `(u - 0.5) * zombie_speed / 2` for a fresh uniform
/// draw `u`, x first.
pub fn wander(zombie_speed: f64, rng: &mut dyn RandomSource) -> Vec2 {
    let half = zombie_speed / 2.0;
    let dx = (rng.next_f64() - 0.5) * half;
    let dy = (rng.next_f64() - 0.5) * half;
    Vec2::new(dx, dy)
}

/// Walk towards a personal destination at half speed.
pub fn seek_target(position: Vec2, target: Vec2, uninfected_speed: f64) -> SeekStep {
    let direction = target - position;
    let distance = direction.length();
    if distance < ARRIVAL_RADIUS {
        return SeekStep::Arrived;
    }
    SeekStep::Advance(direction / distance * (uninfected_speed / 2.0))
}

/// Run directly away from the centroid of the sensed zombies at full speed.
///
/// If the agent stands on the centroid, it jitters by
/// `(u - 0.5) * uninfected_speed` per axis instead. An empty threat list
/// yields no movement.
pub fn flee(
    position: Vec2,
    threats: &[Vec2],
    uninfected_speed: f64,
    rng: &mut dyn RandomSource,
) -> Vec2 {
    let Some(centroid) = Vec2::centroid(threats) else {
        return Vec2::ZERO;
    };
    let direction = position - centroid;
    let norm = direction.length();
    if norm > DEGENERATE_EPSILON {
        direction / norm * uninfected_speed
    } else {
        let dx = (rng.next_f64() - 0.5) * uninfected_speed;
        let dy = (rng.next_f64() - 0.5) * uninfected_speed;
        Vec2::new(dx, dy)
    }
}

/// Head straight for a zombie at full speed.
///
/// Returns `None` when the agent already stands on the zombie; the caller
/// engages immediately instead of moving.
pub fn pursue(position: Vec2, quarry: Vec2, uninfected_speed: f64) -> Option<Vec2> {
    let direction = quarry - position;
    let norm = direction.length();
    if norm <= DEGENERATE_EPSILON {
        return None;
    }
    Some(direction / norm * uninfected_speed)
}

/// Zombie pursuit of the nearest sensed uninfected agent.
///
/// Strides at full speed while the quarry is farther than
/// `zombie_speed - CLOSE_IN_MARGIN`; otherwise moves only the distance
/// needed to stand `encounter_distance` away, without overshooting.
pub fn chase(position: Vec2, quarry: Vec2, zombie_speed: f64, encounter_distance: f64) -> ChaseStep {
    let direction = quarry - position;
    let distance = direction.length();
    if distance <= DEGENERATE_EPSILON {
        return ChaseStep::Close(Vec2::ZERO);
    }
    if distance > zombie_speed - CLOSE_IN_MARGIN {
        ChaseStep::Stride(direction / distance * zombie_speed)
    } else {
        ChaseStep::Close(direction / distance * (distance - encounter_distance))
    }
}
