//! Radius queries over the population.
//!
//! A [`SpatialQuery`] borrows the position and state arrays for the
//! duration of one lookup. The step driver rebuilds it for every query so
//! that each agent sees the mutations made by agents processed before it
//! in the same step.

use outbreak_core::{AgentId, InfectionState, Vec2};
use smallvec::SmallVec;

/// Agent ids returned by a neighbour query, in ascending index order.
pub type Neighbors = SmallVec<[AgentId; 8]>;

/// Linear-scan neighbour lookup.
#[derive(Clone, Copy, Debug)]
pub struct SpatialQuery<'a> {
    positions: &'a [Vec2],
    states: &'a [InfectionState],
}

impl<'a> SpatialQuery<'a> {
    /// Build a query over parallel position/state slices.
    pub fn new(positions: &'a [Vec2], states: &'a [InfectionState]) -> Self {
        debug_assert_eq!(positions.len(), states.len());
        Self { positions, states }
    }

    /// Agents in `filter` within `radius` (inclusive) of agent `origin`.
    ///
    /// The origin is never its own neighbour. Results are ordered by
    /// ascending index, so the first element is the lowest-index match,
    /// not the closest.
    pub fn neighbors(&self, origin: AgentId, filter: InfectionState, radius: f64) -> Neighbors {
        match self.positions.get(origin.index()) {
            Some(&p) => self.within(p, Some(origin), filter, radius),
            None => Neighbors::new(),
        }
    }

    /// Agents in `filter` within `radius` of an arbitrary point,
    /// optionally skipping one agent.
    pub fn within(
        &self,
        point: Vec2,
        exclude: Option<AgentId>,
        filter: InfectionState,
        radius: f64,
    ) -> Neighbors {
        self.scan(point, exclude, filter, radius)
            .map(|(id, _)| id)
            .collect()
    }

    /// Closest agent in `filter` within `radius` of agent `origin`,
    /// with its distance.
    ///
    /// Equal distances resolve to the lower index.
    pub fn nearest(
        &self,
        origin: AgentId,
        filter: InfectionState,
        radius: f64,
    ) -> Option<(AgentId, f64)> {
        let p = *self.positions.get(origin.index())?;
        self.scan(p, Some(origin), filter, radius)
            .fold(None, |best: Option<(AgentId, f64)>, (id, d)| match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((id, d)),
            })
    }

    fn scan(
        &self,
        point: Vec2,
        exclude: Option<AgentId>,
        filter: InfectionState,
        radius: f64,
    ) -> impl Iterator<Item = (AgentId, f64)> + '_ {
        self.positions
            .iter()
            .zip(self.states)
            .enumerate()
            .filter(move |&(i, (_, &s))| s == filter && exclude.is_none_or(|x| x.index() != i))
            .filter_map(move |(i, (&q, _))| {
                let d = point.distance(q);
                (d <= radius).then_some((AgentId(i as u32), d))
            })
    }
}
