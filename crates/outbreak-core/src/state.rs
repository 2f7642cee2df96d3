//! Per-agent infection state and behavioural strategy.

use std::fmt;

/// Infection state of a single agent.
///
/// A closed four-state machine:
///
/// ```text
/// Uninfected ──► Infected ──► Zombie ──► Dead
///      │             │                    ▲
///      └─────────────┴────────────────────┘
/// ```
///
/// There is no path back to `Uninfected`, and `Dead` is absorbing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InfectionState {
    /// Healthy; senses zombies and moves according to its [`Strategy`].
    Uninfected = 0,
    /// Bitten; counts down towards becoming a zombie.
    Infected = 1,
    /// Hunts uninfected agents.
    Zombie = 2,
    /// Inert record; never moves or changes state again.
    Dead = 3,
}

impl InfectionState {
    /// All states, in discriminant order.
    pub const ALL: [InfectionState; 4] = [
        InfectionState::Uninfected,
        InfectionState::Infected,
        InfectionState::Zombie,
        InfectionState::Dead,
    ];

    /// Conventional display colour for renderers.
    pub fn color_name(self) -> &'static str {
        match self {
            InfectionState::Uninfected => "green",
            InfectionState::Infected => "orange",
            InfectionState::Zombie => "red",
            InfectionState::Dead => "black",
        }
    }
}

impl fmt::Display for InfectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InfectionState::Uninfected => "uninfected",
            InfectionState::Infected => "infected",
            InfectionState::Zombie => "zombie",
            InfectionState::Dead => "dead",
        };
        f.pad(name)
    }
}

/// How an uninfected agent reacts to sensed zombies once the threat
/// latch is set. Fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Strategy {
    /// Run away from the centroid of sensed zombies.
    Flee = 0,
    /// Close in on the first sensed zombie and engage it.
    Fight = 1,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Flee => f.write_str("flee"),
            Strategy::Fight => f.write_str("fight"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_match_render_convention() {
        assert_eq!(InfectionState::Uninfected.color_name(), "green");
        assert_eq!(InfectionState::Infected.color_name(), "orange");
        assert_eq!(InfectionState::Zombie.color_name(), "red");
        assert_eq!(InfectionState::Dead.color_name(), "black");
    }

    #[test]
    fn discriminants_are_stable() {
        assert_eq!(InfectionState::Uninfected as u8, 0);
        assert_eq!(InfectionState::Dead as u8, 3);
        assert_eq!(Strategy::Flee as u8, 0);
        assert_eq!(Strategy::Fight as u8, 1);
    }
}
