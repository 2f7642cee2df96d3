//! Test utilities for Outbreak development.
//!
//! Provides deterministic [`RandomSource`] stand-ins so tests can force
//! particular branches of the movement and encounter logic:
//!
//! - [`ScriptedRandom`] replays a fixed list of draws.
//! - [`ConstRandom`] returns the same draw forever.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::VecDeque;

use outbreak_core::RandomSource;

/// Replays a fixed sequence of uniform draws.
///
/// Every derived draw (`chance`, `coin`, `choose_index`, ...) uses the
/// trait's default implementation, so one scripted value is consumed per
/// boolean and per coordinate. Once the script runs out the source either
/// keeps returning its fallback value or panics, depending on how it was
/// built.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    draws: VecDeque<f64>,
    fallback: Option<f64>,
    consumed: usize,
}

impl ScriptedRandom {
    /// Script that falls back to `0.999` when exhausted, i.e. every
    /// later `chance(p)` with `p < 0.999` comes out `false`.
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback: Some(0.999),
            consumed: 0,
        }
    }

    /// Script that panics if more draws are requested than provided.
    pub fn strict(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback: None,
            consumed: 0,
        }
    }

    /// Replace the value returned after exhaustion.
    pub fn with_fallback(mut self, value: f64) -> Self {
        self.fallback = Some(value);
        self
    }

    /// Draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }

    /// Draws consumed so far, including fallback draws.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        self.consumed += 1;
        match (self.draws.pop_front(), self.fallback) {
            (Some(v), _) => v,
            (None, Some(v)) => v,
            (None, None) => panic!(
                "scripted random source exhausted after {} draws",
                self.consumed - 1
            ),
        }
    }
}

/// Returns the same uniform draw forever.
#[derive(Clone, Copy, Debug)]
pub struct ConstRandom(pub f64);

impl RandomSource for ConstRandom {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_replays_in_order_then_falls_back() {
        let mut r = ScriptedRandom::new([0.1, 0.2]);
        assert_eq!(r.next_f64(), 0.1);
        assert_eq!(r.next_f64(), 0.2);
        assert_eq!(r.remaining(), 0);
        assert_eq!(r.next_f64(), 0.999);
        assert_eq!(r.consumed(), 3);
    }

    #[test]
    fn scripted_chance_consumes_one_draw() {
        let mut r = ScriptedRandom::strict([0.4, 0.6]);
        assert!(r.chance(0.5));
        assert!(!r.chance(0.5));
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn strict_panics_when_exhausted() {
        let mut r = ScriptedRandom::strict([0.5]);
        r.next_f64();
        r.next_f64();
    }

    #[test]
    fn custom_fallback() {
        let mut r = ScriptedRandom::new(Vec::<f64>::new()).with_fallback(0.0);
        assert!(r.chance(0.01));
    }

    #[test]
    fn const_random_never_changes() {
        let mut r = ConstRandom(0.25);
        assert_eq!(r.next_f64(), 0.25);
        assert_eq!(r.choose_index(4), 1);
    }
}
