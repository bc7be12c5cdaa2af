//! Injectable randomness for copy selection.
//!
//! Every random choice the engine makes (which pitch variant, whether a
//! social-proof line is added) goes through [`RandomSource`], so the
//! strategy chain itself stays deterministic under test.

use std::collections::VecDeque;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the engine's random decisions.
pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..len`. Callers never pass `len == 0`.
    fn pick(&self, len: usize) -> usize;

    /// `true` with the given probability (clamped to `0.0..=1.0`).
    fn chance(&self, probability: f64) -> bool;
}

/// Uniformly choose one element of `items`, or `None` when empty.
pub fn choose<'a, T>(random: &dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(random.pick(items.len()))
}

fn clamp_probability(probability: f64) -> f64 {
    if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    }
}

// =============================================================================
// ThreadRandom
// =============================================================================

/// Production source backed by the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, len: usize) -> usize {
        rand::rng().random_range(0..len.max(1))
    }

    fn chance(&self, probability: f64) -> bool {
        rand::rng().random_bool(clamp_probability(probability))
    }
}

// =============================================================================
// SeededRandom
// =============================================================================

/// Reproducible source: the same seed yields the same sequence of choices.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&self, len: usize) -> usize {
        // A poisoned generator is still a valid generator.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_range(0..len.max(1))
    }

    fn chance(&self, probability: f64) -> bool {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_bool(clamp_probability(probability))
    }
}

// =============================================================================
// ScriptedRandom
// =============================================================================

/// Test source that replays fixed answers.
///
/// Queued picks and chances are consumed in order; once a queue is empty
/// the fallback answer is returned forever. Picks are reduced modulo `len`.
pub struct ScriptedRandom {
    picks: Mutex<VecDeque<usize>>,
    chances: Mutex<VecDeque<bool>>,
    fallback_pick: usize,
    fallback_chance: bool,
}

impl ScriptedRandom {
    /// Always answer `pick` and `chance`.
    pub fn fixed(pick: usize, chance: bool) -> Self {
        Self::scripted(Vec::new(), Vec::new(), pick, chance)
    }

    pub fn scripted(
        picks: Vec<usize>,
        chances: Vec<bool>,
        fallback_pick: usize,
        fallback_chance: bool,
    ) -> Self {
        Self {
            picks: Mutex::new(picks.into()),
            chances: Mutex::new(chances.into()),
            fallback_pick,
            fallback_chance,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn pick(&self, len: usize) -> usize {
        let next = self
            .picks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or(self.fallback_pick);
        next % len.max(1)
    }

    fn chance(&self, _probability: f64) -> bool {
        self.chances
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or(self.fallback_chance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_empty_is_none() {
        let random = ScriptedRandom::fixed(0, true);
        let items: [&str; 0] = [];
        assert!(choose(&random, &items).is_none());
    }

    #[test]
    fn test_scripted_replays_then_falls_back() {
        let random = ScriptedRandom::scripted(vec![2, 5], vec![false], 1, true);
        assert_eq!(random.pick(4), 2);
        assert_eq!(random.pick(4), 1); // 5 % 4
        assert_eq!(random.pick(4), 1);
        assert!(!random.chance(0.9));
        assert!(random.chance(0.1));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);
        let seq_a: Vec<usize> = (0..20).map(|_| a.pick(7)).collect();
        let seq_b: Vec<usize> = (0..20).map(|_| b.pick(7)).collect();
        assert_eq!(seq_a, seq_b);
        assert!(seq_a.iter().all(|&i| i < 7));
    }

    #[test]
    fn test_thread_random_in_range() {
        let random = ThreadRandom;
        for _ in 0..100 {
            assert!(random.pick(3) < 3);
        }
    }

    #[test]
    fn test_chance_extremes() {
        let random = ThreadRandom;
        assert!(!random.chance(0.0));
        assert!(random.chance(1.0));
        assert!(random.chance(7.5));
        assert!(!random.chance(f64::NAN));
    }

    #[test]
    fn test_thread_random_covers_all_variants() {
        let random = ThreadRandom;
        let mut seen = [false; 4];
        for _ in 0..1_000 {
            seen[random.pick(4)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
