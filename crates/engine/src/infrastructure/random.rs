//! Random implementations.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::infrastructure::ports::RandomPort;

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Seeded random - the same seed replays the same draws.
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

impl RandomPort for SeededRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        // A poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(min..=max)
    }
}

/// Fixed random for testing.
#[cfg(test)]
pub struct FixedRandom(pub i32);

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        self.0.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_random_stays_in_range() {
        let random = SystemRandom::new();
        for _ in 0..1000 {
            let value = random.gen_range(1, 6);
            assert!((1..=6).contains(&value));
        }
    }

    #[test]
    fn seeded_random_replays_sequence() {
        let a = SeededRandom::new(99);
        let b = SeededRandom::new(99);
        let first: Vec<i32> = (0..20).map(|_| a.gen_range(1, 100)).collect();
        let second: Vec<i32> = (0..20).map(|_| b.gen_range(1, 100)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn fixed_random_clamps_to_range() {
        let random = FixedRandom(10);
        assert_eq!(random.gen_range(1, 6), 6);
        assert_eq!(random.gen_range(1, 20), 10);
    }
}
