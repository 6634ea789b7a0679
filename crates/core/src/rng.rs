//! Spawn RNG module - deterministic uniform token generation
//!
//! A small seeded LCG drives board population. The engine deliberately does
//! not take an external randomness source: the only random decision it ever
//! makes is which of the six kinds fills a cell, with equal probability.
//! Equal seeds produce identical boards, which keeps rounds replayable and
//! tests deterministic.

use crumble_types::{TokenKind, ALL_KINDS, TOKEN_KIND_COUNT};

/// Seeded spawn RNG (LCG with Numerical Recipes constants)
#[derive(Debug, Clone)]
pub struct SpawnRng {
    state: u32,
}

impl SpawnRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state would be a fixed point of the recurrence
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate the next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate a random value in `[0, max)`
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Draw a token kind, uniform over the fixed kind set
    pub fn next_kind(&mut self) -> TokenKind {
        ALL_KINDS[self.next_range(TOKEN_KIND_COUNT as u32) as usize]
    }
}

impl Default for SpawnRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut a = SpawnRng::new(12345);
        let mut b = SpawnRng::new(12345);

        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_usable() {
        let mut rng = SpawnRng::new(0);
        let first = rng.next_u32();
        let second = rng.next_u32();
        assert_ne!(first, second);
    }

    #[test]
    fn test_rng_seeds_diverge() {
        let mut a = SpawnRng::new(12345);
        let mut b = SpawnRng::new(54321);
        assert_ne!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SpawnRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(6) < 6);
        }
    }

    #[test]
    fn test_next_kind_covers_all_kinds() {
        let mut rng = SpawnRng::new(42);
        let mut seen = [false; TOKEN_KIND_COUNT];
        for _ in 0..1000 {
            seen[rng.next_kind().index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "every kind should appear in 1000 draws");
    }
}
