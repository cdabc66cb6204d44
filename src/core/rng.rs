//! RNG module - deterministic piece generation
//!
//! Each session owns a seeded stream so matches replay identically for the
//! same seed. Draws are uniform and independent per piece: there is no bag,
//! so droughts and repeats happen naturally.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Uniform random piece source
#[derive(Debug, Clone)]
pub struct PieceStream {
    rng: SimpleRng,
}

impl PieceStream {
    /// Create a stream with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next kind, uniformly at random and independent of history
    pub fn draw(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32);
        PieceKind::ALL[idx as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut zeroed = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zeroed.next_u32(), one.next_u32());
    }

    #[test]
    fn test_stream_replays_per_seed() {
        let mut a = PieceStream::new(777);
        let mut b = PieceStream::new(777);
        for _ in 0..50 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn test_stream_covers_every_kind() {
        let mut stream = PieceStream::new(42);
        let mut seen = [false; 7];
        for _ in 0..200 {
            let kind = stream.draw();
            let idx = PieceKind::ALL.iter().position(|&k| k == kind).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s), "200 draws should hit all 7 kinds");
    }

    #[test]
    fn test_stream_is_not_a_bag() {
        // Uniform draws repeat early; a 7-bag's first seven never could
        let mut stream = PieceStream::new(1);
        let first: Vec<PieceKind> = (0..5).map(|_| stream.draw()).collect();
        assert_eq!(
            first,
            [
                PieceKind::J,
                PieceKind::Z,
                PieceKind::T,
                PieceKind::L,
                PieceKind::T,
            ]
        );
    }
}
