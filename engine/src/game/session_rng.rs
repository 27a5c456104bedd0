use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::Position;

/// Seedable RNG owned by one engine so a game can be replayed from its seed.
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniformly random cell of a `grid_size` x `grid_size` board.
    pub fn random_cell(&mut self, grid_size: u32) -> Position {
        let size = grid_size as i32;
        Position::new(
            self.rng.random_range(0..size),
            self.rng.random_range(0..size),
        )
    }

    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        Some(items[self.rng.random_range(0..items.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SessionRng::new(42);
        let mut b = SessionRng::new(42);
        for _ in 0..32 {
            assert_eq!(a.random_cell(20), b.random_cell(20));
        }
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_random_cell_within_grid() {
        let mut rng = SessionRng::new(7);
        for _ in 0..500 {
            assert!(rng.random_cell(3).is_within(3));
        }
    }

    #[test]
    fn test_choose() {
        let mut rng = SessionRng::new(1);
        let empty: [u8; 0] = [];
        assert_eq!(rng.choose(&empty), None);
        assert_eq!(rng.choose(&[9]), Some(9));
        let picked = rng.choose(&[1, 2, 3]);
        assert!(matches!(picked, Some(1..=3)));
    }
}
