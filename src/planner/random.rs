use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the uniform picks made while filling slots.
///
/// Any `rand::Rng` works; tests pass a seeded `StdRng` to get repeatable menus.
pub trait RandomSource {
    /// Index in `0..len`. Only called with `len > 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Seeded generator when `seed` is given, entropy-seeded otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_index_in_range() {
        let mut rng = rng_from_seed(Some(7));
        for len in 1..20 {
            assert!(rng.pick_index(len) < len);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = rng_from_seed(Some(42));
        let mut b = rng_from_seed(Some(42));
        let seq_a: Vec<usize> = (0..10).map(|_| a.pick_index(100)).collect();
        let seq_b: Vec<usize> = (0..10).map(|_| b.pick_index(100)).collect();
        assert_eq!(seq_a, seq_b);
    }
}
