//! Deterministic linear-congruential generator.
//!
//! Map generation must be reproducible from a seed, so the engine never
//! touches a global or OS-seeded generator. The state is threaded explicitly
//! through every call that needs randomness.

const MULTIPLIER: u64 = 6364136223846793005;
const INCREMENT: u64 = 1442695040888963407;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rng {
    seed: u64,
}

impl Rng {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.seed = self.seed.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.seed
    }

    /// Uniform-ish value in `[0, 1)` from the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Value in `0..bound` from the high half of the state. The low bits of
    /// a power-of-two LCG cycle with short periods.
    fn below(&mut self, bound: u64) -> u64 {
        (self.next_u64() >> 33) % bound
    }

    /// Value in `[min, max]`. Returns `min` when the range is empty.
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        min + self.next_f64() * (max - min)
    }

    /// Index in `0..len`, or `None` for an empty collection.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.below(len as u64) as usize)
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.index(items.len()).map(|i| &items[i])
    }

    /// Fisher–Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i as u64 + 1) as usize;
            items.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_first_value_matches_lcg_step() {
        let mut rng = Rng::new(0);
        assert_eq!(rng.next_u64(), INCREMENT);
        assert_eq!(rng.next_u64(), INCREMENT.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT));
    }

    #[test]
    fn test_index_empty_is_none() {
        assert_eq!(Rng::new(1).index(0), None);
    }

    #[test]
    fn test_coin_flips_do_not_alternate() {
        let mut rng = Rng::new(42);
        let flips: Vec<usize> = (0..64).filter_map(|_| rng.index(2)).collect();
        assert!(flips.windows(2).any(|pair| pair[0] == pair[1]), "{flips:?}");
        assert!(flips.contains(&0) && flips.contains(&1));
    }

    #[test]
    fn test_range_stays_in_bounds() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let v = rng.range_f64(-0.4, 0.4);
            assert!((-0.4..=0.4).contains(&v));
        }
        assert_eq!(rng.range_f64(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut items: Vec<u32> = (0..50).collect();
        Rng::new(3).shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }
}
