use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub fn small_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// The randomness consumed by generation and spawn queries.
///
/// Every `rand::Rng` is a `RandomSource`. Tests can implement it directly to script the
/// exact draws.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn random_f32(&mut self) -> f32;

    /// Uniform integer in `[low, high]`, both inclusive.
    fn random_int(&mut self, low: i32, high: i32) -> i32;
}

impl<R: Rng> RandomSource for R {
    fn random_f32(&mut self) -> f32 {
        self.gen::<f32>()
    }

    fn random_int(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }

        self.gen_range(low, high + 1)
    }
}

/// Inclusive ranges that level dimensions are drawn from.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SizeRange {
    pub width: (usize, usize),
    pub height: (usize, usize),
}

impl Default for SizeRange {
    fn default() -> Self {
        SizeRange {
            width: (50, 80),
            height: (30, 60),
        }
    }
}

impl SizeRange {
    /// Returns `(width, height)`.
    pub fn sample(&self, rng: &mut impl RandomSource) -> (usize, usize) {
        let width = rng.random_int(self.width.0 as i32, self.width.1 as i32);
        let height = rng.random_int(self.height.0 as i32, self.height.1 as i32);

        (width.max(0) as usize, height.max(0) as usize)
    }
}

/// Returns `value` on every float draw and `low` on every integer draw.
#[cfg(test)]
pub(crate) struct FixedSource(pub f32);

#[cfg(test)]
impl RandomSource for FixedSource {
    fn random_f32(&mut self) -> f32 {
        self.0
    }

    fn random_int(&mut self, low: i32, _high: i32) -> i32 {
        low
    }
}

/// Replays a script of integer draws (cycling), clamped into the requested range.
#[cfg(test)]
pub(crate) struct ScriptedSource {
    pub float: f32,
    pub ints: Vec<i32>,
    pub next: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub fn new(float: f32, ints: Vec<i32>) -> Self {
        ScriptedSource {
            float,
            ints,
            next: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn random_f32(&mut self) -> f32 {
        self.float
    }

    fn random_int(&mut self, low: i32, high: i32) -> i32 {
        let value = self.ints[self.next % self.ints.len()];
        self.next += 1;

        value.max(low).min(high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_draws_stay_in_range() {
        let mut rng = small_rng(7);
        for _ in 0..1000 {
            let f = rng.random_f32();
            assert!((0.0..1.0).contains(&f));

            let i = rng.random_int(3, 5);
            assert!((3..=5).contains(&i));
        }
    }

    #[test]
    fn test_degenerate_int_range() {
        let mut rng = small_rng(7);
        assert_eq!(rng.random_int(4, 4), 4);
    }

    #[test]
    fn test_size_range() {
        let range = SizeRange::default();
        let mut rng = small_rng(1);
        for _ in 0..100 {
            let (w, h) = range.sample(&mut rng);
            assert!((50..=80).contains(&w));
            assert!((30..=60).contains(&h));
        }

        assert_eq!(range.sample(&mut FixedSource(0.5)), (50, 30));
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = small_rng(42);
        let mut b = small_rng(42);
        for _ in 0..100 {
            assert_eq!(a.random_int(0, 1000), b.random_int(0, 1000));
        }
    }
}
