use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    fn next(&mut self, min: f64, max: f64) -> f64;
}

#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next(&mut self, min: f64, max: f64) -> f64 {
        if !(max > min) {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}
