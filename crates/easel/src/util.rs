use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use easel_engine::backend::Backend;

use crate::canvas::Canvas;

impl<B: Backend> Canvas<B> {
    /// Uniform in `[min, max)`; `min` when the range is empty or not finite.
    pub fn random(&mut self, min: f32, max: f32) -> f32 {
        if !(min.is_finite() && max.is_finite()) || min >= max {
            return min;
        }
        // `max - min` overflows near `f32::MAX`. Rounding can land on `max`.
        loop {
            let t: f32 = self.rng.r#gen();
            let v = min * (1.0 - t) + max * t;
            if (min..max).contains(&v) {
                return v;
            }
        }
    }

    /// Makes `random` repeatable.
    pub fn random_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Milliseconds since the window opened.
    pub fn millis(&self) -> u64 {
        self.backend.elapsed().as_millis() as u64
    }
}
