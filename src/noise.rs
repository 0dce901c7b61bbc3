//! # Uncertainty Noise
//!
//! An explicit, injectable Gaussian jitter source. Real conditions are never
//! known exactly, so non-deterministic modes add a small normal perturbation
//! to the raw score; making the source a value the caller owns (and can seed)
//! keeps the engine itself a pure function. Pass `None` where the scorer
//! accepts noise to get fully deterministic output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Jitter sigma implied by a day's chaos index: a settled day wobbles a
/// little, an unsettled one a lot.
pub fn sigma_for_chaos(chaos: f64) -> f64 {
    2.0 + chaos.clamp(0.0, 1.0) * 6.0
}

/// Seedable Gaussian noise via the Box-Muller transform.
#[derive(Debug)]
pub struct GaussianNoise {
    rng: StdRng,
    sigma: f64,
}

impl GaussianNoise {
    /// Deterministic source for tests and reproducible runs.
    pub fn seeded(seed: u64, sigma: f64) -> Self {
        GaussianNoise {
            rng: StdRng::seed_from_u64(seed),
            sigma,
        }
    }

    /// Entropy-seeded source for production use.
    pub fn from_entropy(sigma: f64) -> Self {
        GaussianNoise {
            rng: StdRng::from_entropy(),
            sigma,
        }
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Draw one N(0, sigma²) sample.
    pub fn sample(&mut self) -> f64 {
        // Box-Muller: two uniforms in (0, 1] → one standard normal
        let mut u = 0.0;
        while u <= 0.0 {
            u = self.rng.gen::<f64>();
        }
        let v: f64 = self.rng.gen();
        let z = (-2.0 * u.ln()).sqrt() * (std::f64::consts::TAU * v).cos();
        z * self.sigma
    }
}
