//! Pseudo-random environment simulator.
//!
//! Each quantity is drawn as `low + uniform_below(high - low)`, an integer
//! in the configured half-open range.  The generator is owned by the
//! sensor, so tests can inject a seed and get a reproducible sequence.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::app::ports::EnvironmentSensor;
use crate::config::{SimRange, SimulationBounds};
use crate::error::SensorError;

pub struct SimulatedSensor {
    rng: ChaCha8Rng,
    bounds: SimulationBounds,
}

impl SimulatedSensor {
    /// Deterministic simulator for a given seed.
    pub fn from_seed(seed: u64, bounds: SimulationBounds) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            bounds,
        }
    }

    /// Simulator seeded once from the wall clock.
    pub fn seeded_from_clock(bounds: SimulationBounds) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self::from_seed(seed, bounds)
    }

    fn draw(&mut self, range: SimRange) -> f64 {
        // Config validation guarantees span > 0.
        let offset = self.rng.gen_range(0..range.span().max(1));
        (i64::from(range.low) + offset) as f64
    }
}

impl EnvironmentSensor for SimulatedSensor {
    fn temperature(&mut self) -> Result<f64, SensorError> {
        Ok(self.draw(self.bounds.temperature))
    }

    fn humidity(&mut self) -> Result<f64, SensorError> {
        Ok(self.draw(self.bounds.humidity))
    }

    fn pressure(&mut self) -> Result<f64, SensorError> {
        Ok(self.draw(self.bounds.pressure))
    }
}
