//! Bounded confidence jitter
//!
//! All randomness in the engine flows through one [`JitterSource`], so tests
//! can pin it with [`NoJitter`], [`FixedJitter`] or [`SeededJitter`].

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform samples in `[0, 1)`
pub trait JitterSource: Send + Sync {
    fn sample(&self) -> f64;
}

/// Process-local thread RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadJitter;

impl JitterSource for ThreadJitter {
    fn sample(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Reproducible RNG from a seed
#[derive(Debug)]
pub struct SeededJitter {
    rng: Mutex<StdRng>,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl JitterSource for SeededJitter {
    fn sample(&self) -> f64 {
        self.rng.lock().gen::<f64>()
    }
}

/// Always the same sample; values outside `[0, 1)` are clamped into it
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn sample(&self) -> f64 {
        if self.0.is_nan() {
            return 0.5;
        }
        self.0.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Midpoint sample, i.e. zero offset
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn sample(&self) -> f64 {
        0.5
    }
}

/// Spread of the text jitter for a given evidence count
pub fn text_variation(complexity: usize) -> f64 {
    (complexity as f64 * 0.02).min(0.15)
}

/// Jitter a text probability; the spread grows with evidence complexity
pub fn text_jitter(probability: f64, complexity: usize, source: &dyn JitterSource) -> f64 {
    let offset = (source.sample() - 0.5) * text_variation(complexity);
    clamp_percent(probability + offset * 100.0)
}

/// Jitter an image probability by up to `band * 100` points either way
pub fn image_jitter(probability: f64, band: f64, source: &dyn JitterSource) -> f64 {
    let offset = source.sample() * (2.0 * band) - band;
    clamp_percent(probability + offset * 100.0)
}

/// Clamp to `[0, 100]`; NaN maps to 0 so the result is always a number
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}
