//! Probability normalization

use crate::jitter::clamp_percent;
use serde::{Deserialize, Serialize};

/// Flat bonuses for suspiciously short or long text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthAdjustment {
    /// Text shorter than this many characters gets `short_bonus`
    #[serde(default = "default_short_below")]
    pub short_below: usize,

    #[serde(default = "default_short_bonus")]
    pub short_bonus: f64,

    /// Text longer than this many characters gets `long_bonus`
    #[serde(default = "default_long_above")]
    pub long_above: usize,

    #[serde(default = "default_long_bonus")]
    pub long_bonus: f64,
}

impl Default for LengthAdjustment {
    fn default() -> Self {
        Self {
            short_below: default_short_below(),
            short_bonus: default_short_bonus(),
            long_above: default_long_above(),
            long_bonus: default_long_bonus(),
        }
    }
}

impl LengthAdjustment {
    /// Bonus for a text of `char_len` characters
    pub fn bonus(&self, char_len: usize) -> f64 {
        if char_len < self.short_below {
            self.short_bonus
        } else if char_len > self.long_above {
            self.long_bonus
        } else {
            0.0
        }
    }

    /// Apply the bonus and clamp to `[0, 100]`
    pub fn normalize(&self, raw_probability: f64, char_len: usize) -> f64 {
        clamp_percent(raw_probability + self.bonus(char_len))
    }
}

fn default_short_below() -> usize {
    50
}

fn default_short_bonus() -> f64 {
    15.0
}

fn default_long_above() -> usize {
    2000
}

fn default_long_bonus() -> f64 {
    10.0
}
