//! Engine configuration

use serde::{Deserialize, Serialize};
use spamlens_core::{Error, Result};
use spamlens_detectors::{
    Catalog, JitterSource, LengthAdjustment, NoJitter, SeededJitter, ThreadJitter,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Phrase catalogue file; the built-in catalogue when absent
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Text classification thresholds
    #[serde(default)]
    pub text: TextThresholds,

    /// Image classification thresholds
    #[serde(default)]
    pub image: ImageThresholds,

    /// Confidence jitter source
    #[serde(default)]
    pub jitter: JitterMode,

    /// Images scored concurrently in one batch
    #[serde(default = "default_max_parallel_images")]
    pub max_parallel_images: usize,
}

impl EngineConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_parallel_images == 0 {
            return Err(Error::config("max_parallel_images must be at least 1"));
        }

        let text = &self.text;
        for (name, value) in [
            ("text.base_threshold", text.base_threshold),
            ("text.keyword_discount", text.keyword_discount),
            ("text.social_discount", text.social_discount),
            ("text.short_content_penalty", text.short_content_penalty),
            ("text.length.short_bonus", text.length.short_bonus),
            ("text.length.long_bonus", text.length.long_bonus),
            ("image.spam_threshold", self.image.spam_threshold),
        ] {
            if !value.is_finite() {
                return Err(Error::config(format!("{} must be a finite number", name)));
            }
        }

        let band = self.image.jitter_band;
        if !(0.0..=1.0).contains(&band) {
            return Err(Error::config(format!(
                "image.jitter_band must be within [0, 1], got {}",
                band
            )));
        }

        Ok(())
    }

    /// Catalogue named by `catalog_path`, or the built-in one
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::from_file(path),
            None => Ok(Catalog::default()),
        }
    }

    /// Jitter source for the configured mode
    pub fn build_jitter(&self) -> Arc<dyn JitterSource> {
        self.jitter.build()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            text: TextThresholds::default(),
            image: ImageThresholds::default(),
            jitter: JitterMode::default(),
            max_parallel_images: default_max_parallel_images(),
        }
    }
}

/// Adaptive text threshold parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextThresholds {
    /// Starting threshold before adjustments
    #[serde(default = "default_base_threshold")]
    pub base_threshold: f64,

    /// Keyword matches needed before the keyword discount applies
    #[serde(default = "default_keyword_trigger")]
    pub keyword_trigger: usize,

    #[serde(default = "default_keyword_discount")]
    pub keyword_discount: f64,

    /// Social-engineering matches needed before the social discount applies
    #[serde(default = "default_social_trigger")]
    pub social_trigger: usize,

    #[serde(default = "default_social_discount")]
    pub social_discount: f64,

    /// Content shorter than this many characters raises the threshold
    #[serde(default = "default_short_content_below")]
    pub short_content_below: usize,

    #[serde(default = "default_short_content_penalty")]
    pub short_content_penalty: f64,

    /// Length bonuses applied to the probability
    #[serde(default)]
    pub length: LengthAdjustment,
}

impl Default for TextThresholds {
    fn default() -> Self {
        Self {
            base_threshold: default_base_threshold(),
            keyword_trigger: default_keyword_trigger(),
            keyword_discount: default_keyword_discount(),
            social_trigger: default_social_trigger(),
            social_discount: default_social_discount(),
            short_content_below: default_short_content_below(),
            short_content_penalty: default_short_content_penalty(),
            length: LengthAdjustment::default(),
        }
    }
}

/// Fixed image threshold and jitter band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageThresholds {
    #[serde(default = "default_image_threshold")]
    pub spam_threshold: f64,

    /// Half-width of the jitter band as a fraction (0.1 = ±10 points)
    #[serde(default = "default_jitter_band")]
    pub jitter_band: f64,
}

impl Default for ImageThresholds {
    fn default() -> Self {
        Self {
            spam_threshold: default_image_threshold(),
            jitter_band: default_jitter_band(),
        }
    }
}

/// Where jitter samples come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum JitterMode {
    /// Thread-local RNG
    #[default]
    Random,
    /// Reproducible RNG
    Seeded { seed: u64 },
    /// No jitter at all
    None,
}

impl JitterMode {
    pub fn build(&self) -> Arc<dyn JitterSource> {
        match self {
            Self::Random => Arc::new(ThreadJitter),
            Self::Seeded { seed } => Arc::new(SeededJitter::new(*seed)),
            Self::None => Arc::new(NoJitter),
        }
    }
}

fn default_max_parallel_images() -> usize {
    num_cpus::get().max(1)
}

fn default_base_threshold() -> f64 {
    50.0
}

fn default_keyword_trigger() -> usize {
    3
}

fn default_keyword_discount() -> f64 {
    10.0
}

fn default_social_trigger() -> usize {
    2
}

fn default_social_discount() -> f64 {
    8.0
}

fn default_short_content_below() -> usize {
    100
}

fn default_short_content_penalty() -> f64 {
    5.0
}

fn default_image_threshold() -> f64 {
    40.0
}

fn default_jitter_band() -> f64 {
    0.1
}
