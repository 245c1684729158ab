//! SpamLens Detectors
//!
//! Heuristic signal extraction for the SpamLens scoring engine.
//!
//! Detectors are grouped into two fixed suites, each with a 100-point budget:
//! - Text (35/25/20/15/5): keywords, behavioral, technical, social engineering, formatting
//! - Image (20/30/25/15/10): bright colors, text-like strokes, color combinations,
//!   contrast, repetition
//!
//! Every detector is a pure function of its input. The only nondeterminism in
//! the pipeline is the confidence jitter, which goes through a [`JitterSource`].

pub mod aggregator;
pub mod catalog;
pub mod detector;
pub mod image;
pub mod jitter;
pub mod normalizer;
pub mod patterns;
pub mod text;

pub use aggregator::{Aggregate, DetectorSet};
pub use catalog::{Catalog, KeywordEntry, Severity};
pub use detector::{Detector, TextInput};
pub use image::{image_detectors, RatioRule};
pub use jitter::{
    clamp_percent, image_jitter, text_jitter, text_variation, FixedJitter, JitterSource, NoJitter,
    SeededJitter, ThreadJitter,
};
pub use normalizer::LengthAdjustment;
pub use patterns::PhraseMatcher;
pub use text::text_detectors;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::aggregator::{Aggregate, DetectorSet};
    pub use crate::catalog::Catalog;
    pub use crate::detector::{Detector, TextInput};
    pub use crate::image::image_detectors;
    pub use crate::jitter::JitterSource;
    pub use crate::text::text_detectors;
}
