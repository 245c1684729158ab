//! SpamLens Engine
//!
//! Turns detector output into verdicts. The engine:
//! - Normalizes and classifies text and image probabilities
//! - Applies bounded confidence jitter from a configurable source
//! - Orchestrates batches of images with per-item failure containment
//! - Derives follow-up recommendations from results
//!
//! Configuration is YAML-based; see [`EngineConfig`].

pub mod classify;
pub mod config;
pub mod metrics;
pub mod orchestrator;
pub mod pipeline;
pub mod recommendations;

pub use classify::{classify_image, classify_text, text_threshold, Verdict};
pub use config::{EngineConfig, ImageThresholds, JitterMode, TextThresholds};
pub use crate::metrics::describe_metrics;
pub use orchestrator::{
    average_confidence, CombinedAnalysis, ImageBatch, ImageSubmission, SpamAnalyzer,
};
pub use pipeline::{ImagePipeline, TextPipeline};
pub use recommendations::{AdviceCategory, Priority, Recommendation};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{EngineConfig, JitterMode};
    pub use crate::orchestrator::{CombinedAnalysis, ImageBatch, ImageSubmission, SpamAnalyzer};
    pub use crate::recommendations::Recommendation;
}
