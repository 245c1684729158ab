//! Per-content scoring pipelines
//!
//! Each pipeline runs its detector suite, normalizes the aggregate,
//! classifies it, and jitters the confidence. Both are cheap to clone so
//! image scoring can move onto blocking worker threads.

use crate::classify::{classify_image, classify_text, risk_tier};
use crate::config::{ImageThresholds, TextThresholds};
use crate::metrics::{record_analysis, Pipeline};
use spamlens_core::{AnalysisResult, PixelGrid};
use spamlens_detectors::{
    clamp_percent, image_jitter, text_jitter, DetectorSet, JitterSource, TextInput,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Text detectors with their thresholds
#[derive(Clone)]
pub struct TextPipeline {
    detectors: DetectorSet<TextInput>,
    thresholds: TextThresholds,
    jitter: Arc<dyn JitterSource>,
}

impl TextPipeline {
    pub fn new(
        detectors: DetectorSet<TextInput>,
        thresholds: TextThresholds,
        jitter: Arc<dyn JitterSource>,
    ) -> Self {
        Self {
            detectors,
            thresholds,
            jitter,
        }
    }

    pub fn with_jitter(mut self, jitter: Arc<dyn JitterSource>) -> Self {
        self.jitter = jitter;
        self
    }

    /// Score non-blank text
    pub fn score(&self, input: &TextInput) -> AnalysisResult {
        let start = Instant::now();
        let char_len = input.char_len();

        let aggregate = self.detectors.run(input);
        let spam_probability = self
            .thresholds
            .length
            .normalize(aggregate.raw_probability(), char_len);
        let verdict = classify_text(&self.thresholds, &aggregate, spam_probability, char_len);

        // Behavioral findings are not surfaced, so they do not widen the jitter
        let confidence = text_jitter(
            spam_probability,
            aggregate.surfaced_evidence_count(),
            self.jitter.as_ref(),
        );

        record_analysis(Pipeline::Text, verdict.is_spam, start.elapsed());
        debug!(
            total_score = aggregate.total_score,
            spam_probability,
            threshold = verdict.threshold,
            confidence,
            is_spam = verdict.is_spam,
            "text analyzed"
        );

        AnalysisResult {
            is_spam: verdict.is_spam,
            confidence,
            total_score: aggregate.total_score,
            max_possible_score: aggregate.max_possible_score,
            risk_level: Some(risk_tier(confidence)),
            detected_patterns: aggregate.detected_patterns(),
            spam_probability,
            analysis_details: aggregate.analysis_details(),
            error: None,
        }
    }
}

/// Image detectors with their thresholds
#[derive(Clone)]
pub struct ImagePipeline {
    detectors: DetectorSet<PixelGrid>,
    thresholds: ImageThresholds,
    jitter: Arc<dyn JitterSource>,
}

impl ImagePipeline {
    pub fn new(
        detectors: DetectorSet<PixelGrid>,
        thresholds: ImageThresholds,
        jitter: Arc<dyn JitterSource>,
    ) -> Self {
        Self {
            detectors,
            thresholds,
            jitter,
        }
    }

    pub fn with_jitter(mut self, jitter: Arc<dyn JitterSource>) -> Self {
        self.jitter = jitter;
        self
    }

    /// Score decoded pixels; a zero-area grid scores nothing
    pub fn score(&self, grid: &PixelGrid) -> AnalysisResult {
        let start = Instant::now();

        let aggregate = self.detectors.run(grid);
        let spam_probability = clamp_percent(aggregate.raw_probability());
        let verdict = classify_image(&self.thresholds, spam_probability);
        let confidence = image_jitter(
            spam_probability,
            self.thresholds.jitter_band,
            self.jitter.as_ref(),
        );

        record_analysis(Pipeline::Image, verdict.is_spam, start.elapsed());
        debug!(
            width = grid.width(),
            height = grid.height(),
            total_score = aggregate.total_score,
            confidence,
            is_spam = verdict.is_spam,
            "image analyzed"
        );

        AnalysisResult {
            is_spam: verdict.is_spam,
            confidence,
            total_score: aggregate.total_score,
            max_possible_score: aggregate.max_possible_score,
            risk_level: None,
            detected_patterns: aggregate.detected_patterns(),
            spam_probability,
            analysis_details: aggregate.analysis_details(),
            error: None,
        }
    }
}
