//! Analysis orchestrator
//!
//! [`SpamAnalyzer`] is the single entry point callers use. It routes text to
//! the text pipeline and images to the image pipeline, scoring each image of
//! a batch on the blocking pool with at most `max_parallel_images` in flight.
//! Results come back in submission order, and an image that fails to decode
//! becomes a zero-confidence error result instead of failing the batch.

use crate::config::EngineConfig;
use crate::metrics::record_decode_failure;
use crate::pipeline::{ImagePipeline, TextPipeline};
use crate::recommendations::{self, Recommendation};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use spamlens_core::{
    AnalysisResult, ContentItem, ImageAnalysisResult, PixelGrid, PixelSource, Result,
};
use spamlens_detectors::{image_detectors, text_detectors, Catalog, JitterSource, TextInput};
use std::sync::Arc;
use tracing::{info, warn};

const DECODE_FAILURE: &str = "decode failure";
const ANALYSIS_FAILURE: &str = "analysis failure";

/// One image awaiting analysis
#[derive(Clone)]
pub struct ImageSubmission {
    pub id: String,
    pub name: String,
    pub source: Arc<dyn PixelSource>,
}

impl ImageSubmission {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        source: impl PixelSource + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source: Arc::new(source),
        }
    }
}

impl std::fmt::Debug for ImageSubmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageSubmission")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Per-image results plus the batch mean confidence
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBatch {
    pub results: Vec<ImageAnalysisResult>,
    pub average_confidence: f64,
}

impl ImageBatch {
    pub fn new(results: Vec<ImageAnalysisResult>) -> Self {
        let average_confidence = average_confidence(&results);
        Self {
            results,
            average_confidence,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Images classified as spam
    pub fn spam_count(&self) -> usize {
        self.results.iter().filter(|r| r.analysis.is_spam).count()
    }
}

/// Mean confidence of a batch, 0 when empty
pub fn average_confidence(results: &[ImageAnalysisResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    results.iter().map(|r| r.analysis.confidence).sum::<f64>() / results.len() as f64
}

/// Text and image results analyzed together
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_result: Option<AnalysisResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_results: Option<ImageBatch>,
}

impl CombinedAnalysis {
    /// Single headline confidence, only when exactly one pipeline ran
    pub fn overall_confidence(&self) -> Option<f64> {
        match (&self.text_result, &self.image_results) {
            (Some(text), None) => Some(text.confidence),
            (None, Some(batch)) => Some(batch.average_confidence),
            _ => None,
        }
    }

    /// Whether the text or any image was classified as spam
    pub fn any_spam(&self) -> bool {
        let text = self.text_result.as_ref().is_some_and(|r| r.is_spam);
        let images = self
            .image_results
            .as_ref()
            .is_some_and(|b| b.spam_count() > 0);
        text || images
    }

    pub fn is_empty(&self) -> bool {
        self.text_result.is_none() && self.image_results.is_none()
    }

    /// Advice for everything analyzed, text first
    pub fn recommendations(&self) -> Vec<Recommendation> {
        let mut advice = self
            .text_result
            .as_ref()
            .map(recommendations::for_text)
            .unwrap_or_default();

        if let Some(batch) = &self.image_results {
            advice.extend(recommendations::for_images(&batch.results));
        }

        advice
    }
}

/// Spam analysis entry point
#[derive(Clone)]
pub struct SpamAnalyzer {
    text: TextPipeline,
    image: ImagePipeline,
    max_parallel_images: usize,
}

impl SpamAnalyzer {
    /// Build from configuration, loading the configured catalogue
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let catalog = config.load_catalog()?;
        Self::with_catalog(config, &catalog)
    }

    /// Build from configuration with an explicit catalogue
    pub fn with_catalog(config: &EngineConfig, catalog: &Catalog) -> Result<Self> {
        config.validate()?;

        let jitter = config.build_jitter();
        let text = TextPipeline::new(text_detectors(catalog)?, config.text, jitter.clone());
        let image = ImagePipeline::new(image_detectors(), config.image, jitter);

        info!(
            keywords = catalog.keywords.len(),
            jitter = ?config.jitter,
            max_parallel_images = config.max_parallel_images,
            "spam analyzer ready"
        );

        Ok(Self {
            text,
            image,
            max_parallel_images: config.max_parallel_images,
        })
    }

    /// Replace the jitter source of both pipelines
    pub fn with_jitter(mut self, jitter: Arc<dyn JitterSource>) -> Self {
        self.text = self.text.with_jitter(jitter.clone());
        self.image = self.image.with_jitter(jitter);
        self
    }

    /// Analyze text; `None` when it is empty or whitespace only
    pub fn analyze_text(&self, text: &str) -> Option<AnalysisResult> {
        let input = TextInput::new(text);
        if input.is_blank() {
            return None;
        }
        Some(self.text.score(&input))
    }

    /// Analyze already-decoded pixels on the calling thread
    pub fn analyze_pixels(&self, grid: &PixelGrid) -> AnalysisResult {
        self.image.score(grid)
    }

    /// Analyze a single content item
    pub fn analyze(&self, item: &ContentItem) -> Option<AnalysisResult> {
        match item {
            ContentItem::Text(text) => self.analyze_text(&text.body),
            ContentItem::Image(image) => Some(self.analyze_pixels(&image.pixels)),
        }
    }

    /// Analyze a batch of images, preserving submission order
    pub async fn analyze_images(&self, items: Vec<ImageSubmission>) -> Vec<ImageAnalysisResult> {
        if items.is_empty() {
            return Vec::new();
        }

        stream::iter(items)
            .map(|item| self.analyze_image(item))
            .buffered(self.max_parallel_images)
            .collect()
            .await
    }

    /// Analyze a batch and compute its mean confidence
    pub async fn analyze_image_batch(&self, items: Vec<ImageSubmission>) -> ImageBatch {
        ImageBatch::new(self.analyze_images(items).await)
    }

    /// Analyze whichever of text and images are present
    pub async fn analyze_both(
        &self,
        text: Option<&str>,
        images: Vec<ImageSubmission>,
    ) -> CombinedAnalysis {
        let text_task = async { text.and_then(|t| self.analyze_text(t)) };
        let image_task = async {
            if images.is_empty() {
                None
            } else {
                Some(self.analyze_image_batch(images).await)
            }
        };

        let (text_result, image_results) = tokio::join!(text_task, image_task);
        CombinedAnalysis {
            text_result,
            image_results,
        }
    }

    async fn analyze_image(&self, item: ImageSubmission) -> ImageAnalysisResult {
        let ImageSubmission { id, name, source } = item;

        let analysis = match source.decode().await {
            Ok(grid) => {
                let pipeline = self.image.clone();
                match tokio::task::spawn_blocking(move || pipeline.score(&grid)).await {
                    Ok(analysis) => analysis,
                    Err(e) => {
                        warn!(
                            image_id = %id,
                            file_name = %name,
                            error = %e,
                            "image scoring task failed"
                        );
                        AnalysisResult::decode_failure(ANALYSIS_FAILURE)
                    }
                }
            }
            Err(e) => {
                warn!(image_id = %id, file_name = %name, error = %e, "failed to decode image");
                record_decode_failure();
                AnalysisResult::decode_failure(DECODE_FAILURE)
            }
        };

        ImageAnalysisResult {
            image_id: id,
            file_name: name,
            analysis,
        }
    }
}
