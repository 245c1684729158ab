//! Core types for SpamLens

use crate::pixels::PixelGrid;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A unit of content submitted for analysis
#[derive(Debug, Clone)]
pub enum ContentItem {
    /// Email or message body
    Text(TextContent),

    /// Already-decoded raster image
    Image(ImageContent),
}

/// Text body to score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    pub body: String,
}

impl TextContent {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

/// Decoded image to score
#[derive(Debug, Clone)]
pub struct ImageContent {
    /// Opaque caller-assigned identifier
    pub id: String,

    /// Original file name
    pub name: String,

    /// Row-major RGBA8 pixels
    pub pixels: PixelGrid,
}

/// Signal category produced by one detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorCategory {
    // Text pipeline
    Keywords,
    Behavioral,
    Technical,
    SocialEngineering,
    Formatting,

    // Image pipeline
    BrightColors,
    TextPatterns,
    ColorCombinations,
    ContrastPatterns,
    RepetitivePatterns,
}

impl DetectorCategory {
    /// Categories scored by the text pipeline, in aggregation order
    pub const TEXT: [DetectorCategory; 5] = [
        Self::Keywords,
        Self::Behavioral,
        Self::Technical,
        Self::SocialEngineering,
        Self::Formatting,
    ];

    /// Categories scored by the image pipeline, in aggregation order
    pub const IMAGE: [DetectorCategory; 5] = [
        Self::BrightColors,
        Self::TextPatterns,
        Self::ColorCombinations,
        Self::ContrastPatterns,
        Self::RepetitivePatterns,
    ];

    /// Maximum contribution of this category to its 100-point budget
    pub fn weight_cap(&self) -> f64 {
        match self {
            Self::Keywords => 35.0,
            Self::Behavioral => 25.0,
            Self::Technical => 20.0,
            Self::SocialEngineering => 15.0,
            Self::Formatting => 5.0,
            Self::BrightColors => 20.0,
            Self::TextPatterns => 30.0,
            Self::ColorCombinations => 25.0,
            Self::ContrastPatterns => 15.0,
            Self::RepetitivePatterns => 10.0,
        }
    }

    /// Key used in `detected_patterns`
    pub fn label(&self) -> &'static str {
        match self {
            Self::Keywords => "urgent_keywords",
            Self::Behavioral => "behavioral",
            Self::Technical => "technical_indicators",
            Self::SocialEngineering => "social_engineering",
            Self::Formatting => "formatting_patterns",
            Self::BrightColors => "bright_colors",
            Self::TextPatterns => "text_patterns",
            Self::ColorCombinations => "color_combinations",
            Self::ContrastPatterns => "contrast_patterns",
            Self::RepetitivePatterns => "repetitive_patterns",
        }
    }

    /// Key used in `analysis_details`
    pub fn risk_key(&self) -> &'static str {
        match self {
            Self::Keywords => "keyword_risk",
            Self::Behavioral => "behavioral_risk",
            Self::Technical => "technical_risk",
            Self::SocialEngineering => "social_risk",
            Self::Formatting => "formatting_risk",
            other => other.label(),
        }
    }

    /// Behavioral evidence counts toward the score only; it is never
    /// attached to the result envelope.
    pub fn surfaces_evidence(&self) -> bool {
        !matches!(self, Self::Behavioral)
    }

    /// Whether the detector clamps its own score to `weight_cap`
    pub fn self_clamps(&self) -> bool {
        !matches!(self, Self::Behavioral)
    }
}

/// One piece of explanatory evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Evidence {
    /// Matched phrase or tagged finding, e.g. `ALL_CAPS: WINNER`
    Tag(String),

    /// Structured pixel-level finding
    Signal(SignalDetail),
}

impl Evidence {
    pub fn tag(text: impl Into<String>) -> Self {
        Self::Tag(text.into())
    }

    /// Text of a tag, if this is one
    pub fn as_tag(&self) -> Option<&str> {
        match self {
            Self::Tag(t) => Some(t),
            Self::Signal(_) => None,
        }
    }
}

/// Structured detail for image detectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDetail {
    #[serde(rename = "type")]
    pub kind: DetectorCategory,
    pub description: String,
    pub score: f64,
    /// Share of pixels that tripped the detector
    pub percentage: f64,
    /// Percentage the detector must exceed to score
    pub threshold: f64,
}

/// Score and evidence from one detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub category: DetectorCategory,
    pub raw_score: f64,
    pub weight_cap: f64,
    pub evidence: Vec<Evidence>,
}

impl SubScore {
    /// Empty sub-score for a category
    pub fn new(category: DetectorCategory) -> Self {
        Self {
            category,
            raw_score: 0.0,
            weight_cap: category.weight_cap(),
            evidence: Vec::new(),
        }
    }

    /// Add to the raw score
    pub fn add(&mut self, amount: f64) {
        self.raw_score += amount;
    }

    /// Record a tagged finding
    pub fn push_tag(&mut self, tag: impl Into<String>) {
        self.evidence.push(Evidence::tag(tag));
    }

    /// Record a finding and its score together
    pub fn record(&mut self, amount: f64, tag: impl Into<String>) {
        self.add(amount);
        self.push_tag(tag);
    }

    /// Clamp the raw score to the weight cap when this category self-clamps
    pub fn finish(mut self) -> Self {
        if self.category.self_clamps() {
            self.raw_score = self.raw_score.min(self.weight_cap);
        }
        self
    }

    /// Number of evidence items
    pub fn evidence_count(&self) -> usize {
        self.evidence.len()
    }
}

/// Discrete risk tier derived from jittered text confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Bucket a confidence percentage
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence < 20.0 {
            Self::Low
        } else if confidence < 50.0 {
            Self::Medium
        } else if confidence < 80.0 {
            Self::High
        } else {
            Self::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final verdict for one piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub is_spam: bool,

    /// Jittered confidence (0-100)
    pub confidence: f64,

    pub total_score: f64,

    pub max_possible_score: f64,

    /// Present for text results only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,

    /// Evidence by category label
    pub detected_patterns: BTreeMap<String, Vec<Evidence>>,

    /// Pre-jitter probability (0-100)
    pub spam_probability: f64,

    /// Raw score by category risk key
    pub analysis_details: BTreeMap<String, f64>,

    /// Set when the item could not be analyzed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    /// Zero-confidence result for an image whose pixels could not be decoded
    pub fn decode_failure(reason: impl Into<String>) -> Self {
        Self {
            is_spam: false,
            confidence: 0.0,
            total_score: 0.0,
            max_possible_score: 0.0,
            risk_level: None,
            detected_patterns: BTreeMap::new(),
            spam_probability: 0.0,
            analysis_details: BTreeMap::new(),
            error: Some(reason.into()),
        }
    }

    /// Total evidence items across every surfaced category
    pub fn evidence_count(&self) -> usize {
        self.detected_patterns.values().map(Vec::len).sum()
    }

    /// Evidence recorded for a category, empty if none
    pub fn patterns_for(&self, category: DetectorCategory) -> &[Evidence] {
        self.detected_patterns
            .get(category.label())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Raw score recorded for a category
    pub fn detail(&self, category: DetectorCategory) -> Option<f64> {
        self.analysis_details.get(category.risk_key()).copied()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Per-image result in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysisResult {
    pub image_id: String,
    pub file_name: String,
    pub analysis: AnalysisResult,
}
