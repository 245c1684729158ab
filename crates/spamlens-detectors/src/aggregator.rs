//! Weighted aggregation of detector sub-scores
//!
//! A [`DetectorSet`] runs every detector over the same input and sums the
//! sub-scores against the fixed budget formed by their weight caps. The
//! aggregator never re-clamps: detectors clamp themselves, and the one
//! category that does not (behavioral) is allowed to exceed its cap.

use crate::detector::Detector;
use spamlens_core::{DetectorCategory, Evidence, SubScore};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// An ordered set of detectors over one input type
pub struct DetectorSet<I: ?Sized> {
    detectors: Vec<Arc<dyn Detector<I>>>,
}

impl<I: ?Sized> Clone for DetectorSet<I> {
    fn clone(&self) -> Self {
        Self {
            detectors: self.detectors.clone(),
        }
    }
}

impl<I: ?Sized> DetectorSet<I> {
    /// Create a new empty set
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// Add a detector
    pub fn with(mut self, detector: Arc<dyn Detector<I>>) -> Self {
        self.detectors.push(detector);
        self
    }

    /// Sum of the weight caps of every detector
    pub fn max_possible_score(&self) -> f64 {
        self.detectors.iter().map(|d| d.category().weight_cap()).sum()
    }

    /// Run every detector and aggregate
    pub fn run(&self, input: &I) -> Aggregate {
        let scores: Vec<SubScore> = self
            .detectors
            .iter()
            .map(|detector| {
                let score = detector.detect(input);
                debug!(
                    detector = detector.name(),
                    score = score.raw_score,
                    evidence = score.evidence_count(),
                    "detector scored"
                );
                score
            })
            .collect();

        Aggregate::new(scores, self.max_possible_score())
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Categories in run order
    pub fn categories(&self) -> Vec<DetectorCategory> {
        self.detectors.iter().map(|d| d.category()).collect()
    }
}

impl<I: ?Sized> Default for DetectorSet<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sub-scores of one run plus their totals
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub scores: Vec<SubScore>,
    pub total_score: f64,
    pub max_possible_score: f64,
}

impl Aggregate {
    pub fn new(scores: Vec<SubScore>, max_possible_score: f64) -> Self {
        let total_score = scores.iter().map(|s| s.raw_score).sum();
        Self {
            scores,
            total_score,
            max_possible_score,
        }
    }

    /// `total * 100 / max`, or 0 for an empty budget
    pub fn raw_probability(&self) -> f64 {
        if self.max_possible_score <= 0.0 {
            return 0.0;
        }
        self.total_score * 100.0 / self.max_possible_score
    }

    /// Sub-score for a category
    pub fn get(&self, category: DetectorCategory) -> Option<&SubScore> {
        self.scores.iter().find(|s| s.category == category)
    }

    /// Evidence items recorded by a category
    pub fn evidence_count_for(&self, category: DetectorCategory) -> usize {
        self.get(category).map(SubScore::evidence_count).unwrap_or(0)
    }

    /// Evidence items across surfaced categories only
    pub fn surfaced_evidence_count(&self) -> usize {
        self.scores
            .iter()
            .filter(|s| s.category.surfaces_evidence())
            .map(SubScore::evidence_count)
            .sum()
    }

    /// Evidence by category label, surfaced categories only
    pub fn detected_patterns(&self) -> BTreeMap<String, Vec<Evidence>> {
        self.scores
            .iter()
            .filter(|s| s.category.surfaces_evidence())
            .map(|s| (s.category.label().to_string(), s.evidence.clone()))
            .collect()
    }

    /// Raw score by category risk key
    pub fn analysis_details(&self) -> BTreeMap<String, f64> {
        self.scores
            .iter()
            .map(|s| (s.category.risk_key().to_string(), s.raw_score))
            .collect()
    }
}
