//! High-risk keyword detector

use crate::catalog::KeywordEntry;
use crate::detector::{Detector, TextInput};
use crate::patterns::PhraseMatcher;
use spamlens_core::{DetectorCategory, Result, SubScore};

/// Scores tiered high-risk phrases found in the lowercased text
pub struct KeywordDetector {
    matcher: PhraseMatcher,
    weights: Vec<f64>,
}

impl KeywordDetector {
    pub fn new(entries: &[KeywordEntry]) -> Result<Self> {
        let matcher = PhraseMatcher::new(entries.iter().map(|e| e.phrase.to_lowercase()))?;
        let weights = entries.iter().map(KeywordEntry::effective_weight).collect();
        Ok(Self { matcher, weights })
    }
}

impl Detector<TextInput> for KeywordDetector {
    fn detect(&self, input: &TextInput) -> SubScore {
        let mut score = SubScore::new(DetectorCategory::Keywords);

        for i in self.matcher.matched_indices(input.lower()) {
            score.record(self.weights[i], self.matcher.phrases()[i].clone());
        }

        score.finish()
    }

    fn category(&self) -> DetectorCategory {
        DetectorCategory::Keywords
    }
}
