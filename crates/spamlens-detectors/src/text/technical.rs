//! Technical indicators: shouting, punctuation bursts, choppy sentences

use crate::detector::{Detector, TextInput};
use regex::Regex;
use spamlens_core::{DetectorCategory, Error, Result, SubScore};

const SHORT_SENTENCE_WORDS: usize = 5;
const SHORT_SENTENCE_RATIO: f64 = 0.6;

pub struct TechnicalDetector {
    all_caps: Regex,
    sentence_break: Regex,
}

impl TechnicalDetector {
    pub fn new() -> Result<Self> {
        Ok(Self {
            all_caps: Regex::new(r"[A-Z]{4,}")
                .map_err(|e| Error::catalog(format!("Failed to compile caps regex: {}", e)))?,
            sentence_break: Regex::new(r"[.!?]+")
                .map_err(|e| Error::catalog(format!("Failed to compile sentence regex: {}", e)))?,
        })
    }

    fn has_choppy_sentences(&self, text: &str) -> bool {
        let sentences: Vec<&str> = self
            .sentence_break
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        let short = sentences
            .iter()
            .filter(|s| s.split(' ').count() < SHORT_SENTENCE_WORDS)
            .count();

        short as f64 > sentences.len() as f64 * SHORT_SENTENCE_RATIO
    }
}

impl Detector<TextInput> for TechnicalDetector {
    fn detect(&self, input: &TextInput) -> SubScore {
        let mut score = SubScore::new(DetectorCategory::Technical);
        let text = input.original();

        for word in self.all_caps.find_iter(text) {
            let weight = if word.as_str().len() > 6 { 1.0 } else { 0.5 };
            score.record(weight, format!("ALL_CAPS: {}", word.as_str()));
        }

        let exclamations = text.matches('!').count();
        if exclamations > 3 {
            score.record(
                (exclamations as f64 * 0.5).min(5.0),
                format!("EXCESSIVE_EXCLAMATIONS: {}", exclamations),
            );
        }

        let questions = text.matches('?').count();
        if questions > 2 {
            score.record(
                (questions as f64 * 0.3).min(3.0),
                format!("EXCESSIVE_QUESTIONS: {}", questions),
            );
        }

        if self.has_choppy_sentences(text) {
            score.record(2.0, "SHORT_SENTENCES: Excessive use of short sentences");
        }

        score.finish()
    }

    fn category(&self) -> DetectorCategory {
        DetectorCategory::Technical
    }
}
