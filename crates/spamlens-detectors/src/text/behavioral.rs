//! Behavioral pattern detector: calls to action, pushy numbers, and links
//!
//! This is the one text detector that does not clamp itself. Link scoring
//! is summed over every match, so a link-heavy message can push the
//! category past its 25-point cap.

use crate::catalog::Catalog;
use crate::detector::{Detector, TextInput};
use crate::patterns::PhraseMatcher;
use regex::Regex;
use spamlens_core::{DetectorCategory, Error, Result, SubScore};

const CALL_TO_ACTION_SCORE: f64 = 2.5;
const URGENT_NUMBER_SCORE: f64 = 2.0;
const NUMBER_SCORE: f64 = 1.5;

/// Characters of context inspected on each side of a number
const CONTEXT_RADIUS: usize = 50;

const NUMBER_PATTERNS: [&str; 9] = [
    r"\$[0-9]+",
    r"[0-9]{3}-[0-9]{3}-[0-9]{4}",
    r"[0-9]{3}\.[0-9]{3}\.[0-9]{4}",
    r"[0-9]{10}",
    r"[0-9]+%",
    r"[0-9]+x",
    r"[0-9]+ days?",
    r"[0-9]+ hours?",
    r"[0-9]+ minutes?",
];

const URL_PATTERNS: [&str; 3] = [r"https?://[^\s]+", r"www\.[^\s]+", r"[^\s]+\.[a-z]{2,}"];

/// Reputation heuristics for a link's domain
#[derive(Debug, Clone)]
pub struct DomainRisk {
    shorteners: Vec<String>,
    suspicious_tlds: Vec<String>,
    bait_words: Vec<String>,
}

impl DomainRisk {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let lower = |list: &[String]| -> Vec<String> { list.iter().map(|s| s.to_lowercase()).collect() };
        Self {
            shorteners: lower(&catalog.url_shorteners),
            suspicious_tlds: lower(&catalog.suspicious_tlds),
            bait_words: lower(&catalog.domain_bait_words),
        }
    }

    /// Host part of a link: scheme and `www.` stripped, path dropped
    pub fn domain_of(url: &str) -> String {
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or(url);
        let rest = rest.strip_prefix("www.").unwrap_or(rest);
        rest.split('/').next().unwrap_or(rest).to_lowercase()
    }

    /// Score of one link
    pub fn score(&self, url: &str) -> f64 {
        let domain = Self::domain_of(url);

        if self.shorteners.iter().any(|s| domain.contains(s.as_str())) {
            3.0
        } else if self.suspicious_tlds.iter().any(|t| domain.ends_with(t.as_str())) {
            2.5
        } else if self.bait_words.iter().any(|w| domain.contains(w.as_str())) {
            2.0
        } else {
            1.5
        }
    }
}

/// Scores calls to action, numbers in context, and link reputation
pub struct BehavioralDetector {
    call_to_action: PhraseMatcher,
    urgency_words: Vec<String>,
    number_patterns: Vec<Regex>,
    url_patterns: Vec<Regex>,
    domain_risk: DomainRisk,
}

impl BehavioralDetector {
    pub fn new(catalog: &Catalog) -> Result<Self> {
        Ok(Self {
            call_to_action: PhraseMatcher::new(
                catalog.call_to_action.iter().map(|p| p.to_lowercase()),
            )?,
            urgency_words: catalog.urgency_words.iter().map(|w| w.to_lowercase()).collect(),
            number_patterns: compile_all(&NUMBER_PATTERNS)?,
            url_patterns: compile_all(&URL_PATTERNS)?,
            domain_risk: DomainRisk::from_catalog(catalog),
        })
    }

    fn is_urgent_context(&self, text: &str, start: usize, end: usize) -> bool {
        let window = context_window(text, start, end, CONTEXT_RADIUS).to_lowercase();
        self.urgency_words.iter().any(|w| window.contains(w.as_str()))
    }
}

impl Detector<TextInput> for BehavioralDetector {
    fn detect(&self, input: &TextInput) -> SubScore {
        let mut score = SubScore::new(DetectorCategory::Behavioral);
        let text = input.original();

        for phrase in self.call_to_action.matches(input.lower()) {
            score.record(CALL_TO_ACTION_SCORE, format!("CALL_TO_ACTION: {}", phrase));
        }

        // One score per pattern, judged by its first occurrence
        for pattern in &self.number_patterns {
            if let Some(m) = pattern.find(text) {
                if self.is_urgent_context(text, m.start(), m.end()) {
                    score.record(URGENT_NUMBER_SCORE, format!("URGENT_NUMBER: {}", m.as_str()));
                } else {
                    score.record(NUMBER_SCORE, format!("NUMBER: {}", m.as_str()));
                }
            }
        }

        for pattern in &self.url_patterns {
            for m in pattern.find_iter(text) {
                let risk = self.domain_risk.score(m.as_str());
                score.record(risk, format!("URL: {} ({:.1})", m.as_str(), risk));
            }
        }

        score.finish()
    }

    fn category(&self) -> DetectorCategory {
        DetectorCategory::Behavioral
    }
}

fn compile_all(patterns: &[&str]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p)
                .map_err(|e| Error::catalog(format!("Failed to compile regex '{}': {}", p, e)))
        })
        .collect()
}

/// Slice of `text` reaching `radius` characters either side of a match
fn context_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(start);
    let to = text[end..]
        .char_indices()
        .nth(radius)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());
    &text[from..to]
}
