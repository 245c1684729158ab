//! Multi-phrase substring matching using the Aho-Corasick algorithm

use aho_corasick::AhoCorasick;
use spamlens_core::{Error, Result};

/// Finds which catalogue phrases occur in a text
///
/// Each phrase counts at most once however often it appears, and phrases
/// that overlap (`"exclusive"` inside `"exclusive offer"`) are all reported.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    automaton: AhoCorasick,
    phrases: Vec<String>,
}

impl PhraseMatcher {
    /// Build a matcher over `phrases`, keeping their order
    pub fn new<I, S>(phrases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();

        let automaton = AhoCorasick::builder()
            .build(&phrases)
            .map_err(|e| Error::catalog(format!("Failed to build phrase matcher: {}", e)))?;

        Ok(Self { automaton, phrases })
    }

    /// Indices of phrases present in `text`, in catalogue order
    pub fn matched_indices(&self, text: &str) -> Vec<usize> {
        let mut seen = vec![false; self.phrases.len()];
        for m in self.automaton.find_overlapping_iter(text) {
            seen[m.pattern().as_usize()] = true;
        }

        seen.iter()
            .enumerate()
            .filter_map(|(i, hit)| hit.then_some(i))
            .collect()
    }

    /// Phrases present in `text`, in catalogue order
    pub fn matches<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.matched_indices(text)
            .into_iter()
            .map(|i| self.phrases[i].as_str())
            .collect()
    }

    /// Whether any phrase occurs in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.automaton.is_match(text)
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}
