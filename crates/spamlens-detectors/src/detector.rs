//! Detector trait and the text input it runs over

use spamlens_core::{DetectorCategory, SubScore};

/// Trait for all detectors
///
/// A detector is a pure function of its input. It scores one category and
/// clamps its own score to the category's weight cap before returning
/// (see [`SubScore::finish`]).
pub trait Detector<I: ?Sized>: Send + Sync {
    /// Score the input
    fn detect(&self, input: &I) -> SubScore;

    /// Category this detector scores
    fn category(&self) -> DetectorCategory;

    /// Get the detector name
    fn name(&self) -> &str {
        self.category().label()
    }
}

/// Text prepared once for every text detector
#[derive(Debug, Clone)]
pub struct TextInput {
    original: String,
    lower: String,
    char_len: usize,
}

impl TextInput {
    pub fn new(text: impl Into<String>) -> Self {
        let original = text.into();
        let lower = original.to_lowercase();
        let char_len = original.chars().count();
        Self {
            original,
            lower,
            char_len,
        }
    }

    /// Text as submitted
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lowercased text for phrase matching
    pub fn lower(&self) -> &str {
        &self.lower
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// True for empty or whitespace-only text
    pub fn is_blank(&self) -> bool {
        self.original.trim().is_empty()
    }
}
