//! Formatting and style detector

use crate::detector::{Detector, TextInput};
use regex::Regex;
use spamlens_core::{DetectorCategory, Error, Result, SubScore};

const ELLIPSIS_RUN_SCORE: f64 = 0.3;
const MIXED_FORMATTING_SCORE: f64 = 1.0;

pub struct FormattingDetector {
    dot_runs: Regex,
    lower: Regex,
    upper: Regex,
    digit: Regex,
    symbol: Regex,
}

impl FormattingDetector {
    pub fn new() -> Result<Self> {
        let compile = |p: &str| {
            Regex::new(p).map_err(|e| Error::catalog(format!("Failed to compile '{}': {}", p, e)))
        };

        Ok(Self {
            dot_runs: compile(r"\.{3,}")?,
            lower: compile(r"[a-z]")?,
            upper: compile(r"[A-Z]")?,
            digit: compile(r"[0-9]")?,
            symbol: compile(r#"[!@#$%^&*()_+\-=\[\]{};':"\\|,.<>/?]"#)?,
        })
    }

    fn is_mixed(&self, text: &str) -> bool {
        self.lower.is_match(text)
            && self.upper.is_match(text)
            && self.digit.is_match(text)
            && self.symbol.is_match(text)
    }
}

impl Detector<TextInput> for FormattingDetector {
    fn detect(&self, input: &TextInput) -> SubScore {
        let mut score = SubScore::new(DetectorCategory::Formatting);
        let text = input.original();

        let runs = self.dot_runs.find_iter(text).count();
        if runs > 0 {
            score.record(
                runs as f64 * ELLIPSIS_RUN_SCORE,
                format!("MULTIPLE_DOTS: {} instances", runs),
            );
        }

        if self.is_mixed(text) {
            score.record(
                MIXED_FORMATTING_SCORE,
                "MIXED_FORMATTING: Inconsistent text formatting",
            );
        }

        score.finish()
    }

    fn category(&self) -> DetectorCategory {
        DetectorCategory::Formatting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> SubScore {
        FormattingDetector::new().unwrap().detect(&TextInput::new(text))
    }

    #[test]
    fn test_dot_runs() {
        let score = detect("wait... what..... no..");
        assert!((score.raw_score - 0.6).abs() < 1e-9);
        assert_eq!(score.evidence[0].as_tag(), Some("MULTIPLE_DOTS: 2 instances"));
    }

    #[test]
    fn test_mixed_formatting() {
        assert_eq!(detect("Call 5 times, ok").raw_score, 1.0);
        assert_eq!(detect("call 5 times, ok").raw_score, 0.0);
        assert_eq!(detect("Call five times, ok").raw_score, 0.0);
    }

    #[test]
    fn test_clamped() {
        let text = "a... ".repeat(30);
        assert_eq!(detect(&text).raw_score, 5.0);
    }
}
