//! Spam verdicts from normalized probabilities

use crate::config::{ImageThresholds, TextThresholds};
use spamlens_core::{DetectorCategory, RiskLevel};
use spamlens_detectors::Aggregate;

/// Verdict before jitter is applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub is_spam: bool,
    pub threshold: f64,
}

/// Adaptive text threshold.
///
/// Many keyword or social-engineering matches lower the bar; very short
/// content raises it, since short texts already carry a length bonus.
pub fn text_threshold(
    thresholds: &TextThresholds,
    keyword_matches: usize,
    social_matches: usize,
    char_len: usize,
) -> f64 {
    let mut threshold = thresholds.base_threshold;

    if keyword_matches > thresholds.keyword_trigger {
        threshold -= thresholds.keyword_discount;
    }
    if social_matches > thresholds.social_trigger {
        threshold -= thresholds.social_discount;
    }
    if char_len < thresholds.short_content_below {
        threshold += thresholds.short_content_penalty;
    }

    threshold
}

/// Classify a normalized text probability
pub fn classify_text(
    thresholds: &TextThresholds,
    aggregate: &Aggregate,
    probability: f64,
    char_len: usize,
) -> Verdict {
    let threshold = text_threshold(
        thresholds,
        aggregate.evidence_count_for(DetectorCategory::Keywords),
        aggregate.evidence_count_for(DetectorCategory::SocialEngineering),
        char_len,
    );

    Verdict {
        is_spam: probability > threshold,
        threshold,
    }
}

/// Classify an image probability against the fixed threshold
pub fn classify_image(thresholds: &ImageThresholds, probability: f64) -> Verdict {
    Verdict {
        is_spam: probability > thresholds.spam_threshold,
        threshold: thresholds.spam_threshold,
    }
}

/// Risk tier of a jittered text confidence
pub fn risk_tier(confidence: f64) -> RiskLevel {
    RiskLevel::from_confidence(confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spamlens_core::SubScore;

    fn tagged(category: DetectorCategory, count: usize) -> SubScore {
        let mut score = SubScore::new(category);
        for i in 0..count {
            score.push_tag(format!("match {}", i));
        }
        score
    }

    #[test]
    fn test_threshold_adjustments() {
        let t = TextThresholds::default();

        assert_eq!(text_threshold(&t, 0, 0, 500), 50.0);
        assert_eq!(text_threshold(&t, 3, 2, 500), 50.0);
        assert_eq!(text_threshold(&t, 4, 0, 500), 40.0);
        assert_eq!(text_threshold(&t, 0, 3, 500), 42.0);
        assert_eq!(text_threshold(&t, 4, 3, 500), 32.0);
        assert_eq!(text_threshold(&t, 0, 0, 99), 55.0);
        assert_eq!(text_threshold(&t, 4, 3, 30), 37.0);
    }

    #[test]
    fn test_strictly_greater() {
        let t = TextThresholds::default();
        let aggregate = Aggregate::new(vec![], 100.0);

        assert!(!classify_text(&t, &aggregate, 50.0, 500).is_spam);
        assert!(classify_text(&t, &aggregate, 50.1, 500).is_spam);

        let image = ImageThresholds::default();
        assert!(!classify_image(&image, 40.0).is_spam);
        assert!(classify_image(&image, 40.5).is_spam);
    }

    #[test]
    fn test_counts_come_from_evidence() {
        let aggregate = Aggregate::new(
            vec![
                tagged(DetectorCategory::Keywords, 4),
                tagged(DetectorCategory::SocialEngineering, 3),
            ],
            100.0,
        );

        let verdict = classify_text(&TextThresholds::default(), &aggregate, 35.0, 500);
        assert_eq!(verdict.threshold, 32.0);
        assert!(verdict.is_spam);
    }

    #[test]
    fn test_risk_tiers() {
        assert_eq!(risk_tier(0.0), RiskLevel::Low);
        assert_eq!(risk_tier(19.9), RiskLevel::Low);
        assert_eq!(risk_tier(20.0), RiskLevel::Medium);
        assert_eq!(risk_tier(50.0), RiskLevel::High);
        assert_eq!(risk_tier(80.0), RiskLevel::Critical);
    }
}
