//! Image signal extraction
//!
//! Five pixel-statistics detectors with caps 20/30/25/15/10. Each one turns
//! a pixel percentage into a score with the same rule: nothing until the
//! percentage passes the detector's threshold, then `percentage * multiplier`
//! up to the cap. No text recognition is performed anywhere.

pub mod bright;
pub mod color;
pub mod contrast;
pub mod repetitive;
pub mod text_like;

pub use bright::BrightColorDetector;
pub use color::ColorCombinationDetector;
pub use contrast::ContrastDetector;
pub use repetitive::RepetitivePatternDetector;
pub use text_like::TextLikePatternDetector;

use crate::aggregator::DetectorSet;
use spamlens_core::{DetectorCategory, Evidence, PixelGrid, Rgba, SignalDetail, SubScore};
use std::sync::Arc;

/// Threshold/multiplier pair shared by every image detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioRule {
    /// Percentage that must be exceeded before scoring
    pub threshold: f64,
    pub multiplier: f64,
}

impl RatioRule {
    pub const fn new(threshold: f64, multiplier: f64) -> Self {
        Self {
            threshold,
            multiplier,
        }
    }

    /// Sub-score for `percentage`; evidence is attached only when it scores
    pub fn score(
        &self,
        category: DetectorCategory,
        description: &str,
        percentage: f64,
    ) -> SubScore {
        let mut sub = SubScore::new(category);

        if percentage > self.threshold {
            let points = (percentage * self.multiplier).min(category.weight_cap());
            sub.add(points);
            sub.evidence.push(Evidence::Signal(SignalDetail {
                kind: category,
                description: description.to_string(),
                score: points,
                percentage,
                threshold: self.threshold,
            }));
        }

        sub.finish()
    }
}

/// Two or more of R, G, B above 200
pub fn is_bright(p: Rgba) -> bool {
    (p.r > 200 && p.g > 200) || (p.r > 200 && p.b > 200) || (p.g > 200 && p.b > 200)
}

/// All of R, G, B below 100
pub fn is_dark(p: Rgba) -> bool {
    p.r < 100 && p.g < 100 && p.b < 100
}

/// Any of R, G, B above 200
pub fn has_bright_channel(p: Rgba) -> bool {
    p.r > 200 || p.g > 200 || p.b > 200
}

/// The full image detector suite
pub fn image_detectors() -> DetectorSet<PixelGrid> {
    DetectorSet::new()
        .with(Arc::new(BrightColorDetector))
        .with(Arc::new(TextLikePatternDetector))
        .with(Arc::new(ColorCombinationDetector))
        .with(Arc::new(ContrastDetector))
        .with(Arc::new(RepetitivePatternDetector))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_rule() {
        let rule = RatioRule::new(30.0, 0.5);

        let below = rule.score(DetectorCategory::BrightColors, "bright", 30.0);
        assert_eq!(below.raw_score, 0.0);
        assert!(below.evidence.is_empty());

        let above = rule.score(DetectorCategory::BrightColors, "bright", 32.0);
        assert_eq!(above.raw_score, 16.0);
        assert_eq!(above.evidence_count(), 1);

        let capped = rule.score(DetectorCategory::BrightColors, "bright", 100.0);
        assert_eq!(capped.raw_score, 20.0);
    }

    #[test]
    fn test_suite_shape() {
        let set = image_detectors();
        assert_eq!(set.categories(), DetectorCategory::IMAGE.to_vec());
        assert_eq!(set.max_possible_score(), 100.0);
    }

    #[test]
    fn test_zero_area_image_scores_nothing() {
        let grid = PixelGrid::filled(0, 0, Rgba::WHITE);
        let aggregate = image_detectors().run(&grid);
        assert_eq!(aggregate.total_score, 0.0);
        assert_eq!(aggregate.raw_probability(), 0.0);
    }

    #[test]
    fn test_white_image() {
        let grid = PixelGrid::filled(100, 100, Rgba::WHITE);
        let aggregate = image_detectors().run(&grid);

        assert_eq!(aggregate.get(DetectorCategory::BrightColors).unwrap().raw_score, 20.0);
        assert_eq!(aggregate.get(DetectorCategory::ColorCombinations).unwrap().raw_score, 0.0);
        assert_eq!(aggregate.get(DetectorCategory::TextPatterns).unwrap().raw_score, 0.0);
        assert_eq!(aggregate.get(DetectorCategory::ContrastPatterns).unwrap().raw_score, 0.0);
        assert_eq!(aggregate.get(DetectorCategory::RepetitivePatterns).unwrap().raw_score, 10.0);
        assert_eq!(aggregate.total_score, 30.0);
    }
}
