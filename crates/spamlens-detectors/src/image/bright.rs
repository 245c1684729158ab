//! Bright, attention-grabbing colour detector

use super::{is_bright, RatioRule};
use crate::detector::Detector;
use spamlens_core::{DetectorCategory, PixelGrid, SubScore};

const RULE: RatioRule = RatioRule::new(30.0, 0.5);

pub struct BrightColorDetector;

impl Detector<PixelGrid> for BrightColorDetector {
    fn detect(&self, grid: &PixelGrid) -> SubScore {
        let bright = grid.pixels().iter().filter(|p| is_bright(**p)).count();

        RULE.score(
            DetectorCategory::BrightColors,
            "Excessive use of bright/attention-grabbing colors",
            grid.percentage_of(bright),
        )
    }

    fn category(&self) -> DetectorCategory {
        DetectorCategory::BrightColors
    }
}
