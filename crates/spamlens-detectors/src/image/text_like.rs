//! Stroke-density detector standing in for text recognition
//!
//! A dark pixel counts as line-like when at least three pixels of its
//! five-wide horizontal or vertical window (center included) are dark.
//! Dense runs of such pixels are what rendered text looks like.

use super::{is_dark, RatioRule};
use crate::detector::Detector;
use spamlens_core::{Axis, DetectorCategory, PixelGrid, SubScore};

const RULE: RatioRule = RatioRule::new(10.0, 2.0);
const WINDOW_RADIUS: usize = 2;
const MIN_DARK_IN_WINDOW: usize = 3;

pub struct TextLikePatternDetector;

impl TextLikePatternDetector {
    fn is_line_like(grid: &PixelGrid, x: usize, y: usize) -> bool {
        [Axis::Horizontal, Axis::Vertical].into_iter().any(|axis| {
            grid.count_in_window(x, y, axis, WINDOW_RADIUS, is_dark) >= MIN_DARK_IN_WINDOW
        })
    }
}

impl Detector<PixelGrid> for TextLikePatternDetector {
    fn detect(&self, grid: &PixelGrid) -> SubScore {
        let line_like = grid
            .coords()
            .filter(|&(x, y)| grid.get(x, y).is_some_and(is_dark))
            .filter(|&(x, y)| Self::is_line_like(grid, x, y))
            .count();

        RULE.score(
            DetectorCategory::TextPatterns,
            "Suspicious text patterns detected",
            grid.percentage_of(line_like),
        )
    }

    fn category(&self) -> DetectorCategory {
        DetectorCategory::TextPatterns
    }
}
