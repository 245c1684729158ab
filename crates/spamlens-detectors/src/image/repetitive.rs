//! Tiled repetition detector

use super::{has_bright_channel, RatioRule};
use crate::detector::Detector;
use spamlens_core::{DetectorCategory, PixelGrid, SubScore, Tile};

const RULE: RatioRule = RatioRule::new(25.0, 0.3);
const MAX_TILE_SIDE: usize = 20;
const BRIGHT_TILE_RATIO: f64 = 0.6;

pub struct RepetitivePatternDetector;

impl RepetitivePatternDetector {
    /// Tile side for a grid: at most 20, at most a quarter of the short edge
    pub fn tile_side(grid: &PixelGrid) -> usize {
        MAX_TILE_SIDE.min(grid.width().min(grid.height()) / 4)
    }

    fn is_repetitive(grid: &PixelGrid, tile: Tile) -> bool {
        let bright = grid
            .tile_pixels(tile)
            .filter(|p| has_bright_channel(*p))
            .count();
        bright as f64 > tile.area() as f64 * BRIGHT_TILE_RATIO
    }
}

impl Detector<PixelGrid> for RepetitivePatternDetector {
    fn detect(&self, grid: &PixelGrid) -> SubScore {
        let side = Self::tile_side(grid);
        let covered: usize = grid
            .tiles(side)
            .filter(|tile| Self::is_repetitive(grid, *tile))
            .map(|tile| tile.area())
            .sum();

        RULE.score(
            DetectorCategory::RepetitivePatterns,
            "Repetitive visual patterns",
            grid.percentage_of(covered),
        )
    }

    fn category(&self) -> DetectorCategory {
        DetectorCategory::RepetitivePatterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spamlens_core::{Evidence, Rgba};

    #[test]
    fn test_tile_side() {
        assert_eq!(RepetitivePatternDetector::tile_side(&PixelGrid::filled(100, 100, Rgba::WHITE)), 20);
        assert_eq!(RepetitivePatternDetector::tile_side(&PixelGrid::filled(40, 300, Rgba::WHITE)), 10);
        assert_eq!(RepetitivePatternDetector::tile_side(&PixelGrid::filled(3, 3, Rgba::WHITE)), 0);
    }

    #[test]
    fn test_white_image_coverage() {
        // 16 of the 25 possible tiles are visited: 6400 / 10000 pixels
        let score = RepetitivePatternDetector.detect(&PixelGrid::filled(100, 100, Rgba::WHITE));
        assert_eq!(score.raw_score, 10.0);

        match &score.evidence[0] {
            Evidence::Signal(signal) => assert_eq!(signal.percentage, 64.0),
            other => panic!("unexpected evidence {:?}", other),
        }
    }

    #[test]
    fn test_dark_image() {
        let score = RepetitivePatternDetector.detect(&PixelGrid::filled(100, 100, Rgba::BLACK));
        assert_eq!(score.raw_score, 0.0);
    }

    #[test]
    fn test_tiny_image_has_no_tiles() {
        let score = RepetitivePatternDetector.detect(&PixelGrid::filled(3, 3, Rgba::WHITE));
        assert_eq!(score.raw_score, 0.0);
        assert!(score.evidence.is_empty());
    }
}
