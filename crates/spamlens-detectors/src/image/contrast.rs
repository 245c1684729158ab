//! Red-channel contrast detector

use super::RatioRule;
use crate::detector::Detector;
use spamlens_core::{DetectorCategory, PixelGrid, SubScore};

const RULE: RatioRule = RatioRule::new(15.0, 0.8);
const MIN_DIFFERENCE: f64 = 100.0;

pub struct ContrastDetector;

impl ContrastDetector {
    fn is_high_contrast(grid: &PixelGrid, x: usize, y: usize) -> bool {
        let (Some(center), Some(neighbors)) = (grid.get(x, y), grid.orthogonal_neighbors(x, y))
        else {
            return false;
        };

        let mean = neighbors.iter().map(|p| p.r as f64).sum::<f64>() / 4.0;
        (center.r as f64 - mean).abs() > MIN_DIFFERENCE
    }
}

impl Detector<PixelGrid> for ContrastDetector {
    fn detect(&self, grid: &PixelGrid) -> SubScore {
        let contrasted = grid
            .interior_coords()
            .filter(|&(x, y)| Self::is_high_contrast(grid, x, y))
            .count();

        // Percentage is taken over the whole image, border included
        RULE.score(
            DetectorCategory::ContrastPatterns,
            "High contrast patterns detected",
            grid.percentage_of(contrasted),
        )
    }

    fn category(&self) -> DetectorCategory {
        DetectorCategory::ContrastPatterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spamlens_core::Rgba;

    fn checkerboard(width: usize, height: usize) -> PixelGrid {
        PixelGrid::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba::WHITE
            } else {
                Rgba::BLACK
            }
        })
    }

    #[test]
    fn test_checkerboard() {
        // 8x8 interior of a 10x10 board: 64% of all pixels, 51.2 capped at 15
        let score = ContrastDetector.detect(&checkerboard(10, 10));
        assert_eq!(score.raw_score, 15.0);
    }

    #[test]
    fn test_flat_image() {
        let score = ContrastDetector.detect(&PixelGrid::filled(10, 10, Rgba::WHITE));
        assert_eq!(score.raw_score, 0.0);
    }

    #[test]
    fn test_border_only_image() {
        // 2 pixels wide has no interior
        let score = ContrastDetector.detect(&checkerboard(2, 50));
        assert_eq!(score.raw_score, 0.0);
    }

    #[test]
    fn test_only_red_channel_counts() {
        let grid = PixelGrid::from_fn(10, 10, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba::opaque(0, 255, 255)
            } else {
                Rgba::opaque(0, 0, 0)
            }
        });
        assert_eq!(ContrastDetector.detect(&grid).raw_score, 0.0);
    }
}
