//! Saturated colour combination detector

use super::RatioRule;
use crate::detector::Detector;
use spamlens_core::{DetectorCategory, PixelGrid, Rgba, SubScore};

const RULE: RatioRule = RatioRule::new(20.0, 0.8);

/// Pure red, green, blue, or yellow
fn is_loud(p: Rgba) -> bool {
    let high = |c: u8| c > 200;
    let low = |c: u8| c < 50;

    (high(p.r) && low(p.g) && low(p.b))
        || (low(p.r) && high(p.g) && low(p.b))
        || (low(p.r) && low(p.g) && high(p.b))
        || (high(p.r) && high(p.g) && low(p.b))
}

pub struct ColorCombinationDetector;

impl Detector<PixelGrid> for ColorCombinationDetector {
    fn detect(&self, grid: &PixelGrid) -> SubScore {
        let loud = grid.pixels().iter().filter(|p| is_loud(**p)).count();

        RULE.score(
            DetectorCategory::ColorCombinations,
            "Suspicious color combinations",
            grid.percentage_of(loud),
        )
    }

    fn category(&self) -> DetectorCategory {
        DetectorCategory::ColorCombinations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_colors() {
        for color in [
            Rgba::opaque(255, 0, 0),
            Rgba::opaque(0, 255, 0),
            Rgba::opaque(0, 0, 255),
            Rgba::opaque(255, 255, 0),
        ] {
            assert!(is_loud(color), "{:?}", color);
        }

        assert!(!is_loud(Rgba::WHITE));
        assert!(!is_loud(Rgba::BLACK));
        assert!(!is_loud(Rgba::opaque(255, 0, 255)));
        assert!(!is_loud(Rgba::opaque(200, 0, 0)));
    }

    #[test]
    fn test_scores() {
        let red = PixelGrid::filled(10, 10, Rgba::opaque(255, 0, 0));
        assert_eq!(ColorCombinationDetector.detect(&red).raw_score, 25.0);

        // 25% green: 25 * 0.8
        let grid = PixelGrid::from_fn(10, 10, |x, y| {
            if x < 5 && y < 5 {
                Rgba::opaque(10, 230, 10)
            } else {
                Rgba::WHITE
            }
        });
        assert_eq!(ColorCombinationDetector.detect(&grid).raw_score, 20.0);

        let white = PixelGrid::filled(10, 10, Rgba::WHITE);
        assert_eq!(ColorCombinationDetector.detect(&white).raw_score, 0.0);
    }
}
