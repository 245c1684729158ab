//! Property tests for analyzer output bounds

use proptest::prelude::*;
use spamlens_core::{PixelGrid, Rgba};
use spamlens_engine::{EngineConfig, JitterMode, SpamAnalyzer};
use std::sync::OnceLock;

fn analyzer() -> &'static SpamAnalyzer {
    static ANALYZER: OnceLock<SpamAnalyzer> = OnceLock::new();
    ANALYZER.get_or_init(|| {
        let config = EngineConfig {
            jitter: JitterMode::Seeded { seed: 7 },
            ..EngineConfig::default()
        };
        SpamAnalyzer::new(&config).unwrap()
    })
}

proptest! {
    #[test]
    fn text_confidence_in_range(text in "\\PC{1,500}") {
        if let Some(result) = analyzer().analyze_text(&text) {
            prop_assert!((0.0..=100.0).contains(&result.confidence));
            prop_assert!((0.0..=100.0).contains(&result.spam_probability));
            prop_assert_eq!(result.max_possible_score, 100.0);
            prop_assert!(result.risk_level.is_some());
        }
    }

    #[test]
    fn blank_text_has_no_result(text in "[ \\t\\r\\n]{0,40}") {
        prop_assert!(analyzer().analyze_text(&text).is_none());
    }

    #[test]
    fn text_scoring_is_pure(text in "[a-zA-Z0-9 .!?$%-]{1,300}") {
        let first = analyzer().analyze_text(&text);
        let second = analyzer().analyze_text(&text);

        match (first, second) {
            (Some(a), Some(b)) => {
                prop_assert_eq!(a.total_score, b.total_score);
                prop_assert_eq!(a.spam_probability, b.spam_probability);
                prop_assert_eq!(a.is_spam, b.is_spam);
                prop_assert_eq!(a.detected_patterns, b.detected_patterns);
            }
            (None, None) => {}
            _ => prop_assert!(false, "blankness changed between calls"),
        }
    }

    #[test]
    fn image_confidence_within_band(
        width in 0usize..24,
        height in 0usize..24,
        r in any::<u8>(),
        g in any::<u8>(),
        b in any::<u8>(),
    ) {
        let grid = PixelGrid::filled(width, height, Rgba::opaque(r, g, b));
        let result = analyzer().analyze_pixels(&grid);

        prop_assert!((0.0..=100.0).contains(&result.confidence));
        prop_assert!((result.confidence - result.spam_probability).abs() <= 10.0 + 1e-9);
        prop_assert!(result.total_score <= result.max_possible_score);
        prop_assert!(result.risk_level.is_none());
    }
}
