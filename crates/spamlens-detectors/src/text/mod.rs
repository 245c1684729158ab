//! Text signal extraction
//!
//! Five independent detectors with caps 35/25/20/15/5:
//! - [`KeywordDetector`]: tiered high-risk phrases
//! - [`BehavioralDetector`]: calls to action, numbers in context, links
//! - [`TechnicalDetector`]: caps, punctuation bursts, choppy sentences
//! - [`SocialEngineeringDetector`]: authority, emotion, scarcity
//! - [`FormattingDetector`]: ellipsis runs, mixed formatting

pub mod behavioral;
pub mod formatting;
pub mod keywords;
pub mod social;
pub mod technical;

pub use behavioral::{BehavioralDetector, DomainRisk};
pub use formatting::FormattingDetector;
pub use keywords::KeywordDetector;
pub use social::{SocialEngineeringDetector, Tactic};
pub use technical::TechnicalDetector;

use crate::aggregator::DetectorSet;
use crate::catalog::Catalog;
use crate::detector::TextInput;
use spamlens_core::Result;
use std::sync::Arc;

/// The full text detector suite built from a catalogue
pub fn text_detectors(catalog: &Catalog) -> Result<DetectorSet<TextInput>> {
    catalog.validate()?;

    Ok(DetectorSet::new()
        .with(Arc::new(KeywordDetector::new(&catalog.keywords)?))
        .with(Arc::new(BehavioralDetector::new(catalog)?))
        .with(Arc::new(TechnicalDetector::new()?))
        .with(Arc::new(SocialEngineeringDetector::new(catalog)?))
        .with(Arc::new(FormattingDetector::new()?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use spamlens_core::DetectorCategory;

    #[test]
    fn test_suite_shape() {
        let set = text_detectors(&Catalog::default()).unwrap();
        assert_eq!(set.categories(), DetectorCategory::TEXT.to_vec());
        assert_eq!(set.max_possible_score(), 100.0);
    }

    #[test]
    fn test_keyword_only_text() {
        let set = text_detectors(&Catalog::default()).unwrap();
        let aggregate = set.run(&TextInput::new("urgent and free for all of the people here"));

        assert_eq!(aggregate.get(DetectorCategory::Keywords).unwrap().raw_score, 7.5);
        assert_eq!(aggregate.total_score, 7.5);
    }
}
