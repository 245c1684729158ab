//! Social-engineering detector
//!
//! Three phrase families, each with its own per-match weight and evidence
//! prefix: authority impersonation, emotional manipulation, and scarcity.

use crate::catalog::Catalog;
use crate::detector::{Detector, TextInput};
use crate::patterns::PhraseMatcher;
use spamlens_core::{DetectorCategory, Result, SubScore};

/// Social-engineering tactic families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tactic {
    AuthorityImpersonation,
    EmotionalManipulation,
    ScarcityTactic,
}

impl Tactic {
    /// Score per matched phrase
    pub fn weight(&self) -> f64 {
        match self {
            Self::AuthorityImpersonation => 2.0,
            Self::EmotionalManipulation => 1.5,
            Self::ScarcityTactic => 1.5,
        }
    }

    /// Evidence prefix
    pub fn tag(&self) -> &'static str {
        match self {
            Self::AuthorityImpersonation => "AUTHORITY_IMPERSONATION",
            Self::EmotionalManipulation => "EMOTIONAL_MANIPULATION",
            Self::ScarcityTactic => "SCARCITY_TACTIC",
        }
    }
}

pub struct SocialEngineeringDetector {
    families: Vec<(Tactic, PhraseMatcher)>,
}

impl SocialEngineeringDetector {
    pub fn new(catalog: &Catalog) -> Result<Self> {
        let lowered = |list: &[String]| -> Vec<String> {
            list.iter().map(|p| p.to_lowercase()).collect()
        };

        Ok(Self {
            families: vec![
                (
                    Tactic::AuthorityImpersonation,
                    PhraseMatcher::new(lowered(&catalog.authority))?,
                ),
                (
                    Tactic::EmotionalManipulation,
                    PhraseMatcher::new(lowered(&catalog.emotional))?,
                ),
                (
                    Tactic::ScarcityTactic,
                    PhraseMatcher::new(lowered(&catalog.scarcity))?,
                ),
            ],
        })
    }
}

impl Detector<TextInput> for SocialEngineeringDetector {
    fn detect(&self, input: &TextInput) -> SubScore {
        let mut score = SubScore::new(DetectorCategory::SocialEngineering);

        for (tactic, matcher) in &self.families {
            for phrase in matcher.matches(input.lower()) {
                score.record(tactic.weight(), format!("{}: {}", tactic.tag(), phrase));
            }
        }

        score.finish()
    }

    fn category(&self) -> DetectorCategory {
        DetectorCategory::SocialEngineering
    }
}
