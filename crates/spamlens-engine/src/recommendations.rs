//! Follow-up advice derived from analysis results

use serde::{Deserialize, Serialize};
use spamlens_core::{AnalysisResult, DetectorCategory, ImageAnalysisResult};

/// Text results above this confidence get caution advice even when not spam
const CAUTION_CONFIDENCE: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceCategory {
    Urgent,
    Pattern,
    Social,
    General,
    Caution,
    Verification,
    Positive,
    Maintenance,
    Education,
    Image,
}

/// One piece of advice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: AdviceCategory,
    pub text: String,
}

impl Recommendation {
    fn new(priority: Priority, category: AdviceCategory, text: impl Into<String>) -> Self {
        Self {
            priority,
            category,
            text: text.into(),
        }
    }
}

/// Advice for a text result
pub fn for_text(result: &AnalysisResult) -> Vec<Recommendation> {
    use AdviceCategory::*;
    use Priority::*;

    let has_keywords = !result.patterns_for(DetectorCategory::Keywords).is_empty();
    let has_social = !result.patterns_for(DetectorCategory::SocialEngineering).is_empty();

    let mut advice = Vec::new();

    if result.is_spam {
        advice.push(Recommendation::new(
            High,
            Urgent,
            "Delete this email immediately without opening any attachments",
        ));
        advice.push(Recommendation::new(
            High,
            Urgent,
            "Do not click on any links or reply to the sender",
        ));
        advice.push(Recommendation::new(
            High,
            Urgent,
            "Report as spam in your email client to improve future detection",
        ));

        if has_keywords {
            advice.push(Recommendation::new(
                Medium,
                Pattern,
                "High-risk keywords detected - be extremely cautious of urgent requests",
            ));
        }
        if has_social {
            advice.push(Recommendation::new(
                High,
                Social,
                "Social engineering tactics detected - verify sender identity independently",
            ));
        }

        advice.push(Recommendation::new(
            Medium,
            General,
            "Enable two-factor authentication on your accounts for extra security",
        ));
        advice.push(Recommendation::new(
            Medium,
            General,
            "Contact the supposed sender through official channels to verify",
        ));
    } else if result.confidence > CAUTION_CONFIDENCE {
        advice.push(Recommendation::new(
            Medium,
            Caution,
            "Exercise caution - some suspicious patterns were detected",
        ));
        if has_keywords {
            advice.push(Recommendation::new(
                Medium,
                Pattern,
                "Urgent language detected - verify time-sensitive requests",
            ));
        }
        advice.push(Recommendation::new(
            Medium,
            Verification,
            "Verify sender identity through official contact information",
        ));
    } else {
        advice.push(Recommendation::new(
            Low,
            Positive,
            "This email appears to be legitimate based on our analysis",
        ));
        advice.push(Recommendation::new(
            Low,
            General,
            "Exercise normal caution with any attachments",
        ));
        advice.push(Recommendation::new(
            Low,
            Verification,
            "Always verify sender identity if you have any doubts",
        ));
    }

    advice.push(Recommendation::new(
        Low,
        Maintenance,
        "Keep your email client and security software updated",
    ));
    advice.push(Recommendation::new(
        Low,
        Education,
        "Stay informed about common phishing and spam tactics",
    ));

    advice
}

/// Advice for an image batch; empty for an empty batch
pub fn for_images(results: &[ImageAnalysisResult]) -> Vec<Recommendation> {
    if results.is_empty() {
        return Vec::new();
    }

    let mut advice = Vec::new();
    let flagged = results.iter().filter(|r| r.analysis.is_spam).count();

    if flagged > 0 {
        advice.push(Recommendation::new(
            Priority::High,
            AdviceCategory::Image,
            format!("{} suspicious image(s) detected - do not trust content", flagged),
        ));
        advice.push(Recommendation::new(
            Priority::Medium,
            AdviceCategory::Image,
            "Images may contain hidden text or malicious visual patterns",
        ));
    }

    advice.push(Recommendation::new(
        Priority::Medium,
        AdviceCategory::Image,
        "Always verify image content independently of email claims",
    ));

    advice
}

#[cfg(test)]
mod tests {
    use super::*;
    use spamlens_core::Evidence;
    use std::collections::BTreeMap;

    fn text_result(
        is_spam: bool,
        confidence: f64,
        patterns: &[(DetectorCategory, &str)],
    ) -> AnalysisResult {
        let mut detected_patterns: BTreeMap<String, Vec<Evidence>> = BTreeMap::new();
        for (category, tag) in patterns {
            detected_patterns
                .entry(category.label().to_string())
                .or_default()
                .push(Evidence::tag(*tag));
        }

        AnalysisResult {
            is_spam,
            confidence,
            total_score: 0.0,
            max_possible_score: 100.0,
            risk_level: None,
            detected_patterns,
            spam_probability: confidence,
            analysis_details: BTreeMap::new(),
            error: None,
        }
    }

    fn image(is_spam: bool) -> ImageAnalysisResult {
        ImageAnalysisResult {
            image_id: "img".to_string(),
            file_name: "img.png".to_string(),
            analysis: text_result(is_spam, 50.0, &[]),
        }
    }

    #[test]
    fn test_spam_with_patterns() {
        let result = text_result(
            true,
            90.0,
            &[
                (DetectorCategory::Keywords, "urgent"),
                (DetectorCategory::SocialEngineering, "AUTHORITY_IMPERSONATION: irs"),
            ],
        );
        let advice = for_text(&result);

        assert_eq!(advice.len(), 9);
        assert_eq!(advice[0].priority, Priority::High);
        assert!(advice.iter().any(|r| r.category == AdviceCategory::Social));
        assert_eq!(advice.last().unwrap().category, AdviceCategory::Education);
    }

    #[test]
    fn test_spam_without_patterns() {
        let advice = for_text(&text_result(true, 90.0, &[]));
        assert_eq!(advice.len(), 7);
        assert!(!advice.iter().any(|r| r.category == AdviceCategory::Pattern));
    }

    #[test]
    fn test_caution() {
        let advice = for_text(&text_result(false, 35.0, &[(DetectorCategory::Keywords, "free")]));
        let categories: Vec<_> = advice.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                AdviceCategory::Caution,
                AdviceCategory::Pattern,
                AdviceCategory::Verification,
                AdviceCategory::Maintenance,
                AdviceCategory::Education,
            ]
        );
    }

    #[test]
    fn test_legitimate() {
        let advice = for_text(&text_result(false, 30.0, &[]));
        assert_eq!(advice.len(), 5);
        assert!(advice.iter().all(|r| r.priority == Priority::Low));
        assert_eq!(advice[0].category, AdviceCategory::Positive);
    }

    #[test]
    fn test_images() {
        assert!(for_images(&[]).is_empty());

        let advice = for_images(&[image(false), image(false)]);
        assert_eq!(advice.len(), 1);

        let advice = for_images(&[image(true), image(false), image(true)]);
        assert_eq!(advice.len(), 3);
        assert_eq!(
            advice[0].text,
            "2 suspicious image(s) detected - do not trust content"
        );
    }
}
