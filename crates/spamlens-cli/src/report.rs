//! JSON report printed on stdout

use serde::Serialize;
use spamlens_engine::{CombinedAnalysis, Recommendation};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(flatten)]
    pub analysis: CombinedAnalysis,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_confidence: Option<f64>,

    pub any_spam: bool,

    pub recommendations: Vec<Recommendation>,
}

impl From<CombinedAnalysis> for Report {
    fn from(analysis: CombinedAnalysis) -> Self {
        Self {
            overall_confidence: analysis.overall_confidence(),
            any_spam: analysis.any_spam(),
            recommendations: analysis.recommendations(),
            analysis,
        }
    }
}

impl Report {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spamlens_engine::{EngineConfig, JitterMode, SpamAnalyzer};

    fn analyzer() -> SpamAnalyzer {
        let config = EngineConfig {
            jitter: JitterMode::None,
            ..Default::default()
        };
        SpamAnalyzer::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_text_report_shape() {
        let analysis = analyzer()
            .analyze_both(Some("hello there my old pal and you"), Vec::new())
            .await;
        let json: serde_json::Value =
            serde_json::from_str(&Report::from(analysis).to_json().unwrap()).unwrap();

        assert_eq!(json["textResult"]["confidence"], 15.0);
        assert_eq!(json["overallConfidence"], 15.0);
        assert_eq!(json["anySpam"], false);
        assert!(json.get("imageResults").is_none());
        assert_eq!(json["recommendations"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_empty_report() {
        let report = Report::from(analyzer().analyze_both(Some("   "), Vec::new()).await);

        assert!(report.analysis.is_empty());
        assert!(report.overall_confidence.is_none());
        assert!(!report.any_spam);
        assert!(report.recommendations.is_empty());
    }
}
