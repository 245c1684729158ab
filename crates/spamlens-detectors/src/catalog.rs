//! Phrase and domain catalogues for the text detectors
//!
//! Every list can be overridden from YAML. Fields missing from a file keep
//! their built-in defaults, so a file that only retunes keyword weights is
//! valid.

use serde::{Deserialize, Serialize};
use spamlens_core::{Error, Result};
use std::path::Path;

/// Severity tier of a high-risk keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Account-takeover and inheritance bait (4.0)
    Critical,
    /// Prize and windfall bait (3.5)
    High,
    /// Everything else (3.0)
    #[default]
    Elevated,
}

impl Severity {
    pub fn weight(&self) -> f64 {
        match self {
            Self::Critical => 4.0,
            Self::High => 3.5,
            Self::Elevated => 3.0,
        }
    }
}

/// One high-risk keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub phrase: String,

    #[serde(default)]
    pub tier: Severity,

    /// Explicit weight, overriding the tier weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl KeywordEntry {
    pub fn new(phrase: impl Into<String>, tier: Severity) -> Self {
        Self {
            phrase: phrase.into(),
            tier,
            weight: None,
        }
    }

    /// Score contributed by one match
    pub fn effective_weight(&self) -> f64 {
        self.weight.unwrap_or_else(|| self.tier.weight())
    }
}

/// All tunable phrase tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// High-risk keywords in evidence order
    pub keywords: Vec<KeywordEntry>,

    /// Button-like call-to-action phrases
    pub call_to_action: Vec<String>,

    /// Words that make a nearby number look pushy
    pub urgency_words: Vec<String>,

    /// Known URL-shortener domains
    pub url_shorteners: Vec<String>,

    /// Top-level domains favored by throwaway sites
    pub suspicious_tlds: Vec<String>,

    /// Bait words inside domain names
    pub domain_bait_words: Vec<String>,

    /// Authority-impersonation phrases
    pub authority: Vec<String>,

    /// Emotional-manipulation phrases
    pub emotional: Vec<String>,

    /// Scarcity-tactic phrases
    pub scarcity: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        use Severity::*;

        let keywords = [
            ("urgent", Critical),
            ("immediate", Elevated),
            ("action required", Elevated),
            ("account suspended", Critical),
            ("verify now", Critical),
            ("free", High),
            ("winner", High),
            ("lottery", High),
            ("inheritance", Critical),
            ("million dollars", High),
            ("viagra", Elevated),
            ("casino", Elevated),
            ("credit card", Elevated),
            ("debt relief", Elevated),
            ("investment opportunity", Elevated),
            ("make money fast", Elevated),
            ("work from home", Elevated),
            ("get rich quick", Elevated),
            ("cash bonus", Elevated),
            ("limited time", Elevated),
            ("act now", Elevated),
            ("exclusive offer", Elevated),
            ("guaranteed", Elevated),
            ("no risk", Elevated),
            ("click here", Elevated),
            ("subscribe now", Elevated),
            ("buy now", Elevated),
            ("order now", Elevated),
            ("claim now", Elevated),
            ("unlock", Elevated),
            ("activate", Elevated),
            ("confirm", Elevated),
            ("verify", Elevated),
            ("secure", Elevated),
            ("banking", Elevated),
            ("paypal", Elevated),
            ("bitcoin", Elevated),
            ("cryptocurrency", Elevated),
            ("nft", Elevated),
            ("airdrop", Elevated),
        ]
        .into_iter()
        .map(|(phrase, tier)| KeywordEntry::new(phrase, tier))
        .collect();

        Self {
            keywords,
            call_to_action: strings(&[
                "click here",
                "click now",
                "subscribe now",
                "buy now",
                "order now",
                "claim now",
                "get started",
                "join now",
                "sign up now",
                "download now",
                "activate now",
                "verify now",
                "confirm now",
                "unlock now",
                "access now",
            ]),
            urgency_words: strings(&["urgent", "limited", "now"]),
            url_shorteners: strings(&["bit.ly", "tinyurl.com", "goo.gl", "t.co", "is.gd"]),
            suspicious_tlds: strings(&[".tk", ".ml", ".ga", ".cf", ".gq"]),
            domain_bait_words: strings(&["free", "click", "offer"]),
            authority: strings(&[
                "bank of",
                "paypal",
                "amazon",
                "netflix",
                "microsoft",
                "apple",
                "irs",
                "social security",
                "government",
                "police",
                "law enforcement",
                "ceo",
                "manager",
                "director",
                "president",
            ]),
            emotional: strings(&[
                "don't miss out",
                "last chance",
                "exclusive",
                "special offer",
                "limited time",
                "act fast",
                "hurry",
                "don't wait",
                "once in a lifetime",
                "amazing opportunity",
                "incredible deal",
            ]),
            scarcity: strings(&[
                "only today",
                "expires soon",
                "limited quantity",
                "while supplies last",
                "first come first serve",
                "exclusive to you",
                "personal invitation",
            ]),
        }
    }
}

impl Catalog {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let catalog: Self = serde_yaml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
            .map_err(|e| Error::catalog(format!("{}: {}", path.display(), e)))
    }

    /// Reject empty phrases and unusable weights
    pub fn validate(&self) -> Result<()> {
        for entry in &self.keywords {
            check_phrase("keywords", &entry.phrase)?;
            let weight = entry.effective_weight();
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::catalog(format!(
                    "keyword '{}' has invalid weight {}",
                    entry.phrase, weight
                )));
            }
        }

        let lists = [
            ("call_to_action", &self.call_to_action),
            ("urgency_words", &self.urgency_words),
            ("url_shorteners", &self.url_shorteners),
            ("suspicious_tlds", &self.suspicious_tlds),
            ("domain_bait_words", &self.domain_bait_words),
            ("authority", &self.authority),
            ("emotional", &self.emotional),
            ("scarcity", &self.scarcity),
        ];
        for (name, list) in lists {
            for phrase in list {
                check_phrase(name, phrase)?;
            }
        }

        Ok(())
    }
}

fn check_phrase(list: &str, phrase: &str) -> Result<()> {
    if phrase.trim().is_empty() {
        return Err(Error::catalog(format!("empty phrase in '{}'", list)));
    }
    Ok(())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_tiers() {
        let catalog = Catalog::default();
        assert_eq!(catalog.keywords.len(), 40);
        assert_eq!(catalog.keywords[0].phrase, "urgent");

        let weight_of = |p: &str| {
            catalog
                .keywords
                .iter()
                .find(|k| k.phrase == p)
                .map(|k| k.effective_weight())
                .unwrap()
        };
        assert_eq!(weight_of("urgent"), 4.0);
        assert_eq!(weight_of("inheritance"), 4.0);
        assert_eq!(weight_of("free"), 3.5);
        assert_eq!(weight_of("million dollars"), 3.5);
        assert_eq!(weight_of("airdrop"), 3.0);

        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
keywords:
  - phrase: wire transfer
    tier: critical
  - phrase: gift card
    weight: 2.25
"#;
        let catalog = Catalog::from_yaml(yaml).unwrap();

        assert_eq!(catalog.keywords.len(), 2);
        assert_eq!(catalog.keywords[0].effective_weight(), 4.0);
        assert_eq!(catalog.keywords[1].effective_weight(), 2.25);
        assert_eq!(catalog.authority, Catalog::default().authority);
    }

    #[test]
    fn test_validation_rejects_bad_entries() {
        let yaml = r#"
scarcity:
  - "   "
"#;
        assert!(matches!(Catalog::from_yaml(yaml), Err(Error::Catalog(_))));

        let yaml = r#"
keywords:
  - phrase: refund
    weight: -1.0
"#;
        assert!(matches!(Catalog::from_yaml(yaml), Err(Error::Catalog(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, "urgency_words: [asap]\n").unwrap();

        let catalog = Catalog::from_file(&path).unwrap();
        assert_eq!(catalog.urgency_words, vec!["asap".to_string()]);

        let missing = Catalog::from_file(dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(Error::Io(_))));
    }
}
