//! Verdict types - the classifier's inputs and its only observable output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::language::LanguageTag;

/// A text bound to the working language it will be analyzed in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    language: LanguageTag,
}

impl Document {
    pub fn new(text: impl Into<String>, language: LanguageTag) -> Self {
        Self {
            text: text.into(),
            language: language.working(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> LanguageTag {
        self.language
    }
}

/// Terminal classification state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Real,
    Fake,
    Uncertain,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Real => "REAL",
            Classification::Fake => "FAKE",
            Classification::Uncertain => "UNCERTAIN",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "REAL" => Ok(Classification::Real),
            "FAKE" => Ok(Classification::Fake),
            "UNCERTAIN" => Ok(Classification::Uncertain),
            other => Err(format!("unknown classification: {}", other)),
        }
    }
}

/// Complete verdict for one text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub classification: Classification,
    /// Certainty of the classification, 0-100, independent of its direction
    pub confidence: u8,
    pub reasoning: String,
    /// Matched phrases, most influential first, no duplicates
    pub keywords: Vec<String>,
    /// Advisory hints, never fetched
    pub suggested_sources: Vec<String>,
    pub language: LanguageTag,
}

impl ClassificationResult {
    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "{} ({}%), language: {}, keywords: {}",
            self.classification,
            self.confidence,
            self.language,
            self.keywords.len()
        )
    }
}
