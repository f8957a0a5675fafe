use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::detector::{ClassificationResult, LanguageTag};
use crate::error::AppError;

/// Depth of analysis requested from a remote model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisMode {
    #[default]
    Quick,
    Deep,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Quick => "Quick",
            AnalysisMode::Deep => "Deep",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quick" => Ok(AnalysisMode::Quick),
            "deep" => Ok(AnalysisMode::Deep),
            other => Err(format!("unknown analysis mode: {}", other)),
        }
    }
}

/// A web page a remote model cited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    pub url: String,
    pub title: String,
    pub snippet: String,
}

/// A verdict together with the model that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteVerdict {
    pub result: ClassificationResult,
    pub model: String,
    pub web_sources: Vec<WebSource>,
}

/// Defines the interface of an optional, networked classifier.
///
/// Implementations may fail for any transport or reply-shape reason; callers
/// are expected to fall back to the local detector.
#[async_trait]
pub trait RemoteClassifier: Send + Sync {
    /// Identifier of the backing model.
    fn model(&self) -> &str;

    async fn classify(
        &self,
        text: &str,
        hint: Option<LanguageTag>,
        mode: AnalysisMode,
    ) -> Result<RemoteVerdict, AppError>;
}
