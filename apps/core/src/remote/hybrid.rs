use std::sync::Arc;
use tracing::{info, warn};

use super::traits::{AnalysisMode, RemoteClassifier, RemoteVerdict};
use crate::detector::{AuthenticityAnalyzer, LanguageTag};
use crate::error::AppError;

/// Model name reported for verdicts of the local detector
pub const LOCAL_MODEL: &str = "truthlens-heuristic";

/// Local detector with an optional remote model in front of it.
///
/// The local verdict is always computed first. A remote failure of any kind
/// is logged and answered with the local verdict instead.
pub struct HybridAnalyzer {
    local: AuthenticityAnalyzer,
    remote: Option<Arc<dyn RemoteClassifier>>,
}

impl HybridAnalyzer {
    pub fn new(local: AuthenticityAnalyzer, remote: Option<Arc<dyn RemoteClassifier>>) -> Self {
        Self { local, remote }
    }

    pub fn local_only(local: AuthenticityAnalyzer) -> Self {
        Self::new(local, None)
    }

    pub fn local(&self) -> &AuthenticityAnalyzer {
        &self.local
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub async fn classify(
        &self,
        text: &str,
        hint: Option<LanguageTag>,
        mode: AnalysisMode,
    ) -> Result<RemoteVerdict, AppError> {
        // InvalidInput stops here, before any network call
        let local = self.local.classify(text, hint)?;

        if let Some(remote) = &self.remote {
            match remote.classify(text, hint, mode).await {
                Ok(verdict) => return Ok(verdict),
                Err(e) => warn!(
                    model = remote.model(),
                    "Remote classification failed, using local verdict: {}", e
                ),
            }
        } else {
            info!("No remote model configured, using local verdict");
        }

        Ok(RemoteVerdict {
            result: local,
            model: LOCAL_MODEL.to_string(),
            web_sources: Vec::new(),
        })
    }
}
