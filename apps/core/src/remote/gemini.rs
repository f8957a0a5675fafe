//! Gemini `generateContent` client.
//!
//! Asks the model for a JSON reply constrained by a response schema, then
//! checks the reply shape before turning it into a `ClassificationResult`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use url::Url;

use super::traits::{AnalysisMode, RemoteClassifier, RemoteVerdict, WebSource};
use crate::config::{with_trailing_slash, RemoteConfig};
use crate::detector::{detect, Classification, ClassificationResult, LanguageTag};
use crate::error::AppError;

const API_KEY_HEADER: &str = "x-goog-api-key";
const TEMPERATURE: f64 = 0.2;

/// Reply body the model is asked to produce
#[derive(Debug, Deserialize)]
struct ModelReply {
    classification: String,
    confidence: f64,
    explanation: String,
    sources: Vec<WebSource>,
    language: String,
}

pub struct GeminiClassifier {
    client: Client,
    api_key: String,
    model: String,
    base_url: Url,
}

impl GeminiClassifier {
    pub fn new(config: &RemoteConfig) -> Result<Self, AppError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: with_trailing_slash(config.base_url.clone()),
        })
    }

    fn endpoint(&self) -> Result<Url, AppError> {
        Ok(self
            .base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))?)
    }

    fn system_instruction(mode: AnalysisMode) -> String {
        format!(
            "You are \"TruthLens AI\", a multilingual fake news detection system. Analyze the provided \
             text (a news article, social media post, etc.) and determine its authenticity. You must \
             work with Kazakh, Russian, and English content.\n\
             Respond with JSON containing:\n\
             - classification: one of \"Real\", \"Fake\" or \"Uncertain\". Use \"Uncertain\" if there is \
             not enough information, the evidence is contradictory, or the claim is highly subjective.\n\
             - confidence: your confidence in this classification, an integer from 0 to 100.\n\
             - explanation: a clear, concise and neutral justification, in the same language as the input.\n\
             - sources: 3-5 credible web sources that confirm or debunk the information, or an empty array.\n\
             - language: the name of the detected language of the input text.\n\
             The user has selected \"{} Analysis\" mode. A Deep analysis should involve more critical \
             thinking and source cross-referencing.",
            mode
        )
    }

    fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "classification": { "type": "STRING", "enum": ["Real", "Fake", "Uncertain"] },
                "confidence": { "type": "INTEGER" },
                "explanation": { "type": "STRING" },
                "sources": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "url": { "type": "STRING" },
                            "title": { "type": "STRING" },
                            "snippet": { "type": "STRING" }
                        },
                        "required": ["url", "title", "snippet"]
                    }
                },
                "language": { "type": "STRING" }
            },
            "required": ["classification", "confidence", "explanation", "sources", "language"]
        })
    }

    fn request_body(text: &str, mode: AnalysisMode) -> Value {
        json!({
            "systemInstruction": { "parts": [{ "text": Self::system_instruction(mode) }] },
            "contents": [{
                "role": "user",
                "parts": [{ "text": format!("Please analyze the following text: \n\n\"{}\"", text) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": Self::response_schema(),
                "temperature": TEMPERATURE
            }
        })
    }
}

/// Pull the model's text out of a `generateContent` response.
fn reply_text(response: &Value) -> Result<&str, AppError> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Remote("response contains no candidate text".to_string()))
}

/// Validate a model reply and map it onto a verdict.
fn parse_reply(
    reply: &str,
    text: &str,
    hint: Option<LanguageTag>,
    model: &str,
) -> Result<RemoteVerdict, AppError> {
    let reply: ModelReply = serde_json::from_str(reply)
        .map_err(|e| AppError::Remote(format!("reply was not in the expected format: {}", e)))?;

    let classification = match reply.classification.as_str() {
        "Real" => Classification::Real,
        "Fake" => Classification::Fake,
        "Uncertain" => Classification::Uncertain,
        other => {
            return Err(AppError::Remote(format!(
                "unexpected classification '{}'",
                other
            )))
        }
    };
    if !reply.confidence.is_finite() {
        return Err(AppError::Remote("confidence is not a number".to_string()));
    }

    let language = match LanguageTag::from_name(&reply.language) {
        LanguageTag::Unknown => hint.map(LanguageTag::working).unwrap_or_else(|| detect(text)),
        known => known,
    };

    let result = ClassificationResult {
        classification,
        confidence: reply.confidence.round().clamp(0.0, 100.0) as u8,
        reasoning: reply.explanation,
        keywords: Vec::new(),
        suggested_sources: reply.sources.iter().map(|s| s.url.clone()).collect(),
        language,
    };

    Ok(RemoteVerdict {
        result,
        model: model.to_string(),
        web_sources: reply.sources,
    })
}

#[async_trait]
impl RemoteClassifier for GeminiClassifier {
    fn model(&self) -> &str {
        &self.model
    }

    async fn classify(
        &self,
        text: &str,
        hint: Option<LanguageTag>,
        mode: AnalysisMode,
    ) -> Result<RemoteVerdict, AppError> {
        info!(model = %self.model, %mode, "Requesting remote classification");

        let res = self
            .client
            .post(self.endpoint()?)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&Self::request_body(text, mode))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Remote(format!(
                "request failed with status {}: {}",
                status, body
            )));
        }

        let response: Value = res.json().await?;
        let verdict = parse_reply(reply_text(&response)?, text, hint, &self.model)?;
        debug!(classification = %verdict.result.classification, "Remote verdict received");
        Ok(verdict)
    }
}
