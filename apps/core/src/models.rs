use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One stored classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    /// The unique identifier for the record (UUID, or `demo_N` for seeded rows).
    pub id: String,
    /// The classified text, as submitted.
    pub text: String,
    /// "REAL", "FAKE" or "UNCERTAIN".
    pub classification: String,
    /// Confidence, 0-100.
    pub confidence: i64,
    /// Short language code ("en", "ru", "kk").
    pub language: String,
    /// Unix timestamp of when the record was created.
    pub created_at: i64,
}

/// Per-classification record counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationCounts {
    pub fake: i64,
    pub real: i64,
    pub uncertain: i64,
}

/// Summary of the stored history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_predictions: i64,
    pub classifications: ClassificationCounts,
    /// Mean confidence, rounded; 0 when there is no history.
    pub avg_confidence: i64,
    /// Newest records first.
    pub recent_activity: Vec<PredictionRecord>,
}
