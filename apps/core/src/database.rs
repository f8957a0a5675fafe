//! Prediction history store (SQLite).
//!
//! Keeps only the newest records; older ones are pruned on every insert.

use crate::detector::ClassificationResult;
use crate::error::AppError;
use crate::models::{Analytics, ClassificationCounts, PredictionRecord};
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

/// Records returned in `Analytics::recent_activity`
pub const RECENT_ACTIVITY: usize = 10;

pub async fn init_db(db_path: &Path) -> Result<SqlitePool, AppError> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let db_url = format!("sqlite://{}", db_path.to_string_lossy());

    info!("Initializing database at: {}", db_url);

    let options = SqliteConnectOptions::from_str(&db_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;

    info!("Database initialized and migrations applied.");

    Ok(pool)
}

pub async fn create_schema(pool: &SqlitePool) -> Result<(), AppError> {
    // seq orders records that share a timestamp
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS predictions (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            text TEXT NOT NULL,
            classification TEXT NOT NULL,
            confidence INTEGER NOT NULL,
            language TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_predictions_created_at ON predictions(created_at);
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn insert(pool: &SqlitePool, record: &PredictionRecord) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO predictions (id, text, classification, confidence, language, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.id)
    .bind(&record.text)
    .bind(&record.classification)
    .bind(record.confidence)
    .bind(&record.language)
    .bind(record.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

async fn prune(pool: &SqlitePool, retain: u32) -> Result<u64, AppError> {
    let removed = sqlx::query(
        r#"
        DELETE FROM predictions
        WHERE seq NOT IN (
            SELECT seq FROM predictions
            ORDER BY created_at DESC, seq DESC
            LIMIT ?
        )
        "#,
    )
    .bind(i64::from(retain))
    .execute(pool)
    .await?
    .rows_affected();

    if removed > 0 {
        debug!(removed, retain, "Pruned prediction history");
    }
    Ok(removed)
}

/// Store a record and drop everything beyond the newest `retain`.
pub async fn save_prediction(
    pool: &SqlitePool,
    record: &PredictionRecord,
    retain: u32,
) -> Result<(), AppError> {
    if retain == 0 {
        return Err(AppError::Configuration(
            "history retention must be at least 1".to_string(),
        ));
    }
    insert(pool, record).await?;
    prune(pool, retain).await?;
    Ok(())
}

/// Store a classification of `text` as a new record.
pub async fn record_result(
    pool: &SqlitePool,
    text: &str,
    result: &ClassificationResult,
    retain: u32,
) -> Result<PredictionRecord, AppError> {
    let record = PredictionRecord {
        id: Uuid::new_v4().to_string(),
        text: text.to_string(),
        classification: result.classification.to_string(),
        confidence: i64::from(result.confidence),
        language: result.language.code().to_string(),
        created_at: Utc::now().timestamp(),
    };
    save_prediction(pool, &record, retain).await?;
    Ok(record)
}

/// Every stored record, newest first.
pub async fn get_all_predictions(pool: &SqlitePool) -> Result<Vec<PredictionRecord>, AppError> {
    let records = sqlx::query_as::<_, PredictionRecord>(
        r#"
        SELECT id, text, classification, confidence, language, created_at
        FROM predictions
        ORDER BY created_at DESC, seq DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(records)
}

pub async fn get_analytics(pool: &SqlitePool) -> Result<Analytics, AppError> {
    let predictions = get_all_predictions(pool).await?;

    let mut counts = ClassificationCounts::default();
    for record in &predictions {
        match record.classification.as_str() {
            "FAKE" => counts.fake += 1,
            "REAL" => counts.real += 1,
            "UNCERTAIN" => counts.uncertain += 1,
            _ => {}
        }
    }

    let total = predictions.len() as i64;
    let avg_confidence = if total > 0 {
        let sum: i64 = predictions.iter().map(|p| p.confidence).sum();
        (sum as f64 / total as f64).round() as i64
    } else {
        0
    };

    Ok(Analytics {
        total_predictions: total,
        classifications: counts,
        avg_confidence,
        recent_activity: predictions.into_iter().take(RECENT_ACTIVITY).collect(),
    })
}

pub async fn clear_all(pool: &SqlitePool) -> Result<u64, AppError> {
    let removed = sqlx::query("DELETE FROM predictions")
        .execute(pool)
        .await?
        .rows_affected();
    info!(removed, "Prediction history cleared");
    Ok(removed)
}

/// Sample history: (id, text, classification, confidence, hours ago)
static DEMO_RECORDS: [(&str, &str, &str, i64, i64); 5] = [
    (
        "demo_1",
        "According to research published in a peer-reviewed journal, scientists have made progress in renewable energy technology.",
        "REAL",
        85,
        2,
    ),
    (
        "demo_2",
        "Breaking: Unbelievable miracle cure discovered! This one weird trick will shock you!",
        "FAKE",
        78,
        5,
    ),
    (
        "demo_3",
        "Government officials announced new infrastructure projects today.",
        "REAL",
        72,
        8,
    ),
    (
        "demo_4",
        "The weather was nice today. Some people went outside.",
        "UNCERTAIN",
        60,
        12,
    ),
    (
        "demo_5",
        "They don't want you to know this amazing secret that doctors hate!",
        "FAKE",
        88,
        24,
    ),
];

/// Replace the whole history with the sample records.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<Vec<PredictionRecord>, AppError> {
    let now = Utc::now().timestamp();
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM predictions")
        .execute(&mut *tx)
        .await?;

    // oldest first so insertion order agrees with timestamps
    for (id, text, classification, confidence, hours_ago) in DEMO_RECORDS.iter().rev() {
        sqlx::query(
            r#"
            INSERT INTO predictions (id, text, classification, confidence, language, created_at)
            VALUES (?, ?, ?, ?, 'en', ?)
            "#,
        )
        .bind(*id)
        .bind(*text)
        .bind(*classification)
        .bind(*confidence)
        .bind(now - hours_ago * 3600)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    info!(records = DEMO_RECORDS.len(), "Demo history seeded");

    get_all_predictions(pool).await
}
