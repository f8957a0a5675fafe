//! Configuration.
//!
//! `ClassifierConfig` holds the tuning constants of the classifier and is
//! validated once when an analyzer is built. `AppConfig` is the process-level
//! configuration read from the environment (and an optional `.env` file).

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use url::Url;
use validator::Validate;

use crate::error::AppError;
use crate::fs_manager::PortablePathManager;

pub const DEFAULT_FAKE_THRESHOLD: f64 = 2.0;
pub const DEFAULT_REAL_THRESHOLD: f64 = 2.0;
pub const DEFAULT_CONFIDENCE_FLOOR: f64 = 50.0;
pub const DEFAULT_CONFIDENCE_SCALE: f64 = 3.0;
pub const DEFAULT_MIN_TEXT_LENGTH: usize = 20;
pub const DEFAULT_MAX_KEYWORDS: usize = 8;
pub const DEFAULT_MAX_MATCHES_PER_RULE: usize = 3;
pub const DEFAULT_EXCLAMATION_DENSITY: f64 = 0.5;
pub const DEFAULT_CAPS_RATIO: f64 = 0.3;

pub const DEFAULT_HISTORY_LIMIT: u32 = 100;
pub const DEFAULT_REMOTE_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_REMOTE_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 30;

/// Tuning constants of the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Raw score above which a text is Fake
    #[validate(range(min = 0.01))]
    pub fake_threshold: f64,
    /// Raw score below the negation of which a text is Real
    #[validate(range(min = 0.01))]
    pub real_threshold: f64,
    /// Confidence reported for a raw score of zero
    #[validate(range(min = 0.0, max = 100.0))]
    pub confidence_floor: f64,
    /// Raw-score magnitude at which confidence covers ~63% of the way to 100
    #[validate(range(min = 0.01))]
    pub confidence_scale: f64,
    #[validate(range(min = 1))]
    pub min_text_length: usize,
    #[validate(range(min = 1))]
    pub max_keywords: usize,
    #[validate(range(min = 1))]
    pub max_matches_per_rule: usize,
    #[validate(range(min = 0.01))]
    pub exclamation_density_threshold: f64,
    pub exclamation_weight: f64,
    #[validate(range(min = 0.01, max = 1.0))]
    pub caps_ratio_threshold: f64,
    pub caps_weight: f64,
    pub citation_weight: f64,
    pub attribution_weight: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            fake_threshold: DEFAULT_FAKE_THRESHOLD,
            real_threshold: DEFAULT_REAL_THRESHOLD,
            confidence_floor: DEFAULT_CONFIDENCE_FLOOR,
            confidence_scale: DEFAULT_CONFIDENCE_SCALE,
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
            max_keywords: DEFAULT_MAX_KEYWORDS,
            max_matches_per_rule: DEFAULT_MAX_MATCHES_PER_RULE,
            exclamation_density_threshold: DEFAULT_EXCLAMATION_DENSITY,
            exclamation_weight: 1.0,
            caps_ratio_threshold: DEFAULT_CAPS_RATIO,
            caps_weight: 1.0,
            citation_weight: -1.0,
            attribution_weight: -0.5,
        }
    }
}

impl ClassifierConfig {
    /// Range checks plus finiteness of every weight.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;

        let weights = [
            ("exclamation_weight", self.exclamation_weight),
            ("caps_weight", self.caps_weight),
            ("citation_weight", self.citation_weight),
            ("attribution_weight", self.attribution_weight),
        ];
        if let Some((name, _)) = weights.iter().find(|(_, w)| !w.is_finite()) {
            return Err(AppError::Configuration(format!("{} must be finite", name)));
        }
        Ok(())
    }

    /// Parse a partial JSON object; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AppError::Configuration(format!("invalid classifier config: {}", e)))?;
        config.check()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!(
                "cannot read classifier config {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&json)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Configuration(format!(
                "TRUTHLENS_LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                other
            ))),
        }
    }
}

/// Settings for the optional remote model
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: Url,
    pub timeout: Duration,
}

/// Process configuration, read once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// Replaces the built-in lexicon when set
    pub rules_path: Option<PathBuf>,
    /// JSON overrides for `ClassifierConfig`
    pub classifier_path: Option<PathBuf>,
    pub log_format: LogFormat,
    pub history_limit: u32,
    /// `None` when no API key is configured
    pub remote: Option<RemoteConfig>,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the environment.
    pub fn load() -> Result<Self, AppError> {
        let _ = dotenv::dotenv();
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, AppError> {
        let db_path = optional_var("TRUTHLENS_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(PortablePathManager::default_db_path);

        let log_format = match optional_var("TRUTHLENS_LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        let history_limit = parse_var("TRUTHLENS_HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT)?;
        if history_limit == 0 {
            return Err(AppError::Configuration(
                "TRUTHLENS_HISTORY_LIMIT must be at least 1".to_string(),
            ));
        }

        let remote = match optional_var("GEMINI_API_KEY").or_else(|| optional_var("API_KEY")) {
            Some(api_key) => Some(RemoteConfig {
                api_key,
                model: optional_var("TRUTHLENS_REMOTE_MODEL")
                    .unwrap_or_else(|| DEFAULT_REMOTE_MODEL.to_string()),
                base_url: with_trailing_slash(Url::parse(
                    &optional_var("TRUTHLENS_REMOTE_BASE_URL")
                        .unwrap_or_else(|| DEFAULT_REMOTE_BASE_URL.to_string()),
                )?),
                timeout: Duration::from_secs(parse_var(
                    "TRUTHLENS_REMOTE_TIMEOUT_SECS",
                    DEFAULT_REMOTE_TIMEOUT_SECS,
                )?),
            }),
            None => None,
        };

        Ok(Self {
            db_path,
            rules_path: optional_var("TRUTHLENS_RULES_PATH").map(PathBuf::from),
            classifier_path: optional_var("TRUTHLENS_CLASSIFIER_CONFIG").map(PathBuf::from),
            log_format,
            history_limit,
            remote,
        })
    }

    /// Classifier tuning: the configured JSON file, or the defaults.
    pub fn classifier(&self) -> Result<ClassifierConfig, AppError> {
        match &self.classifier_path {
            Some(path) => ClassifierConfig::from_json_file(path),
            None => Ok(ClassifierConfig::default()),
        }
    }
}

/// Ends the path in `/` so relative joins keep every base segment.
pub fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// A set, non-blank variable
fn optional_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    match optional_var(key) {
        Some(value) => value
            .parse()
            .map_err(|e| AppError::Configuration(format!("invalid {}: {}", key, e))),
        None => Ok(default),
    }
}
