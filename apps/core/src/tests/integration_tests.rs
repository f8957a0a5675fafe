//! Integration Tests
//!
//! End-to-end tests that verify complete workflows across multiple components.

use crate::config::ClassifierConfig;
use crate::database;
use crate::detector::rules::{builtin_specs, RuleSpec, RuleTable};
use crate::detector::{AuthenticityAnalyzer, Category, Classification, LanguageTag};
use crate::error::AppError;
use std::io::Write;
use std::sync::Arc;
use tempfile::{tempdir, NamedTempFile};

// ============================================================================
// Test Fixtures
// ============================================================================

fn write_rule_file(specs: &[RuleSpec]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create rule file");
    file.write_all(serde_json::to_string(specs).unwrap().as_bytes())
        .unwrap();
    file
}

// ============================================================================
// Classify and record
// ============================================================================

#[cfg(test)]
mod history_workflow_tests {
    use super::*;

    #[tokio::test]
    async fn test_classify_then_record() {
        let dir = tempdir().unwrap();
        let pool = database::init_db(&dir.path().join("nested").join("history.sqlite"))
            .await
            .unwrap();
        let analyzer = AuthenticityAnalyzer::with_builtin_rules().unwrap();

        let texts = [
            "BREAKING: Unbelievable miracle cure discovered! This one weird trick will shock you!",
            "According to research published in a peer-reviewed journal, scientists have made progress in renewable energy technology.",
            "The weather was nice today. Some people went outside.",
        ];
        for text in texts {
            let result = analyzer.classify(text, None).unwrap();
            database::record_result(&pool, text, &result, 100).await.unwrap();
        }

        let analytics = database::get_analytics(&pool).await.unwrap();
        assert_eq!(analytics.total_predictions, 3);
        assert_eq!(analytics.classifications.fake, 1);
        assert_eq!(analytics.classifications.real, 1);
        assert_eq!(analytics.classifications.uncertain, 1);
        assert!(analytics.recent_activity.iter().all(|r| r.language == "en"));
    }
}

// ============================================================================
// Rule files
// ============================================================================

#[cfg(test)]
mod rule_file_tests {
    use super::*;

    #[test]
    fn test_builtin_specs_round_trip_through_a_file() {
        let file = write_rule_file(&builtin_specs());
        let table = RuleTable::from_json_file(file.path()).unwrap();
        assert_eq!(table.len(), RuleTable::builtin().unwrap().len());
    }

    #[test]
    fn test_custom_rules_drive_classification() {
        let specs = vec![RuleSpec::new(
            "custom.hype",
            Category::Sensational,
            LanguageTag::English,
            r"\bhype\b",
            5.0,
        )];
        let file = write_rule_file(&specs);
        let table = Arc::new(RuleTable::from_json_file(file.path()).unwrap());
        let analyzer = AuthenticityAnalyzer::new(table, ClassifierConfig::default()).unwrap();

        let result = analyzer
            .classify("Pure hype about the upcoming product launch event", None)
            .unwrap();
        assert_eq!(result.classification, Classification::Fake);
        assert_eq!(result.keywords, vec!["hype"]);

        // the built-in vocabulary is gone
        let result = analyzer
            .classify("BREAKING shocking bombshell about the city council", None)
            .unwrap();
        assert_eq!(result.classification, Classification::Uncertain);
    }

    #[test]
    fn test_missing_rule_file_is_configuration_error() {
        let dir = tempdir().unwrap();
        let err = RuleTable::from_json_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_rule_file_with_unknown_scope_fails() {
        let file = write_rule_file(&[RuleSpec::new(
            "bad",
            Category::Hedge,
            LanguageTag::Unknown,
            r"\bmaybe\b",
            0.5,
        )]);
        assert!(matches!(
            RuleTable::from_json_file(file.path()),
            Err(AppError::Configuration(_))
        ));
    }
}

// ============================================================================
// Tuning
// ============================================================================

#[cfg(test)]
mod tuning_tests {
    use super::*;

    #[test]
    fn test_higher_threshold_turns_fake_into_uncertain() {
        let text = "BREAKING: shocking claims spread online about the new bridge.";
        let table = Arc::new(RuleTable::builtin().unwrap());

        let default = AuthenticityAnalyzer::new(table.clone(), ClassifierConfig::default()).unwrap();
        assert_eq!(default.classify(text, None).unwrap().classification, Classification::Fake);

        let strict = AuthenticityAnalyzer::new(
            table,
            ClassifierConfig {
                fake_threshold: 10.0,
                ..ClassifierConfig::default()
            },
        )
        .unwrap();
        assert_eq!(strict.classify(text, None).unwrap().classification, Classification::Uncertain);
    }

    #[test]
    fn test_keyword_cap_is_respected() {
        let table = Arc::new(RuleTable::builtin().unwrap());
        let analyzer = AuthenticityAnalyzer::new(
            table,
            ClassifierConfig {
                max_keywords: 2,
                ..ClassifierConfig::default()
            },
        )
        .unwrap();
        let result = analyzer
            .classify(
                "BREAKING: Unbelievable miracle cure discovered! This one weird trick will shock you!",
                None,
            )
            .unwrap();
        assert_eq!(result.keywords.len(), 2);
    }
}
