//! Detector Tests
//!
//! Whole-pipeline behaviour of the classifier across languages.

use crate::detector::rules::Category;
use crate::detector::{AuthenticityAnalyzer, Classification, LanguageTag};
use std::sync::Arc;

fn analyzer() -> AuthenticityAnalyzer {
    AuthenticityAnalyzer::with_builtin_rules().expect("builtin rules must load")
}

const SENSATIONAL_EN: &str =
    "BREAKING: Unbelievable miracle cure discovered! This one weird trick will shock you!";
const ATTRIBUTED_EN: &str = "According to research published in a peer-reviewed journal, scientists have made progress in renewable energy technology.";
const NEUTRAL_EN: &str = "The weather was nice today. Some people went outside.";
const SENSATIONAL_RU: &str =
    "Срочно! Невероятная сенсация потрясла мир! Ученые скрывают правду об этом открытии!";
const SENSATIONAL_KK: &str = "Шұғыл! Сенсация: ғалымдар шындықты жасырып отыр!";
const OFFICIAL_KK: &str =
    "Денсаулық сақтау министрлігінің мәліметінше, жаңа емхана келесі айда ашылады.";
const OFFICIAL_EN: &str = "The Ministry of Health said in a statement that the new hospital will open next month, officials told reporters.";

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn test_sensational_english_is_fake() {
        let analyzer = analyzer();
        let analysis = analyzer.analyze(SENSATIONAL_EN, None).unwrap();
        let result = &analysis.result;

        assert_eq!(result.language, LanguageTag::English);
        assert_eq!(result.classification, Classification::Fake);
        assert!(result.confidence >= 70, "confidence {}", result.confidence);

        let sensational_spans: Vec<String> = analysis
            .features
            .matched_rules
            .iter()
            .filter(|m| m.rule.category() == Category::Sensational)
            .flat_map(|m| m.spans.iter().map(|s| s.text.clone()))
            .collect();
        assert!(result.keywords.iter().any(|k| sensational_spans.contains(k)));
    }

    #[test]
    fn test_attributed_english_is_real() {
        let analyzer = analyzer();
        let analysis = analyzer.analyze(ATTRIBUTED_EN, None).unwrap();
        assert_eq!(analysis.result.classification, Classification::Real);
        assert!(analysis.features.signals.has_citation_marker);
        assert!(!analysis.result.keywords.is_empty());
    }

    #[test]
    fn test_neutral_text_is_uncertain_near_floor() {
        let result = analyzer().classify(NEUTRAL_EN, None).unwrap();
        assert_eq!(result.classification, Classification::Uncertain);
        assert!((45..=55).contains(&result.confidence), "confidence {}", result.confidence);
    }

    #[test]
    fn test_sensational_russian_is_fake() {
        let result = analyzer().classify(SENSATIONAL_RU, None).unwrap();
        assert_eq!(result.language, LanguageTag::Russian);
        assert_eq!(result.classification, Classification::Fake);
        assert!(result.reasoning.starts_with("Текст"));
    }

    #[test]
    fn test_sensational_kazakh_is_fake() {
        let result = analyzer().classify(SENSATIONAL_KK, None).unwrap();
        assert_eq!(result.language, LanguageTag::Kazakh);
        assert_eq!(result.classification, Classification::Fake);
        assert!(result.suggested_sources.contains(&"Factcheck.kz".to_string()));
    }

    #[test]
    fn test_official_kazakh_is_real() {
        let result = analyzer().classify(OFFICIAL_KK, None).unwrap();
        assert_eq!(result.language, LanguageTag::Kazakh);
        assert_eq!(result.classification, Classification::Real);
        assert!(result.suggested_sources.is_empty());
    }

    #[test]
    fn test_official_english_is_real() {
        let result = analyzer().classify(OFFICIAL_EN, None).unwrap();
        assert_eq!(result.classification, Classification::Real);
        assert!(result.confidence > 80);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    const CORPUS: [&str; 8] = [
        SENSATIONAL_EN,
        ATTRIBUTED_EN,
        NEUTRAL_EN,
        SENSATIONAL_RU,
        SENSATIONAL_KK,
        OFFICIAL_KK,
        OFFICIAL_EN,
        "ok go",
    ];

    #[test]
    fn test_repeated_calls_are_identical() {
        let analyzer = analyzer();
        for text in CORPUS {
            let first = analyzer.classify(text, None).unwrap();
            let second = analyzer.classify(text, None).unwrap();
            assert_eq!(first, second);
            assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }
    }

    #[test]
    fn test_parallel_calls_agree() {
        let analyzer = Arc::new(analyzer());
        let expected: Vec<_> = CORPUS
            .iter()
            .map(|text| analyzer.classify(text, None).unwrap())
            .collect();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let analyzer = Arc::clone(&analyzer);
                std::thread::spawn(move || {
                    CORPUS
                        .iter()
                        .map(|text| analyzer.classify(text, None).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_confidence_bounds_and_totality() {
        let analyzer = analyzer();
        let repeated = "shocking ".repeat(500);
        let inputs: [&str; 5] = [
            "a",
            "1234567890",
            "!!!!! a !!!!!",
            "ALL CAPS SHOUTING WITHOUT ANY STOPS AT ALL",
            repeated.as_str(),
        ];
        for text in inputs.iter().copied().chain(CORPUS) {
            let result = analyzer.classify(text, None).unwrap();
            assert!(result.confidence <= 100);
            assert!(matches!(
                result.classification,
                Classification::Real | Classification::Fake | Classification::Uncertain
            ));
        }
    }

    #[test]
    fn test_keywords_are_grounded_in_text() {
        let analyzer = analyzer();
        for text in CORPUS {
            let result = analyzer.classify(text, None).unwrap();
            assert!(result.keywords.len() <= analyzer.config().max_keywords);
            for keyword in &result.keywords {
                assert!(text.contains(keyword.as_str()), "{:?} not in {:?}", keyword, text);
            }
        }
    }

    #[test]
    fn test_script_precedence() {
        let analyzer = analyzer();
        // Russian words with one Kazakh letter
        let result = analyzer
            .classify("Сегодня министр заявил, что Қазақстан готов.", None)
            .unwrap();
        assert_eq!(result.language, LanguageTag::Kazakh);
    }

    #[test]
    fn test_short_input_never_decides() {
        let analyzer = analyzer();
        for text in ["SHOCKING!!!", "BREAKING miracle", "According to data"] {
            let result = analyzer.classify(text, None).unwrap();
            assert_eq!(result.classification, Classification::Uncertain);
            assert_eq!(result.confidence, 50);
        }
    }

    #[test]
    fn test_symbol_only_input_is_rejected() {
        let analyzer = analyzer();
        for text in ["", "    ", "?!.,;:", "\n\n\t"] {
            assert!(analyzer.classify(text, None).unwrap_err().is_invalid_input());
        }
    }
}
