//! Authenticity Analyzer - orchestrator of the detector pipeline.
//!
//! detect language -> extract features -> score -> decide -> explain
//!
//! The analyzer owns a shared handle to the rule table and its own copy of the
//! tuning constants. It holds no mutable state, so one instance can serve any
//! number of threads.

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::decision::{decide, Decision};
use super::explanation::explain;
use super::features::{extract_with_min_length, FeatureVector, Span, StructuralSignals};
use super::language::{self, LanguageTag};
use super::rules::{Category, RuleTable};
use super::scoring::{self, score, Factor};
use super::verdict::{ClassificationResult, Document};
use crate::config::ClassifierConfig;
use crate::error::AppError;

/// Everything computed for one text, kept for inspection
#[derive(Debug, Clone)]
pub struct Analysis<'a> {
    pub document: Document,
    pub features: FeatureVector<'a>,
    pub decision: Decision,
    pub result: ClassificationResult,
}

/// Serializable breakdown of one matched rule
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEvidence {
    pub id: String,
    pub category: Category,
    pub weight: f64,
    pub count: usize,
    pub contribution: f64,
    pub spans: Vec<Span>,
}

/// Serializable trace of an analysis
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub language: LanguageTag,
    pub matched_rules: Vec<RuleEvidence>,
    pub signals: StructuralSignals,
    pub raw_score: f64,
    pub confidence: f64,
    pub factors: Vec<Factor>,
    pub result: ClassificationResult,
}

impl Analysis<'_> {
    pub fn report(&self, config: &ClassifierConfig) -> AnalysisReport {
        AnalysisReport {
            language: self.document.language(),
            matched_rules: self
                .features
                .matched_rules
                .iter()
                .map(|m| RuleEvidence {
                    id: m.rule.id().to_string(),
                    category: m.rule.category(),
                    weight: m.rule.weight(),
                    count: m.count,
                    contribution: scoring::rule_contribution(m, config),
                    spans: m.spans.clone(),
                })
                .collect(),
            signals: self.features.signals,
            raw_score: self.decision.score.raw,
            confidence: self.decision.score.confidence,
            factors: self.decision.score.factors.clone(),
            result: self.result.clone(),
        }
    }
}

/// Rejects text with nothing to analyze.
pub fn validate_input(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::InvalidInput("text is empty".to_string()));
    }
    if !text.chars().any(char::is_alphanumeric) {
        return Err(AppError::InvalidInput(
            "text contains no letters or digits".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct AuthenticityAnalyzer {
    rules: Arc<RuleTable>,
    config: ClassifierConfig,
}

impl AuthenticityAnalyzer {
    /// Build an analyzer, rejecting out-of-range tuning constants.
    pub fn new(rules: Arc<RuleTable>, config: ClassifierConfig) -> Result<Self, AppError> {
        config.check()?;
        Ok(Self { rules, config })
    }

    /// Analyzer over the built-in lexicon with default constants.
    pub fn with_builtin_rules() -> Result<Self, AppError> {
        Self::new(Arc::new(RuleTable::builtin()?), ClassifierConfig::default())
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify `text`. A language hint overrides script detection.
    pub fn classify(
        &self,
        text: &str,
        hint: Option<LanguageTag>,
    ) -> Result<ClassificationResult, AppError> {
        self.analyze(text, hint).map(|analysis| analysis.result)
    }

    /// Run the full pipeline and keep every intermediate result.
    pub fn analyze(&self, text: &str, hint: Option<LanguageTag>) -> Result<Analysis<'_>, AppError> {
        validate_input(text)?;
        let start = Instant::now();

        let language = hint.unwrap_or_else(|| language::detect(text));
        let document = Document::new(text, language);

        let features = extract_with_min_length(&document, &self.rules, self.config.min_text_length);
        let decision = decide(score(&features, &self.config), &self.config);
        let explanation = explain(&features, &decision, &self.config, document.language());

        let result = ClassificationResult {
            classification: decision.classification,
            confidence: decision.confidence(),
            reasoning: explanation.reasoning,
            keywords: explanation.keywords,
            suggested_sources: explanation.suggested_sources,
            language: document.language(),
        };

        debug!(
            language = %document.language(),
            matches = features.total_matches(),
            raw_score = decision.score.raw,
            classification = %result.classification,
            confidence = result.confidence,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Text classified"
        );

        Ok(Analysis {
            document,
            features,
            decision,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::verdict::Classification;

    fn analyzer() -> AuthenticityAnalyzer {
        AuthenticityAnalyzer::with_builtin_rules().unwrap()
    }

    #[test]
    fn test_rejects_empty_and_symbol_only_input() {
        let analyzer = analyzer();
        for text in ["", "   \n\t", "!!! ??? ...", "— … —"] {
            let err = analyzer.classify(text, None).unwrap_err();
            assert!(err.is_invalid_input(), "{:?} should be invalid", text);
        }
    }

    #[test]
    fn test_short_input_is_uncertain_at_floor() {
        let result = analyzer().classify("SHOCKING!!!", None).unwrap();
        assert_eq!(result.classification, Classification::Uncertain);
        assert_eq!(result.confidence, 50);
    }

    #[test]
    fn test_hint_overrides_detection() {
        let analyzer = analyzer();
        let result = analyzer
            .classify("Plain sentence about the local library opening hours.", Some(LanguageTag::Russian))
            .unwrap();
        assert_eq!(result.language, LanguageTag::Russian);

        let result = analyzer
            .classify("Plain sentence about the local library opening hours.", Some(LanguageTag::Unknown))
            .unwrap();
        assert_eq!(result.language, LanguageTag::English);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let table = Arc::new(RuleTable::builtin().unwrap());
        let config = ClassifierConfig {
            confidence_floor: 150.0,
            ..ClassifierConfig::default()
        };
        assert!(matches!(
            AuthenticityAnalyzer::new(table, config),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_report_matches_result() {
        let analyzer = analyzer();
        let analysis = analyzer
            .analyze("BREAKING: shocking secret they don't want you to know!", None)
            .unwrap();
        let report = analysis.report(analyzer.config());
        assert_eq!(report.result, analysis.result);
        assert_eq!(report.raw_score, analysis.decision.score.raw);
        assert!(report.matched_rules.iter().any(|r| r.id == "en.sensational.clickbait"));
    }
}
