//! Feature extraction.
//!
//! Turns a document into the evidence the scorer works from: which rules
//! matched (with counts and spans) and a handful of structural signals that
//! are computed without looking at the rules at all.

use serde::Serialize;

use super::rules::{PatternRule, RuleTable};
use super::verdict::Document;

/// Inputs shorter than this (in characters, after trimming) only under-signal.
pub const MIN_TEXT_LENGTH: usize = 20;

/// A matched region of the input, in byte offsets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    /// The matched text, verbatim
    pub text: String,
}

/// One matched rule with every place it matched
#[derive(Debug, Clone)]
pub struct RuleMatch<'r> {
    pub rule: &'r PatternRule,
    pub count: usize,
    pub spans: Vec<Span>,
}

/// Sentence statistics, measured in words
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SentenceStats {
    pub count: usize,
    pub mean_words: f64,
    pub max_words: usize,
}

/// Signals derived from the shape of the text
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StructuralSignals {
    /// Exclamation marks per sentence
    pub exclamation_density: f64,
    /// Share of letters that are upper-case
    pub caps_ratio: f64,
    pub sentences: SentenceStats,
    pub has_citation_marker: bool,
    pub has_attribution: bool,
    /// Text was below the minimum length; ratios are zero
    pub short_input: bool,
}

/// Everything the scorer needs about one document
#[derive(Debug, Clone)]
pub struct FeatureVector<'r> {
    pub matched_rules: Vec<RuleMatch<'r>>,
    pub signals: StructuralSignals,
}

impl FeatureVector<'_> {
    pub fn total_matches(&self) -> usize {
        self.matched_rules.iter().map(|m| m.count).sum()
    }
}

/// Extract features using the table's default minimum length.
pub fn extract<'r>(document: &Document, rules: &'r RuleTable) -> FeatureVector<'r> {
    extract_with_min_length(document, rules, MIN_TEXT_LENGTH)
}

/// Extract features, treating texts under `min_length` characters as short.
pub fn extract_with_min_length<'r>(
    document: &Document,
    rules: &'r RuleTable,
    min_length: usize,
) -> FeatureVector<'r> {
    let text = document.text();
    let language = document.language();

    let matched_rules = rules
        .candidates(language, text)
        .into_iter()
        .filter_map(|rule| match_rule(rule, text))
        .collect();

    let short_input = text.trim().chars().count() < min_length;
    let mut signals = if short_input {
        StructuralSignals {
            short_input: true,
            ..StructuralSignals::default()
        }
    } else {
        measure_structure(text)
    };
    signals.has_citation_marker = rules.has_citation_marker(language, text);
    signals.has_attribution = rules.has_attribution(language, text);

    FeatureVector {
        matched_rules,
        signals,
    }
}

fn match_rule<'r>(rule: &'r PatternRule, text: &str) -> Option<RuleMatch<'r>> {
    let spans: Vec<Span> = rule
        .matcher()
        .find_iter(text)
        .filter(|m| !m.is_empty())
        .map(|m| Span {
            start: m.start(),
            end: m.end(),
            text: m.as_str().to_string(),
        })
        .collect();

    if spans.is_empty() {
        return None;
    }

    Some(RuleMatch {
        rule,
        count: spans.len(),
        spans,
    })
}

fn is_sentence_end(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…' | '\n')
}

fn sentence_stats(text: &str) -> SentenceStats {
    let word_counts: Vec<usize> = text
        .split(is_sentence_end)
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .map(|s| s.split_whitespace().count())
        .collect();

    if word_counts.is_empty() {
        return SentenceStats::default();
    }

    let total: usize = word_counts.iter().sum();
    SentenceStats {
        count: word_counts.len(),
        mean_words: total as f64 / word_counts.len() as f64,
        max_words: word_counts.iter().copied().max().unwrap_or(0),
    }
}

fn measure_structure(text: &str) -> StructuralSignals {
    let sentences = sentence_stats(text);
    let exclamations = text.chars().filter(|c| *c == '!').count();

    let (letters, upper) = text
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(letters, upper), c| {
            (letters + 1, upper + usize::from(c.is_uppercase()))
        });

    let exclamation_density = if sentences.count > 0 {
        exclamations as f64 / sentences.count as f64
    } else {
        0.0
    };
    let caps_ratio = if letters > 0 {
        upper as f64 / letters as f64
    } else {
        0.0
    };

    StructuralSignals {
        exclamation_density,
        caps_ratio,
        sentences,
        ..StructuralSignals::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::language::LanguageTag;

    fn doc(text: &str) -> Document {
        Document::new(text, LanguageTag::English)
    }

    #[test]
    fn test_rule_matches_and_spans() {
        let table = RuleTable::builtin().unwrap();
        let text = "BREAKING: shocking news, breaking again";
        let features = extract(&doc(text), &table);

        let headline = features
            .matched_rules
            .iter()
            .find(|m| m.rule.id() == "en.sensational.headline")
            .unwrap();
        assert_eq!(headline.count, 3);
        for span in &headline.spans {
            assert_eq!(&text[span.start..span.end], span.text);
        }
        assert_eq!(headline.spans[0].text, "BREAKING");
    }

    #[test]
    fn test_structural_signals() {
        let table = RuleTable::builtin().unwrap();
        let features = extract(&doc("WOW THIS IS HUGE! Really! Read it now."), &table);
        let signals = features.signals;

        assert_eq!(signals.sentences.count, 3);
        assert!((signals.exclamation_density - 2.0 / 3.0).abs() < 1e-9);
        assert!(signals.caps_ratio > 0.5);
        assert!(!signals.short_input);
    }

    #[test]
    fn test_short_input_zeroes_ratios() {
        let table = RuleTable::builtin().unwrap();
        let features = extract(&doc("SHOCKING!!!"), &table);

        assert!(features.signals.short_input);
        assert_eq!(features.signals.exclamation_density, 0.0);
        assert_eq!(features.signals.caps_ratio, 0.0);
        assert_eq!(features.signals.sentences, SentenceStats::default());
        // rules still match on short input
        assert_eq!(features.total_matches(), 1);
    }

    #[test]
    fn test_citation_and_attribution_flags() {
        let table = RuleTable::builtin().unwrap();
        let features = extract(
            &doc("According to the ministry, the bridge will reopen next week."),
            &table,
        );
        assert!(features.signals.has_citation_marker);
        assert!(features.signals.has_attribution);
    }

    #[test]
    fn test_no_sentence_terminators() {
        let stats = sentence_stats("just some words without an ending");
        assert_eq!(stats.count, 1);
        assert_eq!(stats.max_words, 6);
    }
}
