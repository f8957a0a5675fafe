//! Explanation Generator.
//!
//! Builds the human-readable side of a verdict from the same evidence the
//! scorer used. Nothing here can change a classification or its confidence.

use serde::Serialize;
use std::collections::HashSet;

use super::decision::Decision;
use super::features::{FeatureVector, RuleMatch};
use super::language::LanguageTag;
use super::rules::Category;
use super::scoring::{self, Evidence, Factor};
use super::verdict::Classification;
use crate::config::ClassifierConfig;

/// Factors named in a reasoning sentence
const MAX_NAMED_FACTORS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub reasoning: String,
    pub keywords: Vec<String>,
    pub suggested_sources: Vec<String>,
}

/// Fixed wording for one language
struct Phrasebook {
    fake_opener: &'static str,
    real_opener: &'static str,
    uncertain_opener: &'static str,
    signals_found: &'static str,
    advisory: &'static str,
    conjunction: &'static str,
    missing_attribution: &'static str,
    fact_checkers: &'static [&'static str],
    primary_sources: &'static [&'static str],
}

const ENGLISH: Phrasebook = Phrasebook {
    fake_opener: "This text shows signs of fabricated or sensational content",
    real_opener: "This text shows hallmarks of genuine reporting",
    uncertain_opener: "The evidence is too weak or contradictory for a confident call.",
    signals_found: "Signals found",
    advisory: "Verify the claims with trusted sources before sharing.",
    conjunction: "and",
    missing_attribution: "absence of attribution",
    fact_checkers: &["Reuters Fact Check", "AP Fact Check", "Snopes"],
    primary_sources: &["Official government portals", "Reuters", "Associated Press"],
};

const RUSSIAN: Phrasebook = Phrasebook {
    fake_opener: "Текст имеет признаки недостоверного или сенсационного содержания",
    real_opener: "Текст имеет признаки достоверного сообщения",
    uncertain_opener: "Признаки слишком слабые или противоречивые для уверенного вывода.",
    signals_found: "Обнаруженные сигналы",
    advisory: "Проверьте эти сведения в надёжных источниках, прежде чем делиться ими.",
    conjunction: "и",
    missing_attribution: "отсутствие указания на источник",
    fact_checkers: &["StopFake", "Проверено.Медиа", "Factcheck.kz"],
    primary_sources: &["Официальные сайты государственных органов", "Reuters", "Associated Press"],
};

const KAZAKH: Phrasebook = Phrasebook {
    fake_opener: "Мәтінде жалған немесе сенсациялық мазмұнның белгілері бар",
    real_opener: "Мәтінде шынайы хабарламаның белгілері бар",
    uncertain_opener: "Белгілер сенімді қорытынды жасау үшін тым әлсіз немесе қайшылықты.",
    signals_found: "Анықталған белгілер",
    advisory: "Бөліспес бұрын бұл мәліметтерді сенімді дереккөздерден тексеріңіз.",
    conjunction: "және",
    missing_attribution: "дереккөздің көрсетілмеуі",
    fact_checkers: &["Factcheck.kz", "Kazinform", "gov.kz"],
    primary_sources: &["Ресми мемлекеттік порталдар (gov.kz)", "Kazinform", "Reuters"],
};

fn phrasebook(language: LanguageTag) -> &'static Phrasebook {
    match language.working() {
        LanguageTag::Russian => &RUSSIAN,
        LanguageTag::Kazakh => &KAZAKH,
        _ => &ENGLISH,
    }
}

fn evidence_phrase(language: LanguageTag, evidence: Evidence) -> &'static str {
    use Category::*;
    use Evidence::*;

    match (language.working(), evidence) {
        (LanguageTag::Russian, Rule(Sensational)) => "сенсационная лексика",
        (LanguageTag::Russian, Rule(Citation)) => "ссылки на источники",
        (LanguageTag::Russian, Rule(Hedge)) => "непроверенные утверждения",
        (LanguageTag::Russian, Rule(Absolute)) => "категоричные утверждения",
        (LanguageTag::Russian, Rule(Official)) => "упоминание официальных органов",
        (LanguageTag::Russian, Rule(Emotional)) => "эмоционально окрашенная лексика",
        (LanguageTag::Russian, Exclamations) => "обилие восклицательных знаков",
        (LanguageTag::Russian, Capitals) => "злоупотребление заглавными буквами",
        (LanguageTag::Russian, CitationMarker) => "явное цитирование",
        (LanguageTag::Russian, Attribution) => "указание на учреждения",

        (LanguageTag::Kazakh, Rule(Sensational)) => "сенсациялық сөздер",
        (LanguageTag::Kazakh, Rule(Citation)) => "дереккөзге сілтемелер",
        (LanguageTag::Kazakh, Rule(Hedge)) => "расталмаған мәлімдемелер",
        (LanguageTag::Kazakh, Rule(Absolute)) => "үзілді-кесілді тұжырымдар",
        (LanguageTag::Kazakh, Rule(Official)) => "ресми мекемелерге сілтеме",
        (LanguageTag::Kazakh, Rule(Emotional)) => "эмоционалды сөздер",
        (LanguageTag::Kazakh, Exclamations) => "леп белгілерінің көптігі",
        (LanguageTag::Kazakh, Capitals) => "бас әріптердің көптігі",
        (LanguageTag::Kazakh, CitationMarker) => "нақты дәйексөз",
        (LanguageTag::Kazakh, Attribution) => "мекемеге сілтеме",

        (_, Rule(Sensational)) => "sensational language",
        (_, Rule(Citation)) => "references to sources",
        (_, Rule(Hedge)) => "unverified or hedged claims",
        (_, Rule(Absolute)) => "absolute claims",
        (_, Rule(Official)) => "official institutional sources",
        (_, Rule(Emotional)) => "emotionally charged wording",
        (_, Exclamations) => "excessive exclamation marks",
        (_, Capitals) => "heavy use of capital letters",
        (_, CitationMarker) => "explicit citation",
        (_, Attribution) => "institutional attribution",
    }
}

/// "a", "a and b", "a, b and c"
fn join_phrases(phrases: &[&str], conjunction: &str) -> String {
    match phrases {
        [] => String::new(),
        [only] => (*only).to_string(),
        [head @ .., last] => format!("{} {} {}", head.join(", "), conjunction, last),
    }
}

/// Strongest factors first; the sort is stable so ties keep scoring order.
fn strongest<'a>(factors: impl Iterator<Item = &'a Factor>) -> Vec<&'a Factor> {
    let mut selected: Vec<&Factor> = factors.collect();
    selected.sort_by(|a, b| b.contribution.abs().total_cmp(&a.contribution.abs()));
    selected.truncate(MAX_NAMED_FACTORS);
    selected
}

fn reasoning(
    features: &FeatureVector<'_>,
    decision: &Decision,
    language: LanguageTag,
    book: &Phrasebook,
) -> String {
    let factors = &decision.score.factors;
    let phrase = |f: &&Factor| evidence_phrase(language, f.evidence);

    match decision.classification {
        Classification::Fake => {
            let mut named: Vec<&str> = strongest(factors.iter().filter(|f| f.contribution > 0.0))
                .iter()
                .map(phrase)
                .collect();
            let signals = &features.signals;
            if !signals.has_citation_marker && !signals.has_attribution {
                named.push(book.missing_attribution);
            }
            format!(
                "{}: {}. {}",
                book.fake_opener,
                join_phrases(&named, book.conjunction),
                book.advisory
            )
        }
        Classification::Real => {
            let named: Vec<&str> = strongest(factors.iter().filter(|f| f.contribution < 0.0))
                .iter()
                .map(phrase)
                .collect();
            if named.is_empty() {
                format!("{}.", book.real_opener)
            } else {
                format!("{}: {}.", book.real_opener, join_phrases(&named, book.conjunction))
            }
        }
        Classification::Uncertain => {
            let named: Vec<&str> = strongest(factors.iter()).iter().map(phrase).collect();
            if named.is_empty() {
                format!("{} {}", book.uncertain_opener, book.advisory)
            } else {
                format!(
                    "{} {}: {}. {}",
                    book.uncertain_opener,
                    book.signals_found,
                    join_phrases(&named, book.conjunction),
                    book.advisory
                )
            }
        }
    }
}

/// Matched phrases supporting the verdict, most influential rule first.
pub fn keywords(
    features: &FeatureVector<'_>,
    classification: Classification,
    config: &ClassifierConfig,
) -> Vec<String> {
    let mut supporting: Vec<(f64, &RuleMatch<'_>)> = features
        .matched_rules
        .iter()
        .filter(|m| match classification {
            Classification::Fake => m.rule.weight() > 0.0,
            Classification::Real => m.rule.weight() < 0.0,
            Classification::Uncertain => true,
        })
        .map(|m| (scoring::rule_contribution(m, config), m))
        .collect();
    supporting.sort_by(|a, b| b.0.abs().total_cmp(&a.0.abs()));

    let mut seen = HashSet::new();
    let mut keywords = Vec::new();
    for (_, rule_match) in supporting {
        for span in &rule_match.spans {
            if keywords.len() >= config.max_keywords {
                return keywords;
            }
            if seen.insert(span.text.to_lowercase()) {
                keywords.push(span.text.clone());
            }
        }
    }
    keywords
}

fn suggested_sources(classification: Classification, book: &Phrasebook) -> Vec<String> {
    let sources: &[&str] = match classification {
        Classification::Fake => book.fact_checkers,
        Classification::Uncertain => book.primary_sources,
        Classification::Real => &[],
    };
    sources.iter().map(|s| s.to_string()).collect()
}

/// Explain a decision in the document's working language.
pub fn explain(
    features: &FeatureVector<'_>,
    decision: &Decision,
    config: &ClassifierConfig,
    language: LanguageTag,
) -> Explanation {
    let book = phrasebook(language);
    Explanation {
        reasoning: reasoning(features, decision, language, book),
        keywords: keywords(features, decision.classification, config),
        suggested_sources: suggested_sources(decision.classification, book),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::decision::decide;
    use crate::detector::features::extract;
    use crate::detector::rules::RuleTable;
    use crate::detector::scoring::score;
    use crate::detector::verdict::Document;

    fn explain_text(text: &str, language: LanguageTag) -> (Decision, Explanation) {
        let table = RuleTable::builtin().unwrap();
        let config = ClassifierConfig::default();
        let features = extract(&Document::new(text, language), &table);
        let decision = decide(score(&features, &config), &config);
        let explanation = explain(&features, &decision, &config, language);
        (decision, explanation)
    }

    #[test]
    fn test_join_phrases() {
        assert_eq!(join_phrases(&[], "and"), "");
        assert_eq!(join_phrases(&["a"], "and"), "a");
        assert_eq!(join_phrases(&["a", "b"], "and"), "a and b");
        assert_eq!(join_phrases(&["a", "b", "c"], "и"), "a, b и c");
    }

    #[test]
    fn test_fake_reasoning_mentions_missing_attribution() {
        let (decision, explanation) = explain_text(
            "SHOCKING miracle cure doctors hate! You won't believe what happens next!!!",
            LanguageTag::English,
        );
        assert_eq!(decision.classification, Classification::Fake);
        assert!(explanation.reasoning.starts_with(ENGLISH.fake_opener));
        assert!(explanation.reasoning.contains("absence of attribution"));
        assert!(explanation.reasoning.ends_with(ENGLISH.advisory));
        assert_eq!(explanation.suggested_sources.len(), 3);
    }

    #[test]
    fn test_real_has_no_sources() {
        let (decision, explanation) = explain_text(
            "According to the Ministry of Health, a peer-reviewed study published in a medical journal found the vaccine effective.",
            LanguageTag::English,
        );
        assert_eq!(decision.classification, Classification::Real);
        assert!(explanation.reasoning.starts_with(ENGLISH.real_opener));
        assert!(explanation.suggested_sources.is_empty());
        assert!(explanation.keywords.iter().any(|k| k.eq_ignore_ascii_case("according to")));
    }

    #[test]
    fn test_uncertain_without_signals() {
        let (decision, explanation) =
            explain_text("The weather was nice today in the park.", LanguageTag::English);
        assert_eq!(decision.classification, Classification::Uncertain);
        assert!(explanation.keywords.is_empty());
        assert!(!explanation.reasoning.contains(ENGLISH.signals_found));
        assert_eq!(explanation.suggested_sources[0], "Official government portals");
    }

    #[test]
    fn test_keywords_are_deduplicated_case_insensitively() {
        let (_, explanation) = explain_text(
            "Shocking news. SHOCKING facts. shocking truth about the secret cover-up!",
            LanguageTag::English,
        );
        let shocking: Vec<&String> = explanation
            .keywords
            .iter()
            .filter(|k| k.eq_ignore_ascii_case("shocking"))
            .collect();
        assert_eq!(shocking, vec!["Shocking"]);
    }

    #[test]
    fn test_keywords_ordered_by_contribution() {
        // emotional (2 x 1.0) matches first in the text, headline (2 x 1.5) outranks it
        let (decision, explanation) = explain_text(
            "This amazing scandal is shocking news and a bombshell for everyone here!",
            LanguageTag::English,
        );
        assert_eq!(decision.classification, Classification::Fake);
        assert_eq!(
            explanation.keywords,
            vec!["shocking", "bombshell", "amazing", "scandal"]
        );
    }

    #[test]
    fn test_fake_keywords_skip_credibility_phrases() {
        let (decision, explanation) = explain_text(
            "According to rumors, this shocking miracle cure is a secret doctors hate! You won't believe what happens next!",
            LanguageTag::English,
        );
        assert_eq!(decision.classification, Classification::Fake);
        assert!(!explanation.keywords.is_empty());
        assert!(!explanation
            .keywords
            .iter()
            .any(|k| k.eq_ignore_ascii_case("according to")));
        // clickbait phrases carry the largest contribution
        assert_eq!(explanation.keywords[0], "doctors hate");
    }

    #[test]
    fn test_real_keywords_skip_sensational_phrases() {
        let (decision, explanation) = explain_text(
            "According to the Ministry of Health, a shocking rise in cases was published in a peer-reviewed journal study.",
            LanguageTag::English,
        );
        assert_eq!(decision.classification, Classification::Real);
        assert!(!explanation.keywords.iter().any(|k| k.eq_ignore_ascii_case("shocking")));
    }

    #[test]
    fn test_reasoning_uses_document_language() {
        let (_, explanation) = explain_text(
            "СРОЧНО! Шокирующая правда, которую скрывают от всех!",
            LanguageTag::Russian,
        );
        assert!(explanation.reasoning.starts_with(RUSSIAN.fake_opener));
        assert!(explanation.suggested_sources.contains(&"StopFake".to_string()));
    }
}
