//! Rule Table - immutable store of weighted, per-language patterns.
//!
//! Patterns are compiled exactly once when the table is loaded. A table that
//! loads successfully can never fail at match time, and it is never modified
//! afterwards, so a single instance is shared by every classification call.

use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

use super::language::LanguageTag;
use super::lexicon::{self, MarkerEntry};
use crate::error::AppError;

/// Signal category of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Sensational or clickbait language
    Sensational,
    /// Citations and references to sources
    Citation,
    /// Hedging, rumours and unverified claims
    Hedge,
    /// Unqualified absolute claims
    Absolute,
    /// Official or institutional sources
    Official,
    /// Heightened emotional language
    Emotional,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Sensational => "sensational",
            Category::Citation => "citation",
            Category::Hedge => "hedge",
            Category::Absolute => "absolute",
            Category::Official => "official",
            Category::Emotional => "emotional",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Uncompiled rule definition, as found in the built-in lexicon or a rule file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub id: String,
    pub category: Category,
    pub language: LanguageTag,
    pub pattern: String,
    pub weight: f64,
}

impl RuleSpec {
    pub fn new(
        id: impl Into<String>,
        category: Category,
        language: LanguageTag,
        pattern: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            language,
            pattern: pattern.into(),
            weight,
        }
    }
}

/// A compiled, weighted rule
#[derive(Debug, Clone)]
pub struct PatternRule {
    id: String,
    category: Category,
    language: LanguageTag,
    matcher: Regex,
    weight: f64,
}

fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

impl PatternRule {
    /// Compile a single rule, rejecting invalid scopes, patterns and weights.
    pub fn compile(spec: &RuleSpec) -> Result<Self, AppError> {
        if spec.language == LanguageTag::Unknown {
            return Err(AppError::Configuration(format!(
                "rule '{}' has no valid language scope",
                spec.id
            )));
        }
        if spec.pattern.trim().is_empty() {
            return Err(AppError::Configuration(format!(
                "rule '{}' has an empty pattern",
                spec.id
            )));
        }
        if !spec.weight.is_finite() {
            return Err(AppError::Configuration(format!(
                "rule '{}' has a non-finite weight",
                spec.id
            )));
        }

        let matcher = compile_pattern(&spec.pattern).map_err(|e| {
            AppError::Configuration(format!("rule '{}' has an invalid pattern: {}", spec.id, e))
        })?;

        Ok(Self {
            id: spec.id.clone(),
            category: spec.category,
            language: spec.language,
            matcher,
            weight: spec.weight,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn language(&self) -> LanguageTag {
        self.language
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }

    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }
}

/// Compiled rules, prefilter and structural markers for one language
#[derive(Debug)]
struct LanguageRules {
    rules: Vec<PatternRule>,
    prefilter: RegexSet,
    citation_marker: Option<Regex>,
    attribution_marker: Option<Regex>,
}

impl LanguageRules {
    fn build(rules: Vec<PatternRule>, markers: Option<&MarkerEntry>) -> Result<Self, AppError> {
        let prefilter = RegexSetBuilder::new(rules.iter().map(|r| r.pattern()))
            .case_insensitive(true)
            .build()?;

        let (citation_marker, attribution_marker) = match markers {
            Some(m) => (
                Some(compile_pattern(m.citation)?),
                Some(compile_pattern(m.attribution)?),
            ),
            None => (None, None),
        };

        Ok(Self {
            rules,
            prefilter,
            citation_marker,
            attribution_marker,
        })
    }
}

/// Read-only table of rules keyed by language
#[derive(Debug)]
pub struct RuleTable {
    languages: HashMap<LanguageTag, LanguageRules>,
}

impl RuleTable {
    /// Load the built-in lexicon.
    pub fn builtin() -> Result<Self, AppError> {
        Self::load(&builtin_specs())
    }

    /// Compile `specs` into a table. Any invalid rule fails the whole load.
    pub fn load(specs: &[RuleSpec]) -> Result<Self, AppError> {
        let mut seen_ids = HashSet::new();
        let mut grouped: HashMap<LanguageTag, Vec<PatternRule>> = HashMap::new();

        for spec in specs {
            if !seen_ids.insert(spec.id.as_str()) {
                return Err(AppError::Configuration(format!(
                    "duplicate rule id '{}'",
                    spec.id
                )));
            }
            let rule = PatternRule::compile(spec)?;
            debug!(rule = rule.id(), language = %rule.language(), "rule compiled");
            grouped.entry(rule.language()).or_default().push(rule);
        }

        let mut languages = HashMap::new();
        for language in LanguageTag::SUPPORTED {
            let rules = grouped.remove(&language).unwrap_or_default();
            let markers = lexicon::MARKERS.iter().find(|m| m.language == language);
            languages.insert(language, LanguageRules::build(rules, markers)?);
        }

        let table = Self { languages };
        info!(rules = table.len(), "Rule table loaded");
        Ok(table)
    }

    /// Parse a JSON array of rule definitions and load it.
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let specs: Vec<RuleSpec> = serde_json::from_str(json)
            .map_err(|e| AppError::Configuration(format!("malformed rule file: {}", e)))?;
        Self::load(&specs)
    }

    /// Read and load a JSON rule file.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!("cannot read rule file {}: {}", path.display(), e))
        })?;
        info!("Loading rules from {}", path.display());
        Self::from_json_str(&json)
    }

    fn entry(&self, language: LanguageTag) -> Option<&LanguageRules> {
        self.languages.get(&language.working())
    }

    /// Rules for a language, in definition order. `Unknown` uses the fallback language.
    pub fn rules_for(&self, language: LanguageTag) -> &[PatternRule] {
        self.entry(language)
            .map(|entry| entry.rules.as_slice())
            .unwrap_or(&[])
    }

    /// Rules of `language` that match somewhere in `text`, in definition order.
    pub fn candidates<'a>(&'a self, language: LanguageTag, text: &str) -> Vec<&'a PatternRule> {
        match self.entry(language) {
            Some(entry) => entry
                .prefilter
                .matches(text)
                .into_iter()
                .map(|index| &entry.rules[index])
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn has_citation_marker(&self, language: LanguageTag, text: &str) -> bool {
        self.entry(language)
            .and_then(|entry| entry.citation_marker.as_ref())
            .is_some_and(|marker| marker.is_match(text))
    }

    pub fn has_attribution(&self, language: LanguageTag, text: &str) -> bool {
        self.entry(language)
            .and_then(|entry| entry.attribution_marker.as_ref())
            .is_some_and(|marker| marker.is_match(text))
    }

    /// Total number of rules across languages
    pub fn len(&self) -> usize {
        self.languages.values().map(|entry| entry.rules.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The built-in lexicon as rule definitions
pub fn builtin_specs() -> Vec<RuleSpec> {
    lexicon::RULES
        .iter()
        .map(|entry| {
            RuleSpec::new(
                entry.id,
                entry.category,
                entry.language,
                entry.pattern,
                entry.weight,
            )
        })
        .collect()
}
