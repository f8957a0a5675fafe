//! # Detector Module
//!
//! Offline, rule-based authenticity classifier for English, Russian and
//! Kazakh text. Pure and synchronous: no storage, no network, no clock
//! influence on the verdict.
//!
//! ## Components
//! - `language`: script-based language detection
//! - `lexicon`: built-in weighted patterns and structural markers
//! - `rules`: compiled, immutable rule table
//! - `features`: rule matches and structural signals
//! - `scoring`: raw score and confidence curve
//! - `decision`: Real / Fake / Uncertain thresholds
//! - `explanation`: reasoning, keywords and suggested sources
//! - `verdict`: input document and output result types
//! - `analyzer`: main orchestrator

pub mod analyzer;
pub mod decision;
pub mod explanation;
pub mod features;
pub mod language;
pub mod lexicon;
pub mod rules;
pub mod scoring;
pub mod verdict;

pub use analyzer::{Analysis, AnalysisReport, AuthenticityAnalyzer};
pub use language::{detect, LanguageTag};
pub use rules::{Category, RuleSpec, RuleTable};
pub use verdict::{Classification, ClassificationResult, Document};
