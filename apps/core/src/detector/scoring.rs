//! Scoring Engine.
//!
//! Sums weighted evidence into a signed raw score and maps its magnitude
//! through a saturating curve. The curve bottoms out at the configured floor
//! when the score is zero, so weak or contradictory evidence stays at low
//! confidence no matter which way it leans.

use serde::Serialize;

use super::features::{FeatureVector, RuleMatch};
use super::rules::Category;
use crate::config::ClassifierConfig;

/// Where a piece of evidence came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Evidence {
    /// Sum of all matched rules in a category
    Rule(Category),
    /// High exclamation density
    Exclamations,
    /// High share of capital letters
    Capitals,
    /// A recognised citation phrase
    CitationMarker,
    /// An institutional attribution
    Attribution,
}

/// Signed contribution of one evidence source to the raw score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Factor {
    pub evidence: Evidence,
    pub contribution: f64,
}

/// Output of the scoring engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Score {
    /// Unbounded signed sum; positive leans fabricated, negative leans genuine
    pub raw: f64,
    /// Real-valued confidence in [0, 100]
    pub confidence: f64,
    /// Non-zero contributions, rule categories first in table order
    pub factors: Vec<Factor>,
}

impl Score {
    /// Confidence as reported to callers
    pub fn rounded_confidence(&self) -> u8 {
        self.confidence.round().clamp(0.0, 100.0) as u8
    }
}

/// Weighted contribution of one matched rule, with repeated matches capped.
pub fn rule_contribution(rule_match: &RuleMatch<'_>, config: &ClassifierConfig) -> f64 {
    let counted = rule_match.count.min(config.max_matches_per_rule);
    counted as f64 * rule_match.rule.weight()
}

/// Map a raw score to confidence: `floor + (100 - floor) * (1 - e^(-|raw| / scale))`.
pub fn confidence_for(raw: f64, config: &ClassifierConfig) -> f64 {
    let floor = config.confidence_floor;
    let saturation = 1.0 - (-raw.abs() / config.confidence_scale).exp();
    (floor + (100.0 - floor) * saturation).clamp(0.0, 100.0)
}

/// Score a feature vector.
pub fn score(features: &FeatureVector<'_>, config: &ClassifierConfig) -> Score {
    let mut factors: Vec<Factor> = Vec::new();

    for rule_match in &features.matched_rules {
        let contribution = rule_contribution(rule_match, config);
        let evidence = Evidence::Rule(rule_match.rule.category());
        match factors.iter_mut().find(|f| f.evidence == evidence) {
            Some(factor) => factor.contribution += contribution,
            None => factors.push(Factor {
                evidence,
                contribution,
            }),
        }
    }

    let signals = &features.signals;
    let structural = [
        (
            Evidence::Exclamations,
            signals.exclamation_density >= config.exclamation_density_threshold,
            config.exclamation_weight,
        ),
        (
            Evidence::Capitals,
            signals.caps_ratio >= config.caps_ratio_threshold,
            config.caps_weight,
        ),
        (
            Evidence::CitationMarker,
            signals.has_citation_marker,
            config.citation_weight,
        ),
        (
            Evidence::Attribution,
            signals.has_attribution,
            config.attribution_weight,
        ),
    ];
    for (evidence, present, weight) in structural {
        if present {
            factors.push(Factor {
                evidence,
                contribution: weight,
            });
        }
    }

    factors.retain(|f| f.contribution != 0.0);
    let raw: f64 = factors.iter().map(|f| f.contribution).sum();

    if signals.short_input {
        // Not enough text to call it either way: keep the score inside the
        // uncertain band and report the curve minimum.
        return Score {
            raw: raw.clamp(-config.real_threshold, config.fake_threshold),
            confidence: config.confidence_floor,
            factors,
        };
    }

    Score {
        raw,
        confidence: confidence_for(raw, config),
        factors,
    }
}
