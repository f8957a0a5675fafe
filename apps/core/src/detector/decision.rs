//! Decision & Calibration.
//!
//! Three terminal states, fixed thresholds. A score sitting exactly on a
//! threshold is Uncertain.

use serde::Serialize;

use super::scoring::Score;
use super::verdict::Classification;
use crate::config::ClassifierConfig;

/// A classification together with the score it was derived from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub classification: Classification,
    pub score: Score,
}

impl Decision {
    pub fn confidence(&self) -> u8 {
        self.score.rounded_confidence()
    }
}

/// Map a raw score onto a classification.
pub fn classify_score(raw: f64, config: &ClassifierConfig) -> Classification {
    if raw > config.fake_threshold {
        Classification::Fake
    } else if raw < -config.real_threshold {
        Classification::Real
    } else {
        Classification::Uncertain
    }
}

/// Decide on a score. Confidence travels with the decision but never changes it.
pub fn decide(score: Score, config: &ClassifierConfig) -> Decision {
    Decision {
        classification: classify_score(score.raw, config),
        score,
    }
}
