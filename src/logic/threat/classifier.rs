//! Threat Classifier
//!
//! Classify logic only - no types, no policy.
//! Input: Sample
//! Output: ThreatAssessment

use super::catalog;
use super::rules::{ClassificationThresholds, BASE_LEVEL, CATALOG_MATCH_BONUS};
use super::types::{Sample, ThreatAssessment, ThreatLevel};

// ============================================================================
// SIGNAL PRESENCE
// ============================================================================

/// Known frequency OR strong enough signal.
///
/// A catalog match alone is sufficient, even at the weakest strength.
pub fn is_threat(sample: &Sample) -> bool {
    is_threat_with(sample, &ClassificationThresholds::default())
}

pub fn is_threat_with(sample: &Sample, thresholds: &ClassificationThresholds) -> bool {
    catalog::contains(sample.frequency_hz)
        || sample.signal_strength_dbm > thresholds.signal_threshold_dbm
}

// ============================================================================
// MAIN CLASSIFICATION FUNCTION
// ============================================================================

/// Main classification function
pub fn classify(sample: &Sample) -> ThreatAssessment {
    classify_with_thresholds(sample, &ClassificationThresholds::default())
}

/// Classification with custom thresholds
pub fn classify_with_thresholds(
    sample: &Sample,
    thresholds: &ClassificationThresholds,
) -> ThreatAssessment {
    let mut score = BASE_LEVEL;

    if catalog::contains(sample.frequency_hz) {
        score += CATALOG_MATCH_BONUS;
    }

    score += thresholds.strength_bonus(sample.signal_strength_dbm);

    ThreatAssessment {
        is_threat: is_threat_with(sample, thresholds),
        level: ThreatLevel::saturating(score),
    }
}

// ============================================================================
// TESTS
// ============================================================================
