//! Threat Classification Rules & Thresholds
//!
//! Thresholds and score weights for classification.
//! No classify logic here - constants and config only.

use serde::{Deserialize, Serialize};

// ============================================================================
// THRESHOLDS (dBm)
// ============================================================================

/// Any signal stronger than this is a threat on its own
pub const SIGNAL_THRESHOLD_DBM: i8 = -75;

/// Stronger than this earns the full strength bonus
pub const STRONG_SIGNAL_DBM: i8 = -60;

/// Stronger than this earns the partial strength bonus
pub const MEDIUM_SIGNAL_DBM: i8 = -70;

// ============================================================================
// SCORE WEIGHTS
// ============================================================================

/// Every classified sample starts here
pub const BASE_LEVEL: u8 = 1;

/// Added when the frequency is a known camera frequency
pub const CATALOG_MATCH_BONUS: u8 = 2;

pub const STRONG_SIGNAL_BONUS: u8 = 2;
pub const MEDIUM_SIGNAL_BONUS: u8 = 1;

// ============================================================================
// CONFIGURABLE THRESHOLDS
// ============================================================================

/// Thresholds for classification (configurable)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    /// Strength above this = threat regardless of frequency
    pub signal_threshold_dbm: i8,
    /// Strength above this = +strong bonus
    pub strong_signal_dbm: i8,
    /// Strength above this = +medium bonus
    pub medium_signal_dbm: i8,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            signal_threshold_dbm: SIGNAL_THRESHOLD_DBM,
            strong_signal_dbm: STRONG_SIGNAL_DBM,
            medium_signal_dbm: MEDIUM_SIGNAL_DBM,
        }
    }
}

impl ClassificationThresholds {
    /// Strength bonus for a given signal strength
    pub fn strength_bonus(&self, signal_strength_dbm: i8) -> u8 {
        if signal_strength_dbm > self.strong_signal_dbm {
            STRONG_SIGNAL_BONUS
        } else if signal_strength_dbm > self.medium_signal_dbm {
            MEDIUM_SIGNAL_BONUS
        } else {
            0
        }
    }
}
