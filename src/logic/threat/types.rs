//! Threat Types
//!
//! Core types for threat classification.
//! No logic here - data structures only.

use serde::{Deserialize, Serialize};

use crate::logic::error::ScanError;

// ============================================================================
// SAMPLE (one radio reading)
// ============================================================================

/// One frequency + signal strength reading, produced once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub frequency_hz: u64,
    pub signal_strength_dbm: i8,
}

impl Sample {
    pub fn new(frequency_hz: u64, signal_strength_dbm: i8) -> Self {
        Self {
            frequency_hz,
            signal_strength_dbm,
        }
    }

    /// Integer MHz, truncated
    pub fn frequency_mhz(&self) -> u64 {
        self.frequency_hz / 1_000_000
    }
}

// ============================================================================
// THREAT LEVEL
// ============================================================================

/// Threat severity score, always within `0..=4`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ThreatLevel(u8);

impl ThreatLevel {
    pub const MIN: ThreatLevel = ThreatLevel(0);
    pub const MAX: ThreatLevel = ThreatLevel(4);

    /// Clamp any raw score into the valid range
    pub fn saturating(raw: u8) -> Self {
        ThreatLevel(raw.min(Self::MAX.0))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ThreatLevel {
    type Error = ScanError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        if raw <= Self::MAX.0 {
            Ok(ThreatLevel(raw))
        } else {
            Err(ScanError::InvariantViolation(format!(
                "threat level {} outside 0..={}",
                raw,
                Self::MAX.0
            )))
        }
    }
}

impl From<ThreatLevel> for u8 {
    fn from(level: ThreatLevel) -> u8 {
        level.0
    }
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX.0)
    }
}

// ============================================================================
// ASSESSMENT
// ============================================================================

/// Result of classifying one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatAssessment {
    pub is_threat: bool,
    pub level: ThreatLevel,
}

// ============================================================================
// SIGNAL BAND
// ============================================================================

/// Coarse band of a detected emission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalBand {
    Unknown,
    Band2_4GHz,
    Band5GHz,
    SubGhz,
}

impl SignalBand {
    pub fn from_frequency(frequency_hz: u64) -> Self {
        match frequency_hz {
            2_400_000_000..=2_483_500_000 => SignalBand::Band2_4GHz,
            5_150_000_000..=5_925_000_000 => SignalBand::Band5GHz,
            1..=999_999_999 => SignalBand::SubGhz,
            _ => SignalBand::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalBand::Unknown => "unknown",
            SignalBand::Band2_4GHz => "2.4GHz",
            SignalBand::Band5GHz => "5GHz",
            SignalBand::SubGhz => "sub-ghz",
        }
    }
}

impl std::fmt::Display for SignalBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
