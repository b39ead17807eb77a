//! Policy Types
//!
//! Core types for notification decisions.
//! No logic here - data structures only.

use serde::{Deserialize, Serialize};

use crate::logic::threat::ThreatLevel;

// ============================================================================
// INTENSITY
// ============================================================================

/// How loudly the notifier should react to a detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationIntensity {
    /// Subtle feedback
    Low,
    /// Strong feedback
    High,
}

impl NotificationIntensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationIntensity::Low => "low",
            NotificationIntensity::High => "high",
        }
    }

    /// Platform feedback pattern the notifier should play
    pub fn feedback(&self) -> FeedbackPattern {
        match self {
            NotificationIntensity::High => FeedbackPattern {
                vibration: Vibration::Sustained,
                led: LedBlink::FastRed,
                audible_alert: true,
            },
            NotificationIntensity::Low => FeedbackPattern {
                vibration: Vibration::Single,
                led: LedBlink::Blue,
                audible_alert: false,
            },
        }
    }
}

impl std::fmt::Display for NotificationIntensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// FEEDBACK PATTERN
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vibration {
    Single,
    Sustained,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedBlink {
    Blue,
    FastRed,
}

/// Abstract haptic/LED/audio description, rendered by the notifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackPattern {
    pub vibration: Vibration,
    pub led: LedBlink,
    pub audible_alert: bool,
}

// ============================================================================
// REQUEST
// ============================================================================

/// Emitted by the session on each detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub level: ThreatLevel,
    pub intensity: NotificationIntensity,
    /// Status text at the time of detection, e.g. "433MHz Dev - 433 MHz"
    pub message: String,
}
