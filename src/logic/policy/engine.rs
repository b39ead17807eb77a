//! Policy Engine
//!
//! Decision logic only - no type definitions.
//! Input: ThreatLevel
//! Output: NotificationIntensity / NotificationRequest

use super::types::*;
use crate::logic::threat::{ThreatAssessment, ThreatLevel};

/// Levels at or above this get strong feedback
pub const HIGH_INTENSITY_MIN_LEVEL: u8 = 3;

/// Main policy decision function
pub fn decide(level: ThreatLevel) -> NotificationIntensity {
    if level.value() >= HIGH_INTENSITY_MIN_LEVEL {
        NotificationIntensity::High
    } else {
        NotificationIntensity::Low
    }
}

/// Build the request handed to the notifier for a detection
pub fn request_for(assessment: &ThreatAssessment, message: &str) -> NotificationRequest {
    NotificationRequest {
        level: assessment.level,
        intensity: decide(assessment.level),
        message: message.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn level(raw: u8) -> ThreatLevel {
        ThreatLevel::try_from(raw).unwrap()
    }

    #[test]
    fn test_low_levels() {
        for raw in 0..=2 {
            assert_eq!(decide(level(raw)), NotificationIntensity::Low);
        }
    }

    #[test]
    fn test_high_levels() {
        assert_eq!(decide(level(3)), NotificationIntensity::High);
        assert_eq!(decide(level(4)), NotificationIntensity::High);
    }

    #[test]
    fn test_feedback_patterns() {
        let high = NotificationIntensity::High.feedback();
        assert_eq!(high.led, LedBlink::FastRed);
        assert!(high.audible_alert);

        let low = NotificationIntensity::Low.feedback();
        assert_eq!(low.vibration, Vibration::Single);
        assert_eq!(low.led, LedBlink::Blue);
        assert!(!low.audible_alert);
    }

    #[test]
    fn test_request_for_assessment() {
        let assessment = ThreatAssessment {
            is_threat: true,
            level: level(4),
        };
        let request = request_for(&assessment, "5GHz Cam - 5180 MHz");
        assert_eq!(request.intensity, NotificationIntensity::High);
        assert_eq!(request.level.value(), 4);
        assert_eq!(request.message, "5GHz Cam - 5180 MHz");
    }
}
