//! Policy Module
//!
//! Maps a threat level to how strongly the user should be alerted.
//! The notifier owns the actual haptic/LED/audio rendering.
//!
//! ## Structure
//! - `types`: Core types (NotificationIntensity, FeedbackPattern, NotificationRequest)
//! - `engine`: Decision logic

pub mod types;
pub mod engine;

pub use types::{
    FeedbackPattern,
    LedBlink,
    NotificationIntensity,
    NotificationRequest,
    Vibration,
};

pub use engine::{decide, request_for, HIGH_INTENSITY_MIN_LEVEL};
