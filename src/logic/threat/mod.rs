//! Threat Module
//!
//! Decides whether a radio sample is a surveillance-device emission and
//! scores its severity on a 0-4 scale.
//!
//! ## Structure
//! - `types`: Core types (Sample, ThreatLevel, ThreatAssessment, SignalBand)
//! - `catalog`: Known camera frequencies
//! - `rules`: Thresholds and constants
//! - `classifier`: Classification logic
//!
//! ## Usage
//! ```
//! use spy_camera_detector::logic::threat::{classify, Sample};
//!
//! let result = classify(&Sample::new(433_920_000, -80));
//! assert!(result.is_threat);
//! assert_eq!(result.level.value(), 3);
//! ```

pub mod types;
pub mod catalog;
pub mod rules;
pub mod classifier;

// Re-export main types for convenience
pub use types::{
    Sample,
    SignalBand,
    ThreatAssessment,
    ThreatLevel,
};

pub use catalog::{FrequencyEntry, CATALOG_SIZE};

pub use rules::{
    ClassificationThresholds,
    SIGNAL_THRESHOLD_DBM,
};

pub use classifier::{classify, classify_with_thresholds, is_threat, is_threat_with};
