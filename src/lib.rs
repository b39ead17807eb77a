//! Spy Camera Detector - scan session core
//!
//! Simulated detection of wireless surveillance devices: a tick-driven scan
//! session classifies radio samples against known camera frequencies and
//! asks a notifier for low or high intensity feedback.

pub mod constants;
pub mod logic;

pub use logic::notifier::{LogNotifier, Notifier, RecordingNotifier};
pub use logic::scan_loop::{ScanHandle, ScanLoop};
pub use logic::session::{ScanSession, SessionSnapshot, SessionState, TickOutcome};
pub use logic::source::{RandomSampleSource, SampleSource, ScriptedSampleSource};
pub use logic::threat::{Sample, ThreatAssessment, ThreatLevel};
pub use logic::{ScanConfig, ScanError, ScanResult};
