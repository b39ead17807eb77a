//! Session Types
//!
//! States, snapshots and tick outcomes of a scan session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::policy::NotificationRequest;
use crate::logic::threat::{SignalBand, ThreatAssessment, ThreatLevel};

// ============================================================================
// STATUS MESSAGES
// ============================================================================

pub const STATUS_READY: &str = "Ready to scan";
pub const STATUS_INITIALIZING: &str = "Initializing scanner...";
pub const STATUS_STOPPED: &str = "Scanning stopped";
pub const STATUS_RESET: &str = "Statistics reset";
pub const STATUS_NO_THREATS: &str = "Scanning... No threats";

// ============================================================================
// CADENCE
// ============================================================================

/// Length of one detection cycle (ticks)
pub const DETECTION_CYCLE_TICKS: u32 = 30;

/// Cycle position where a sample is classified
pub const DETECTION_TICK: u32 = 15;

/// Cycle position where the current detection is cleared
pub const CLEAR_TICK: u32 = 25;

/// Progress status is refreshed every N ticks
pub const PROGRESS_EVERY_TICKS: u32 = 10;

// ============================================================================
// STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Scanning,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Scanning => "scanning",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// DETECTED SIGNAL
// ============================================================================

/// Last emission flagged as a threat, kept for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedSignal {
    pub frequency_hz: u64,
    pub label: String,
    pub band: SignalBand,
    pub signal_strength_dbm: i8,
    pub level: ThreatLevel,
    pub is_threat: bool,
    pub detected_at: DateTime<Utc>,
    /// Session tick at which it was detected
    pub elapsed_ticks: u32,
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Immutable copy of the session, read by the UI once per render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub is_scanning: bool,
    pub elapsed_ticks: u32,
    pub elapsed_secs: u64,
    pub current_assessment: Option<ThreatAssessment>,
    pub signals_found_total: u32,
    pub status_message: String,
    pub scan_id: Option<Uuid>,
    pub total_scans: u32,
    pub last_detection: Option<DetectedSignal>,
}

impl SessionSnapshot {
    /// Level of the current detection, 0 when nothing is detected
    pub fn current_level(&self) -> ThreatLevel {
        self.current_assessment
            .map(|a| a.level)
            .unwrap_or(ThreatLevel::MIN)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// ============================================================================
// TICK OUTCOME
// ============================================================================

/// What a single `tick()` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session is idle, nothing happened
    Idle,
    /// Time advanced, no status change
    Quiet,
    /// Periodic progress status update
    Progress,
    /// Detection slot hit but the sample was not a threat
    NoSignal,
    /// Threat detected, notifier should be invoked
    Detected(NotificationRequest),
    /// Current detection cleared
    Cleared,
}

impl TickOutcome {
    pub fn notification(&self) -> Option<&NotificationRequest> {
        match self {
            TickOutcome::Detected(request) => Some(request),
            _ => None,
        }
    }
}
