//! Scan Session State Machine
//!
//! Idle <-> Scanning, advanced once per timer tick. Every 30 ticks there is
//! one detection slot (position 15) and one clearing slot (position 25).

use chrono::Utc;
use uuid::Uuid;

use super::types::*;
use crate::constants::DEFAULT_TICK_INTERVAL_MS;
use crate::logic::error::ScanError;
use crate::logic::policy;
use crate::logic::source::SampleSource;
use crate::logic::threat::{
    catalog, classify_with_thresholds, ClassificationThresholds, Sample, SignalBand,
    ThreatAssessment,
};

pub struct ScanSession {
    state: SessionState,
    elapsed_ticks: u32,
    current_assessment: Option<ThreatAssessment>,
    signals_found_total: u32,
    status_message: String,

    scan_id: Option<Uuid>,
    total_scans: u32,
    last_detection: Option<DetectedSignal>,

    tick_interval_ms: u64,
    thresholds: ClassificationThresholds,
    source: Box<dyn SampleSource>,
}

impl ScanSession {
    pub fn new(source: Box<dyn SampleSource>) -> Self {
        Self {
            state: SessionState::Idle,
            elapsed_ticks: 0,
            current_assessment: None,
            signals_found_total: 0,
            status_message: STATUS_READY.to_string(),
            scan_id: None,
            total_scans: 0,
            last_detection: None,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            thresholds: ClassificationThresholds::default(),
            source,
        }
    }

    /// Cadence used to turn ticks into seconds for status text
    pub fn with_tick_interval_ms(mut self, tick_interval_ms: u64) -> Self {
        self.tick_interval_ms = tick_interval_ms.max(1);
        self
    }

    pub fn with_thresholds(mut self, thresholds: ClassificationThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_scanning(&self) -> bool {
        self.state == SessionState::Scanning
    }

    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    pub fn elapsed_secs(&self) -> u64 {
        u64::from(self.elapsed_ticks).saturating_mul(self.tick_interval_ms) / 1000
    }

    pub fn current_assessment(&self) -> Option<ThreatAssessment> {
        self.current_assessment
    }

    pub fn signals_found_total(&self) -> u32 {
        self.signals_found_total
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn total_scans(&self) -> u32 {
        self.total_scans
    }

    pub fn last_detection(&self) -> Option<&DetectedSignal> {
        self.last_detection.as_ref()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            is_scanning: self.is_scanning(),
            elapsed_ticks: self.elapsed_ticks,
            elapsed_secs: self.elapsed_secs(),
            current_assessment: self.current_assessment,
            signals_found_total: self.signals_found_total,
            status_message: self.status_message.clone(),
            scan_id: self.scan_id,
            total_scans: self.total_scans,
            last_detection: self.last_detection.clone(),
        }
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Idle -> Scanning. Returns false (no-op) if already scanning.
    pub fn start(&mut self) -> bool {
        if self.is_scanning() {
            return false;
        }

        let scan_id = Uuid::new_v4();
        self.state = SessionState::Scanning;
        self.elapsed_ticks = 0;
        self.current_assessment = None;
        self.scan_id = Some(scan_id);
        self.total_scans = self.total_scans.saturating_add(1);
        self.set_status(STATUS_INITIALIZING);

        log::info!("Scan {} started (scan #{})", scan_id, self.total_scans);
        self.check_invariants();
        true
    }

    /// Scanning -> Idle. Returns false (no-op) if not scanning.
    pub fn stop(&mut self) -> bool {
        if !self.is_scanning() {
            return false;
        }

        self.state = SessionState::Idle;
        // Statistics and last_detection survive for the Ready screen
        self.current_assessment = None;
        self.set_status(STATUS_STOPPED);

        log::info!(
            "Scan stopped after {} ticks, {} signals found",
            self.elapsed_ticks,
            self.signals_found_total
        );
        self.check_invariants();
        true
    }

    /// Primary button: stop if scanning, start otherwise
    pub fn toggle(&mut self) -> SessionState {
        if self.is_scanning() {
            self.stop();
        } else {
            self.start();
        }
        self.state
    }

    /// Clear statistics in either state; scanning state is kept
    pub fn reset(&mut self) {
        self.signals_found_total = 0;
        self.elapsed_ticks = 0;
        self.current_assessment = None;
        self.last_detection = None;
        self.set_status(STATUS_RESET);

        log::info!("Scan statistics reset ({})", self.state);
        self.check_invariants();
    }

    /// Advance the session by one timer interval
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_scanning() {
            return TickOutcome::Idle;
        }

        let previous = self.elapsed_ticks;
        let Some(next) = previous.checked_add(1) else {
            log::error!(
                "{}",
                ScanError::InvariantViolation(format!("tick counter exhausted at {}", previous))
            );
            self.stop();
            return TickOutcome::Idle;
        };
        self.elapsed_ticks = next;
        let sample = self.source.next();

        let outcome = match self.elapsed_ticks % DETECTION_CYCLE_TICKS {
            DETECTION_TICK => self.evaluate(sample),
            CLEAR_TICK => {
                self.current_assessment = None;
                self.set_status(STATUS_NO_THREATS);
                TickOutcome::Cleared
            }
            _ if self.elapsed_ticks % PROGRESS_EVERY_TICKS == 0 => {
                let status = format!("Scanning... {}s", self.elapsed_secs());
                log::debug!("{}", status);
                self.status_message = status;
                TickOutcome::Progress
            }
            _ => TickOutcome::Quiet,
        };

        debug_assert_eq!(self.elapsed_ticks, previous + 1, "elapsed ticks must advance by one");
        self.check_invariants();
        outcome
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn evaluate(&mut self, sample: Sample) -> TickOutcome {
        let assessment = classify_with_thresholds(&sample, &self.thresholds);
        if !assessment.is_threat {
            log::debug!(
                "No threat at {} MHz ({} dBm)",
                sample.frequency_mhz(),
                sample.signal_strength_dbm
            );
            return TickOutcome::NoSignal;
        }

        let label = catalog::lookup(sample.frequency_hz)
            .map(|e| e.label)
            .unwrap_or("Unknown");

        self.current_assessment = Some(assessment);
        self.signals_found_total = self.signals_found_total.saturating_add(1);
        self.status_message = format!("{} - {} MHz", label, sample.frequency_mhz());
        self.last_detection = Some(DetectedSignal {
            frequency_hz: sample.frequency_hz,
            label: label.to_string(),
            band: SignalBand::from_frequency(sample.frequency_hz),
            signal_strength_dbm: sample.signal_strength_dbm,
            level: assessment.level,
            is_threat: assessment.is_threat,
            detected_at: Utc::now(),
            elapsed_ticks: self.elapsed_ticks,
        });

        let request = policy::request_for(&assessment, &self.status_message);
        log::warn!(
            "[THREAT DETECTED] {} ({} dBm) level {} -> {} alert",
            self.status_message,
            sample.signal_strength_dbm,
            assessment.level,
            request.intensity
        );

        TickOutcome::Detected(request)
    }

    fn set_status(&mut self, status: &str) {
        self.status_message.clear();
        self.status_message.push_str(status);
    }

    fn check_invariants(&self) {
        debug_assert!(
            self.is_scanning() || self.current_assessment.is_none(),
            "assessment present while idle"
        );
        debug_assert!(
            self.current_assessment
                .map_or(true, |a| a.level.value() <= 4),
            "threat level out of range"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::source::ScriptedSampleSource;

    fn scanning_session() -> ScanSession {
        let sample = Sample::new(900_000_000, -80);
        let mut session = ScanSession::new(Box::new(ScriptedSampleSource::constant(sample)));
        session.start();
        session
    }

    #[test]
    fn test_tick_counter_exhaustion_stops_scan() {
        let mut session = scanning_session();
        session.elapsed_ticks = u32::MAX - 1;

        session.tick();
        assert_eq!(session.elapsed_ticks(), u32::MAX);
        assert!(session.is_scanning());

        assert_eq!(session.tick(), TickOutcome::Idle);
        assert_eq!(session.elapsed_ticks(), u32::MAX);
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.status_message(), STATUS_STOPPED);

        // A fresh scan starts counting from zero again
        session.start();
        session.tick();
        assert_eq!(session.elapsed_ticks(), 1);
    }

    #[test]
    fn test_elapsed_secs_saturates_on_huge_interval() {
        let mut session = scanning_session().with_tick_interval_ms(u64::MAX / 2 + 1);
        session.tick();
        session.tick();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.elapsed_ticks, 2);
        assert_eq!(snapshot.elapsed_secs, u64::MAX / 1000);
    }
}
