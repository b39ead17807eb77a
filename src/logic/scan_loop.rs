//! Scan Loop - threaded driver for a `ScanSession`
//!
//! One consumer thread owns the session. The ticker thread and the UI only
//! post `ScanCommand`s onto its channel, so the session is never touched
//! from two threads and needs no lock. The latest snapshot is published
//! behind a `RwLock` for renderers.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, Sender};
use crossbeam::select;
use parking_lot::RwLock;

use super::config::ScanConfig;
use super::error::{ScanError, ScanResult};
use super::notifier::Notifier;
use super::session::{ScanSession, SessionSnapshot};
use super::source::RandomSampleSource;

/// Messages accepted by the session thread
#[derive(Debug)]
pub enum ScanCommand {
    Tick,
    Start,
    Stop,
    Toggle,
    Reset,
    /// Reply with a snapshot taken after all earlier commands
    Query(Sender<SessionSnapshot>),
    Shutdown,
}

// ============================================================================
// BUILDER
// ============================================================================

pub struct ScanLoop {
    session: ScanSession,
    notifier: Box<dyn Notifier>,
    tick_interval: Option<Duration>,
}

impl ScanLoop {
    /// Loop without a timer; ticks only arrive through `ScanHandle::tick`
    pub fn new(session: ScanSession, notifier: Box<dyn Notifier>) -> Self {
        Self {
            session,
            notifier,
            tick_interval: None,
        }
    }

    /// Post a tick every `interval` while scanning
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = Some(interval);
        self
    }

    /// Simulated source + timer at the configured cadence
    pub fn from_config(config: &ScanConfig, notifier: Box<dyn Notifier>) -> Self {
        let source = RandomSampleSource::from_seed_option(config.seed);
        let session = ScanSession::new(Box::new(source))
            .with_tick_interval_ms(config.tick_interval_ms);
        Self::new(session, notifier).with_tick_interval(config.tick_interval())
    }

    pub fn spawn(self) -> ScanResult<ScanHandle> {
        self.spawn_with(|body| {
            thread::Builder::new()
                .name("scan-ticker".to_string())
                .spawn(body)
        })
    }

    fn spawn_with<F>(self, spawn_ticker: F) -> ScanResult<ScanHandle>
    where
        F: FnOnce(Box<dyn FnOnce() + Send>) -> io::Result<JoinHandle<()>>,
    {
        let (commands_tx, commands_rx) = channel::unbounded();
        let snapshot = Arc::new(RwLock::new(self.session.snapshot()));
        let scanning = Arc::new(AtomicBool::new(self.session.is_scanning()));

        let session_worker = {
            let snapshot = Arc::clone(&snapshot);
            let scanning = Arc::clone(&scanning);
            let session = self.session;
            let notifier = self.notifier;
            thread::Builder::new()
                .name("scan-session".to_string())
                .spawn(move || run_session(session, notifier, commands_rx, snapshot, scanning))
                .map_err(|e| ScanError::Thread(format!("cannot spawn session thread: {}", e)))?
        };

        let mut workers = Vec::new();
        let mut ticker_stop = None;
        if let Some(interval) = self.tick_interval {
            let (stop_tx, stop_rx) = channel::bounded::<()>(0);
            let commands = commands_tx.clone();
            let scanning = Arc::clone(&scanning);
            let spawned =
                spawn_ticker(Box::new(move || run_ticker(interval, commands, scanning, stop_rx)));

            match spawned {
                Ok(worker) => {
                    workers.push(worker);
                    ticker_stop = Some(stop_tx);
                }
                Err(e) => {
                    // Session thread is already running; take it down first
                    let _ = commands_tx.send(ScanCommand::Shutdown);
                    if session_worker.join().is_err() {
                        log::error!("Scan session thread panicked during shutdown");
                    }
                    return Err(ScanError::Thread(format!("cannot spawn ticker thread: {}", e)));
                }
            }
        }
        workers.push(session_worker);

        Ok(ScanHandle {
            commands: commands_tx,
            snapshot,
            ticker_stop,
            workers,
        })
    }
}

// ============================================================================
// HANDLE
// ============================================================================

/// Input side of a running scan loop
pub struct ScanHandle {
    commands: Sender<ScanCommand>,
    snapshot: Arc<RwLock<SessionSnapshot>>,
    ticker_stop: Option<Sender<()>>,
    workers: Vec<JoinHandle<()>>,
}

impl ScanHandle {
    pub fn start(&self) -> ScanResult<()> {
        self.send(ScanCommand::Start)
    }

    pub fn stop(&self) -> ScanResult<()> {
        self.send(ScanCommand::Stop)
    }

    pub fn toggle(&self) -> ScanResult<()> {
        self.send(ScanCommand::Toggle)
    }

    pub fn reset(&self) -> ScanResult<()> {
        self.send(ScanCommand::Reset)
    }

    /// Post a tick by hand (loops without a timer)
    pub fn tick(&self) -> ScanResult<()> {
        self.send(ScanCommand::Tick)
    }

    /// Last published snapshot, never blocks on the session thread
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.read().clone()
    }

    /// Snapshot taken after every command posted so far has been applied
    pub fn query(&self) -> ScanResult<SessionSnapshot> {
        let (reply_tx, reply_rx) = channel::bounded(1);
        self.send(ScanCommand::Query(reply_tx))?;
        reply_rx.recv().map_err(|_| ScanError::LoopClosed)
    }

    /// Stop scanning, stop the timer and join both threads
    pub fn shutdown(&mut self) -> ScanResult<SessionSnapshot> {
        // Dropping the sender wakes the ticker's select
        self.ticker_stop.take();
        // Already closed is fine: the session thread exits either way
        let _ = self.commands.send(ScanCommand::Shutdown);

        let mut panicked = false;
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                panicked = true;
            }
        }
        if panicked {
            return Err(ScanError::Thread("scan worker panicked".to_string()));
        }

        Ok(self.snapshot())
    }

    fn send(&self, command: ScanCommand) -> ScanResult<()> {
        self.commands.send(command)?;
        Ok(())
    }
}

impl Drop for ScanHandle {
    fn drop(&mut self) {
        if !self.workers.is_empty() {
            if let Err(e) = self.shutdown() {
                log::error!("Scan loop shutdown failed: {}", e);
            }
        }
    }
}

// ============================================================================
// WORKERS
// ============================================================================

fn run_session(
    mut session: ScanSession,
    mut notifier: Box<dyn Notifier>,
    commands: Receiver<ScanCommand>,
    snapshot: Arc<RwLock<SessionSnapshot>>,
    scanning: Arc<AtomicBool>,
) {
    log::info!("Scan session loop started");

    for command in commands.iter() {
        let mut shutdown = false;

        match command {
            ScanCommand::Tick => {
                let was_scanning = session.is_scanning();
                let outcome = session.tick();
                if let Some(request) = outcome.notification() {
                    if let Err(e) = notifier.notify(request) {
                        log::error!("Failed to deliver notification: {}", e);
                    }
                }
                // Session stopped itself (tick counter exhausted)
                if was_scanning && !session.is_scanning() {
                    stop_feedback(notifier.as_mut());
                }
            }
            ScanCommand::Start => {
                session.start();
            }
            ScanCommand::Stop => {
                if session.stop() {
                    stop_feedback(notifier.as_mut());
                }
            }
            ScanCommand::Toggle => {
                let was_scanning = session.is_scanning();
                session.toggle();
                if was_scanning {
                    stop_feedback(notifier.as_mut());
                }
            }
            ScanCommand::Reset => session.reset(),
            ScanCommand::Query(reply) => {
                // Caller may have given up waiting
                let _ = reply.send(session.snapshot());
            }
            ScanCommand::Shutdown => {
                if session.stop() {
                    stop_feedback(notifier.as_mut());
                }
                shutdown = true;
            }
        }

        scanning.store(session.is_scanning(), Ordering::SeqCst);
        *snapshot.write() = session.snapshot();

        if shutdown {
            break;
        }
    }

    log::info!("Scan session loop exited");
}

fn stop_feedback(notifier: &mut dyn Notifier) {
    if let Err(e) = notifier.stop() {
        log::error!("Failed to stop notifier feedback: {}", e);
    }
}

fn run_ticker(
    interval: Duration,
    commands: Sender<ScanCommand>,
    scanning: Arc<AtomicBool>,
    stop: Receiver<()>,
) {
    log::debug!("Scan ticker started ({} ms)", interval.as_millis());
    let ticker = channel::tick(interval);

    loop {
        select! {
            recv(ticker) -> _ => {
                if scanning.load(Ordering::SeqCst) && commands.send(ScanCommand::Tick).is_err() {
                    break;
                }
            }
            recv(stop) -> _ => break,
        }
    }

    log::debug!("Scan ticker stopped");
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::notifier::RecordingNotifier;
    use crate::logic::policy::{NotificationIntensity, NotificationRequest};
    use crate::logic::session::types::STATUS_STOPPED;
    use crate::logic::source::{SampleSource, ScriptedSampleSource};
    use crate::logic::threat::Sample;
    use parking_lot::Mutex;

    /// Notifier whose feedback hardware is unavailable
    #[derive(Clone, Default)]
    struct FailingNotifier {
        attempts: Arc<Mutex<u32>>,
    }

    impl Notifier for FailingNotifier {
        fn notify(&mut self, _request: &NotificationRequest) -> ScanResult<()> {
            *self.attempts.lock() += 1;
            Err(ScanError::Collaborator("vibration motor unavailable".to_string()))
        }

        fn stop(&mut self) -> ScanResult<()> {
            *self.attempts.lock() += 1;
            Err(ScanError::Collaborator("led driver unavailable".to_string()))
        }
    }

    /// Source that reports when the session thread has dropped it
    struct TrackedSource {
        sample: Sample,
        _alive: Arc<()>,
    }

    impl SampleSource for TrackedSource {
        fn next(&mut self) -> Sample {
            self.sample
        }
    }

    fn manual_loop(sample: Sample) -> (ScanHandle, RecordingNotifier) {
        let recorder = RecordingNotifier::new();
        let session = ScanSession::new(Box::new(ScriptedSampleSource::constant(sample)));
        let handle = ScanLoop::new(session, Box::new(recorder.clone()))
            .spawn()
            .unwrap();
        (handle, recorder)
    }

    #[test]
    fn test_commands_applied_in_order() {
        let (mut handle, recorder) = manual_loop(Sample::new(5_180_000_000, -55));

        handle.start().unwrap();
        for _ in 0..15 {
            handle.tick().unwrap();
        }
        let snap = handle.query().unwrap();

        assert!(snap.is_scanning);
        assert_eq!(snap.elapsed_ticks, 15);
        assert_eq!(snap.signals_found_total, 1);
        assert_eq!(snap.status_message, "5GHz Cam - 5180 MHz");

        let requests = recorder.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].intensity, NotificationIntensity::High);
        assert_eq!(requests[0].level.value(), 4);

        handle.shutdown().unwrap();
    }

    #[test]
    fn test_notifier_failures_leave_session_untouched() {
        let sample = Sample::new(433_920_000, -80);
        let (mut working, _) = manual_loop(sample);

        let failing = FailingNotifier::default();
        let session = ScanSession::new(Box::new(ScriptedSampleSource::constant(sample)));
        let mut broken = ScanLoop::new(session, Box::new(failing.clone()))
            .spawn()
            .unwrap();

        for handle in [&working, &broken] {
            handle.start().unwrap();
            for _ in 0..15 {
                handle.tick().unwrap();
            }
        }
        let expected = working.query().unwrap();
        let detected = broken.query().unwrap();

        assert_eq!(*failing.attempts.lock(), 1);
        assert_eq!(detected.signals_found_total, 1);
        assert_eq!(detected.signals_found_total, expected.signals_found_total);
        assert_eq!(detected.current_assessment, expected.current_assessment);
        assert_eq!(detected.status_message, expected.status_message);
        assert_eq!(detected.elapsed_ticks, expected.elapsed_ticks);

        // Loop keeps serving commands after both failures
        broken.stop().unwrap();
        let stopped = broken.query().unwrap();
        assert_eq!(*failing.attempts.lock(), 2);
        assert!(!stopped.is_scanning);
        assert_eq!(stopped.status_message, STATUS_STOPPED);
        assert_eq!(stopped.signals_found_total, 1);

        broken.start().unwrap();
        broken.tick().unwrap();
        assert_eq!(broken.query().unwrap().elapsed_ticks, 1);

        assert!(broken.shutdown().is_ok());
        working.shutdown().unwrap();
    }

    #[test]
    fn test_ticker_spawn_failure_joins_session_thread() {
        let alive = Arc::new(());
        let source = TrackedSource {
            sample: Sample::new(900_000_000, -80),
            _alive: Arc::clone(&alive),
        };
        let session = ScanSession::new(Box::new(source));

        let result = ScanLoop::new(session, Box::new(RecordingNotifier::new()))
            .with_tick_interval(Duration::from_millis(10))
            .spawn_with(|_body| Err(io::Error::new(io::ErrorKind::Other, "thread limit reached")));

        assert!(matches!(result, Err(ScanError::Thread(_))));
        // The session (and its source) is gone once the thread was joined
        assert_eq!(Arc::strong_count(&alive), 1);
    }

    #[test]
    fn test_published_snapshot_matches_query() {
        let (mut handle, _) = manual_loop(Sample::new(900_000_000, -80));
        handle.start().unwrap();
        handle.tick().unwrap();
        let queried = handle.query().unwrap();
        assert_eq!(handle.snapshot(), queried);
        handle.shutdown().unwrap();
    }

    #[test]
    fn test_stop_signals_notifier() {
        let (mut handle, recorder) = manual_loop(Sample::new(900_000_000, -80));
        handle.toggle().unwrap();
        handle.toggle().unwrap();
        handle.stop().unwrap();
        let snap = handle.query().unwrap();

        assert!(!snap.is_scanning);
        assert_eq!(recorder.stop_count(), 1);
        handle.shutdown().unwrap();
    }

    #[test]
    fn test_reset_through_handle() {
        let (mut handle, _) = manual_loop(Sample::new(433_920_000, -70));
        handle.start().unwrap();
        for _ in 0..20 {
            handle.tick().unwrap();
        }
        handle.reset().unwrap();
        let snap = handle.query().unwrap();
        assert_eq!(snap.elapsed_ticks, 0);
        assert_eq!(snap.signals_found_total, 0);
        assert!(snap.is_scanning);
        handle.shutdown().unwrap();
    }

    #[test]
    fn test_shutdown_stops_scanning_and_closes() {
        let (mut handle, recorder) = manual_loop(Sample::new(900_000_000, -80));
        handle.start().unwrap();

        let last = handle.shutdown().unwrap();
        assert!(!last.is_scanning);
        assert_eq!(recorder.stop_count(), 1);

        assert_eq!(handle.start(), Err(ScanError::LoopClosed));
        assert_eq!(handle.query().unwrap_err(), ScanError::LoopClosed);
        // second shutdown is harmless
        assert!(handle.shutdown().is_ok());
    }

    #[test]
    fn test_timer_drives_ticks_only_while_scanning() {
        let recorder = RecordingNotifier::new();
        let session = ScanSession::new(Box::new(ScriptedSampleSource::constant(
            Sample::new(900_000_000, -80),
        )));
        let mut handle = ScanLoop::new(session, Box::new(recorder))
            .with_tick_interval(Duration::from_millis(2))
            .spawn()
            .unwrap();

        thread::sleep(Duration::from_millis(30));
        assert_eq!(handle.query().unwrap().elapsed_ticks, 0);

        handle.start().unwrap();
        thread::sleep(Duration::from_millis(100));
        handle.stop().unwrap();

        let stopped = handle.query().unwrap();
        assert!(stopped.elapsed_ticks > 0);

        thread::sleep(Duration::from_millis(30));
        assert_eq!(handle.query().unwrap().elapsed_ticks, stopped.elapsed_ticks);

        handle.shutdown().unwrap();
    }

    #[test]
    fn test_from_config_uses_seed() {
        let config = ScanConfig {
            seed: Some(5),
            tick_interval_ms: 1_000,
            ..Default::default()
        };
        let mut handle = ScanLoop::from_config(&config, Box::new(RecordingNotifier::new()))
            .spawn()
            .unwrap();
        let snap = handle.query().unwrap();
        assert!(!snap.is_scanning);
        handle.shutdown().unwrap();
    }
}
