//! Notifier - boundary to the platform feedback layer
//!
//! The core only produces `NotificationRequest`s; a `Notifier` turns them
//! into vibration/LED/sound. Failures stay on this side of the boundary.

use std::sync::Arc;

use parking_lot::Mutex;

use super::error::ScanResult;
use super::policy::{LedBlink, NotificationRequest, Vibration};

pub trait Notifier: Send {
    /// Play feedback for one detection
    fn notify(&mut self, request: &NotificationRequest) -> ScanResult<()>;

    /// Scan stopped: cancel any ongoing blink
    fn stop(&mut self) -> ScanResult<()> {
        Ok(())
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&mut self, request: &NotificationRequest) -> ScanResult<()> {
        (**self).notify(request)
    }

    fn stop(&mut self) -> ScanResult<()> {
        (**self).stop()
    }
}

// ============================================================================
// LOG NOTIFIER
// ============================================================================

/// Describes the feedback through the `log` facade
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, request: &NotificationRequest) -> ScanResult<()> {
        let pattern = request.intensity.feedback();
        let vibration = match pattern.vibration {
            Vibration::Single => "single vibration",
            Vibration::Sustained => "vibration on",
        };
        let led = match pattern.led {
            LedBlink::Blue => "blue blink",
            LedBlink::FastRed => "fast red blink",
        };

        log::info!(
            "🔔 [{}] {} | {} + {}{}",
            request.intensity,
            request.message,
            vibration,
            led,
            if pattern.audible_alert { " + alert sound" } else { "" }
        );
        Ok(())
    }

    fn stop(&mut self) -> ScanResult<()> {
        log::debug!("Blink stopped");
        Ok(())
    }
}

// ============================================================================
// RECORDING NOTIFIER
// ============================================================================

/// Keeps every request; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    requests: Arc<Mutex<Vec<NotificationRequest>>>,
    stops: Arc<Mutex<u32>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<NotificationRequest> {
        self.requests.lock().clone()
    }

    pub fn stop_count(&self) -> u32 {
        *self.stops.lock()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, request: &NotificationRequest) -> ScanResult<()> {
        self.requests.lock().push(request.clone());
        Ok(())
    }

    fn stop(&mut self) -> ScanResult<()> {
        *self.stops.lock() += 1;
        Ok(())
    }
}
