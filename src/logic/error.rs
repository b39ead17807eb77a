//! Error handling

use thiserror::Error;

pub type ScanResult<T> = Result<T, ScanError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// A core invariant was broken (defect, not user-recoverable)
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// An external collaborator (notifier, renderer) failed
    #[error("collaborator failure: {0}")]
    Collaborator(String),

    /// The scan loop has shut down and no longer accepts commands
    #[error("scan loop is closed")]
    LoopClosed,

    /// A worker thread could not be spawned or panicked
    #[error("scan thread error: {0}")]
    Thread(String),

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl<T> From<crossbeam::channel::SendError<T>> for ScanError {
    fn from(_: crossbeam::channel::SendError<T>) -> Self {
        ScanError::LoopClosed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ScanError::InvariantViolation("level 7".into()).to_string(),
            "invariant violation: level 7"
        );
        assert_eq!(ScanError::LoopClosed.to_string(), "scan loop is closed");
    }

    #[test]
    fn test_send_error_maps_to_loop_closed() {
        let (tx, rx) = crossbeam::channel::unbounded::<u8>();
        drop(rx);
        let err: ScanError = tx.send(1).unwrap_err().into();
        assert_eq!(err, ScanError::LoopClosed);
    }
}
