//! Session Module
//!
//! One scan session: elapsed time, current detection, statistics and status
//! text. Owned by a single thread; see `scan_loop` for the threaded driver.

pub mod types;
pub mod machine;


pub use types::{
    DetectedSignal,
    SessionSnapshot,
    SessionState,
    TickOutcome,
    DETECTION_CYCLE_TICKS,
    DETECTION_TICK,
    CLEAR_TICK,
};

pub use machine::ScanSession;
