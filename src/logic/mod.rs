//! Logic Module - scan engine
//!
//! ## Structure
//! - `threat/` - Frequency catalog + classification
//! - `policy/` - Detection -> notification intensity
//! - `session/` - Scan session state machine
//! - `source` - Sample producers (simulated radio)
//! - `notifier` - Feedback boundary
//! - `scan_loop` - Timer/input message passing around one session
//! - `display` - Screen indicators from snapshots

pub mod config;
pub mod error;

pub mod threat;
pub mod policy;
pub mod session;
pub mod source;
pub mod notifier;
pub mod scan_loop;
pub mod display;

pub use config::ScanConfig;
pub use error::{ScanError, ScanResult};
