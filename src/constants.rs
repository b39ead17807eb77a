//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Runtime overrides are read by `logic::config::ScanConfig`.

/// App name (shown as the screen title)
pub const APP_NAME: &str = "Spy Camera Detector";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timer cadence between two ticks (milliseconds)
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Default run length of the demo shell (seconds, 0 = until Enter)
pub const DEFAULT_RUN_SECS: u64 = 30;

/// Longest accepted timer cadence (milliseconds)
pub const MAX_TICK_INTERVAL_MS: u64 = 60_000;

/// Longest accepted run length of the demo shell (one year, seconds)
pub const MAX_RUN_SECS: u64 = 365 * 24 * 60 * 60;

/// Default number of ticks between two rendered frames
pub const DEFAULT_RENDER_EVERY_TICKS: u32 = 10;

// ============================================
// Environment variable names
// ============================================

pub const ENV_TICK_INTERVAL_MS: &str = "SCAN_TICK_INTERVAL_MS";
pub const ENV_SEED: &str = "SCAN_SEED";
pub const ENV_RUN_SECS: &str = "SCAN_RUN_SECS";
pub const ENV_RENDER_EVERY_TICKS: &str = "SCAN_RENDER_EVERY_TICKS";
pub const ENV_JSON: &str = "SCAN_JSON";
