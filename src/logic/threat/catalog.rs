//! Frequency Catalog
//!
//! Fixed table of frequencies commonly used by wireless cameras and
//! surveillance devices. Exact-match lookup only.

use serde::Serialize;

/// One known threat frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub frequency_hz: u64,
    pub label: &'static str,
}

impl FrequencyEntry {
    const fn new(frequency_hz: u64, label: &'static str) -> Self {
        Self { frequency_hz, label }
    }
}

pub const CATALOG_SIZE: usize = 12;

static CATALOG: [FrequencyEntry; CATALOG_SIZE] = [
    // 2.4GHz cameras
    FrequencyEntry::new(2_400_000_000, "2.4GHz Cam"),
    FrequencyEntry::new(2_412_000_000, "2.4GHz WiFi"),
    FrequencyEntry::new(2_422_000_000, "2.4GHz Dev"),
    FrequencyEntry::new(2_437_000_000, "2.4GHz Cam"),
    FrequencyEntry::new(2_452_000_000, "2.4GHz Dev"),
    FrequencyEntry::new(2_462_000_000, "2.4GHz Cam"),
    // 5GHz cameras
    FrequencyEntry::new(5_180_000_000, "5GHz Cam"),
    FrequencyEntry::new(5_200_000_000, "5GHz WiFi"),
    FrequencyEntry::new(5_240_000_000, "5GHz Cam"),
    FrequencyEntry::new(5_745_000_000, "5GHz Dev"),
    // Analog wireless cameras
    FrequencyEntry::new(240_000_000, "240MHz Cam"),
    // Common surveillance frequency
    FrequencyEntry::new(433_920_000, "433MHz Dev"),
];

/// All catalog entries, in table order
pub fn entries() -> &'static [FrequencyEntry] {
    &CATALOG
}

/// Exact-match lookup
pub fn lookup(frequency_hz: u64) -> Option<&'static FrequencyEntry> {
    CATALOG.iter().find(|e| e.frequency_hz == frequency_hz)
}

pub fn contains(frequency_hz: u64) -> bool {
    lookup(frequency_hz).is_some()
}
