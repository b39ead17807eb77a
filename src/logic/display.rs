//! Display - screen indicators derived from a session snapshot
//!
//! Pure functions, no drawing. The renderer (terminal in `main.rs`) only
//! lays out what `ScreenModel` says.

use serde::Serialize;

use super::session::SessionSnapshot;
use crate::constants::{APP_NAME, APP_VERSION};

/// Number of bars in the signal-strength glyph
pub const SIGNAL_GLYPH_SLOTS: u8 = 5;

const BAR_WIDTH: usize = 20;

// ============================================================================
// INDICATORS
// ============================================================================

/// Idle-scan progress bar fill (0..=99)
pub fn progress_percent(snapshot: &SessionSnapshot) -> u8 {
    (snapshot.elapsed_ticks % 100) as u8
}

/// Threat bar fill (0..=100)
pub fn threat_bar_percent(snapshot: &SessionSnapshot) -> u8 {
    snapshot.current_level().value() * 25
}

/// Filled bars of the signal glyph
pub fn signal_glyphs(snapshot: &SessionSnapshot) -> u8 {
    snapshot.current_level().value()
}

/// Animated "..." while scanning (0..=3)
pub fn scanning_dots(snapshot: &SessionSnapshot) -> usize {
    ((snapshot.elapsed_ticks / 2) % 4) as usize
}

pub fn stats_line(snapshot: &SessionSnapshot) -> String {
    format!(
        "Signals: {} | Time: {}s",
        snapshot.signals_found_total, snapshot.elapsed_secs
    )
}

// ============================================================================
// SCREEN MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Indicator {
    /// Plain progress bar while nothing is detected
    Progress { percent: u8 },
    /// Threat bar plus signal glyph
    Threat { percent: u8, glyphs: u8, level_text: String },
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenModel {
    pub title: String,
    pub version: String,
    pub left_button: &'static str,
    pub right_button: &'static str,
    pub lines: Vec<String>,
    pub indicator: Indicator,
    pub footer: String,
}

impl ScreenModel {
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        let mut lines = Vec::new();
        let indicator;

        if snapshot.is_scanning {
            lines.push("Status: SCANNING".to_string());
            lines.push(snapshot.status_message.clone());

            if snapshot.current_assessment.is_some() {
                lines.push("THREAT DETECTED!".to_string());
                lines.push("Check area carefully".to_string());
                indicator = Indicator::Threat {
                    percent: threat_bar_percent(snapshot),
                    glyphs: signal_glyphs(snapshot),
                    level_text: format!("Threat Level: {}", snapshot.current_level()),
                };
            } else {
                lines.push("Scanning for signals...".to_string());
                lines.push(".".repeat(scanning_dots(snapshot)));
                indicator = Indicator::Progress {
                    percent: progress_percent(snapshot),
                };
            }
        } else {
            lines.push("Status: READY".to_string());
            lines.push("Press Scan to start".to_string());
            lines.push("detecting spy cameras".to_string());
            if snapshot.signals_found_total > 0 {
                lines.push("Last scan found:".to_string());
                lines.push(format!("{} potential threats", snapshot.signals_found_total));
            }
            indicator = Indicator::None;
        }

        Self {
            title: APP_NAME.to_string(),
            version: format!("v{}", APP_VERSION),
            left_button: "Reset",
            right_button: if snapshot.is_scanning { "Stop" } else { "Scan" },
            lines,
            indicator,
            footer: stats_line(snapshot),
        }
    }

    /// Plain-text frame for terminals
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("== {} {} ==\n", self.title, self.version));
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }

        match &self.indicator {
            Indicator::Progress { percent } => {
                out.push_str(&format!("[{}]\n", bar(*percent)));
            }
            Indicator::Threat { percent, glyphs, level_text } => {
                out.push_str(&format!("[{}] {}\n", bar(*percent), glyph(*glyphs)));
                out.push_str(level_text);
                out.push('\n');
            }
            Indicator::None => {}
        }

        out.push_str(&format!("<{}>  {}  <{}>\n", self.left_button, self.footer, self.right_button));
        out
    }
}

fn bar(percent: u8) -> String {
    let filled = (BAR_WIDTH * usize::from(percent.min(100))) / 100;
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn glyph(filled: u8) -> String {
    (0..SIGNAL_GLYPH_SLOTS)
        .map(|i| if i < filled { '▮' } else { '▯' })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
