//! Scan Configuration
//!
//! Loaded from environment variables (optionally a `.env` file) with
//! fallback defaults from `constants.rs`.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::error::{ScanError, ScanResult};
use crate::constants::*;

/// Runtime configuration for the scan shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Timer cadence between two ticks (ms)
    pub tick_interval_ms: u64,
    /// Seed for the simulated sample source (None = entropy)
    pub seed: Option<u64>,
    /// How long the demo shell runs (seconds, 0 = until Enter)
    pub run_secs: u64,
    /// Render a frame every N ticks
    pub render_every_ticks: u32,
    /// Emit snapshots as JSON lines instead of text frames
    pub json_output: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
            run_secs: DEFAULT_RUN_SECS,
            render_every_ticks: DEFAULT_RENDER_EVERY_TICKS,
            json_output: false,
        }
    }
}

impl ScanConfig {
    /// Load configuration from `.env` + environment variables
    pub fn from_env() -> ScanResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> ScanResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let tick_interval_ms =
            parse_or(&lookup, ENV_TICK_INTERVAL_MS, defaults.tick_interval_ms)?;
        if tick_interval_ms == 0 || tick_interval_ms > MAX_TICK_INTERVAL_MS {
            return Err(ScanError::Config(format!(
                "{} must be between 1 and {}",
                ENV_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS
            )));
        }

        let run_secs = parse_or(&lookup, ENV_RUN_SECS, defaults.run_secs)?;
        if run_secs > MAX_RUN_SECS {
            return Err(ScanError::Config(format!(
                "{} must be at most {}",
                ENV_RUN_SECS, MAX_RUN_SECS
            )));
        }

        let render_every_ticks =
            parse_or(&lookup, ENV_RENDER_EVERY_TICKS, defaults.render_every_ticks)?;
        if render_every_ticks == 0 {
            return Err(ScanError::Config(format!(
                "{} must be greater than 0",
                ENV_RENDER_EVERY_TICKS
            )));
        }

        let seed = match lookup(ENV_SEED) {
            Some(raw) if !raw.trim().is_empty() => Some(parse_value(ENV_SEED, &raw)?),
            _ => None,
        };

        let json_output = lookup(ENV_JSON)
            .map(|s| {
                let s = s.trim().to_lowercase();
                s == "1" || s == "true" || s == "yes"
            })
            .unwrap_or(defaults.json_output);

        Ok(Self {
            tick_interval_ms,
            seed,
            run_secs,
            render_every_ticks,
            json_output,
        })
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Wall-clock end of the demo run, `None` when it runs until quit
    pub fn deadline_from(&self, now: Instant) -> ScanResult<Option<Instant>> {
        if self.run_secs == 0 {
            return Ok(None);
        }
        now.checked_add(Duration::from_secs(self.run_secs))
            .map(Some)
            .ok_or_else(|| {
                ScanError::Config(format!("{} out of range: {}", ENV_RUN_SECS, self.run_secs))
            })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> ScanResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => parse_value(key, &raw),
        _ => Ok(default),
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> ScanResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| ScanError::Config(format!("{}: cannot parse '{}'", key, raw)))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ScanConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ScanConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ScanConfig::from_lookup(lookup_from(&[
            (ENV_TICK_INTERVAL_MS, "20"),
            (ENV_SEED, "42"),
            (ENV_RUN_SECS, "0"),
            (ENV_RENDER_EVERY_TICKS, "5"),
            (ENV_JSON, "true"),
        ]))
        .unwrap();

        assert_eq!(config.tick_interval_ms, 20);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.run_secs, 0);
        assert_eq!(config.render_every_ticks, 5);
        assert!(config.json_output);
    }

    #[test]
    fn test_invalid_number_is_config_error() {
        let err = ScanConfig::from_lookup(lookup_from(&[(ENV_TICK_INTERVAL_MS, "fast")]))
            .unwrap_err();
        assert!(matches!(err, ScanError::Config(_)));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = ScanConfig::from_lookup(lookup_from(&[(ENV_TICK_INTERVAL_MS, "0")]))
            .unwrap_err();
        assert!(matches!(err, ScanError::Config(_)));
    }

    #[test]
    fn test_interval_above_limit_rejected() {
        let limit = MAX_TICK_INTERVAL_MS.to_string();
        assert!(ScanConfig::from_lookup(lookup_from(&[(ENV_TICK_INTERVAL_MS, &limit)])).is_ok());

        let over = (MAX_TICK_INTERVAL_MS + 1).to_string();
        let err = ScanConfig::from_lookup(lookup_from(&[(ENV_TICK_INTERVAL_MS, &over)]))
            .unwrap_err();
        assert!(matches!(err, ScanError::Config(_)));

        let huge = (u64::MAX / 2 + 1).to_string();
        let err = ScanConfig::from_lookup(lookup_from(&[(ENV_TICK_INTERVAL_MS, &huge)]))
            .unwrap_err();
        assert!(matches!(err, ScanError::Config(_)));
    }

    #[test]
    fn test_run_secs_above_limit_rejected() {
        let max = u64::MAX.to_string();
        let err = ScanConfig::from_lookup(lookup_from(&[(ENV_RUN_SECS, &max)])).unwrap_err();
        assert!(matches!(err, ScanError::Config(_)));

        let limit = MAX_RUN_SECS.to_string();
        let config = ScanConfig::from_lookup(lookup_from(&[(ENV_RUN_SECS, &limit)])).unwrap();
        assert!(config.deadline_from(Instant::now()).unwrap().is_some());
    }

    #[test]
    fn test_deadline() {
        let now = Instant::now();
        let config = ScanConfig { run_secs: 0, ..ScanConfig::default() };
        assert_eq!(config.deadline_from(now).unwrap(), None);

        let config = ScanConfig { run_secs: 30, ..ScanConfig::default() };
        assert_eq!(config.deadline_from(now).unwrap(), Some(now + Duration::from_secs(30)));

        // Built directly, bypassing from_lookup bounds
        let config = ScanConfig { run_secs: u64::MAX, ..ScanConfig::default() };
        assert!(matches!(config.deadline_from(now), Err(ScanError::Config(_))));
    }

    #[test]
    fn test_blank_seed_is_none() {
        let config = ScanConfig::from_lookup(lookup_from(&[(ENV_SEED, "  ")])).unwrap();
        assert!(config.seed.is_none());
    }
}
