//! Sample Sources
//!
//! Stand-in for radio hardware: something that yields one `Sample` per tick.
//! `RandomSampleSource` simulates emissions, `ScriptedSampleSource` replays
//! a fixed sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::error::{ScanError, ScanResult};
use super::threat::{catalog, Sample};

/// Weakest simulated signal strength (dBm, inclusive)
pub const SIM_MIN_DBM: i8 = -90;

/// Strongest simulated signal strength (dBm, inclusive)
pub const SIM_MAX_DBM: i8 = -51;

/// Produces one sample per tick
pub trait SampleSource: Send {
    fn next(&mut self) -> Sample;
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn next(&mut self) -> Sample {
        (**self).next()
    }
}

// ============================================================================
// RANDOM
// ============================================================================

/// Uniform strength in `[SIM_MIN_DBM, SIM_MAX_DBM]`, uniform catalog frequency
pub struct RandomSampleSource {
    rng: StdRng,
}

impl RandomSampleSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }
}

impl Default for RandomSampleSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSource for RandomSampleSource {
    fn next(&mut self) -> Sample {
        let signal_strength_dbm = self.rng.gen_range(SIM_MIN_DBM..=SIM_MAX_DBM);
        let entries = catalog::entries();
        let entry = &entries[self.rng.gen_range(0..entries.len())];
        Sample::new(entry.frequency_hz, signal_strength_dbm)
    }
}

// ============================================================================
// SCRIPTED
// ============================================================================

/// Replays a fixed list of samples, wrapping around at the end
#[derive(Debug, Clone)]
pub struct ScriptedSampleSource {
    samples: Vec<Sample>,
    cursor: usize,
}

impl ScriptedSampleSource {
    pub fn new(samples: Vec<Sample>) -> ScanResult<Self> {
        if samples.is_empty() {
            return Err(ScanError::Config(
                "scripted sample source needs at least one sample".to_string(),
            ));
        }
        Ok(Self { samples, cursor: 0 })
    }

    /// Same sample on every tick
    pub fn constant(sample: Sample) -> Self {
        Self {
            samples: vec![sample],
            cursor: 0,
        }
    }

    /// Samples handed out so far
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl SampleSource for ScriptedSampleSource {
    fn next(&mut self) -> Sample {
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        sample
    }
}
