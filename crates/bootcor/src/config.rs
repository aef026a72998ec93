//! Run parameters for resampling and interval derivation.

use serde::{Deserialize, Serialize};

use crate::error::{BootcorError, Result};
use crate::input::ParserConfig;

/// Default number of bootstrap resamples.
pub const DEFAULT_N_SIM: usize = 1000;

/// Default seed for the resampling stream.
pub const DEFAULT_SEED: u64 = 314159;

/// Default two-sided alpha (a 90% interval).
pub const DEFAULT_ALPHA: f64 = 0.10;

/// Parameters of a single bootstrap run.
///
/// The seed is an explicit input: two runs with the same seed, `n_sim` and
/// data produce identical sample sequences, and runs never share a stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Number of resamples to draw.
    pub n_sim: usize,
    /// Seed for the pseudorandom stream.
    pub seed: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            n_sim: DEFAULT_N_SIM,
            seed: DEFAULT_SEED,
        }
    }
}

impl BootstrapConfig {
    pub fn new(n_sim: usize, seed: u64) -> Self {
        Self { n_sim, seed }
    }

    pub fn with_n_sim(mut self, n_sim: usize) -> Self {
        self.n_sim = n_sim;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_sim < 1 {
            return Err(BootcorError::InvalidInput(
                "n_sim must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters for summarising a statistic sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Two-sided alpha; the interval covers `1 - alpha`.
    pub alpha: f64,
    /// Threshold for the directional statement P(statistic < threshold).
    pub threshold: f64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            threshold: 0.0,
        }
    }
}

impl SummaryConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_alpha(self.alpha)?;
        if !self.threshold.is_finite() {
            return Err(BootcorError::InvalidInput(format!(
                "threshold must be finite, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_alpha(alpha: f64) -> Result<()> {
    if !(alpha.is_finite() && alpha > 0.0 && alpha < 1.0) {
        return Err(BootcorError::InvalidInput(format!(
            "alpha must be in (0, 1), got {alpha}"
        )));
    }
    Ok(())
}

/// Configuration for a full multi-pair analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Resampling parameters shared by every pair.
    pub bootstrap: BootstrapConfig,
    /// Interval and directional-confidence parameters.
    pub summary: SummaryConfig,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        self.bootstrap.validate()?;
        self.summary.validate()
    }
}
