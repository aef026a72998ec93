//! Percentile intervals and directional confidence over a statistic sample.
//!
//! Everything here is a pure function of the sample; nothing is cached on
//! the bootstrap result.

use serde::{Deserialize, Serialize};
use statrs::function::erf::erfc;

use super::correlation::is_constant;
use crate::config::{SummaryConfig, validate_alpha};
use crate::error::{BootcorError, Result};

/// Empirical quantile using linear interpolation between order statistics
/// (type 7 in Hyndman & Fan, the default of most statistics packages).
pub fn quantile(samples: &[f64], p: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&p) {
        return Err(BootcorError::InvalidInput(format!(
            "quantile probability must be in [0, 1], got {p}"
        )));
    }
    let sorted = sorted_copy(samples)?;
    Ok(quantile_sorted(&sorted, p))
}

fn sorted_copy(samples: &[f64]) -> Result<Vec<f64>> {
    if samples.is_empty() {
        return Err(BootcorError::InvalidInput(
            "statistic sample is empty".to_string(),
        ));
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    Ok(sorted)
}

/// Type-7 quantile of already sorted, non-empty data.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = h - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Two-sided `(1 - alpha)` percentile interval: the `alpha/2` and
/// `1 - alpha/2` empirical quantiles.
pub fn confidence_interval(samples: &[f64], alpha: f64) -> Result<(f64, f64)> {
    validate_alpha(alpha)?;
    let sorted = sorted_copy(samples)?;
    let lower = quantile_sorted(&sorted, alpha / 2.0);
    let upper = quantile_sorted(&sorted, 1.0 - alpha / 2.0);
    Ok((lower, upper))
}

/// Fraction of samples strictly below `threshold`.
///
/// This is the empirical probability that the statistic lies below the
/// threshold; no distributional shape is assumed. Returns NaN for an empty
/// sample.
pub fn probability_below(samples: &[f64], threshold: f64) -> f64 {
    let below = samples.iter().filter(|&&s| s < threshold).count();
    below as f64 / samples.len() as f64
}

/// Fraction of samples strictly above `threshold`.
pub fn probability_above(samples: &[f64], threshold: f64) -> f64 {
    let above = samples.iter().filter(|&&s| s > threshold).count();
    above as f64 / samples.len() as f64
}

/// Raw count of samples exactly equal to `value`.
///
/// For a continuous statistic this is expected to be about zero and carries
/// no information about confidence. It is exposed for diagnostics only.
pub fn exact_equality_count(samples: &[f64], value: f64) -> usize {
    samples.iter().filter(|&&s| s == value).count()
}

/// Normal-theory approximation fitted to the sample by its mean and
/// standard deviation.
///
/// Provided for comparison with the empirical figures only; it assumes the
/// sampling distribution is normal, which the bootstrap itself does not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalApproximation {
    /// Mean of the statistic sample.
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std_dev: f64,
    /// Normal CDF of the threshold under the fitted mean and deviation.
    pub probability_below: f64,
}

impl NormalApproximation {
    /// Fit to `samples`. `None` with fewer than two samples or zero spread.
    pub fn fit(samples: &[f64], threshold: f64) -> Option<Self> {
        let n = samples.len();
        // Rounding in the mean leaves a tiny residue for constant samples
        if n < 2 || is_constant(samples) {
            return None;
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let ss: f64 = samples.iter().map(|s| (s - mean).powi(2)).sum();
        let std_dev = (ss / (n - 1) as f64).sqrt();
        if std_dev.is_nan() || std_dev <= 0.0 {
            return None;
        }

        let z = (threshold - mean) / std_dev;
        Some(Self {
            mean,
            std_dev,
            probability_below: normal_cdf(z),
        })
    }
}

fn normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / std::f64::consts::SQRT_2)
}

/// Derived view over a statistic sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSummary {
    /// Statistic on the original data (not the sample mean).
    pub point_estimate: f64,
    /// Two-sided alpha of the interval.
    pub alpha: f64,
    /// Lower percentile bound.
    pub lower: f64,
    /// Upper percentile bound.
    pub upper: f64,
    /// Threshold for the directional statements.
    pub threshold: f64,
    /// Empirical P(statistic < threshold).
    pub probability_below: f64,
    /// Empirical P(statistic > threshold).
    pub probability_above: f64,
    /// Samples exactly equal to the threshold; not a confidence measure.
    pub exact_threshold_count: usize,
    /// Number of samples summarised.
    pub n_sim: usize,
    /// Normal-theory comparison figures, when the sample has spread.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_approximation: Option<NormalApproximation>,
}

impl ConfidenceSummary {
    pub fn new(point_estimate: f64, samples: &[f64], config: &SummaryConfig) -> Result<Self> {
        config.validate()?;
        let (lower, upper) = confidence_interval(samples, config.alpha)?;
        let threshold = config.threshold;

        Ok(Self {
            point_estimate,
            alpha: config.alpha,
            lower,
            upper,
            threshold,
            probability_below: probability_below(samples, threshold),
            probability_above: probability_above(samples, threshold),
            exact_threshold_count: exact_equality_count(samples, threshold),
            n_sim: samples.len(),
            normal_approximation: NormalApproximation::fit(samples, threshold),
        })
    }

    /// Nominal coverage, e.g. 0.9.
    pub fn confidence_level(&self) -> f64 {
        1.0 - self.alpha
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `value` lies inside the closed interval.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}
