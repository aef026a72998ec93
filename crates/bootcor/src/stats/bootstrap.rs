//! Nonparametric bootstrap over row indices.
//!
//! Each resample draws N row indices uniformly with replacement, gathers the
//! paired values for those rows and re-applies the estimator. The random
//! stream is created from the caller's seed at the start of every call and
//! advances strictly in loop order, so a fixed `(data, seed, n_sim)` always
//! yields the same sample sequence.

use log::debug;
use serde::{Deserialize, Serialize};

use super::correlation::correlation;
use super::summary::ConfidenceSummary;
use crate::config::{BootstrapConfig, SummaryConfig};
use crate::dataset::Dataset;
use crate::error::{BootcorError, Result};

/// Output of one bootstrap run over a column pair.
///
/// The sample sequence is fixed once the run completes; summaries are
/// derived views computed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapResult {
    x: String,
    y: String,
    point_estimate: f64,
    samples: Vec<f64>,
    n_obs: usize,
    seed: u64,
}

impl BootstrapResult {
    /// Name of the first column.
    pub fn x(&self) -> &str {
        &self.x
    }

    /// Name of the second column.
    pub fn y(&self) -> &str {
        &self.y
    }

    /// Statistic on the original, unresampled data.
    pub fn point_estimate(&self) -> f64 {
        self.point_estimate
    }

    /// Resampled statistics in draw order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn n_sim(&self) -> usize {
        self.samples.len()
    }

    /// Number of observations in the original data.
    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Interval and directional confidence for this run.
    pub fn summary(&self, config: &SummaryConfig) -> Result<ConfidenceSummary> {
        ConfidenceSummary::new(self.point_estimate, &self.samples, config)
    }
}

/// Draw `n` row indices uniformly with replacement from `0..n`.
pub fn resample_indices(n: usize, rng: &mut fastrand::Rng) -> Vec<usize> {
    let mut indices = vec![0; n];
    fill_indices(&mut indices, rng);
    indices
}

fn fill_indices(out: &mut [usize], rng: &mut fastrand::Rng) {
    let n = out.len();
    for slot in out.iter_mut() {
        *slot = rng.usize(0..n);
    }
}

/// Bootstrap an arbitrary paired statistic.
///
/// `estimator` is applied once to the original columns (the point estimate)
/// and then once per resample. Preconditions are checked before any
/// resampling. An estimator error on any resample aborts the whole run;
/// degenerate resamples are never skipped or redrawn, since that would bias
/// the sample toward non-degenerate draws.
pub fn bootstrap<F>(
    data: &Dataset,
    col_x: &str,
    col_y: &str,
    estimator: F,
    config: &BootstrapConfig,
) -> Result<BootstrapResult>
where
    F: Fn(&[f64], &[f64]) -> Result<f64>,
{
    config.validate()?;
    let (x, y) = data.pair(col_x, col_y)?;
    let n = x.len();
    if n < 2 {
        return Err(BootcorError::InvalidInput(format!(
            "bootstrap needs at least 2 rows, got {n}"
        )));
    }
    if y.len() != n {
        return Err(BootcorError::InvalidInput(format!(
            "columns '{col_x}' and '{col_y}' differ in length ({n} vs {})",
            y.len()
        )));
    }

    let point_estimate = estimator(x, y).map_err(|e| name_degenerate(e, col_x, col_y))?;

    debug!(
        "bootstrap {col_x} ~ {col_y}: n={n}, n_sim={}, seed={}, estimate={point_estimate:.6}",
        config.n_sim, config.seed
    );

    let mut rng = fastrand::Rng::with_seed(config.seed);
    let mut indices = vec![0usize; n];
    let mut xs = vec![0.0; n];
    let mut ys = vec![0.0; n];
    let mut samples = Vec::with_capacity(config.n_sim);

    for iteration in 0..config.n_sim {
        fill_indices(&mut indices, &mut rng);
        for (slot, &row) in indices.iter().enumerate() {
            xs[slot] = x[row];
            ys[slot] = y[row];
        }

        let value = estimator(&xs, &ys).map_err(|e| {
            debug!("resample {iteration} of {col_x} ~ {col_y} failed: {e}");
            name_degenerate(e, col_x, col_y)
        })?;
        samples.push(value);
    }

    debug!("bootstrap {col_x} ~ {col_y}: collected {} samples", samples.len());

    Ok(BootstrapResult {
        x: col_x.to_string(),
        y: col_y.to_string(),
        point_estimate,
        samples,
        n_obs: n,
        seed: config.seed,
    })
}

/// Bootstrap the product-moment correlation of two columns.
pub fn bootstrap_correlation(
    data: &Dataset,
    col_x: &str,
    col_y: &str,
    config: &BootstrapConfig,
) -> Result<BootstrapResult> {
    bootstrap(data, col_x, col_y, correlation, config)
}

/// Replace the estimator's positional `x`/`y` label with the column name.
fn name_degenerate(err: BootcorError, col_x: &str, col_y: &str) -> BootcorError {
    match err {
        BootcorError::DegenerateInput { column } => {
            let column = match column.as_str() {
                "x" => col_x.to_string(),
                "y" => col_y.to_string(),
                _ => column,
            };
            BootcorError::DegenerateInput { column }
        }
        other => other,
    }
}
