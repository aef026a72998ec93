//! Correlation estimator, bootstrap engine and sample summaries.

mod bootstrap;
mod correlation;
mod summary;

pub use bootstrap::{BootstrapResult, bootstrap, bootstrap_correlation, resample_indices};
pub use correlation::correlation;
pub use summary::{
    ConfidenceSummary, NormalApproximation, confidence_interval, exact_equality_count,
    probability_above, probability_below, quantile,
};
