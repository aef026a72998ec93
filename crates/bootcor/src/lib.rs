//! bootcor: product-moment correlation with nonparametric bootstrap
//! confidence intervals.
//!
//! The correlation is computed directly from centered sums. Its sampling
//! uncertainty is estimated by resampling rows with replacement, recomputing
//! the statistic on each resample, and reading percentile intervals and
//! directional probabilities off the resulting sample.
//!
//! # Example
//!
//! ```
//! use bootcor::{BootstrapConfig, Dataset, SummaryConfig, bootstrap_correlation};
//!
//! let data = Dataset::new()
//!     .with_column("age", vec![23.0, 35.0, 41.0, 52.0, 29.0, 64.0, 47.0, 38.0, 58.0, 31.0])?
//!     .with_column("progressivism", vec![4.1, 3.2, 3.9, 2.8, 4.4, 2.5, 3.0, 3.6, 2.6, 4.0])?;
//!
//! let config = BootstrapConfig::new(200, 314159);
//! let result = bootstrap_correlation(&data, "age", "progressivism", &config)?;
//! let summary = result.summary(&SummaryConfig::default())?;
//!
//! println!("r = {:.3}", result.point_estimate());
//! println!("90% CI: [{:.3}, {:.3}]", summary.lower, summary.upper);
//! println!("P(r < 0) = {:.3}", summary.probability_below);
//! # Ok::<(), bootcor::BootcorError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod input;
pub mod stats;

pub use analysis::{AnalysisReport, Analyzer, PairReport, VariablePair};
pub use config::{AnalysisConfig, BootstrapConfig, SummaryConfig};
pub use dataset::Dataset;
pub use error::{BootcorError, Result};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use stats::{
    BootstrapResult, ConfidenceSummary, NormalApproximation, bootstrap, bootstrap_correlation,
    confidence_interval, correlation, exact_equality_count, probability_above, probability_below,
    quantile,
};
