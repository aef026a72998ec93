//! Multi-pair analysis driver and persisted reports.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, BootstrapConfig, SummaryConfig};
use crate::dataset::Dataset;
use crate::error::{BootcorError, Result};
use crate::input::{Parser, SourceMetadata};
use crate::stats::{BootstrapResult, ConfidenceSummary, bootstrap_correlation};

/// Two column names analysed together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariablePair {
    pub x: String,
    pub y: String,
}

impl VariablePair {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

impl fmt::Display for VariablePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.x, self.y)
    }
}

impl FromStr for VariablePair {
    type Err = BootcorError;

    /// Parses `x:y`.
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((x, y)) if !x.trim().is_empty() && !y.trim().is_empty() && !y.contains(':') => {
                Ok(Self::new(x.trim(), y.trim()))
            }
            _ => Err(BootcorError::Config(format!(
                "expected a column pair as 'x:y', got '{s}'"
            ))),
        }
    }
}

/// Bootstrap output and its summary for one pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairReport {
    pub result: BootstrapResult,
    pub summary: ConfidenceSummary,
}

/// Results of analysing several pairs from one data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Where the data came from, when it was read from a file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    /// Resampling parameters shared by every pair.
    pub bootstrap: BootstrapConfig,
    /// Interval parameters shared by every pair.
    pub summary: SummaryConfig,
    /// One entry per requested pair, in request order.
    pub pairs: Vec<PairReport>,
}

impl AnalysisReport {
    /// Report for a given pair, if it was analysed.
    pub fn pair(&self, x: &str, y: &str) -> Option<&PairReport> {
        self.pairs
            .iter()
            .find(|p| p.result.x() == x && p.result.y() == y)
    }

    /// Write the report as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let io_err = |source| BootcorError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let file = File::create(path).map_err(io_err)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| BootcorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Runs the correlation bootstrap over a list of column pairs.
///
/// Every pair goes through the same routine with the same seed; each call
/// builds its own random stream, so pairs do not influence one another and
/// the order in which they are listed does not change any result.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyse one pair.
    pub fn analyze_pair(&self, data: &Dataset, pair: &VariablePair) -> Result<PairReport> {
        let result = bootstrap_correlation(data, &pair.x, &pair.y, &self.config.bootstrap)?;
        let summary = result.summary(&self.config.summary)?;
        info!(
            "{}: r = {:.4}, {:.0}% CI [{:.4}, {:.4}], P(r < {}) = {:.3}",
            pair,
            summary.point_estimate,
            summary.confidence_level() * 100.0,
            summary.lower,
            summary.upper,
            summary.threshold,
            summary.probability_below
        );
        Ok(PairReport { result, summary })
    }

    /// Analyse every pair of an in-memory dataset. The first failure aborts.
    pub fn analyze_pairs(&self, data: &Dataset, pairs: &[VariablePair]) -> Result<AnalysisReport> {
        self.config.validate()?;
        if pairs.is_empty() {
            return Err(BootcorError::Config("no column pairs requested".to_string()));
        }

        let reports = pairs
            .iter()
            .map(|pair| self.analyze_pair(data, pair))
            .collect::<Result<Vec<_>>>()?;

        Ok(AnalysisReport {
            source: None,
            bootstrap: self.config.bootstrap,
            summary: self.config.summary,
            pairs: reports,
        })
    }

    /// Parse a delimited file and analyse the requested pairs.
    ///
    /// Missing values are removed per pair, so each pair uses every row
    /// complete for its own two columns.
    pub fn analyze_file(
        &self,
        path: impl AsRef<Path>,
        pairs: &[VariablePair],
    ) -> Result<AnalysisReport> {
        self.config.validate()?;
        if pairs.is_empty() {
            return Err(BootcorError::Config("no column pairs requested".to_string()));
        }

        let parser = Parser::with_config(self.config.parser.clone());
        let (table, source) = parser.parse_file(path)?;

        let mut reports = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let data = Dataset::from_table(&table, &[pair.x.as_str(), pair.y.as_str()])?;
            reports.push(self.analyze_pair(&data, pair)?);
        }

        Ok(AnalysisReport {
            source: Some(source),
            bootstrap: self.config.bootstrap,
            summary: self.config.summary,
            pairs: reports,
        })
    }
}
