//! CLI argument definitions using clap.

use std::path::PathBuf;

use bootcor::{ParserConfig, VariablePair};
use bootcor::config::{DEFAULT_ALPHA, DEFAULT_N_SIM, DEFAULT_SEED};
use clap::{Parser, Subcommand};

/// bootcor: correlation estimates with bootstrap confidence intervals
#[derive(Parser)]
#[command(name = "bootcor")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Field delimiter: a single character or "tab" (default: auto-detect)
    #[arg(short, long, global = true, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Treat the first line as data; columns are named column_1, column_2, ...
    #[arg(long, global = true)]
    pub no_header: bool,
}

impl Cli {
    /// Parser settings selected by the global flags.
    pub fn parser_config(&self) -> ParserConfig {
        let mut config = ParserConfig {
            has_header: !self.no_header,
            ..ParserConfig::default()
        };
        if let Some(delimiter) = self.delimiter {
            config = config.with_delimiter(delimiter);
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the correlation of two columns
    Correlate {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// First column
        #[arg(short, long)]
        x: String,

        /// Second column
        #[arg(short, long)]
        y: String,
    },

    /// Bootstrap confidence intervals for one or more column pairs
    Bootstrap {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column pair as X:Y (repeatable)
        #[arg(short, long = "pair", value_name = "X:Y", required = true, value_parser = parse_pair)]
        pairs: Vec<VariablePair>,

        /// Number of bootstrap resamples
        #[arg(short, long, default_value_t = DEFAULT_N_SIM)]
        n_sim: usize,

        /// Seed for the resampling stream
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Two-sided alpha (0.1 gives a 90% interval)
        #[arg(short, long, default_value_t = DEFAULT_ALPHA)]
        alpha: f64,

        /// Threshold for directional confidence
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        threshold: f64,

        /// Write the full report (including samples) as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the full report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [byte] if byte.is_ascii() && !byte.is_ascii_alphanumeric() => Ok(*byte),
            _ => Err(format!("expected a single punctuation character or 'tab', got '{s}'")),
        },
    }
}

fn parse_pair(s: &str) -> Result<VariablePair, String> {
    s.parse().map_err(|e: bootcor::BootcorError| e.to_string())
}
