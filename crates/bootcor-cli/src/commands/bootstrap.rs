//! Bootstrap command - percentile intervals for one or more column pairs.

use std::path::PathBuf;

use bootcor::{
    AnalysisConfig, AnalysisReport, Analyzer, BootstrapConfig, PairReport, ParserConfig,
    SummaryConfig, VariablePair,
};
use colored::Colorize;

/// Arguments of the bootstrap command.
pub struct Options {
    pub file: PathBuf,
    pub pairs: Vec<VariablePair>,
    pub n_sim: usize,
    pub seed: u64,
    pub alpha: f64,
    pub threshold: f64,
    pub output: Option<PathBuf>,
    pub json: bool,
}

pub fn run(
    options: Options,
    parser: ParserConfig,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !options.file.exists() {
        return Err(format!("File not found: {}", options.file.display()).into());
    }

    let config = AnalysisConfig {
        parser,
        bootstrap: BootstrapConfig::new(options.n_sim, options.seed),
        summary: SummaryConfig::default()
            .with_alpha(options.alpha)
            .with_threshold(options.threshold),
    };

    if !options.json {
        println!(
            "{} {} ({} resamples, seed {})",
            "Bootstrapping".cyan().bold(),
            options.file.display().to_string().white(),
            options.n_sim,
            options.seed
        );
    }

    let report = Analyzer::with_config(config).analyze_file(&options.file, &options.pairs)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, verbose);
    }

    if let Some(path) = options.output {
        report.save(&path)?;
        if !options.json {
            println!();
            println!(
                "{} {}",
                "Saved to".green().bold(),
                path.display().to_string().white()
            );
        }
    }

    Ok(())
}

fn print_report(report: &AnalysisReport, verbose: bool) {
    if verbose {
        if let Some(source) = &report.source {
            println!("  source: {} ({}, {} rows)", source.hash, source.format, source.row_count);
        }
    }

    for pair in &report.pairs {
        println!();
        print_pair(pair, verbose);
    }
}

fn print_pair(pair: &PairReport, verbose: bool) {
    let result = &pair.result;
    let summary = &pair.summary;

    println!(
        "{}",
        format!("{} ~ {}", result.x(), result.y()).yellow().bold()
    );
    println!(
        "  r = {}  (n = {})",
        format!("{:.4}", summary.point_estimate).white().bold(),
        result.n_obs()
    );
    println!(
        "  {:.0}% CI: [{:.4}, {:.4}]",
        summary.confidence_level() * 100.0,
        summary.lower,
        summary.upper
    );
    println!(
        "  P(r < {}) = {:.3}   P(r > {}) = {:.3}",
        summary.threshold, summary.probability_below, summary.threshold, summary.probability_above
    );

    if let Some(approx) = &summary.normal_approximation {
        println!(
            "  {}",
            format!(
                "normal approximation: mean {:.4}, sd {:.4}, P(r < {}) = {:.3}",
                approx.mean, approx.std_dev, summary.threshold, approx.probability_below
            )
            .dimmed()
        );
    }

    if verbose {
        println!(
            "  {}",
            format!(
                "samples equal to {}: {} (expected ~0, not a confidence measure)",
                summary.threshold, summary.exact_threshold_count
            )
            .dimmed()
        );
    }
}
