//! Integration tests for the bootstrap engine and the multi-pair analyzer.

mod common;

use std::io::Write;

use tempfile::NamedTempFile;

use bootcor::{
    AnalysisConfig, AnalysisReport, Analyzer, BootcorError, BootstrapConfig, Dataset,
    ParserConfig, SummaryConfig, VariablePair, bootstrap_correlation, confidence_interval, correlation,
    probability_below,
};
use common::{AGE_PROGRESSIVISM_R, SURVEY_ROWS, survey_dataset, to_csv};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn survey_pairs() -> Vec<VariablePair> {
    vec![
        VariablePair::new("age", "progressivism"),
        VariablePair::new("sustainability", "localism"),
        VariablePair::new("sustainability", "progressivism"),
    ]
}

// =============================================================================
// Survey Scenario
// =============================================================================

#[test]
fn test_fixture_has_target_correlation() {
    let data = survey_dataset();
    assert_eq!(data.row_count(), SURVEY_ROWS);

    let (age, prog) = data.pair("age", "progressivism").unwrap();
    let r = correlation(age, prog).unwrap();
    assert!((r - AGE_PROGRESSIVISM_R).abs() < 1e-9, "r = {r}");
}

#[test]
fn test_age_progressivism_bootstrap() {
    let data = survey_dataset();
    let config = BootstrapConfig::new(1000, 314159);
    let result = bootstrap_correlation(&data, "age", "progressivism", &config).unwrap();

    let (age, prog) = data.pair("age", "progressivism").unwrap();
    let direct = correlation(age, prog).unwrap();
    assert!((result.point_estimate() - direct).abs() < 1e-9);
    assert_eq!(result.samples().len(), 1000);

    let (lower, upper) = confidence_interval(result.samples(), 0.10).unwrap();
    assert!(lower <= upper);
    assert!(lower <= AGE_PROGRESSIVISM_R && AGE_PROGRESSIVISM_R <= upper,
        "[{lower}, {upper}] misses {AGE_PROGRESSIVISM_R}");
    // Standard error is about 1 / sqrt(2421) ~ 0.02
    let width = upper - lower;
    assert!(width > 0.03 && width < 0.12, "width = {width}");

    // Roughly two standard errors below zero
    let p = probability_below(result.samples(), 0.0);
    assert!(p > 0.9, "P(r < 0) = {p}");
}

#[test]
fn test_bootstrap_is_reproducible() {
    let data = survey_dataset();
    let config = BootstrapConfig::new(250, 314159);
    let a = bootstrap_correlation(&data, "age", "progressivism", &config).unwrap();
    let b = bootstrap_correlation(&data, "age", "progressivism", &config).unwrap();
    assert_eq!(a.samples(), b.samples());
    assert_eq!(a, b);
}

#[test]
fn test_interval_spread_shrinks_with_more_resamples() {
    // Small slice of the fixture keeps the large-K runs quick
    let full = survey_dataset();
    let data = Dataset::new()
        .with_column("x", full.column("sustainability").unwrap()[..300].to_vec())
        .and_then(|d| d.with_column("y", full.column("localism").unwrap()[..300].to_vec()))
        .unwrap();

    let lower_bound_spread = |n_sim: usize| {
        let lowers: Vec<f64> = (1..=8u64)
            .map(|seed| {
                let result =
                    bootstrap_correlation(&data, "x", "y", &BootstrapConfig::new(n_sim, seed))
                        .unwrap();
                result.summary(&SummaryConfig::default()).unwrap().lower
            })
            .collect();
        let mean = lowers.iter().sum::<f64>() / lowers.len() as f64;
        (lowers.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / lowers.len() as f64).sqrt()
    };

    let coarse = lower_bound_spread(100);
    let fine = lower_bound_spread(2000);
    assert!(fine < coarse, "spread at K=2000 ({fine}) not below K=100 ({coarse})");
}

#[test]
fn test_summary_bounds_within_unit_interval() {
    let data = survey_dataset();
    let result =
        bootstrap_correlation(&data, "sustainability", "progressivism", &BootstrapConfig::new(300, 7))
            .unwrap();
    let summary = result.summary(&SummaryConfig::default().with_alpha(0.05)).unwrap();

    assert!(-1.0 <= summary.lower && summary.upper <= 1.0);
    assert!(summary.contains(0.35));
    assert_eq!(summary.probability_below, 0.0);
    assert_eq!(summary.exact_threshold_count, 0);
    let approx = summary.normal_approximation.expect("sample has spread");
    assert!(approx.probability_below < 1e-6);
}

// =============================================================================
// Degenerate Input
// =============================================================================

#[test]
fn test_constant_column_is_degenerate() {
    let data = survey_dataset();
    let constant = vec![4.0; data.row_count()];
    let data = data.with_column("constant", constant).unwrap();

    let err = bootstrap_correlation(&data, "age", "constant", &BootstrapConfig::default())
        .unwrap_err();
    assert!(matches!(err, BootcorError::DegenerateInput { ref column } if column == "constant"));
}

#[test]
fn test_unknown_column() {
    let data = survey_dataset();
    let err = bootstrap_correlation(&data, "age", "income", &BootstrapConfig::default())
        .unwrap_err();
    assert!(matches!(err, BootcorError::UnknownColumn(ref c) if c == "income"));
}

// =============================================================================
// Analyzer
// =============================================================================

#[test]
fn test_analyze_three_pairs() {
    let data = survey_dataset();
    let config = AnalysisConfig {
        bootstrap: BootstrapConfig::new(200, 314159),
        ..AnalysisConfig::default()
    };
    let report = Analyzer::with_config(config).analyze_pairs(&data, &survey_pairs()).unwrap();

    assert_eq!(report.pairs.len(), 3);
    for pair in &report.pairs {
        assert_eq!(pair.result.samples().len(), 200);
        assert!(pair.summary.lower <= pair.summary.upper);
    }
    let sust_local = report.pair("sustainability", "localism").unwrap();
    assert!((sust_local.result.point_estimate() - 0.22).abs() < 1e-9);
}

#[test]
fn test_pairs_are_independent_of_each_other() {
    let data = survey_dataset();
    let config = AnalysisConfig {
        bootstrap: BootstrapConfig::new(150, 99),
        ..AnalysisConfig::default()
    };
    let analyzer = Analyzer::with_config(config);

    let together = analyzer.analyze_pairs(&data, &survey_pairs()).unwrap();
    let alone = analyzer
        .analyze_pair(&data, &VariablePair::new("sustainability", "progressivism"))
        .unwrap();

    assert_eq!(together.pairs[2], alone);
}

#[test]
fn test_analyze_file_and_round_trip_report() {
    let mut csv = to_csv(&survey_dataset());
    // A respondent with a skipped item is dropped only from pairs that use it
    csv.push_str("45,NA,3.1,2.7\n");
    let file = create_test_file(&csv);

    let config = AnalysisConfig {
        bootstrap: BootstrapConfig::new(100, 314159),
        ..AnalysisConfig::default()
    };
    let report = Analyzer::with_config(config)
        .analyze_file(file.path(), &survey_pairs())
        .unwrap();

    let source = report.source.as_ref().unwrap();
    assert_eq!(source.row_count, SURVEY_ROWS + 1);
    assert_eq!(source.format, "csv");
    assert_eq!(report.pairs[0].result.n_obs(), SURVEY_ROWS);
    assert_eq!(report.pairs[1].result.n_obs(), SURVEY_ROWS + 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports").join("survey.json");
    report.save(&path).unwrap();
    let loaded = AnalysisReport::load(&path).unwrap();

    assert_eq!(loaded.bootstrap, report.bootstrap);
    assert_eq!(loaded.pairs.len(), report.pairs.len());
    for (saved, original) in loaded.pairs.iter().zip(&report.pairs) {
        assert_eq!(saved.result.x(), original.result.x());
        assert_eq!(saved.result.samples().len(), original.result.samples().len());
        for (a, b) in saved.result.samples().iter().zip(original.result.samples()) {
            assert!((a - b).abs() < 1e-12);
        }
        assert!((saved.summary.lower - original.summary.lower).abs() < 1e-12);
    }
}

#[test]
fn test_analyze_file_rejects_infinite_cell() {
    let file = create_test_file("age,progressivism\n30,2.5\n41,inf\n52,3.5\n");
    let err = Analyzer::new()
        .analyze_file(file.path(), &[VariablePair::new("age", "progressivism")])
        .unwrap_err();
    assert!(matches!(err, BootcorError::Parse { row: 2, .. }));
}

#[test]
fn test_analyze_file_with_explicit_parser_config() {
    let mut csv = String::new();
    let data = survey_dataset();
    let (age, prog) = data.pair("age", "progressivism").unwrap();
    for (a, p) in age.iter().zip(prog).take(200) {
        csv.push_str(&format!("{a};{p}\n"));
    }
    let file = create_test_file(&csv);

    let config = AnalysisConfig {
        parser: ParserConfig {
            has_header: false,
            ..ParserConfig::default().with_delimiter(b';')
        },
        bootstrap: BootstrapConfig::new(50, 314159),
        ..AnalysisConfig::default()
    };
    let report = Analyzer::with_config(config)
        .analyze_file(file.path(), &[VariablePair::new("column_1", "column_2")])
        .unwrap();

    assert_eq!(report.source.as_ref().unwrap().format, "csv-semicolon");
    assert_eq!(report.pairs[0].result.n_obs(), 200);
    let direct = correlation(&age[..200], &prog[..200]).unwrap();
    assert!((report.pairs[0].result.point_estimate() - direct).abs() < 1e-12);
}

#[test]
fn test_analyze_file_missing() {
    let err = Analyzer::new()
        .analyze_file("/nonexistent/survey.csv", &survey_pairs())
        .unwrap_err();
    assert!(matches!(err, BootcorError::Io { .. }));
}
