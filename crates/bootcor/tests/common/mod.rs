//! Synthetic survey fixtures shared by the integration tests.

#![allow(dead_code)]

use bootcor::Dataset;

/// Rows in the survey fixture.
pub const SURVEY_ROWS: usize = 2421;

/// Correlation of `age` and `progressivism` in the survey fixture.
pub const AGE_PROGRESSIVISM_R: f64 = -0.0418;

/// Standard normal draw via Box-Muller.
pub fn normal(rng: &mut fastrand::Rng) -> f64 {
    let u1 = 1.0 - rng.f64();
    let u2 = rng.f64();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

fn standardize(values: &[f64]) -> Vec<f64> {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let sd = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
    values.iter().map(|v| (v - mean) / sd).collect()
}

/// Build `y` so that `corr(x, y)` equals `r` up to rounding.
///
/// The noise is residualised against `x` before mixing, which removes the
/// chance correlation a finite sample would otherwise carry.
pub fn with_exact_correlation(x: &[f64], r: f64, rng: &mut fastrand::Rng) -> Vec<f64> {
    let zx = standardize(x);
    let noise: Vec<f64> = (0..x.len()).map(|_| normal(rng)).collect();
    let zn = standardize(&noise);
    let beta = zx.iter().zip(&zn).map(|(a, b)| a * b).sum::<f64>() / zx.len() as f64;
    let resid: Vec<f64> = zn.iter().zip(&zx).map(|(e, a)| e - beta * a).collect();
    let zr = standardize(&resid);

    let scale = (1.0 - r * r).sqrt();
    zx.iter().zip(&zr).map(|(a, e)| r * a + scale * e).collect()
}

/// Survey-like dataset with `age`, `progressivism`, `sustainability`
/// and `localism` columns.
pub fn survey_dataset() -> Dataset {
    let mut rng = fastrand::Rng::with_seed(2421);
    let age: Vec<f64> = (0..SURVEY_ROWS).map(|_| rng.u32(18..=89) as f64).collect();

    // Likert-style scale centred on 3 with spread 0.8
    let progressivism: Vec<f64> = with_exact_correlation(&age, AGE_PROGRESSIVISM_R, &mut rng)
        .into_iter()
        .map(|z| 3.0 + 0.8 * z)
        .collect();
    let sustainability: Vec<f64> = with_exact_correlation(&progressivism, 0.35, &mut rng)
        .into_iter()
        .map(|z| 3.2 + 0.7 * z)
        .collect();
    let localism: Vec<f64> = with_exact_correlation(&sustainability, 0.22, &mut rng)
        .into_iter()
        .map(|z| 2.9 + 0.9 * z)
        .collect();

    Dataset::new()
        .with_column("age", age)
        .and_then(|d| d.with_column("progressivism", progressivism))
        .and_then(|d| d.with_column("sustainability", sustainability))
        .and_then(|d| d.with_column("localism", localism))
        .expect("fixture columns have equal length")
}

/// Render a dataset as CSV text.
pub fn to_csv(data: &Dataset) -> String {
    let names: Vec<&str> = data.column_names().collect();
    let mut out = names.join(",");
    out.push('\n');
    for row in 0..data.row_count() {
        let cells: Vec<String> = names
            .iter()
            .map(|name| data.column(name).expect("known column")[row].to_string())
            .collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}
