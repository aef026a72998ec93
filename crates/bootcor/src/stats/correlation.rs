//! Product-moment correlation computed from centered sums.

use crate::error::{BootcorError, Result};

/// Pearson product-moment correlation of two equal-length sequences.
///
/// Means are taken in a first pass; the centered cross-product and the two
/// centered sums of squares are accumulated in a second. The formula is
/// symmetric in `x` and `y`, so swapping the arguments gives a bit-identical
/// result.
///
/// # Errors
///
/// - [`BootcorError::InvalidInput`] if the lengths differ, there are fewer
///   than two observations, a value is not finite, or the centered sums
///   overflow.
/// - [`BootcorError::DegenerateInput`] if either sequence is constant. The
///   0/0 case is never coerced to a number.
pub fn correlation(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(BootcorError::InvalidInput(format!(
            "sequences differ in length ({} vs {})",
            x.len(),
            y.len()
        )));
    }
    let n = x.len();
    if n < 2 {
        return Err(BootcorError::InvalidInput(format!(
            "correlation needs at least 2 observations, got {n}"
        )));
    }

    if let Some(column) = [("x", x), ("y", y)]
        .into_iter()
        .find_map(|(label, values)| values.iter().any(|v| !v.is_finite()).then_some(label))
    {
        return Err(BootcorError::InvalidInput(format!(
            "sequence {column} contains a non-finite value"
        )));
    }

    // A constant column can still leave rounding residue in its centered
    // sum, so zero variance is detected on the raw values.
    if is_constant(x) {
        return Err(BootcorError::DegenerateInput {
            column: "x".to_string(),
        });
    }
    if is_constant(y) {
        return Err(BootcorError::DegenerateInput {
            column: "y".to_string(),
        });
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        let column = if sxx == 0.0 { "x" } else { "y" };
        return Err(BootcorError::DegenerateInput {
            column: column.to_string(),
        });
    }

    // sqrt(sxx * syy) keeps the denominator symmetric in x and y
    let r = sxy / (sxx * syy).sqrt();
    if !r.is_finite() {
        return Err(BootcorError::InvalidInput(
            "centered sums overflow f64; rescale the input".to_string(),
        ));
    }
    Ok(r.clamp(-1.0, 1.0))
}

pub(super) fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}
