//! evaluation::metrics — scores comparing held-out targets with predictions.
//!
//! Purpose
//! -------
//! Provide the [`ErrorMeasure`] capability used by the harness and four
//! measures over `(actual Z, predicted Z')`:
//!
//! - [`SumSquaredError`]: root-mean-square residual `sqrt(Σ(Z−Z')²/N)`.
//! - [`PearsonsCorrelation`]: sample correlation coefficient `r(Z, Z')`.
//! - [`StandardErrorOfEstimate`]: `sqrt((1 − r²)·SSY/(N − 2))` with
//!   `SSY = Σ(Z − Z̄)²`.
//! - [`SquaredMultipleCorrelation`]: `1 − ‖Z − Z'‖₂²`, meaningful when `Z`
//!   has unit norm (the harness normalizes the regressand).
//!
//! Conventions
//! -----------
//! - Sample moments use the `N − 1` denominator (statrs `Statistics`).
//! - A constant `Z` or `Z'` has no defined correlation; it is scored as
//!   `r = 0`.
use crate::evaluation::errors::{EvalError, EvalResult};
use ndarray::ArrayView1;
use statrs::statistics::Statistics;

/// A scalar score of predictions against actual values.
pub trait ErrorMeasure {
    /// Score `predicted` against `actual`.
    ///
    /// Errors
    /// ------
    /// - `EvalError::ShapeMismatch` when the lengths differ.
    /// - `EvalError::InsufficientData` when the measure needs more
    ///   observations than provided.
    fn compute(&self, actual: ArrayView1<'_, f64>, predicted: ArrayView1<'_, f64>)
    -> EvalResult<f64>;
}

fn check_lengths(
    actual: ArrayView1<'_, f64>, predicted: ArrayView1<'_, f64>, required: usize,
) -> EvalResult<usize> {
    if actual.len() != predicted.len() {
        return Err(EvalError::ShapeMismatch { expected: actual.len(), actual: predicted.len() });
    }
    if actual.len() < required {
        return Err(EvalError::InsufficientData { required, actual: actual.len() });
    }
    Ok(actual.len())
}

fn residual_norm_sq(actual: ArrayView1<'_, f64>, predicted: ArrayView1<'_, f64>) -> f64 {
    actual.iter().zip(predicted.iter()).map(|(z, zp)| (z - zp) * (z - zp)).sum()
}

fn correlation(actual: ArrayView1<'_, f64>, predicted: ArrayView1<'_, f64>) -> f64 {
    let s_z = actual.iter().std_dev();
    let s_zp = predicted.iter().std_dev();
    if !(s_z > 0.0 && s_zp > 0.0) {
        return 0.0;
    }
    actual.iter().covariance(predicted.iter()) / (s_z * s_zp)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SumSquaredError;

impl ErrorMeasure for SumSquaredError {
    fn compute(
        &self, actual: ArrayView1<'_, f64>, predicted: ArrayView1<'_, f64>,
    ) -> EvalResult<f64> {
        let n = check_lengths(actual, predicted, 1)?;
        Ok((residual_norm_sq(actual, predicted) / n as f64).sqrt())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PearsonsCorrelation;

impl ErrorMeasure for PearsonsCorrelation {
    fn compute(
        &self, actual: ArrayView1<'_, f64>, predicted: ArrayView1<'_, f64>,
    ) -> EvalResult<f64> {
        check_lengths(actual, predicted, 2)?;
        Ok(correlation(actual, predicted))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardErrorOfEstimate;

impl ErrorMeasure for StandardErrorOfEstimate {
    fn compute(
        &self, actual: ArrayView1<'_, f64>, predicted: ArrayView1<'_, f64>,
    ) -> EvalResult<f64> {
        let n = check_lengths(actual, predicted, 3)?;
        let r = correlation(actual, predicted);
        let mean = actual.iter().mean();
        let ssy: f64 = actual.iter().map(|z| (z - mean) * (z - mean)).sum();
        Ok(((1.0 - r * r).max(0.0) * ssy / (n as f64 - 2.0)).sqrt())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredMultipleCorrelation;

impl ErrorMeasure for SquaredMultipleCorrelation {
    fn compute(
        &self, actual: ArrayView1<'_, f64>, predicted: ArrayView1<'_, f64>,
    ) -> EvalResult<f64> {
        check_lengths(actual, predicted, 1)?;
        Ok(1.0 - residual_norm_sq(actual, predicted))
    }
}

#[cfg(test)]
mod tests {
    // Scope
    // -----
    // - Closed-form values of each measure on tiny vectors.
    // - Length validation shared by all measures.
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn sum_squared_error_is_root_mean_square() {
        let z = array![1.0, 2.0, 3.0];
        let zp = array![1.0, 2.0, 5.0];

        let e = SumSquaredError.compute(z.view(), zp.view()).unwrap();

        assert_relative_eq!(e, (4.0_f64 / 3.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Affine predictions correlate perfectly; reversed ones anti-correlate;
    // constant predictions score zero.
    fn pearson_correlation_extremes() {
        let z = array![1.0, 2.0, 3.0, 4.0];
        let up = z.mapv(|v| 2.0 * v + 1.0);
        let down = z.mapv(|v| -v);
        let flat = array![5.0, 5.0, 5.0, 5.0];

        assert_relative_eq!(
            PearsonsCorrelation.compute(z.view(), up.view()).unwrap(),
            1.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            PearsonsCorrelation.compute(z.view(), down.view()).unwrap(),
            -1.0,
            epsilon = 1e-12
        );
        assert_eq!(PearsonsCorrelation.compute(z.view(), flat.view()).unwrap(), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Standard error of estimate against a hand computation.
    //
    // Given
    // -----
    // - `Z = [1,2,3,4]`, `Z' = [1,3,2,4]`: `r = 0.8`, `SSY = 5`, `N = 4`.
    //
    // Expect
    // ------
    // - `sqrt(0.36 · 5 / 2) = sqrt(0.9)`; a perfect fit scores 0.
    fn standard_error_of_estimate_matches_hand_value() {
        // Arrange
        let z = array![1.0, 2.0, 3.0, 4.0];
        let zp = array![1.0, 3.0, 2.0, 4.0];

        // Act
        let e = StandardErrorOfEstimate.compute(z.view(), zp.view()).unwrap();
        let perfect = StandardErrorOfEstimate.compute(z.view(), z.view()).unwrap();

        // Assert
        assert_relative_eq!(e, 0.9_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(perfect, 0.0, epsilon = 1e-7);
    }

    #[test]
    fn squared_multiple_correlation_on_unit_target() {
        let z = array![0.6, 0.8];

        let exact = SquaredMultipleCorrelation.compute(z.view(), z.view()).unwrap();
        let partial =
            SquaredMultipleCorrelation.compute(z.view(), array![0.6, 0.0].view()).unwrap();

        assert_relative_eq!(exact, 1.0, epsilon = 1e-12);
        assert_relative_eq!(partial, 0.36, epsilon = 1e-12);
    }

    #[test]
    fn lengths_are_validated() {
        let z = array![1.0, 2.0];
        let zp = array![1.0, 2.0, 3.0];

        assert_eq!(
            SumSquaredError.compute(z.view(), zp.view()),
            Err(EvalError::ShapeMismatch { expected: 2, actual: 3 })
        );
        assert_eq!(
            StandardErrorOfEstimate.compute(z.view(), z.view()),
            Err(EvalError::InsufficientData { required: 3, actual: 2 })
        );
    }
}
