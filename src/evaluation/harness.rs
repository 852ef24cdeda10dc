//! evaluation::harness — train a selection on one dataset, score it on
//! another.
//!
//! Purpose
//! -------
//! Tie a [`SelectionAlgorithm`] to an [`ErrorMeasure`]: training normalizes
//! the data, forms `XᵀX` and runs the algorithm; testing refits ordinary
//! least squares on the selected columns of the (normalized) test data and
//! scores the fitted values against the test regressand.
//!
//! Key behaviors
//! -------------
//! - [`Evaluation::train`] returns the selected feature indices.
//! - [`Evaluation::test`] returns `(number of features, error)`.
//! - [`Evaluation::evaluate`] chains the two.
//!
//! Invariants & assumptions
//! ------------------------
//! - Train and test datasets share the same feature layout; indices from
//!   training are validated against the test dataset's width.
//! - Sampling and perturbation are applied by the caller on [`Dataset`]
//!   before handing it to the harness.
//!
//! Testing notes
//! -------------
//! - With unit-norm data, `SquaredMultipleCorrelation` of the in-sample fit
//!   equals the `R²` the selection reported, which the unit tests use as an
//!   independent cross-check.
use crate::evaluation::data::Dataset;
use crate::evaluation::errors::EvalResult;
use crate::evaluation::least_squares::{LeastSquares, LeastSquaresMethod, predict};
use crate::evaluation::metrics::ErrorMeasure;
use crate::selection::algorithms::SelectionAlgorithm;
use crate::selection::covariance::{CovarianceView, columns_with_target};
use crate::selection::diagnostics::{DiagnosticSink, diag, silent};
use log::Level;
use ndarray::s;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Evaluation<A: SelectionAlgorithm, E: ErrorMeasure> {
    algorithm: A,
    measure: E,
    target_feats: usize,
    least_squares: LeastSquares,
    sink: Arc<dyn DiagnosticSink>,
}

impl<A: SelectionAlgorithm, E: ErrorMeasure> Evaluation<A, E> {
    /// Harness running `algorithm` with cardinality `target_feats` (`0` for
    /// the algorithm's own stopping rule) and scoring with `measure`.
    pub fn new(algorithm: A, measure: E, target_feats: usize) -> Self {
        Self {
            algorithm,
            measure,
            target_feats,
            least_squares: LeastSquares::default(),
            sink: silent(),
        }
    }

    pub fn with_least_squares(mut self, method: LeastSquaresMethod) -> Self {
        self.least_squares = LeastSquares::new(method);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    pub fn target_feats(&self) -> usize {
        self.target_feats
    }

    /// Select features on `data`.
    ///
    /// Errors
    /// ------
    /// - `EvalError::Selection` for any failure of the covariance checks or
    ///   of the algorithm itself.
    pub fn train(&self, data: &Dataset) -> EvalResult<Vec<usize>> {
        let mut normalized = data.clone();
        normalized.normalize();
        let cov = normalized.covariance();
        let view = CovarianceView::new(cov.view())?;
        diag!(
            self.sink,
            Level::Debug,
            "train: {} examples, {} features, target {}",
            data.num_examples(),
            data.num_features(),
            self.target_feats
        );

        let selection = self.algorithm.run(&view, self.target_feats)?;
        diag!(self.sink, Level::Debug, "train: g = {:.6}", selection.value);
        self.sink.print_indices(Level::Debug, "selected", &selection.indices);
        Ok(selection.indices)
    }

    /// Fit least squares on `indices` of `data` and score the fit.
    ///
    /// Returns
    /// -------
    /// `(indices.len(), error)`.
    ///
    /// Errors
    /// ------
    /// - `EvalError::Selection` for out-of-range or duplicate indices.
    /// - Least-squares and measure errors as documented on
    ///   [`LeastSquares::solve`] and [`ErrorMeasure::compute`].
    pub fn test(&self, data: &Dataset, indices: &[usize]) -> EvalResult<(usize, f64)> {
        let mut normalized = data.clone();
        normalized.normalize();
        let mut columns = indices.to_vec();
        let block =
            columns_with_target(normalized.regressors(), normalized.regressand(), &mut columns)?;
        let k = columns.len();
        let design = block.slice(s![.., ..k]);
        let target = block.column(k);

        let coefficients = self.least_squares.solve(design, target)?;
        let fitted = predict(design, coefficients.view());
        let error = self.measure.compute(target, fitted.view())?;
        diag!(self.sink, Level::Debug, "test: {k} features, error = {error:.6}");
        Ok((k, error))
    }

    /// `test(test_data, train(train_data))`.
    pub fn evaluate(&self, train_data: &Dataset, test_data: &Dataset) -> EvalResult<(usize, f64)> {
        let indices = self.train(train_data)?;
        self.test(test_data, &indices)
    }
}
