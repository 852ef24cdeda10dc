//! evaluation — train/test harness around the selection algorithms.
//!
//! Purpose
//! -------
//! Measure how well a selected feature subset predicts a held-out
//! regressand: select on a training [`Dataset`], refit least squares on the
//! selected columns of a test [`Dataset`], and score the fit with an
//! [`ErrorMeasure`].
//!
//! Key behaviors
//! -------------
//! - [`Dataset`]: regressors and regressand in one matrix, with seeded row
//!   sampling, unit-L2 column normalization, Gaussian perturbation and the
//!   `XᵀX` covariance.
//! - [`LeastSquares`]: SVD, QR or normal-equation solves via nalgebra.
//! - Error measures: [`SumSquaredError`], [`PearsonsCorrelation`],
//!   [`StandardErrorOfEstimate`], [`SquaredMultipleCorrelation`].
//! - [`Evaluation`]: `train`, `test`, `evaluate`.
//!
//! Conventions
//! -----------
//! - Failures are [`EvalError`]; selection failures are wrapped, not
//!   flattened.
//! - File formats and driver programs are outside this crate; datasets are
//!   built from in-memory arrays.

pub mod data;
pub mod errors;
pub mod harness;
pub mod least_squares;
pub mod metrics;

pub use self::data::{Dataset, Perturbation};
pub use self::errors::{EvalError, EvalResult};
pub use self::harness::Evaluation;
pub use self::least_squares::{LeastSquares, LeastSquaresMethod, predict};
pub use self::metrics::{
    ErrorMeasure, PearsonsCorrelation, SquaredMultipleCorrelation, StandardErrorOfEstimate,
    SumSquaredError,
};

pub mod prelude {
    pub use super::data::{Dataset, Perturbation};
    pub use super::errors::{EvalError, EvalResult};
    pub use super::harness::Evaluation;
    pub use super::least_squares::LeastSquaresMethod;
    pub use super::metrics::{
        ErrorMeasure, PearsonsCorrelation, SquaredMultipleCorrelation, StandardErrorOfEstimate,
        SumSquaredError,
    };
}
