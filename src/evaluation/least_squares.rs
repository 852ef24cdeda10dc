//! evaluation::least_squares — ordinary least squares for the held-out fit.
//!
//! Solves the over-determined system `A x ≈ b` with one of three nalgebra
//! decompositions. The harness fits on the selected columns of the test
//! set and scores `A x` against `b`.
use crate::evaluation::errors::{EvalError, EvalResult};
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, ArrayView1, ArrayView2};

/// Decomposition used by [`LeastSquares::solve`].
///
/// - `Svd`: thin SVD; minimum-norm solution for rank-deficient `A`.
/// - `Qr`: Householder QR, `R x = Qᵀ b`; requires full column rank.
/// - `NormalEquations`: Cholesky of `AᵀA`; the cheapest, and the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum LeastSquaresMethod {
    Svd,
    Qr,
    #[default]
    NormalEquations,
}

impl LeastSquaresMethod {
    fn name(self) -> &'static str {
        match self {
            LeastSquaresMethod::Svd => "svd",
            LeastSquaresMethod::Qr => "qr",
            LeastSquaresMethod::NormalEquations => "normal equations",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeastSquares {
    method: LeastSquaresMethod,
}

impl LeastSquares {
    pub fn new(method: LeastSquaresMethod) -> Self {
        Self { method }
    }

    pub fn method(&self) -> LeastSquaresMethod {
        self.method
    }

    /// Coefficients `x` minimizing `‖A x − b‖₂`.
    ///
    /// Parameters
    /// ----------
    /// - `a`: `ArrayView2<'_, f64>`
    ///   `m×k` design matrix. `k = 0` yields an empty coefficient vector.
    /// - `b`: `ArrayView1<'_, f64>`
    ///   Length-`m` right-hand side.
    ///
    /// Errors
    /// ------
    /// - `EvalError::ShapeMismatch` when `b.len() != m`.
    /// - `EvalError::InsufficientData` when `m < k` for the QR method.
    /// - `EvalError::SingularSystem` when the decomposition fails or
    ///   produces non-finite coefficients.
    pub fn solve(&self, a: ArrayView2<'_, f64>, b: ArrayView1<'_, f64>) -> EvalResult<Array1<f64>> {
        let (m, k) = a.dim();
        if b.len() != m {
            return Err(EvalError::ShapeMismatch { expected: m, actual: b.len() });
        }
        if k == 0 {
            return Ok(Array1::zeros(0));
        }
        let a_mat = DMatrix::from_fn(m, k, |i, j| a[[i, j]]);
        let b_vec = DVector::from_iterator(m, b.iter().copied());
        let singular = EvalError::SingularSystem { method: self.method.name() };

        let x = match self.method {
            LeastSquaresMethod::Svd => {
                let svd = a_mat.svd(true, true);
                let tol = f64::EPSILON * (m.max(k) as f64) * svd.singular_values.max();
                svd.solve(&b_vec, tol).map_err(|_| singular.clone())?
            }
            LeastSquaresMethod::Qr => {
                if m < k {
                    return Err(EvalError::InsufficientData { required: k, actual: m });
                }
                let qr = a_mat.qr();
                let rhs = qr.q().transpose() * &b_vec;
                qr.r().solve_upper_triangular(&rhs).ok_or_else(|| singular.clone())?
            }
            LeastSquaresMethod::NormalEquations => {
                let at = a_mat.transpose();
                let chol = (&at * &a_mat).cholesky().ok_or_else(|| singular.clone())?;
                chol.solve(&(&at * &b_vec))
            }
        };

        if x.iter().any(|v| !v.is_finite()) {
            return Err(singular);
        }
        Ok(Array1::from_iter(x.iter().copied()))
    }
}

/// `A x` as an ndarray vector.
pub fn predict(a: ArrayView2<'_, f64>, coefficients: ArrayView1<'_, f64>) -> Array1<f64> {
    if coefficients.is_empty() {
        return Array1::zeros(a.nrows());
    }
    a.dot(&coefficients)
}
