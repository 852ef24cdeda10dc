//! selection::objective — the regularized goodness-of-fit objective
//! `g(S) = R²(S) + eta · f(C_S)`.
//!
//! Purpose
//! -------
//! Evaluate the quantity every selection algorithm maximizes, given the
//! augmented covariance block `C_S_aug` over `S ∪ {target}` (target last).
//!
//! Key behaviors
//! -------------
//! - `R²(S) = b_Sᵀ C_S⁻¹ b_S`, where `C_S` is the top-left `k×k` predictor
//!   block and `b_S` its cross-covariances with the target, solved through
//!   a Cholesky factor.
//! - The regularizer is evaluated on `C_S` only (the target row/column is
//!   excluded).
//! - [`Objective::evaluate_data`] accepts a plain `m×(k+1)` data matrix with
//!   the regressand last and forms `XᵀX` first.
//!
//! Invariants & assumptions
//! ------------------------
//! - Degenerate predictor blocks never produce `NaN`: if `k = 0`, if the
//!   smallest predictor variance is `<= DEGENERACY_EPS`, or if the Cholesky
//!   factorization fails, the R² term is `0`. This fallback is silent.
//! - `eta > 0` is validated at construction.
//!
//! Conventions
//! -----------
//! - Pure: no I/O, no logging, no interior mutability. Safe to share across
//!   rayon workers by reference.
//!
//! Testing notes
//! -------------
//! - R² is checked against an explicit least-squares fit on a 3×3 data
//!   fixture, the degeneracy guard against zero and duplicated columns, and
//!   the regularizer weighting against a hand-computed entropy term.
use crate::numerical_stability::{DEGENERACY_EPS, cholesky_quadratic_form, min_diagonal};
use crate::selection::errors::SelectionResult;
use crate::selection::options::{DEFAULT_ETA, verify_eta};
use crate::selection::regularizers::Regularizer;
use ndarray::{ArrayView2, s};

/// `g = R² + eta · regularizer`.
#[derive(Debug, Clone)]
pub struct Objective<R: Regularizer> {
    eta: f64,
    regularizer: R,
}

impl<R: Regularizer> Objective<R> {
    /// # Errors
    /// - `SelectionError::InvalidEta` if `eta` is non-finite or `<= 0`.
    pub fn new(eta: f64, regularizer: R) -> SelectionResult<Self> {
        verify_eta(eta)?;
        Ok(Self { eta, regularizer })
    }

    pub fn eta(&self) -> f64 {
        self.eta
    }

    pub fn regularizer(&self) -> &R {
        &self.regularizer
    }

    /// Replace the regularizer's parameters.
    pub fn set_reg_params(&mut self, params: R::Params) {
        self.regularizer.set_params(params);
    }

    /// evaluate — objective value on an augmented covariance block.
    ///
    /// Parameters
    /// ----------
    /// - `aug`: `ArrayView2<'_, f64>`
    ///   `(k+1)×(k+1)` covariance over `S ∪ {target}`, target last.
    ///
    /// Returns
    /// -------
    /// `f64`
    ///   `R²(S) + eta · f(C_S)`; the R² term follows the degeneracy rules
    ///   documented at module level. A 0×0 block evaluates to `0`.
    pub fn evaluate(&self, aug: ArrayView2<'_, f64>) -> f64 {
        let k = aug.nrows().saturating_sub(1);
        let predictors = aug.slice(s![..k, ..k]);
        r_squared(aug) + self.eta * self.regularizer.value(predictors)
    }

    /// Objective on a data matrix whose last column is the regressand.
    ///
    /// Columns are assumed L2-normalized, so `XᵀX` is the covariance.
    pub fn evaluate_data(&self, x: ArrayView2<'_, f64>) -> f64 {
        let cov = x.t().dot(&x);
        self.evaluate(cov.view())
    }

    /// Regularizer alone on a predictor block.
    pub fn regularizer_value(&self, predictors: ArrayView2<'_, f64>) -> f64 {
        self.regularizer.value(predictors)
    }
}

impl<R: Regularizer + Default> Default for Objective<R> {
    fn default() -> Self {
        Self { eta: DEFAULT_ETA, regularizer: R::default() }
    }
}

/// r_squared — squared multiple correlation from an augmented block.
///
/// Returns `b_Sᵀ C_S⁻¹ b_S`, or `0` when `k = 0`, when
/// `min diag(C_S) <= DEGENERACY_EPS`, or when `C_S` is not numerically
/// positive definite.
pub fn r_squared(aug: ArrayView2<'_, f64>) -> f64 {
    let k = aug.nrows().saturating_sub(1);
    if k == 0 {
        return 0.0;
    }
    let c_s = aug.slice(s![..k, ..k]);
    if min_diagonal(c_s) <= DEGENERACY_EPS {
        return 0.0;
    }
    let b_s = aug.slice(s![..k, k]);
    cholesky_quadratic_form(c_s, b_s).unwrap_or(0.0)
}
