//! evaluation::data — in-memory dataset with the preprocessing the harness
//! applies before selection.
//!
//! Purpose
//! -------
//! Hold `m` examples of `n` regressors plus one regressand in a single
//! `m×(n+1)` matrix (target last), so that the covariance consumed by
//! `CovarianceView` is one product `XᵀX`.
//!
//! Key behaviors
//! -------------
//! - [`Dataset::sample`] draws a seeded subset of rows without replacement.
//! - [`Dataset::normalize`] scales every column (target included) to unit
//!   L2 norm; all-zero columns are left untouched.
//! - [`Dataset::perturb`] adds `sigma · g / ‖g‖₂` to each affected column,
//!   where `g` is a fresh standard Gaussian vector.
//! - [`Dataset::covariance`] returns `XᵀX` over all columns.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every entry is finite; constructors reject NaN/±∞.
//! - Randomness is fully determined by the caller's seed (`StdRng`).
//!
//! Testing notes
//! -------------
//! - Unit tests check column norms after normalization, the exact norm of
//!   the added noise, seed reproducibility and the covariance layout.
use crate::evaluation::errors::{EvalError, EvalResult};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, s};
use rand::SeedableRng;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use statrs::distribution::Normal;

/// Columns affected by [`Dataset::perturb`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Perturbation {
    Regressors,
    Regressand,
    Both,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    data: Array2<f64>,
}

impl Dataset {
    /// Build a dataset from an `m×n` regressor matrix and a length-`m`
    /// regressand.
    ///
    /// Errors
    /// ------
    /// - `EvalError::ShapeMismatch` when `regressand.len() != m`.
    /// - `EvalError::InsufficientData` when `m == 0`.
    /// - `EvalError::NonFiniteData` for any NaN/±∞ entry.
    pub fn new(
        regressors: ArrayView2<'_, f64>, regressand: ArrayView1<'_, f64>,
    ) -> EvalResult<Self> {
        let (m, n) = regressors.dim();
        if regressand.len() != m {
            return Err(EvalError::ShapeMismatch { expected: m, actual: regressand.len() });
        }
        if m == 0 {
            return Err(EvalError::InsufficientData { required: 1, actual: 0 });
        }
        let mut data = Array2::<f64>::zeros((m, n + 1));
        data.slice_mut(s![.., ..n]).assign(&regressors);
        data.column_mut(n).assign(&regressand);
        Self::from_matrix(data)
    }

    /// Wrap an `m×(n+1)` matrix whose last column is the regressand.
    pub fn from_matrix(data: Array2<f64>) -> EvalResult<Self> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(EvalError::InsufficientData { required: 1, actual: data.nrows() });
        }
        if let Some(((row, col), &value)) = data.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(EvalError::NonFiniteData { row, col, value });
        }
        Ok(Self { data })
    }

    pub fn num_examples(&self) -> usize {
        self.data.nrows()
    }

    pub fn num_features(&self) -> usize {
        self.data.ncols() - 1
    }

    /// `m×n` view of the regressors.
    pub fn regressors(&self) -> ArrayView2<'_, f64> {
        self.data.slice(s![.., ..self.num_features()])
    }

    /// Length-`m` view of the regressand.
    pub fn regressand(&self) -> ArrayView1<'_, f64> {
        self.data.column(self.num_features())
    }

    /// Full `m×(n+1)` matrix, target last.
    pub fn as_matrix(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Draw `num_examples` distinct rows with a seeded generator.
    ///
    /// Rows keep their original relative order.
    ///
    /// Errors
    /// ------
    /// - `EvalError::InvalidSampleSize` when `num_examples` is `0` or larger
    ///   than the dataset.
    pub fn sample(&self, num_examples: usize, seed: u64) -> EvalResult<Dataset> {
        let available = self.num_examples();
        if num_examples == 0 || num_examples > available {
            return Err(EvalError::InvalidSampleSize { requested: num_examples, available });
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let mut rows = rand::seq::index::sample(&mut rng, available, num_examples).into_vec();
        rows.sort_unstable();
        Ok(Dataset { data: self.data.select(Axis(0), &rows) })
    }

    /// Scale every column to unit L2 norm. All-zero columns stay zero.
    pub fn normalize(&mut self) {
        for mut col in self.data.columns_mut() {
            let norm = col.dot(&col).sqrt();
            if norm > 0.0 {
                col.mapv_inplace(|v| v / norm);
            }
        }
    }

    /// Add `sigma · g / ‖g‖₂` to every column selected by `which`, with a
    /// fresh standard Gaussian `g` per column.
    ///
    /// Errors
    /// ------
    /// - `EvalError::InvalidSigma` when `sigma` is negative or non-finite.
    pub fn perturb(&mut self, which: Perturbation, sigma: f64, seed: u64) -> EvalResult<()> {
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(EvalError::InvalidSigma { sigma });
        }
        let n = self.num_features();
        let columns = match which {
            Perturbation::Regressors => 0..n,
            Perturbation::Regressand => n..n + 1,
            Perturbation::Both => 0..n + 1,
        };
        let normal = Normal::new(0.0, 1.0).map_err(|_| EvalError::InvalidSigma { sigma })?;
        let mut rng = StdRng::seed_from_u64(seed);
        let m = self.num_examples();
        for j in columns {
            let noise: Array1<f64> = (0..m).map(|_| normal.sample(&mut rng)).collect();
            let norm = noise.dot(&noise).sqrt();
            if norm > 0.0 {
                self.data.column_mut(j).scaled_add(sigma / norm, &noise);
            }
        }
        Ok(())
    }

    /// `XᵀX` over all columns; `(n+1)×(n+1)`, target last.
    pub fn covariance(&self) -> Array2<f64> {
        self.data.t().dot(&self.data)
    }
}
