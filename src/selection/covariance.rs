//! selection::covariance — validated read-only view over a cached
//! `(n+1)×(n+1)` covariance matrix and the submatrix extraction routines
//! every algorithm builds on.
//!
//! Purpose
//! -------
//! Wrap the covariance matrix `C = XᵀX` of L2-normalized training columns
//! (predictors `0..n`, target last) in a cheap `Copy` view, validate it once,
//! and provide the two extraction shapes the search algorithms need:
//! a predictor-only block `C_S` and an augmented block over `S ∪ {target}`.
//!
//! Key behaviors
//! -------------
//! - [`CovarianceView::new`] checks shape, finiteness, symmetry and
//!   non-negative variances.
//! - [`CovarianceView::submatrix`] sorts a caller-supplied index slice in
//!   place, validates it and gathers `C[I[i], I[j]]`, reading only the upper
//!   triangle of `C`.
//! - [`CovarianceView::predictor_block`] returns a contiguous, copy-free view
//!   used by the LinearLocalSearch fast path.
//! - [`columns_with_target`] selects columns of a plain data matrix and
//!   appends the regressand, for the data-matrix objective path.
//!
//! Invariants & assumptions
//! ------------------------
//! - A constructed view is square with dimension `≥ 1`, finite and
//!   symmetric within [`SYMMETRY_TOL`], with a non-negative diagonal.
//! - Gathered submatrices are freshly allocated and owned by the caller.
//!
//! Conventions
//! -----------
//! - `num_features()` is `n`; the target row/column has index `n`.
//! - Internal gathers (`gather_sorted`, `gather_augmented`) take sorted,
//!   duplicate-free, in-range slices and only `debug_assert!` that contract.
//!
//! Testing notes
//! -------------
//! - Unit tests cover validation failures, the in-place sort side effect,
//!   element-wise extraction correctness and symmetry of the result.
use crate::numerical_stability::SYMMETRY_TOL;
use crate::selection::errors::{SelectionError, SelectionResult};
use ndarray::{Array2, ArrayView1, ArrayView2, s};

/// Read-only view over a validated covariance matrix with the target as the
/// last row/column.
#[derive(Debug, Clone, Copy)]
pub struct CovarianceView<'a> {
    data: ArrayView2<'a, f64>,
}

impl<'a> CovarianceView<'a> {
    /// Validate and wrap a covariance matrix.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `ArrayView2<'a, f64>`
    ///   `(n+1)×(n+1)` matrix; rows/columns `0..n` are predictors and `n` is
    ///   the target.
    ///
    /// Errors
    /// ------
    /// - `SelectionError::NotSquare` / `EmptyCovariance` for bad shapes.
    /// - `SelectionError::NonFiniteEntry` for `NaN`/`±∞` entries.
    /// - `SelectionError::NotSymmetric` when `|C[i,j] - C[j,i]|` exceeds
    ///   `SYMMETRY_TOL · max(1, |C[i,j]|, |C[j,i]|)`.
    /// - `SelectionError::NegativeDiagonal` for a negative variance.
    pub fn new(data: ArrayView2<'a, f64>) -> SelectionResult<Self> {
        let (rows, cols) = data.dim();
        if rows != cols {
            return Err(SelectionError::NotSquare { rows, cols });
        }
        if rows == 0 {
            return Err(SelectionError::EmptyCovariance);
        }
        for ((row, col), &value) in data.indexed_iter() {
            if !value.is_finite() {
                return Err(SelectionError::NonFiniteEntry { row, col, value });
            }
        }
        for i in 0..rows {
            let d = data[[i, i]];
            if d < 0.0 {
                return Err(SelectionError::NegativeDiagonal { index: i, value: d });
            }
            for j in (i + 1)..cols {
                let upper = data[[i, j]];
                let lower = data[[j, i]];
                let scale = 1.0_f64.max(upper.abs()).max(lower.abs());
                if (upper - lower).abs() > SYMMETRY_TOL * scale {
                    return Err(SelectionError::NotSymmetric { row: i, col: j, upper, lower });
                }
            }
        }
        Ok(Self { data })
    }

    /// Wrap a matrix produced by gathering from an already validated view.
    pub(crate) fn from_validated(data: ArrayView2<'a, f64>) -> Self {
        debug_assert!(data.is_square() && data.nrows() > 0);
        Self { data }
    }

    /// Number of candidate features `n`.
    pub fn num_features(&self) -> usize {
        self.data.nrows() - 1
    }

    /// Row/column index of the target (`n`).
    pub fn target(&self) -> usize {
        self.data.nrows() - 1
    }

    /// Full `(n+1)×(n+1)` matrix, i.e. the augmented block over the whole
    /// universe.
    pub fn as_array(&self) -> ArrayView2<'a, f64> {
        self.data
    }

    /// Contiguous predictor block `C[start..start+len, start..start+len]`,
    /// borrowed without copying.
    ///
    /// Panics
    /// ------
    /// - Panics if `start + len > n`; callers stay inside the predictor range.
    pub fn predictor_block(&self, start: usize, len: usize) -> ArrayView2<'a, f64> {
        self.data.slice_move(s![start..start + len, start..start + len])
    }

    /// Covariances `C[i, n]` of every predictor with the target, `i in 0..n`.
    pub fn cross_covariances(&self) -> ArrayView1<'a, f64> {
        let t = self.target();
        self.data.slice_move(s![..t, t])
    }

    /// submatrix — gather `C[I[i], I[j]]` for a caller-supplied index slice.
    ///
    /// Parameters
    /// ----------
    /// - `indices`: `&mut [usize]`
    ///   Indices into `0..=n` (the target may be included). **This call sorts
    ///   `indices` in place**; on return the slice is in ascending order and
    ///   the rows/columns of the result follow that order.
    ///
    /// Returns
    /// -------
    /// `SelectionResult<Array2<f64>>`
    ///   Owned, symmetric `|I|×|I|` matrix.
    ///
    /// Errors
    /// ------
    /// - `SelectionError::IndexOutOfRange` if any index is `> n`.
    /// - `SelectionError::DuplicateIndex` if an index repeats.
    pub fn submatrix(&self, indices: &mut [usize]) -> SelectionResult<Array2<f64>> {
        indices.sort_unstable();
        self.check_sorted(indices)?;
        Ok(self.gather_sorted(indices))
    }

    /// augmented_submatrix — gather `C` over `I ∪ {target}`.
    ///
    /// Same contract as [`CovarianceView::submatrix`] (including the in-place
    /// sort), except that `indices` must be predictor indices (`< n`) and the
    /// target row/column is appended last.
    pub fn augmented_submatrix(&self, indices: &mut [usize]) -> SelectionResult<Array2<f64>> {
        indices.sort_unstable();
        let n = self.num_features();
        if let Some(&bad) = indices.iter().find(|&&i| i >= n) {
            return Err(SelectionError::IndexOutOfRange { index: bad, bound: n });
        }
        self.check_sorted(indices)?;
        Ok(self.gather_augmented(indices))
    }

    fn check_sorted(&self, sorted: &[usize]) -> SelectionResult<()> {
        let bound = self.data.nrows();
        for (pos, &i) in sorted.iter().enumerate() {
            if i >= bound {
                return Err(SelectionError::IndexOutOfRange { index: i, bound });
            }
            if pos > 0 && sorted[pos - 1] == i {
                return Err(SelectionError::DuplicateIndex { index: i });
            }
        }
        Ok(())
    }

    /// Gather for a sorted, duplicate-free, in-range slice. Reads only
    /// `C[a, b]` with `a <= b`.
    pub(crate) fn gather_sorted(&self, sorted: &[usize]) -> Array2<f64> {
        debug_assert!(sorted.windows(2).all(|w| w[0] < w[1]));
        let k = sorted.len();
        let mut out = Array2::<f64>::zeros((k, k));
        for (j, &cj) in sorted.iter().enumerate() {
            for (i, &ci) in sorted[..=j].iter().enumerate() {
                let v = self.data[[ci, cj]];
                out[[i, j]] = v;
                out[[j, i]] = v;
            }
        }
        out
    }

    /// Gather over `sorted ∪ {target}` with the target last.
    pub(crate) fn gather_augmented(&self, sorted: &[usize]) -> Array2<f64> {
        let k = sorted.len();
        let t = self.target();
        debug_assert!(sorted.last().is_none_or(|&last| last < t));
        let mut out = Array2::<f64>::zeros((k + 1, k + 1));
        for (j, &cj) in sorted.iter().enumerate() {
            for (i, &ci) in sorted[..=j].iter().enumerate() {
                let v = self.data[[ci, cj]];
                out[[i, j]] = v;
                out[[j, i]] = v;
            }
            let b = self.data[[cj, t]];
            out[[j, k]] = b;
            out[[k, j]] = b;
        }
        out[[k, k]] = self.data[[t, t]];
        out
    }
}

/// columns_with_target — select columns of a data matrix and append the
/// regressand.
///
/// Parameters
/// ----------
/// - `x`: `ArrayView2<'_, f64>`
///   `m×n` regressor matrix.
/// - `y`: `ArrayView1<'_, f64>`
///   Length-`m` regressand.
/// - `indices`: `&mut [usize]`
///   Column indices into `x`; sorted in place, like
///   [`CovarianceView::submatrix`].
///
/// Returns
/// -------
/// `SelectionResult<Array2<f64>>`
///   `m×(|indices|+1)` matrix whose last column is `y`.
///
/// Errors
/// ------
/// - `SelectionError::IndexOutOfRange` for a column index `>= n` or when
///   `y.len() != m` (reported against the row count).
/// - `SelectionError::DuplicateIndex` for repeated columns.
pub fn columns_with_target(
    x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>, indices: &mut [usize],
) -> SelectionResult<Array2<f64>> {
    let (m, n) = x.dim();
    if y.len() != m {
        return Err(SelectionError::IndexOutOfRange { index: y.len(), bound: m });
    }
    indices.sort_unstable();
    for (pos, &i) in indices.iter().enumerate() {
        if i >= n {
            return Err(SelectionError::IndexOutOfRange { index: i, bound: n });
        }
        if pos > 0 && indices[pos - 1] == i {
            return Err(SelectionError::DuplicateIndex { index: i });
        }
    }
    let k = indices.len();
    let mut out = Array2::<f64>::zeros((m, k + 1));
    for (dst, &src) in indices.iter().enumerate() {
        out.column_mut(dst).assign(&x.column(src));
    }
    out.column_mut(k).assign(&y);
    Ok(out)
}
