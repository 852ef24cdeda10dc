//! Small dense linear-algebra kernels shared by the selection objective and
//! the regularizers.
//!
//! Every routine here takes an `ndarray` view of a symmetric block, copies
//! it once into a `nalgebra::DMatrix` and runs a single decomposition on
//! it. Only the upper triangle (plus diagonal) of the input is read; the
//! lower triangle of the `DMatrix` is mirrored from it.
//!
//! # Provided items
//! - [`DEGENERACY_EPS`]: threshold on the smallest predictor variance below
//!   which the R² term is treated as degenerate.
//! - [`SYMMETRY_TOL`]: relative tolerance used when validating that a
//!   covariance matrix is symmetric.
//! - [`fill_dmatrix`] / [`to_dmatrix`]: `ndarray` → `nalgebra` bridge.
//! - [`symmetric_eigenvalues`]: real spectrum of a symmetric block.
//! - [`cholesky_quadratic_form`]: `bᵀ A⁻¹ b` for symmetric positive-definite
//!   `A`, or `None` when the factorization breaks down.
//! - [`min_diagonal`]: smallest diagonal entry of a square block.
use nalgebra::{DMatrix, DVector};
use ndarray::{ArrayView1, ArrayView2};

/// Smallest predictor variance treated as non-degenerate.
///
/// A predictor block whose minimal diagonal entry is at most this value
/// contributes `R² = 0` instead of going through the Cholesky solve.
pub const DEGENERACY_EPS: f64 = f64::EPSILON;

/// Relative tolerance for `|C[i,j] - C[j,i]|` when validating covariance
/// input. Scaled by `max(1, |C[i,j]|, |C[j,i]|)`.
pub const SYMMETRY_TOL: f64 = 1e-8;

/// fill_dmatrix — copy a symmetric `ndarray` block into a `nalgebra::DMatrix`.
///
/// Parameters
/// ----------
/// - `block`: `ArrayView2<'_, f64>`
///   Square `k×k` block. Only entries with `i <= j` are read.
/// - `out`: `&mut DMatrix<f64>`
///   Preallocated `k×k` destination. Both triangles are written.
///
/// Panics
/// ------
/// - May panic on out-of-bounds indexing if `out` is smaller than `block`.
///   Shapes are a caller invariant.
///
/// Notes
/// -----
/// - Traversal is column by column, matching the column-major storage of
///   `DMatrix`.
pub fn fill_dmatrix(block: ArrayView2<'_, f64>, out: &mut DMatrix<f64>) {
    let n = block.ncols();
    for j in 0..n {
        for i in 0..=j {
            let v = block[[i, j]];
            out[(i, j)] = v;
            out[(j, i)] = v;
        }
    }
}

/// Allocate a `DMatrix` holding the symmetric completion of `block`'s upper
/// triangle.
pub fn to_dmatrix(block: ArrayView2<'_, f64>) -> DMatrix<f64> {
    let mut out = DMatrix::<f64>::zeros(block.nrows(), block.ncols());
    fill_dmatrix(block, &mut out);
    out
}

/// symmetric_eigenvalues — real eigenvalues of a symmetric block.
///
/// Parameters
/// ----------
/// - `block`: `ArrayView2<'_, f64>`
///   Square symmetric `k×k` block (upper triangle is authoritative).
///
/// Returns
/// -------
/// `Vec<f64>`
///   The `k` eigenvalues in the order produced by `symmetric_eigen`
///   (unsorted). Empty when `k == 0`.
///
/// Notes
/// -----
/// - The 0×0 case is handled explicitly so callers can evaluate set
///   functions on the empty set without special casing.
pub fn symmetric_eigenvalues(block: ArrayView2<'_, f64>) -> Vec<f64> {
    if block.nrows() == 0 {
        return Vec::new();
    }
    to_dmatrix(block).symmetric_eigenvalues().iter().copied().collect()
}

/// cholesky_quadratic_form — evaluate `bᵀ A⁻¹ b` through a Cholesky solve.
///
/// Parameters
/// ----------
/// - `a`: `ArrayView2<'_, f64>`
///   Symmetric `k×k` block, expected positive definite.
/// - `b`: `ArrayView1<'_, f64>`
///   Length-`k` right-hand side.
///
/// Returns
/// -------
/// `Option<f64>`
///   - `Some(bᵀ A⁻¹ b)` when `A = L Lᵀ` exists. Computed as `‖L⁻¹ b‖²`,
///     so the value is non-negative by construction.
///   - `Some(0.0)` when `k == 0`.
///   - `None` when `A` is not numerically positive definite.
pub fn cholesky_quadratic_form(a: ArrayView2<'_, f64>, b: ArrayView1<'_, f64>) -> Option<f64> {
    let k = a.nrows();
    if k == 0 {
        return Some(0.0);
    }
    let chol = to_dmatrix(a).cholesky()?;
    let rhs = DVector::from_iterator(k, b.iter().copied());
    let z = chol.l().solve_lower_triangular(&rhs)?;
    let value = z.norm_squared();
    if value.is_finite() { Some(value) } else { None }
}

/// Smallest diagonal entry of a square block, `+∞` for a 0×0 block.
pub fn min_diagonal(block: ArrayView2<'_, f64>) -> f64 {
    block.diag().iter().copied().fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Upper-triangle mirroring in `fill_dmatrix`.
    // - Eigenvalues of small symmetric blocks, including the empty block.
    // - The Cholesky quadratic form on PD, empty and indefinite inputs.
    //
    // They intentionally DO NOT cover:
    // - Objective-level guards (see `selection::objective`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `fill_dmatrix` must only trust the upper triangle.
    //
    // Given
    // -----
    // - A 2×2 array whose lower-left entry disagrees with its upper-right.
    //
    // Expect
    // ------
    // - Both off-diagonal slots of the `DMatrix` carry the upper value.
    fn fill_dmatrix_mirrors_upper_triangle() {
        // Arrange
        let a = array![[2.0, 0.5], [9.0, 3.0]];
        let mut out = DMatrix::<f64>::zeros(2, 2);

        // Act
        fill_dmatrix(a.view(), &mut out);

        // Assert
        assert_eq!(out[(0, 0)], 2.0);
        assert_eq!(out[(1, 1)], 3.0);
        assert_eq!(out[(0, 1)], 0.5);
        assert_eq!(out[(1, 0)], 0.5);
    }

    #[test]
    // Purpose
    // -------
    // Eigenvalues of a 2×2 symmetric block match the closed form.
    //
    // Given
    // -----
    // - [[2, 1], [1, 2]], with spectrum {1, 3}.
    //
    // Expect
    // ------
    // - Sorted eigenvalues equal [1, 3].
    fn symmetric_eigenvalues_match_closed_form() {
        // Arrange
        let a = array![[2.0, 1.0], [1.0, 2.0]];

        // Act
        let mut ev = symmetric_eigenvalues(a.view());
        ev.sort_by(|x, y| x.total_cmp(y));

        // Assert
        assert_eq!(ev.len(), 2);
        assert_relative_eq!(ev[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(ev[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The empty block has an empty spectrum.
    fn symmetric_eigenvalues_of_empty_block_is_empty() {
        let a = Array2::<f64>::zeros((0, 0));
        assert!(symmetric_eigenvalues(a.view()).is_empty());
    }

    #[test]
    // Purpose
    // -------
    // `bᵀ A⁻¹ b` via Cholesky agrees with a hand-computed inverse.
    //
    // Given
    // -----
    // - A = [[4, 2], [2, 3]] (det 8), b = [1, 1].
    //
    // Expect
    // ------
    // - A⁻¹ = [[3, -2], [-2, 4]] / 8 so bᵀA⁻¹b = 3/8.
    fn cholesky_quadratic_form_matches_explicit_inverse() {
        // Arrange
        let a = array![[4.0, 2.0], [2.0, 3.0]];
        let b = array![1.0, 1.0];

        // Act
        let q = cholesky_quadratic_form(a.view(), b.view());

        // Assert
        assert_relative_eq!(q.unwrap(), 0.375, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Indefinite input fails the factorization instead of producing garbage.
    //
    // Given
    // -----
    // - A = [[1, 2], [2, 1]] with eigenvalues {-1, 3}.
    //
    // Expect
    // ------
    // - `None`.
    fn cholesky_quadratic_form_rejects_indefinite_block() {
        let a = array![[1.0, 2.0], [2.0, 1.0]];
        let b = array![1.0, 0.0];
        assert!(cholesky_quadratic_form(a.view(), b.view()).is_none());
    }

    #[test]
    fn cholesky_quadratic_form_of_empty_block_is_zero() {
        let a = Array2::<f64>::zeros((0, 0));
        let b = ndarray::Array1::<f64>::zeros(0);
        assert_eq!(cholesky_quadratic_form(a.view(), b.view()), Some(0.0));
    }

    #[test]
    fn min_diagonal_picks_smallest_variance() {
        let a = array![[1.0, 0.0, 0.0], [0.0, 0.25, 0.0], [0.0, 0.0, 4.0]];
        assert_eq!(min_diagonal(a.view()), 0.25);
        assert_eq!(min_diagonal(Array2::<f64>::zeros((0, 0)).view()), f64::INFINITY);
    }
}
