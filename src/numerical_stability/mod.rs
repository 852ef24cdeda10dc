//! numerical_stability — tolerances and guarded decompositions for the
//! selection objective.
//!
//! Purpose
//! -------
//! Centralize the small numerical tolerances and the dense decompositions
//! (Cholesky, symmetric eigen) that the selection layer evaluates inside its
//! inner loops, so the algorithms can assume well-defined `f64` results and
//! never see `NaN` from a degenerate block.
//!
//! Key behaviors
//! -------------
//! - Bridge `ndarray` views into `nalgebra::DMatrix` by reading only the
//!   upper triangle of a symmetric block.
//! - Expose the spectrum of a symmetric block (empty for 0×0).
//! - Evaluate `bᵀ A⁻¹ b` through a Cholesky factor, returning `None` when
//!   `A` is not numerically positive definite.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are square and finite; shape validation is performed upstream
//!   by `selection::CovarianceView::new`.
//! - No routine here allocates more than one `DMatrix` per call.
//!
//! Conventions
//! -----------
//! - This module never logs, performs I/O or touches global state.
//! - Failure of a decomposition is reported as `None`; mapping that to a
//!   fallback value (e.g. `R² = 0`) is the caller's decision.
//!
//! Downstream usage
//! ----------------
//! - `selection::objective` uses [`cholesky_quadratic_form`],
//!   [`min_diagonal`] and [`DEGENERACY_EPS`] for the R² term.
//! - `selection::regularizers` use [`symmetric_eigenvalues`].
//! - `selection::covariance` uses [`SYMMETRY_TOL`] during validation.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`linalg`] compare against closed-form 2×2 results and
//!   cover empty and indefinite blocks.

pub mod linalg;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::linalg::{
    DEGENERACY_EPS, SYMMETRY_TOL, cholesky_quadratic_form, fill_dmatrix, min_diagonal,
    symmetric_eigenvalues, to_dmatrix,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::linalg::{
        DEGENERACY_EPS, SYMMETRY_TOL, cholesky_quadratic_form, min_diagonal,
        symmetric_eigenvalues,
    };
}
