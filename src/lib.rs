//! rust_feature_selection — regularized feature-subset selection for linear
//! regression.
//!
//! Purpose
//! -------
//! Select a small subset of candidate features that explains a target
//! variable well (high squared multiple correlation `R²`) while a monotone
//! submodular regularizer rewards diverse, well-conditioned subsets. All
//! algorithms work on a covariance matrix computed once from L2-normalized
//! data.
//!
//! Key behaviors
//! -------------
//! - `selection`: covariance view, regularizers, the objective
//!   `g(S) = R²(S) + eta · f(C_S)` and the search algorithms (forward
//!   regression, local search, linear local search, greedy local search).
//! - `evaluation`: dataset preprocessing, least-squares refits and error
//!   measures for train/test comparisons of the algorithms.
//! - `numerical_stability`: tolerances and guarded Cholesky / eigenvalue
//!   helpers shared by the objective and the regularizers.
//!
//! Invariants & assumptions
//! ------------------------
//! - The covariance is `(n+1)×(n+1)`, symmetric, finite, with the target as
//!   its last row/column. It is validated once by `CovarianceView::new` and
//!   never mutated afterwards.
//! - Returned index sets are sorted ascending and duplicate-free.
//!
//! Conventions
//! -----------
//! - Dense data uses `ndarray`; decompositions use `nalgebra`.
//! - Each top-level module owns its error enum (`SelectionError`,
//!   `EvalError`) and result alias.
//! - Diagnostics are opt-in through an injected sink; nothing is printed by
//!   default.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use ndarray::Array2;
//! use rust_feature_selection::selection::prelude::*;
//!
//! # fn main() -> Result<(), SelectionError> {
//! let cov: Array2<f64> = Array2::eye(4);
//! let view = CovarianceView::new(cov.view())?;
//! let opts = SearchOptions::default();
//! let gls = GreedyLocalSearch::with_local_search(SmoothedDifferentialEntropy::default(), opts)?;
//! let best = gls.run(&view, 2)?;
//! println!("g = {}, features = {:?}", best.value, best.indices);
//! # Ok(())
//! # }
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests sit next to each component; `tests/` holds end-to-end runs
//!   over the public API.

pub mod evaluation;
pub mod numerical_stability;
pub mod selection;
