//! selection — regularized feature-subset selection over a cached
//! covariance matrix.
//!
//! Purpose
//! -------
//! Choose a subset `S` of the `n` candidate features (columns of a design
//! matrix) that maximizes `g(S) = R²(S) + eta · f(C_S)`, where `R²` is the
//! squared multiple correlation with the target and `f` is a monotone
//! submodular regularizer of the predictor covariance block `C_S`.
//!
//! Key behaviors
//! -------------
//! - [`CovarianceView`] validates and borrows the `(n+1)×(n+1)` covariance
//!   (target last) and extracts predictor or augmented submatrices.
//! - [`Regularizer`] implementations: [`DummyRegularizer`],
//!   [`SmoothedDifferentialEntropy`], [`SpectralVariance`].
//! - [`Objective`] combines R² and the weighted regularizer, absorbing
//!   degenerate predictor blocks as `R² = 0`.
//! - Algorithms implementing [`SelectionAlgorithm`]: [`ForwardRegression`],
//!   [`LocalSearch`], [`LinearLocalSearch`], [`GreedyLocalSearch`] and the
//!   [`AllFeatures`] baseline.
//! - [`SubProblem`] maps indices of a restricted universe back to absolute
//!   feature indices.
//!
//! Invariants & assumptions
//! ------------------------
//! - The covariance is computed once from L2-normalized columns and is never
//!   mutated during a search; every derived submatrix is a private copy or a
//!   borrowed contiguous view.
//! - Returned index sets are sorted and duplicate-free, each `< n`.
//! - Structural problems (shapes, indices, parameters, cardinality) and
//!   broken regularizer contracts are reported through [`SelectionError`];
//!   numeric degeneracy is absorbed locally.
//!
//! Conventions
//! -----------
//! - `eta`, `eps` and `parallel` live in [`SearchOptions`]; the entropy
//!   smoothing constant lives in [`EntropyParams`].
//! - Diagnostics go through an injected [`DiagnosticSink`] (default
//!   [`Silent`]); [`LogSink`] forwards to the `log` facade.
//! - Parallel candidate evaluation (rayon) never changes results: ties are
//!   always resolved towards the lowest index.
//!
//! Downstream usage
//! ----------------
//! - Typical call:
//!   `GreedyLocalSearch::with_local_search(reg, opts)?.run(&view, k)?`.
//! - The `evaluation` module wraps this in a train/test harness.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each component; the fixed-oracle fixtures
//!   (10×6 forward-regression data, 3×3 regularizer data) are shared from
//!   the `forward` and `regularizers` test modules.
//! - `tests/integration_selection_pipeline.rs` exercises the public surface
//!   end to end.

pub mod algorithms;
pub mod covariance;
pub mod diagnostics;
pub mod errors;
pub mod index_map;
pub mod objective;
pub mod options;
pub mod regularizers;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::algorithms::{
    AllFeatures, ForwardRegression, ForwardStep, GreedyLocalSearch, GreedyOutcome,
    LinearLocalSearch, LocalSearch, Refiner, Selection, SelectionAlgorithm, Sweep,
};
pub use self::covariance::{CovarianceView, columns_with_target};
pub use self::diagnostics::{DiagnosticSink, LogSink, Silent};
pub use self::errors::{ErrorKind, SelectionError, SelectionResult};
pub use self::index_map::{RelativeIndices, SortedIndices, SubProblem};
pub use self::objective::{Objective, r_squared};
pub use self::options::{DEFAULT_EPS, DEFAULT_ETA, SearchOptions};
pub use self::regularizers::{
    DummyRegularizer, EntropyParams, Regularizer, SmoothedDifferentialEntropy, SpectralVariance,
};

// ---- Optional convenience prelude for downstream crates ------------------
//
// Downstream crates can `use rust_feature_selection::selection::prelude::*;`
// to import the primary selection surface in a single line.

pub mod prelude {
    pub use super::algorithms::{
        AllFeatures, ForwardRegression, GreedyLocalSearch, LinearLocalSearch, LocalSearch,
        Refiner, Selection, SelectionAlgorithm,
    };
    pub use super::covariance::CovarianceView;
    pub use super::diagnostics::{DiagnosticSink, LogSink, Silent};
    pub use super::errors::{SelectionError, SelectionResult};
    pub use super::objective::Objective;
    pub use super::options::SearchOptions;
    pub use super::regularizers::{
        DummyRegularizer, EntropyParams, Regularizer, SmoothedDifferentialEntropy,
        SpectralVariance,
    };
}
