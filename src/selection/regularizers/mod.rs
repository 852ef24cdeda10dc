//! selection::regularizers — monotone submodular set functions over a
//! predictor covariance block.
//!
//! Purpose
//! -------
//! Define the [`Regularizer`] capability consumed by the objective and the
//! local-search algorithms, and provide its three implementations:
//! [`DummyRegularizer`] (always `0`), [`SmoothedDifferentialEntropy`]
//! (log-smoothed spectrum) and [`SpectralVariance`] (spread of the spectrum
//! around `1`).
//!
//! Key behaviors
//! -------------
//! - [`Regularizer::value`] maps a `k×k` predictor covariance block `C_S`
//!   (no target row/column) to a scalar.
//! - [`Regularizer::set_params`] replaces the regularizer's parameters;
//!   parameter types are validated when they are built.
//! - Every implementation returns `0` on the empty (0×0) block.
//!
//! Invariants & assumptions
//! ------------------------
//! - Callers rely on, but this module does not check, three properties:
//!   `value >= 0`, monotone non-decreasing as indices are added, and
//!   submodular. LocalSearch performs the only runtime check (a positive
//!   singleton must exist).
//! - Inputs are symmetric; only their upper triangle is read.
//!
//! Conventions
//! -----------
//! - Algorithms are generic over `R: Regularizer`, so each instantiation is
//!   monomorphized and the inner loops carry no dynamic dispatch.
//! - Implementations are cheap to clone and `Send + Sync` so rayon workers
//!   can share them by reference.
//!
//! Testing notes
//! -------------
//! - Each implementation has fixture tests on `mᵀm` for a fixed 3×3 `m`,
//!   plus monotonicity/submodularity spot checks on a well-conditioned
//!   covariance.
use ndarray::ArrayView2;
use std::fmt;

pub mod dummy;
pub mod entropy;
pub mod spectral;

pub use self::dummy::DummyRegularizer;
pub use self::entropy::{EntropyParams, SmoothedDifferentialEntropy};
pub use self::spectral::SpectralVariance;

/// A set function over covariance submatrices.
pub trait Regularizer: Clone + fmt::Debug + Send + Sync {
    /// Parameter bundle accepted by [`Regularizer::set_params`].
    type Params: Clone + fmt::Debug + Default + Send + Sync;

    /// Value of the regularizer on the predictor block `cov` (`k×k`).
    fn value(&self, cov: ArrayView2<'_, f64>) -> f64;

    /// Replace the parameters.
    fn set_params(&mut self, params: Self::Params);

    /// Current parameters.
    fn params(&self) -> Self::Params;
}

#[cfg(test)]
pub(crate) mod test_support {
    use ndarray::{Array2, array};

    /// `mᵀm` for the 3×3 fixture used by the entropy tests.
    pub fn entropy_fixture() -> Array2<f64> {
        let m = array![
            [0.539426, 0.097298, 0.343196],
            [0.602504, 0.478170, 0.685719],
            [0.588226, 0.872861, 0.641877],
        ];
        m.t().dot(&m)
    }

    /// `mᵀm` for the 3×3 fixture used by the spectral-variance tests.
    pub fn spectral_fixture() -> Array2<f64> {
        let m = array![
            [0.47879, 0.14849, 0.69439],
            [0.68805, 0.79288, 0.49378],
            [0.54530, 0.59101, 0.52346],
        ];
        m.t().dot(&m)
    }

    /// Well-conditioned 4×4 covariance with unit variances.
    pub fn correlated_cov() -> Array2<f64> {
        array![
            [1.0, 0.3, 0.1, 0.2],
            [0.3, 1.0, 0.25, 0.05],
            [0.1, 0.25, 1.0, 0.15],
            [0.2, 0.05, 0.15, 1.0],
        ]
    }
}
