//! Spectral variance: `f(C_S) = 9k² − Σ_i (λ_i − 1)²` over the eigenvalues
//! of a `k×k` block.
use super::Regularizer;
use crate::numerical_stability::symmetric_eigenvalues;
use ndarray::ArrayView2;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpectralVariance;

impl Regularizer for SpectralVariance {
    type Params = ();

    fn value(&self, cov: ArrayView2<'_, f64>) -> f64 {
        let eigenvalues = symmetric_eigenvalues(cov);
        let k = eigenvalues.len() as f64;
        let spread: f64 = eigenvalues.iter().map(|&l| (l - 1.0).powi(2)).sum();
        9.0 * k * k - spread
    }

    fn set_params(&mut self, _params: ()) {}

    fn params(&self) {}
}
