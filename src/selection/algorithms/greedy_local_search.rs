//! selection::algorithms::greedy_local_search — forward regression, local
//! refinement and a complementary forward pass, best of three.
//!
//! Purpose
//! -------
//! Combine the greedy builder with a local-search refiner:
//!
//! 1. ForwardRegression on the full universe gives `(g₁, S₁)`.
//! 2. The refiner runs on the sub-problem `S₁ ∪ {target}` with the known
//!    `g(S₁) = g₁` as its universe value, giving `(g_p, S_p)`. The result
//!    counts only when `0 < |S_p| < |S₁|`.
//! 3. ForwardRegression on the complement `U \ S₁` (with
//!    `min(target_feats, |U \ S₁|)` steps) gives `(g₂, S₂)`; skipped when
//!    the complement is empty.
//! 4. The strict argmax over `g₁`, `g_p`, `g₂` in that order is returned.
//!
//! Key behaviors
//! -------------
//! - Sub-problem indices are mapped back through [`SubProblem`], which
//!   sorts relative indices before translating them.
//! - [`GreedyLocalSearch::run_detailed`] keeps all three candidates so the
//!   dominance property (`g(result) >= g₁, g₂` and `>= g_p` when applied)
//!   can be checked.
//! - Errors from the refiner (e.g. a regularizer with no positive
//!   singleton) propagate unchanged.
//!
//! Testing notes
//! -------------
//! - Unit tests run both refiners on the 10×6 regression fixture and check
//!   dominance, index mapping into the complement, and error propagation.
use crate::selection::algorithms::forward::ForwardRegression;
use crate::selection::algorithms::linear_local_search::LinearLocalSearch;
use crate::selection::algorithms::local_search::LocalSearch;
use crate::selection::algorithms::traits::{Refiner, Selection, SelectionAlgorithm, best_of};
use crate::selection::covariance::CovarianceView;
use crate::selection::diagnostics::{DiagnosticSink, diag, silent};
use crate::selection::errors::SelectionResult;
use crate::selection::index_map::{RelativeIndices, SortedIndices, SubProblem};
use crate::selection::options::SearchOptions;
use crate::selection::regularizers::Regularizer;
use log::Level;
use std::sync::Arc;

/// All candidates produced by one GreedyLocalSearch run.
///
/// - `forward`: `(g₁, S₁)` from the full-universe forward pass.
/// - `refined`: `(g_p, S_p)` in absolute indices, when the refinement was
///   useful (`0 < |S_p| < |S₁|`).
/// - `complement`: `(g₂, S₂)` in absolute indices, when `U \ S₁` was
///   non-empty.
/// - `best`: the returned selection.
#[derive(Debug, Clone, PartialEq)]
pub struct GreedyOutcome {
    pub forward: Selection,
    pub refined: Option<Selection>,
    pub complement: Option<Selection>,
    pub best: Selection,
}

#[derive(Debug, Clone)]
pub struct GreedyLocalSearch<R: Regularizer, L: Refiner> {
    forward: ForwardRegression<R>,
    refiner: L,
    sink: Arc<dyn DiagnosticSink>,
}

impl<R: Regularizer, L: Refiner> GreedyLocalSearch<R, L> {
    /// Compose a forward pass and a refiner. Both should share the same
    /// `eta` and regularizer parameters.
    pub fn new(forward: ForwardRegression<R>, refiner: L) -> Self {
        Self { forward, refiner, sink: silent() }
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// run_detailed — run all three stages and keep every candidate.
    ///
    /// Parameters
    /// ----------
    /// - `cov`: `&CovarianceView<'_>`
    ///   Full universe, target last.
    /// - `target_feats`: `usize`
    ///   Cardinality for the forward passes (`0` = natural stopping).
    ///
    /// Errors
    /// ------
    /// - `SelectionError::TargetExceedsUniverse` from the first forward pass.
    /// - Any error raised by the refiner on the `S₁` sub-problem.
    pub fn run_detailed(
        &self, cov: &CovarianceView<'_>, target_feats: usize,
    ) -> SelectionResult<GreedyOutcome> {
        let n = cov.num_features();

        // Forward regression on U
        let forward = self.forward.run(cov, target_feats)?;
        diag!(
            self.sink,
            Level::Debug,
            "greedy: g(S1) = {:.6}, |S1| = {}",
            forward.value,
            forward.len()
        );
        let s1 = SortedIndices::new(forward.indices.clone(), n)?;

        // Refinement on S1
        let refined = if s1.len() >= 2 {
            let sub = SubProblem::new(s1.as_slice().to_vec(), n)?;
            let sub_cov = sub.covariance(cov);
            let sub_view = CovarianceView::from_validated(sub_cov.view());
            let sp = self.refiner.refine(&sub_view, Some(forward.value))?;
            diag!(self.sink, Level::Debug, "greedy: g(Sp) = {:.6}, |Sp| = {}", sp.value, sp.len());
            if !sp.is_empty() && sp.len() < s1.len() {
                let abs = sub.to_absolute(&RelativeIndices::new(sp.indices))?;
                Some(Selection::new(sp.value, abs))
            } else {
                None
            }
        } else {
            None
        };

        // Forward regression on U \ S1
        let rest = SubProblem::complement(&s1, n);
        let complement = if rest.is_empty() {
            None
        } else {
            let rest_cov = rest.covariance(cov);
            let rest_view = CovarianceView::from_validated(rest_cov.view());
            let s2 = self.forward.run(&rest_view, target_feats.min(rest.len()))?;
            let abs = rest.to_absolute(&RelativeIndices::new(s2.indices))?;
            diag!(
                self.sink,
                Level::Debug,
                "greedy: g(S2) = {:.6}, |S2| = {}",
                s2.value,
                abs.len()
            );
            Some(Selection::new(s2.value, abs))
        };

        let candidates = std::iter::once(&forward)
            .chain(refined.as_ref())
            .chain(complement.as_ref())
            .map(|s| (s.value, s.indices.clone()));
        let best = best_of(candidates).unwrap_or_else(|| forward.clone());
        self.sink.print_indices(Level::Debug, "greedy selection", &best.indices);
        Ok(GreedyOutcome { forward, refined, complement, best })
    }
}

impl<R: Regularizer> GreedyLocalSearch<R, LocalSearch<R>> {
    /// Forward regression refined by [`LocalSearch`].
    pub fn with_local_search(regularizer: R, options: SearchOptions) -> SelectionResult<Self> {
        let forward = ForwardRegression::new(regularizer.clone(), options)?;
        let refiner = LocalSearch::new(regularizer, options)?;
        Ok(Self::new(forward, refiner))
    }
}

impl<R: Regularizer> GreedyLocalSearch<R, LinearLocalSearch<R>> {
    /// Forward regression refined by [`LinearLocalSearch`].
    pub fn with_linear_local_search(
        regularizer: R, options: SearchOptions,
    ) -> SelectionResult<Self> {
        let forward = ForwardRegression::new(regularizer.clone(), options)?;
        let refiner = LinearLocalSearch::new(regularizer, options)?;
        Ok(Self::new(forward, refiner))
    }
}

impl<R: Regularizer, L: Refiner> SelectionAlgorithm for GreedyLocalSearch<R, L> {
    fn run(&self, cov: &CovarianceView<'_>, target_feats: usize) -> SelectionResult<Selection> {
        Ok(self.run_detailed(cov, target_feats)?.best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::algorithms::forward::tests::regression_cov;
    use crate::selection::errors::{ErrorKind, SelectionError};
    use crate::selection::objective::Objective;
    use crate::selection::regularizers::{
        DummyRegularizer, SmoothedDifferentialEntropy, SpectralVariance,
    };
    use approx::assert_relative_eq;
    use ndarray::Array2;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Dominance of the returned value over every candidate.
    // - Recomputing each candidate's g from its absolute indices.
    // - Disjointness of S1 and S2 (index mapping into the complement).
    // - Error propagation from the refiner and from cardinality checks.
    // -------------------------------------------------------------------------

    fn g_of<R: Regularizer>(obj: &Objective<R>, cov: &CovarianceView<'_>, idx: &[usize]) -> f64 {
        obj.evaluate(cov.gather_augmented(idx).view())
    }

    #[test]
    // Purpose
    // -------
    // The returned value dominates every candidate, and each candidate's
    // value is g of its absolute indices.
    //
    // Given
    // -----
    // - Fixture covariance, entropy regularizer, eta = 0.5, k = 3.
    //
    // Expect
    // ------
    // - best.value >= forward.value and >= complement.value.
    // - S2 is disjoint from S1 and lies inside U.
    fn outcome_dominates_all_candidates() {
        // Arrange
        let c = regression_cov();
        let cov = CovarianceView::new(c.view()).unwrap();
        let reg = SmoothedDifferentialEntropy::default();
        let gls = GreedyLocalSearch::with_local_search(reg, SearchOptions::default()).unwrap();
        let obj = Objective::new(0.5, reg).unwrap();

        // Act
        let out = gls.run_detailed(&cov, 3).unwrap();

        // Assert
        assert_eq!(out.forward.len(), 3);
        assert!(out.best.value >= out.forward.value);
        assert_relative_eq!(
            out.forward.value,
            g_of(&obj, &cov, &out.forward.indices),
            epsilon = 1e-10
        );
        let s2 = out.complement.as_ref().unwrap();
        assert_eq!(s2.len(), 2);
        assert!(out.best.value >= s2.value);
        assert!(s2.indices.iter().all(|i| !out.forward.indices.contains(i) && *i < 5));
        assert_relative_eq!(s2.value, g_of(&obj, &cov, &s2.indices), epsilon = 1e-10);
        if let Some(sp) = &out.refined {
            assert!(out.best.value >= sp.value);
            assert!(sp.indices.iter().all(|i| out.forward.indices.contains(i)));
        }
    }

    #[test]
    // Purpose
    // -------
    // With a linear refiner and spectral variance, every candidate is
    // dominated and the best selection is one of them.
    fn linear_refiner_outcome_is_consistent() {
        let c = regression_cov();
        let cov = CovarianceView::new(c.view()).unwrap();
        let opts = SearchOptions::default().with_parallel(false);
        let gls = GreedyLocalSearch::with_linear_local_search(SpectralVariance, opts).unwrap();

        let out = gls.run_detailed(&cov, 2).unwrap();

        let all: Vec<&Selection> =
            std::iter::once(&out.forward).chain(&out.refined).chain(&out.complement).collect();
        assert!(all.iter().all(|s| out.best.value >= s.value));
        assert!(all.iter().any(|s| **s == out.best));
    }

    #[test]
    // Purpose
    // -------
    // A dummy regularizer cannot seed LocalSearch; the contract violation
    // surfaces through the meta-algorithm.
    fn refiner_contract_violation_propagates() {
        let c = regression_cov();
        let cov = CovarianceView::new(c.view()).unwrap();
        let gls = GreedyLocalSearch::with_local_search(DummyRegularizer, SearchOptions::default())
            .unwrap();

        let err = gls.run(&cov, 3).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ContractViolation);
    }

    #[test]
    // Purpose
    // -------
    // Selecting the whole universe leaves no complement and the forward
    // result stands when refinement is not useful.
    fn full_target_skips_complement() {
        let c = regression_cov();
        let cov = CovarianceView::new(c.view()).unwrap();
        let gls = GreedyLocalSearch::with_linear_local_search(
            SmoothedDifferentialEntropy::default(),
            SearchOptions::default(),
        )
        .unwrap();

        let out = gls.run_detailed(&cov, 5).unwrap();

        assert!(out.complement.is_none());
        assert!(out.refined.is_none());
        assert_eq!(out.best, out.forward);
        assert_eq!(out.best.indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn rejects_target_larger_than_universe() {
        let c = Array2::<f64>::eye(3);
        let cov = CovarianceView::new(c.view()).unwrap();
        let opts = SearchOptions::default();
        let gls = GreedyLocalSearch::with_local_search(SpectralVariance, opts).unwrap();

        assert_eq!(
            gls.run(&cov, 3).unwrap_err(),
            SelectionError::TargetExceedsUniverse { target: 3, universe: 2 }
        );
    }
}
