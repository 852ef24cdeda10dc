//! selection::algorithms::local_search — (1 + ε/n²)-approximate local search
//! on the regularizer, followed by an objective-aware three-way choice.
//!
//! Purpose
//! -------
//! Approximately maximize a monotone submodular regularizer `f` over the
//! universe, then guard against a regularizer-optimal but objective-poor
//! set by comparing `g` on `S`, `U \ S` and `U`.
//!
//! Key behaviors
//! -------------
//! - Seeding: evaluate `f({j})` for every `j`; the strict argmax (lowest
//!   index on ties) becomes `S`. If no singleton is positive the regularizer
//!   has broken its contract and the search fails with
//!   `SelectionError::ContractViolation`.
//! - Improving: with `limit = 1 + eps / n²`, each round scans unselected
//!   indices in ascending order and adds the **first** `j` with
//!   `f(S ∪ {j}) >= limit · f(S)`. The round ends the loop when nothing
//!   qualifies or `|S| = n`.
//! - Finalizing: strict argmax of `g` over `S`, `U \ S` (when non-empty) and
//!   `U`, in that order. `g(U)` can be supplied by the caller through
//!   [`Refiner::refine`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `n >= 1`; an empty universe fails with `SelectionError::EmptyUniverse`.
//! - The scan order is fixed (ascending), so results do not depend on
//!   `SearchOptions::parallel`; the parallel scan uses rayon's `find_first`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the contract violation, the first-improvement rule on
//!   a constructed covariance, and the final three-way comparison on the
//!   10×6 regression fixture.
use crate::selection::algorithms::traits::{
    Refiner, Selection, SelectionAlgorithm, argmax, best_of, evaluate_candidates, first_accepted,
};
use crate::selection::covariance::CovarianceView;
use crate::selection::diagnostics::{DiagnosticSink, diag, silent};
use crate::selection::errors::{SelectionError, SelectionResult};
use crate::selection::index_map::SortedIndices;
use crate::selection::objective::Objective;
use crate::selection::options::SearchOptions;
use crate::selection::regularizers::Regularizer;
use log::Level;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LocalSearch<R: Regularizer> {
    objective: Objective<R>,
    options: SearchOptions,
    sink: Arc<dyn DiagnosticSink>,
}

impl<R: Regularizer> LocalSearch<R> {
    /// # Errors
    /// - `SelectionError::InvalidEta` if `options.eta()` is invalid.
    /// - `SelectionError::InvalidEps` if `options.eps()` is invalid.
    pub fn new(regularizer: R, options: SearchOptions) -> SelectionResult<Self> {
        let options = options.validated()?;
        Ok(Self { objective: Objective::new(options.eta(), regularizer)?, options, sink: silent() })
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn objective(&self) -> &Objective<R> {
        &self.objective
    }

    /// maximize_regularizer — seeding and improving phases only.
    ///
    /// Returns
    /// -------
    /// `SelectionResult<(f64, Vec<usize>)>`
    ///   `f(S)` and `S` in ascending order.
    ///
    /// Errors
    /// ------
    /// - `SelectionError::EmptyUniverse` if `cov` has no predictors.
    /// - `SelectionError::ContractViolation` if no singleton has `f > 0`.
    pub fn maximize_regularizer(
        &self, cov: &CovarianceView<'_>,
    ) -> SelectionResult<(f64, Vec<usize>)> {
        let n = cov.num_features();
        if n == 0 {
            return Err(SelectionError::EmptyUniverse);
        }
        let parallel = self.options.parallel();
        let f = |idx: &[usize]| self.objective.regularizer_value(cov.gather_sorted(idx).view());

        // Seeding
        let universe: Vec<usize> = (0..n).collect();
        let singletons = evaluate_candidates(&universe, parallel, |j| f(&[j]));
        let seed = argmax(&universe, &singletons).filter(|&(_, v)| v > 0.0);
        let Some((first, mut maxval)) = seed else {
            return Err(SelectionError::ContractViolation {
                reason: "regularizer must be positive, monotone and submodular: \
                         no singleton has a positive value",
            });
        };
        diag!(self.sink, Level::Debug, "local search seed: index {first}, f = {maxval:.6}");

        // Improving
        let limit = 1.0 + self.options.eps() / (n as f64 * n as f64);
        let mut selected = vec![first];
        let mut in_set = vec![false; n];
        in_set[first] = true;
        while selected.len() < n {
            let threshold = limit * maxval;
            let candidates: Vec<usize> = (0..n).filter(|&j| !in_set[j]).collect();
            let found = first_accepted(
                &candidates,
                parallel,
                |j| f(&sorted_with(&selected, j)),
                |v| v >= threshold,
            );
            let Some((j, val)) = found else {
                diag!(self.sink, Level::Debug, "local search: no index reaches {threshold:.6}");
                break;
            };
            diag!(self.sink, Level::Debug, "local search: add {j}, f = {val:.6}");
            selected = sorted_with(&selected, j);
            in_set[j] = true;
            maxval = val;
        }
        Ok((maxval, selected))
    }
}

impl<R: Regularizer> Refiner for LocalSearch<R> {
    /// refine — local search followed by the `S` / `U \ S` / `U` choice.
    ///
    /// Parameters
    /// ----------
    /// - `cov`: `&CovarianceView<'_>`
    ///   Universe to search, target last.
    /// - `universe_value`: `Option<f64>`
    ///   Known `g(U)`; computed from `cov` when `None`.
    ///
    /// Errors
    /// ------
    /// - See [`LocalSearch::maximize_regularizer`].
    fn refine(
        &self, cov: &CovarianceView<'_>, universe_value: Option<f64>,
    ) -> SelectionResult<Selection> {
        let n = cov.num_features();
        let (_, selected) = self.maximize_regularizer(cov)?;
        let g = |idx: &[usize]| self.objective.evaluate(cov.gather_augmented(idx).view());

        let mut candidates = vec![(g(&selected), selected.clone())];
        if selected.len() < n {
            let rest = SortedIndices::new(selected, n)?.complement(n).into_vec();
            let g_u = universe_value.unwrap_or_else(|| self.objective.evaluate(cov.as_array()));
            candidates.push((g(&rest), rest));
            candidates.push((g_u, (0..n).collect()));
        }
        for (value, idx) in &candidates {
            diag!(
                self.sink,
                Level::Debug,
                "local search candidate |S| = {}: g = {value:.6}",
                idx.len()
            );
        }
        best_of(candidates).ok_or(SelectionError::EmptyUniverse)
    }
}

impl<R: Regularizer> SelectionAlgorithm for LocalSearch<R> {
    /// Runs [`Refiner::refine`] with no known `g(U)`; `target_feats` is
    /// ignored.
    fn run(&self, cov: &CovarianceView<'_>, _target_feats: usize) -> SelectionResult<Selection> {
        self.refine(cov, None)
    }
}

fn sorted_with(sorted: &[usize], j: usize) -> Vec<usize> {
    let mut out = sorted.to_vec();
    let pos = out.partition_point(|&x| x < j);
    out.insert(pos, j);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::algorithms::forward::tests::regression_cov;
    use crate::selection::algorithms::{
        AllFeatures, ForwardRegression, GreedyLocalSearch, LinearLocalSearch,
    };
    use crate::selection::errors::ErrorKind;
    use crate::selection::regularizers::{DummyRegularizer, SmoothedDifferentialEntropy};
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The contract violation raised for a regularizer with no positive
    //   singleton.
    // - First-improvement growth and the eps threshold.
    // - The final three-way comparison, with and without a supplied g(U).
    // -------------------------------------------------------------------------

    fn ls(eps: f64, parallel: bool) -> LocalSearch<SmoothedDifferentialEntropy> {
        let opts = SearchOptions::new(0.5, eps, parallel).unwrap();
        LocalSearch::new(SmoothedDifferentialEntropy::default(), opts).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // A regularizer that is identically zero fails the seeding check.
    fn dummy_regularizer_is_a_contract_violation() {
        let c = regression_cov();
        let cov = CovarianceView::new(c.view()).unwrap();
        let search = LocalSearch::new(DummyRegularizer, SearchOptions::default()).unwrap();

        let err = search.refine(&cov, None).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ContractViolation);
    }

    #[test]
    fn empty_universe_is_rejected() {
        let c = array![[1.0]];
        let cov = CovarianceView::new(c.view()).unwrap();

        assert_eq!(ls(22.0, false).refine(&cov, None).unwrap_err(), SelectionError::EmptyUniverse);
    }

    #[test]
    // Purpose
    // -------
    // With eps = 0 the threshold is f(S) itself, so every index is added
    // (f is monotone); with the default eps on 5 unit-variance features the
    // threshold 1.88 · f({0}) is never met.
    //
    // Given
    // -----
    // - 10×6 fixture covariance (unit diagonal), entropy with delta = 1.
    //
    // Expect
    // ------
    // - eps = 0: S = {0..4}.
    // - eps = 22: S = {0} with f = log2(2) = 1.
    fn eps_controls_growth() {
        // Arrange
        let c = regression_cov();
        let cov = CovarianceView::new(c.view()).unwrap();

        // Act
        let (f_all, all) = ls(0.0, true).maximize_regularizer(&cov).unwrap();
        let (f_seed, seed) = ls(22.0, false).maximize_regularizer(&cov).unwrap();

        // Assert
        assert_eq!(all, vec![0, 1, 2, 3, 4]);
        assert_relative_eq!(f_all, 3.456_704_343_6, epsilon = 1e-6);
        assert_eq!(seed, vec![0]);
        assert_relative_eq!(f_seed, 1.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The improving phase takes the first qualifying index, not the best.
    //
    // Given
    // -----
    // - Uncorrelated predictors with variances [1, 1.5, 3]; entropy values
    //   f({2}) = 2, f({0,2}) = 3, f({1,2}) ≈ 3.32, f(U) ≈ 4.32.
    // - eps = 4.05, so limit = 1.45.
    //
    // Expect
    // ------
    // - Seed 2; round one adds 0 (3 >= 2.9) even though 1 gains more;
    //   round two needs 4.35 and stops. S = {0, 2}.
    fn improvement_takes_first_qualifying_index() {
        // Arrange
        let c = array![[1.0, 0.0, 0.0, 0.1], [0.0, 1.5, 0.0, 0.1], [0.0, 0.0, 3.0, 0.1], [
            0.1, 0.1, 0.1, 1.0
        ]];
        let cov = CovarianceView::new(c.view()).unwrap();
        let search = ls(4.05, true).with_sink(Arc::new(crate::selection::diagnostics::Silent));

        // Act
        let (f_s, s) = search.maximize_regularizer(&cov).unwrap();

        // Assert
        assert_eq!(s, vec![0, 2]);
        assert_relative_eq!(f_s, 3.0, epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // The final comparison prefers U when it scores best, and a supplied
    // g(U) replaces the computed one.
    //
    // Given
    // -----
    // - Fixture covariance, eps = 22, so S = {0}.
    // - g(U) = R²(U) + 0.5·f(U) ≈ 0.91578 + 1.72835.
    //
    // Expect
    // ------
    // - Without a hint: all five indices, value ≈ 2.64413.
    // - With a hint of 10.0: same indices, value 10.0.
    // - With a hint of 0.0: the better of S and U \ S wins instead.
    fn final_choice_uses_universe_value() {
        // Arrange
        let c = regression_cov();
        let cov = CovarianceView::new(c.view()).unwrap();
        let search = ls(22.0, true);

        // Act
        let computed = search.refine(&cov, None).unwrap();
        let hinted = search.refine(&cov, Some(10.0)).unwrap();
        let suppressed = search.refine(&cov, Some(0.0)).unwrap();

        // Assert
        assert_eq!(computed.indices, vec![0, 1, 2, 3, 4]);
        assert_relative_eq!(computed.value, 0.915_776_544 + 0.5 * 3.456_704_344, epsilon = 1e-6);
        assert_eq!(hinted.value, 10.0);
        assert_eq!(suppressed.indices, vec![1, 2, 3, 4]);
    }

    #[test]
    // Purpose
    // -------
    // Constructors re-check the whole of `SearchOptions`, so a NaN or
    // negative slack cannot reach the improvement threshold.
    //
    // Given
    // -----
    // - Unvalidated options with eps in {NaN, -50}, eta = 0.5.
    //
    // Expect
    // ------
    // - Every algorithm constructor fails with `InvalidEps`.
    // - The same options with eps = 22 construct normally.
    fn constructors_reject_invalid_slack() {
        for eps in [f64::NAN, -50.0] {
            // Arrange
            let opts = SearchOptions::unchecked(0.5, eps, false);
            let is_invalid_eps =
                |e: &SelectionError| matches!(e, SelectionError::InvalidEps { .. });

            // Act / Assert
            let ls = LocalSearch::new(SmoothedDifferentialEntropy::default(), opts);
            assert!(is_invalid_eps(&ls.unwrap_err()), "eps {eps}");
            let fr = ForwardRegression::new(DummyRegularizer, opts);
            assert!(is_invalid_eps(&fr.unwrap_err()), "eps {eps}");
            let lls = LinearLocalSearch::new(DummyRegularizer, opts);
            assert!(is_invalid_eps(&lls.unwrap_err()), "eps {eps}");
            let all = AllFeatures::new(DummyRegularizer, opts);
            assert!(is_invalid_eps(&all.unwrap_err()), "eps {eps}");
            let gls = GreedyLocalSearch::with_local_search(DummyRegularizer, opts);
            assert!(is_invalid_eps(&gls.unwrap_err()), "eps {eps}");
        }

        let ok = SearchOptions::unchecked(0.5, 22.0, false);
        let ls = LocalSearch::new(SmoothedDifferentialEntropy::default(), ok).unwrap();
        assert_eq!(ls.options.eps(), 22.0);
    }
}
