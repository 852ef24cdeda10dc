//! selection::algorithms::linear_local_search — single-pass double-greedy
//! local search.
//!
//! Purpose
//! -------
//! Visit every feature once, in ascending order, and decide to add it to a
//! growing set `X` or remove it from a shrinking set `Y` by comparing the
//! two marginal changes of the regularizer `f`. After the pass `X` and the
//! surviving part of `Y` coincide and form `S`.
//!
//! Key behaviors
//! -------------
//! - Start from `f(X) = 0` (`X = ∅`) and `f(Y) = f(C[0..n, 0..n])`.
//! - At index `i`: `a = f(X ∪ {i}) − f(X)`, `b = f(Y \ {i}) − f(Y)`; add `i`
//!   when `a >= b` and `a > 0`, otherwise remove it. The running `f(X)` and
//!   `f(Y)` are the two values evaluated at the previous index, whichever
//!   way that index was decided.
//! - Contiguous fast path: while every decision so far is identical, `X`
//!   is evaluated on the top-left block `C[0..=i, 0..=i]` and `Y` on the
//!   bottom-right predictor block `C[i+1..n, i+1..n]`, both borrowed views.
//!   The first differing decision switches permanently to index-gather
//!   copies.
//! - Short circuit: if the pass ends still contiguous (everything added or
//!   everything removed), the result is `(0, S)` and `g` is never
//!   evaluated.
//! - Otherwise the strict argmax of `g` over `S`, `U \ S` and `U` is
//!   returned; `g(U)` may be supplied by the caller.
//!
//! Invariants & assumptions
//! ------------------------
//! - `X` equals the non-removed elements of `Y` at the end of the pass.
//!   This holds by construction and is re-checked with `debug_assert!`.
//! - `n >= 1`; an empty universe fails with `SelectionError::EmptyUniverse`.
//!
//! Testing notes
//! -------------
//! - Unit tests exercise both short-circuit branches, a non-contiguous pass
//!   with the final three-way choice, and the X/Y agreement of
//!   [`LinearLocalSearch::sweep`] across several covariances.
use crate::selection::algorithms::traits::{Refiner, Selection, SelectionAlgorithm, best_of};
use crate::selection::covariance::CovarianceView;
use crate::selection::diagnostics::{DiagnosticSink, diag, silent};
use crate::selection::errors::{SelectionError, SelectionResult};
use crate::selection::objective::Objective;
use crate::selection::options::SearchOptions;
use crate::selection::regularizers::Regularizer;
use log::Level;
use std::sync::Arc;

/// Outcome of the single pass, before any objective evaluation.
///
/// - `added`: the set `X`, ascending.
/// - `removed`: `removed[i]` is `true` when `i` was dropped from `Y`.
/// - `contiguous`: every decision was identical (all added or all removed).
/// - `f_x`, `f_y`: the regularizer values evaluated at the last index.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    pub added: Vec<usize>,
    pub removed: Vec<bool>,
    pub contiguous: bool,
    pub f_x: f64,
    pub f_y: f64,
}

impl Sweep {
    /// Elements of `Y` that were never removed, ascending.
    pub fn survivors(&self) -> Vec<usize> {
        self.removed.iter().enumerate().filter(|(_, r)| !**r).map(|(i, _)| i).collect()
    }

    /// Removed elements, ascending (`U \ S`).
    pub fn dropped(&self) -> Vec<usize> {
        self.removed.iter().enumerate().filter(|(_, r)| **r).map(|(i, _)| i).collect()
    }
}

#[derive(Debug, Clone)]
pub struct LinearLocalSearch<R: Regularizer> {
    objective: Objective<R>,
    sink: Arc<dyn DiagnosticSink>,
}

impl<R: Regularizer> LinearLocalSearch<R> {
    /// Only `options.eta()` is used; the pass has no slack parameter and is
    /// inherently sequential. The whole of `options` is still validated.
    ///
    /// # Errors
    /// - `SelectionError::InvalidEta` if `options.eta()` is invalid.
    /// - `SelectionError::InvalidEps` if `options.eps()` is invalid.
    pub fn new(regularizer: R, options: SearchOptions) -> SelectionResult<Self> {
        let options = options.validated()?;
        Ok(Self { objective: Objective::new(options.eta(), regularizer)?, sink: silent() })
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn objective(&self) -> &Objective<R> {
        &self.objective
    }

    /// sweep — run the add/remove pass over `0..n`.
    ///
    /// Errors
    /// ------
    /// - `SelectionError::EmptyUniverse` if `cov` has no predictors.
    pub fn sweep(&self, cov: &CovarianceView<'_>) -> SelectionResult<Sweep> {
        let n = cov.num_features();
        if n == 0 {
            return Err(SelectionError::EmptyUniverse);
        }
        let f = |block: ndarray::ArrayView2<'_, f64>| self.objective.regularizer_value(block);

        let mut f_x = 0.0;
        let mut f_y = f(cov.predictor_block(0, n));
        diag!(self.sink, Level::Debug, "linear local search: f(empty) = {f_x:.6}, f(U) = {f_y:.6}");

        let mut added: Vec<usize> = Vec::with_capacity(n);
        let mut removed = vec![false; n];
        let mut contiguous = true;

        for i in 0..n {
            let (cur_x, cur_y) = if contiguous {
                let x_block = cov.predictor_block(0, i + 1);
                let y_block = cov.predictor_block(i + 1, n - i - 1);
                self.sink.print_matrix(Level::Trace, "C_X", x_block);
                self.sink.print_matrix(Level::Trace, "C_Y", y_block);
                (f(x_block), f(y_block))
            } else {
                let mut x_idx = added.clone();
                x_idx.push(i);
                let y_idx: Vec<usize> = (0..n).filter(|&j| j != i && !removed[j]).collect();
                let c_x = cov.gather_sorted(&x_idx);
                let c_y = cov.gather_sorted(&y_idx);
                self.sink.print_matrix(Level::Trace, "C_X", c_x.view());
                self.sink.print_matrix(Level::Trace, "C_Y", c_y.view());
                (f(c_x.view()), f(c_y.view()))
            };

            let a = cur_x - f_x;
            let b = cur_y - f_y;
            if a >= b && a > 0.0 {
                added.push(i);
                diag!(self.sink, Level::Debug, "{i}: a = {a:.6}, b = {b:.6}, added");
            } else {
                removed[i] = true;
                diag!(self.sink, Level::Debug, "{i}: a = {a:.6}, b = {b:.6}, removed");
            }
            contiguous = removed[..=i].iter().all(|&r| r == removed[0]);
            f_x = cur_x;
            f_y = cur_y;
        }

        Ok(Sweep { added, removed, contiguous, f_x, f_y })
    }
}

impl<R: Regularizer> Refiner for LinearLocalSearch<R> {
    /// refine — single pass followed by the `S` / `U \ S` / `U` choice.
    ///
    /// Returns `(0, S)` without evaluating `g` when the pass stayed
    /// contiguous. `universe_value` is `g(U)` when already known.
    fn refine(
        &self, cov: &CovarianceView<'_>, universe_value: Option<f64>,
    ) -> SelectionResult<Selection> {
        let n = cov.num_features();
        let sweep = self.sweep(cov)?;
        debug_assert_eq!(sweep.added, sweep.survivors());
        self.sink.print_indices(Level::Debug, "X", &sweep.added);
        diag!(self.sink, Level::Debug, "selected features = {}", sweep.added.len());

        if sweep.contiguous {
            return Ok(Selection::new(0.0, sweep.added));
        }

        let g = |idx: &[usize]| self.objective.evaluate(cov.gather_augmented(idx).view());
        let rest = sweep.dropped();
        let g_u = universe_value.unwrap_or_else(|| self.objective.evaluate(cov.as_array()));
        let candidates = [
            (g(&sweep.added), sweep.added.clone()),
            (g(&rest), rest),
            (g_u, (0..n).collect()),
        ];
        best_of(candidates).ok_or(SelectionError::EmptyUniverse)
    }
}

impl<R: Regularizer> SelectionAlgorithm for LinearLocalSearch<R> {
    /// Runs [`Refiner::refine`] with no known `g(U)`; `target_feats` is
    /// ignored.
    fn run(&self, cov: &CovarianceView<'_>, _target_feats: usize) -> SelectionResult<Selection> {
        self.refine(cov, None)
    }
}
