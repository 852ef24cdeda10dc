//! selection::algorithms::forward — greedy forward regression.
//!
//! Purpose
//! -------
//! Grow a feature set one index at a time, always committing the unselected
//! index whose addition maximizes the objective `g`, until a requested
//! cardinality is reached (or, with `target_feats = 0`, until no candidate
//! strictly improves `g`).
//!
//! Key behaviors
//! -------------
//! - Candidate evaluations within one step are independent and run on rayon
//!   when `SearchOptions::parallel` is set. The argmax is always taken
//!   sequentially in ascending index order with a strict `>` comparison, so
//!   ties resolve to the lowest index in both modes.
//! - Steps are strictly sequential: each commit changes the candidate set of
//!   the next step.
//! - [`ForwardRegression::run_path`] exposes the committed `(index, g)`
//!   sequence; [`SelectionAlgorithm::run`] returns its last value and the
//!   sorted indices.
//!
//! Invariants & assumptions
//! ------------------------
//! - `target_feats <= n`; larger requests fail with
//!   `SelectionError::TargetExceedsUniverse` before any work is done.
//! - With a monotone regularizer the committed `g` values are
//!   non-decreasing.
//!
//! Testing notes
//! -------------
//! - The 10×6 fixture with a dummy regularizer and `k = 3` must select
//!   `{0, 1, 3}`; the per-step values are checked against an independent
//!   computation.
use crate::selection::algorithms::traits::{
    Selection, SelectionAlgorithm, argmax, evaluate_candidates,
};
use crate::selection::covariance::CovarianceView;
use crate::selection::diagnostics::{DiagnosticSink, diag, silent};
use crate::selection::errors::{SelectionError, SelectionResult};
use crate::selection::objective::Objective;
use crate::selection::options::SearchOptions;
use crate::selection::regularizers::Regularizer;
use log::Level;
use std::sync::Arc;

/// One committed step of forward regression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForwardStep {
    pub index: usize,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct ForwardRegression<R: Regularizer> {
    objective: Objective<R>,
    options: SearchOptions,
    sink: Arc<dyn DiagnosticSink>,
}

impl<R: Regularizer> ForwardRegression<R> {
    /// # Errors
    /// - `SelectionError::InvalidEta` if `options.eta()` is invalid.
    /// - `SelectionError::InvalidEps` if `options.eps()` is invalid.
    pub fn new(regularizer: R, options: SearchOptions) -> SelectionResult<Self> {
        let options = options.validated()?;
        Ok(Self { objective: Objective::new(options.eta(), regularizer)?, options, sink: silent() })
    }

    /// Attach a diagnostic sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn objective(&self) -> &Objective<R> {
        &self.objective
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// run_path — forward regression returning every committed step.
    ///
    /// Parameters
    /// ----------
    /// - `cov`: `&CovarianceView<'_>`
    ///   Universe of `n = cov.num_features()` candidates plus the target.
    /// - `target_feats`: `usize`
    ///   Number of steps; `0` grows while the best candidate strictly
    ///   improves `g`.
    ///
    /// Returns
    /// -------
    /// `SelectionResult<Vec<ForwardStep>>`
    ///   Steps in commit order. The last step's value is `g` of the final
    ///   set.
    ///
    /// Errors
    /// ------
    /// - `SelectionError::TargetExceedsUniverse` if `target_feats > n`.
    pub fn run_path(
        &self, cov: &CovarianceView<'_>, target_feats: usize,
    ) -> SelectionResult<Vec<ForwardStep>> {
        let n = cov.num_features();
        if target_feats > n {
            return Err(SelectionError::TargetExceedsUniverse { target: target_feats, universe: n });
        }
        let natural_stop = target_feats == 0;
        let max_steps = if natural_stop { n } else { target_feats };

        let mut selected: Vec<usize> = Vec::with_capacity(max_steps);
        let mut available = vec![true; n];
        let mut steps = Vec::with_capacity(max_steps);
        let mut current = self.objective.evaluate(cov.gather_augmented(&selected).view());

        while steps.len() < max_steps {
            let candidates: Vec<usize> = (0..n).filter(|&j| available[j]).collect();
            let values = evaluate_candidates(&candidates, self.options.parallel(), |j| {
                self.objective.evaluate(cov.gather_augmented(&with_index(&selected, j)).view())
            });
            let Some((j, value)) = argmax(&candidates, &values) else {
                break;
            };
            if natural_stop && value <= current {
                diag!(self.sink, Level::Debug, "forward: no candidate improves g = {current:.6}");
                break;
            }
            diag!(
                self.sink,
                Level::Debug,
                "forward step {}: index {j}, g = {value:.6}",
                steps.len()
            );
            selected = with_index(&selected, j);
            available[j] = false;
            current = value;
            steps.push(ForwardStep { index: j, value });
        }
        self.sink.print_indices(Level::Debug, "forward selection", &selected);
        Ok(steps)
    }
}

impl<R: Regularizer> SelectionAlgorithm for ForwardRegression<R> {
    fn run(&self, cov: &CovarianceView<'_>, target_feats: usize) -> SelectionResult<Selection> {
        let steps = self.run_path(cov, target_feats)?;
        let value = match steps.last() {
            Some(step) => step.value,
            None => self.objective.evaluate(cov.gather_augmented(&[]).view()),
        };
        Ok(Selection::new(value, steps.iter().map(|s| s.index).collect()))
    }
}

/// Sorted copy of `sorted` with `j` inserted.
fn with_index(sorted: &[usize], j: usize) -> Vec<usize> {
    let pos = sorted.partition_point(|&x| x < j);
    let mut out = Vec::with_capacity(sorted.len() + 1);
    out.extend_from_slice(&sorted[..pos]);
    out.push(j);
    out.extend_from_slice(&sorted[pos..]);
    out
}
