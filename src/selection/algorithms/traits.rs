//! Shared result type and the two capabilities the algorithm family
//! implements.
//!
//! - [`SelectionAlgorithm`]: select a subset of the universe described by a
//!   covariance view, optionally under a cardinality target.
//! - [`Refiner`]: improve on a universe whose objective value may already be
//!   known (GreedyLocalSearch's second stage).
//! - [`Selection`]: `(objective value, sorted feature indices)`.
use crate::selection::covariance::CovarianceView;
use crate::selection::errors::SelectionResult;
use rayon::prelude::*;

/// Result of a selection run.
///
/// - `value`: objective value attained by `indices` (or `0` for the
///   LinearLocalSearch short-circuit, see its docs).
/// - `indices`: selected feature indices in ascending order, each `< n`.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub value: f64,
    pub indices: Vec<usize>,
}

impl Selection {
    /// Build a selection, sorting `indices`.
    pub fn new(value: f64, mut indices: Vec<usize>) -> Self {
        indices.sort_unstable();
        Self { value, indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// A subset-selection algorithm over a cached covariance matrix.
pub trait SelectionAlgorithm {
    /// Select features from `cov`'s universe.
    ///
    /// `target_feats` is the requested cardinality; `0` asks for the
    /// algorithm's natural stopping rule. Algorithms without a cardinality
    /// notion (the local searches) ignore it.
    fn run(&self, cov: &CovarianceView<'_>, target_feats: usize) -> SelectionResult<Selection>;
}

/// A refinement stage over a (sub-)universe.
pub trait Refiner {
    /// Refine over the whole universe of `cov`.
    ///
    /// `universe_value` is the objective of the full universe when the
    /// caller already knows it; `None` means it is computed on demand.
    fn refine(
        &self, cov: &CovarianceView<'_>, universe_value: Option<f64>,
    ) -> SelectionResult<Selection>;
}

/// Strict-`>` argmax over `(value, indices)` candidates in order: later
/// candidates replace the incumbent only when strictly better.
pub(crate) fn best_of(
    candidates: impl IntoIterator<Item = (f64, Vec<usize>)>,
) -> Option<Selection> {
    let mut best: Option<(f64, Vec<usize>)> = None;
    for (value, indices) in candidates {
        match &best {
            Some((incumbent, _)) if value <= *incumbent => {}
            _ => best = Some((value, indices)),
        }
    }
    best.map(|(value, indices)| Selection::new(value, indices))
}

/// Evaluate `eval(j)` for every candidate, in candidate order.
///
/// With `parallel` the evaluations run on the rayon pool; the returned
/// vector keeps the input order either way, so a subsequent sequential
/// argmax breaks ties exactly like a plain ascending scan.
pub(crate) fn evaluate_candidates<F>(candidates: &[usize], parallel: bool, eval: F) -> Vec<f64>
where
    F: Fn(usize) -> f64 + Sync + Send,
{
    if parallel {
        candidates.par_iter().map(|&j| eval(j)).collect()
    } else {
        candidates.iter().map(|&j| eval(j)).collect()
    }
}

/// First candidate (in candidate order) whose value satisfies `accept`.
pub(crate) fn first_accepted<F, P>(
    candidates: &[usize], parallel: bool, eval: F, accept: P,
) -> Option<(usize, f64)>
where
    F: Fn(usize) -> f64 + Sync + Send,
    P: Fn(f64) -> bool + Sync + Send,
{
    if parallel {
        candidates.par_iter().map(|&j| (j, eval(j))).find_first(|&(_, v)| accept(v))
    } else {
        candidates.iter().map(|&j| (j, eval(j))).find(|&(_, v)| accept(v))
    }
}

/// Strict-`>` argmax with ties resolved to the earliest candidate.
pub(crate) fn argmax(candidates: &[usize], values: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (&j, &v) in candidates.iter().zip(values) {
        match best {
            Some((_, incumbent)) if v <= incumbent => {}
            _ => best = Some((j, v)),
        }
    }
    best
}
