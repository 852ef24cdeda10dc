//! Pass-through baseline that keeps every feature.
//!
//! Used by evaluation runs as the reference point for the search
//! algorithms: the returned value is `g(U)`.
use crate::selection::algorithms::traits::{Selection, SelectionAlgorithm};
use crate::selection::covariance::CovarianceView;
use crate::selection::errors::SelectionResult;
use crate::selection::objective::Objective;
use crate::selection::options::SearchOptions;
use crate::selection::regularizers::Regularizer;

#[derive(Debug, Clone)]
pub struct AllFeatures<R: Regularizer> {
    objective: Objective<R>,
}

impl<R: Regularizer> AllFeatures<R> {
    pub fn new(regularizer: R, options: SearchOptions) -> SelectionResult<Self> {
        let options = options.validated()?;
        Ok(Self { objective: Objective::new(options.eta(), regularizer)? })
    }
}

impl<R: Regularizer> SelectionAlgorithm for AllFeatures<R> {
    /// `target_feats` is ignored.
    fn run(&self, cov: &CovarianceView<'_>, _target_feats: usize) -> SelectionResult<Selection> {
        let n = cov.num_features();
        Ok(Selection::new(self.objective.evaluate(cov.as_array()), (0..n).collect()))
    }
}
