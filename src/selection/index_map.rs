//! selection::index_map — sorted index sets and the bijection between a
//! sub-problem's relative indices and absolute universe indices.
//!
//! GreedyLocalSearch runs its inner searches on covariance submatrices. The
//! indices those searches return are positions inside the submatrix, and
//! must be sorted before being mapped back through the (sorted) absolute
//! index array that defines the submatrix. [`RelativeIndices`] sorts on
//! construction so [`SubProblem::to_absolute`] can never see an unsorted
//! input.
use crate::selection::covariance::CovarianceView;
use crate::selection::errors::{SelectionError, SelectionResult};
use ndarray::Array2;

/// Owned, strictly increasing list of indices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortedIndices(Vec<usize>);

impl SortedIndices {
    /// Sort `indices` and check them against `bound`.
    ///
    /// # Errors
    /// - [`SelectionError::IndexOutOfRange`] for an index `>= bound`.
    /// - [`SelectionError::DuplicateIndex`] for a repeated index.
    pub fn new(mut indices: Vec<usize>, bound: usize) -> SelectionResult<Self> {
        indices.sort_unstable();
        for (pos, &i) in indices.iter().enumerate() {
            if i >= bound {
                return Err(SelectionError::IndexOutOfRange { index: i, bound });
            }
            if pos > 0 && indices[pos - 1] == i {
                return Err(SelectionError::DuplicateIndex { index: i });
            }
        }
        Ok(Self(indices))
    }

    /// `{0, …, n-1}`.
    pub fn universe(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Ascending `{0..n} \ self`. `self` must be bounded by `n`.
    pub fn complement(&self, n: usize) -> Self {
        let mut out = Vec::with_capacity(n.saturating_sub(self.0.len()));
        let mut it = self.0.iter().peekable();
        for i in 0..n {
            if it.peek() == Some(&&i) {
                it.next();
            } else {
                out.push(i);
            }
        }
        Self(out)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

/// Indices relative to a [`SubProblem`], sorted on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeIndices(Vec<usize>);

impl RelativeIndices {
    pub fn new(mut indices: Vec<usize>) -> Self {
        indices.sort_unstable();
        Self(indices)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// A restricted universe: the sorted absolute feature indices whose
/// covariance rows/columns (plus the target) form a sub-problem.
///
/// Relative index `r` in the sub-problem corresponds to absolute index
/// `absolute[r]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubProblem {
    absolute: SortedIndices,
}

impl SubProblem {
    /// Sub-problem over `absolute`, which must be predictor indices of a
    /// universe of size `n`.
    pub fn new(absolute: Vec<usize>, n: usize) -> SelectionResult<Self> {
        Ok(Self { absolute: SortedIndices::new(absolute, n)? })
    }

    /// Sub-problem over `{0..n} \ selected`.
    pub fn complement(selected: &SortedIndices, n: usize) -> Self {
        Self { absolute: selected.complement(n) }
    }

    pub fn len(&self) -> usize {
        self.absolute.len()
    }

    pub fn is_empty(&self) -> bool {
        self.absolute.is_empty()
    }

    pub fn absolute(&self) -> &SortedIndices {
        &self.absolute
    }

    /// Augmented covariance of the sub-problem: rows/columns `absolute ∪
    /// {target}`, target last.
    pub fn covariance(&self, cov: &CovarianceView<'_>) -> Array2<f64> {
        cov.gather_augmented(self.absolute.as_slice())
    }

    /// Map sorted relative indices back to absolute universe indices.
    ///
    /// # Errors
    /// - [`SelectionError::RelativeIndexOutOfRange`] if a relative index is
    ///   not below `self.len()`.
    pub fn to_absolute(&self, relative: &RelativeIndices) -> SelectionResult<Vec<usize>> {
        let abs = self.absolute.as_slice();
        relative
            .as_slice()
            .iter()
            .map(|&r| {
                abs.get(r)
                    .copied()
                    .ok_or(SelectionError::RelativeIndexOutOfRange { index: r, len: abs.len() })
            })
            .collect()
    }
}
