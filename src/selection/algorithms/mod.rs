//! selection::algorithms — the subset-selection algorithm family.
//!
//! - [`ForwardRegression`]: greedy argmax builder.
//! - [`LocalSearch`]: `(1 + ε/n²)`-approximate local search on the
//!   regularizer plus an `S` / `U \ S` / `U` comparison under `g`.
//! - [`LinearLocalSearch`]: single-pass double-greedy variant with a
//!   copy-free contiguous fast path.
//! - [`GreedyLocalSearch`]: forward pass, refinement, complementary forward
//!   pass, best of three.
//! - [`AllFeatures`]: keeps everything; a baseline for evaluations.
//!
//! All algorithms are generic over a [`Regularizer`](crate::selection::Regularizer)
//! and read the covariance through a [`CovarianceView`](crate::selection::CovarianceView).

pub mod baseline;
pub mod forward;
pub mod greedy_local_search;
pub mod linear_local_search;
pub mod local_search;
pub mod traits;

pub use self::baseline::AllFeatures;
pub use self::forward::{ForwardRegression, ForwardStep};
pub use self::greedy_local_search::{GreedyLocalSearch, GreedyOutcome};
pub use self::linear_local_search::{LinearLocalSearch, Sweep};
pub use self::local_search::LocalSearch;
pub use self::traits::{Refiner, Selection, SelectionAlgorithm};
