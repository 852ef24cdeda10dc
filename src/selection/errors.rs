//! Error types for covariance validation, parameter validation and the
//! subset-selection algorithms.

/// Result alias for selection operations.
pub type SelectionResult<T> = Result<T, SelectionError>;

/// Coarse classification of [`SelectionError`] variants.
///
/// - `InvalidArgument`: malformed input detected before or during a search
///   (shapes, indices, parameters, cardinality).
/// - `ContractViolation`: a plugged-in component broke its documented
///   contract (e.g. a regularizer with no positive singleton).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    ContractViolation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionError {
    // ---- Covariance input ----
    /// Covariance matrix must be square.
    NotSquare { rows: usize, cols: usize },

    /// Covariance matrix must hold at least the target row/column.
    EmptyCovariance,

    /// Every covariance entry must be finite.
    NonFiniteEntry { row: usize, col: usize, value: f64 },

    /// `C[i,j]` and `C[j,i]` disagree beyond the symmetry tolerance.
    NotSymmetric { row: usize, col: usize, upper: f64, lower: f64 },

    /// Variances (diagonal entries) must be non-negative.
    NegativeDiagonal { index: usize, value: f64 },

    // ---- Index sets ----
    /// Index outside `[0, bound)`.
    IndexOutOfRange { index: usize, bound: usize },

    /// Index sets are duplicate-free.
    DuplicateIndex { index: usize },

    /// Relative index outside the sub-problem it was produced by.
    RelativeIndexOutOfRange { index: usize, len: usize },

    /// Requested cardinality larger than the universe.
    TargetExceedsUniverse { target: usize, universe: usize },

    /// Algorithm requires at least one candidate feature.
    EmptyUniverse,

    // ---- Parameters ----
    /// `eta` must be finite and strictly positive.
    InvalidEta { eta: f64, reason: &'static str },

    /// `eps` must be finite and non-negative.
    InvalidEps { eps: f64, reason: &'static str },

    /// `delta` must be finite and strictly positive.
    InvalidDelta { delta: f64, reason: &'static str },

    // ---- Contracts ----
    /// A plugged-in component violated its documented contract.
    ContractViolation { reason: &'static str },
}

impl SelectionError {
    /// Classify this error as an invalid argument or a contract violation.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SelectionError::ContractViolation { .. } => ErrorKind::ContractViolation,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

impl std::error::Error for SelectionError {}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Covariance input ----
            SelectionError::NotSquare { rows, cols } => {
                write!(f, "Covariance matrix must be square, got {rows}x{cols}")
            }
            SelectionError::EmptyCovariance => {
                write!(f, "Covariance matrix must contain at least the target row/column")
            }
            SelectionError::NonFiniteEntry { row, col, value } => {
                write!(f, "Covariance entry ({row}, {col}) is not finite: {value}")
            }
            SelectionError::NotSymmetric { row, col, upper, lower } => {
                write!(
                    f,
                    "Covariance matrix is not symmetric at ({row}, {col}): {upper} vs {lower}"
                )
            }
            SelectionError::NegativeDiagonal { index, value } => {
                write!(f, "Covariance diagonal entry {index} is negative: {value}")
            }

            // ---- Index sets ----
            SelectionError::IndexOutOfRange { index, bound } => {
                write!(f, "Index {index} out of range for dimension {bound}")
            }
            SelectionError::DuplicateIndex { index } => {
                write!(f, "Index {index} appears more than once")
            }
            SelectionError::RelativeIndexOutOfRange { index, len } => {
                write!(f, "Relative index {index} out of range for sub-problem of size {len}")
            }
            SelectionError::TargetExceedsUniverse { target, universe } => {
                write!(f, "Target feature count {target} exceeds universe size {universe}")
            }
            SelectionError::EmptyUniverse => {
                write!(f, "Universe contains no candidate features")
            }

            // ---- Parameters ----
            SelectionError::InvalidEta { eta, reason } => {
                write!(f, "Invalid eta {eta}: {reason}")
            }
            SelectionError::InvalidEps { eps, reason } => {
                write!(f, "Invalid eps {eps}: {reason}")
            }
            SelectionError::InvalidDelta { delta, reason } => {
                write!(f, "Invalid delta {delta}: {reason}")
            }

            // ---- Contracts ----
            SelectionError::ContractViolation { reason } => {
                write!(f, "Contract violation: {reason}")
            }
        }
    }
}
