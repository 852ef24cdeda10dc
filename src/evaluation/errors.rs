//! evaluation::errors — error surface of the train/test harness.
//!
//! Purpose
//! -------
//! Report malformed datasets, degenerate least-squares systems and invalid
//! harness parameters, and carry selection failures through unchanged so
//! that harness code can use `?` on both.
//!
//! Conventions
//! -----------
//! - Selection failures are wrapped as [`EvalError::Selection`] via
//!   `From<SelectionError>`; their `kind()` remains reachable through
//!   [`EvalError::selection_error`].
//! - Messages name the offending dimension or value.
use crate::selection::errors::SelectionError;

pub type EvalResult<T> = Result<T, EvalError>;

/// EvalError — failures raised by the evaluation harness.
///
/// Variants
/// --------
/// - `ShapeMismatch`
///   Two inputs that must share a length (rows of the regressors and the
///   regressand, actual and predicted values) do not.
/// - `InsufficientData`
///   Fewer observations than the operation needs (e.g. `N <= 2` for the
///   standard error of estimate).
/// - `SingularSystem`
///   The least-squares system could not be solved with the requested
///   decomposition.
/// - `InvalidSigma`
///   Perturbation scale is negative or non-finite.
/// - `InvalidSampleSize`
///   Requested sample is empty or larger than the dataset.
/// - `NonFiniteData`
///   A data entry is NaN or ±∞.
/// - `Selection`
///   Wrapped failure from the selection core.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    // ---- Data ----
    ShapeMismatch { expected: usize, actual: usize },
    InsufficientData { required: usize, actual: usize },
    NonFiniteData { row: usize, col: usize, value: f64 },

    // ---- Regression ----
    SingularSystem { method: &'static str },

    // ---- Parameters ----
    InvalidSigma { sigma: f64 },
    InvalidSampleSize { requested: usize, available: usize },

    // ---- Selection core ----
    Selection(SelectionError),
}

impl EvalError {
    /// The wrapped selection error, if this failure came from the core.
    pub fn selection_error(&self) -> Option<&SelectionError> {
        match self {
            EvalError::Selection(err) => Some(err),
            _ => None,
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EvalError::Selection(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::ShapeMismatch { expected, actual } => {
                write!(f, "Length mismatch: expected {expected}, got {actual}")
            }
            EvalError::InsufficientData { required, actual } => {
                write!(f, "Need at least {required} observations, got {actual}")
            }
            EvalError::NonFiniteData { row, col, value } => {
                write!(f, "Data entry ({row}, {col}) is not finite: {value}")
            }
            EvalError::SingularSystem { method } => {
                write!(f, "Least-squares system is singular ({method})")
            }
            EvalError::InvalidSigma { sigma } => {
                write!(f, "Perturbation sigma must be finite and >= 0; got {sigma}")
            }
            EvalError::InvalidSampleSize { requested, available } => {
                write!(f, "Cannot sample {requested} examples from {available}")
            }
            EvalError::Selection(err) => write!(f, "Selection failed: {err}"),
        }
    }
}

impl From<SelectionError> for EvalError {
    fn from(err: SelectionError) -> EvalError {
        EvalError::Selection(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::errors::ErrorKind;

    #[test]
    // Purpose
    // -------
    // Selection failures keep their classification after wrapping.
    fn selection_errors_convert_and_keep_their_kind() {
        // Arrange
        let inner = SelectionError::ContractViolation { reason: "no positive singleton" };

        // Act
        let err: EvalError = inner.clone().into();

        // Assert
        assert_eq!(err.selection_error(), Some(&inner));
        assert_eq!(err.selection_error().map(|e| e.kind()), Some(ErrorKind::ContractViolation));
        assert!(err.to_string().contains("no positive singleton"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn data_errors_have_no_source() {
        let err = EvalError::InvalidSampleSize { requested: 12, available: 10 };
        assert!(err.selection_error().is_none());
        assert!(std::error::Error::source(&err).is_none());
        assert!(err.to_string().contains("12"));
    }
}
