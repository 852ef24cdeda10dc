//! Search parameters shared by every selection algorithm.
use crate::selection::errors::{SelectionError, SelectionResult};
use serde::{Deserialize, Serialize};

/// Default regularization weight `eta`.
pub const DEFAULT_ETA: f64 = 0.5;

/// Default local-search slack `eps`; the improvement threshold is
/// `1 + eps / n²`.
pub const DEFAULT_EPS: f64 = 22.0;

/// Parameters for one selection run.
///
/// - `eta: f64` — weight of the regularizer in `g = R² + eta · f`.
/// - `eps: f64` — LocalSearch slack.
/// - `parallel: bool` — evaluate independent candidates on the rayon pool.
///   Results are identical to the sequential scan.
///
/// Constructor:
/// - `new(eta, eps, parallel) -> SelectionResult<Self>` validates
///   `eta > 0` and `eps >= 0`, both finite.
///
/// Default:
/// - `eta`: 0.5
/// - `eps`: 22.0
/// - `parallel`: `true`
///
/// Fields are private; deserialized values go through [`SearchOptions::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSearchOptions")]
pub struct SearchOptions {
    eta: f64,
    eps: f64,
    parallel: bool,
}

#[derive(Deserialize)]
struct RawSearchOptions {
    eta: f64,
    eps: f64,
    parallel: bool,
}

impl TryFrom<RawSearchOptions> for SearchOptions {
    type Error = SelectionError;

    fn try_from(raw: RawSearchOptions) -> SelectionResult<Self> {
        Self::new(raw.eta, raw.eps, raw.parallel)
    }
}

impl SearchOptions {
    /// Construct validated search options.
    ///
    /// # Errors
    /// - [`SelectionError::InvalidEta`] if `eta` is non-finite or `<= 0`.
    /// - [`SelectionError::InvalidEps`] if `eps` is non-finite or `< 0`.
    pub fn new(eta: f64, eps: f64, parallel: bool) -> SelectionResult<Self> {
        verify_eta(eta)?;
        if !eps.is_finite() {
            return Err(SelectionError::InvalidEps { eps, reason: "eps must be finite." });
        }
        if eps < 0.0 {
            return Err(SelectionError::InvalidEps { eps, reason: "eps must be non-negative." });
        }
        Ok(Self { eta, eps, parallel })
    }

    pub fn eta(&self) -> f64 {
        self.eta
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Re-run the checks of [`SearchOptions::new`] on `self`.
    ///
    /// # Errors
    /// - As [`SearchOptions::new`].
    pub fn validated(self) -> SelectionResult<Self> {
        Self::new(self.eta, self.eps, self.parallel)
    }

    /// Options that skip validation, standing in for values built outside
    /// the checked constructors.
    #[cfg(test)]
    pub(crate) fn unchecked(eta: f64, eps: f64, parallel: bool) -> Self {
        Self { eta, eps, parallel }
    }

    /// Same options with a different `eta`.
    pub fn with_eta(self, eta: f64) -> SelectionResult<Self> {
        Self::new(eta, self.eps, self.parallel)
    }

    /// Same options with rayon disabled or enabled.
    pub fn with_parallel(self, parallel: bool) -> Self {
        Self { parallel, ..self }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { eta: DEFAULT_ETA, eps: DEFAULT_EPS, parallel: true }
    }
}

pub(crate) fn verify_eta(eta: f64) -> SelectionResult<()> {
    if !eta.is_finite() {
        return Err(SelectionError::InvalidEta { eta, reason: "eta must be finite." });
    }
    if eta <= 0.0 {
        return Err(SelectionError::InvalidEta { eta, reason: "eta must be strictly positive." });
    }
    Ok(())
}
