//! No-op regularizer: reduces the objective to plain R².
use super::Regularizer;
use ndarray::ArrayView2;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DummyRegularizer;

impl Regularizer for DummyRegularizer {
    type Params = ();

    fn value(&self, _cov: ArrayView2<'_, f64>) -> f64 {
        0.0
    }

    fn set_params(&mut self, _params: ()) {}

    fn params(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::regularizers::test_support::correlated_cov;
    use ndarray::Array2;

    #[test]
    fn always_zero() {
        let f = DummyRegularizer;
        assert_eq!(f.value(correlated_cov().view()), 0.0);
        assert_eq!(f.value(Array2::<f64>::zeros((0, 0)).view()), 0.0);
    }
}
