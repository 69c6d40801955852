use ndarray::{Array1, Array2};

use super::ParameterLayout;
use crate::{MlErr, Result};

/// An ordered sequence of per-layer weight matrices and bias vectors.
///
/// The `i`-th weight matrix has shape `[out_i, in_i]` and is paired with the `i`-th bias vector,
/// of length `out_i`.
pub trait LayerParams {
    /// Returns the weight matrices in network order.
    fn weights(&self) -> &[Array2<f64>];

    /// Returns the bias vectors in network order.
    fn biases(&self) -> &[Array1<f64>];

    /// Borrows both the weights and the biases mutably.
    fn params_mut(&mut self) -> (&mut [Array2<f64>], &mut [Array1<f64>]);

    /// Computes the flat layout of these parameters.
    ///
    /// # Returns
    /// A `SizeMismatch` error if there are not as many bias vectors as weight matrices, or if a
    /// bias vector's length differs from its weight matrix's row count.
    fn layout(&self) -> Result<ParameterLayout> {
        let (weights, biases) = (self.weights(), self.biases());

        if weights.len() != biases.len() {
            return Err(MlErr::SizeMismatch {
                what: "bias vectors",
                got: biases.len(),
                expected: weights.len(),
            });
        }

        if let Some((w, b)) = weights.iter().zip(biases).find(|(w, b)| w.nrows() != b.len()) {
            return Err(MlErr::SizeMismatch {
                what: "bias vector",
                got: b.len(),
                expected: w.nrows(),
            });
        }

        let dims = weights.iter().zip(biases).map(|(w, b)| (w.dim(), b.len()));
        Ok(ParameterLayout::new(dims))
    }
}

impl LayerParams for (Vec<Array2<f64>>, Vec<Array1<f64>>) {
    fn weights(&self) -> &[Array2<f64>] {
        &self.0
    }

    fn biases(&self) -> &[Array1<f64>] {
        &self.1
    }

    fn params_mut(&mut self) -> (&mut [Array2<f64>], &mut [Array1<f64>]) {
        (&mut self.0, &mut self.1)
    }
}
