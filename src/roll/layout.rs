use std::ops::Range;

use crate::{MlErr, Result};

/// Where a single layer's parameters live inside the flat parameter buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerBlock {
    /// The `(rows, cols)` shape of the weight matrix.
    pub w_dim: (usize, usize),
    pub w: Range<usize>,
    pub b: Range<usize>,
}

/// Maps a flat parameter buffer into each layer's weights and biases.
///
/// The buffer holds every weight matrix in network order, each one row-major, followed by every
/// bias vector in network order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterLayout {
    blocks: Vec<LayerBlock>,
    size: usize,
}

impl ParameterLayout {
    /// Creates a new `ParameterLayout`.
    ///
    /// # Arguments
    /// * `dims` - The weight matrix shape and bias length of every layer, in network order.
    ///
    /// # Returns
    /// A new `ParameterLayout` instance.
    pub fn new<I>(dims: I) -> Self
    where
        I: IntoIterator<Item = ((usize, usize), usize)>,
    {
        let dims: Vec<_> = dims.into_iter().collect();
        let mut offset = 0;

        let w_ranges: Vec<_> = dims
            .iter()
            .map(|&((rows, cols), _)| {
                let w = offset..offset + rows * cols;
                offset = w.end;
                w
            })
            .collect();

        let blocks = dims
            .into_iter()
            .zip(w_ranges)
            .map(|((w_dim, b_len), w)| {
                let b = offset..offset + b_len;
                offset = b.end;
                LayerBlock { w_dim, w, b }
            })
            .collect();

        Self {
            blocks,
            size: offset,
        }
    }

    /// Creates the layout of an mlp with the given shape.
    ///
    /// # Arguments
    /// * `shape` - The input size, followed by the size of every hidden layer and the output size.
    ///
    /// # Returns
    /// A new `ParameterLayout` instance.
    pub fn from_shape(shape: &[usize]) -> Self {
        Self::new(shape.windows(2).map(|dim| ((dim[1], dim[0]), dim[1])))
    }

    /// Returns the total amount of parameters.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn blocks(&self) -> &[LayerBlock] {
        &self.blocks
    }

    /// Checks that a flat buffer of `total` parameters matches this layout.
    ///
    /// # Returns
    /// A `SizeMismatch` error if it does not.
    pub fn validate(&self, total: usize) -> Result<()> {
        if total != self.size {
            return Err(MlErr::SizeMismatch {
                what: "flat parameters",
                got: total,
                expected: self.size,
            });
        }

        Ok(())
    }
}
