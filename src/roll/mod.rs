//! Packing of a network's weights and biases into a single flat buffer and back.
//!
//! The flat buffer holds every layer's row-major weight matrix in network order, followed by every
//! layer's bias vector in network order. Any code exchanging flat parameter vectors must agree on
//! this order.

mod layout;
mod params;

use log::debug;
use ndarray::{ArrayView1, ArrayView2};

pub use layout::{LayerBlock, ParameterLayout};
pub use params::LayerParams;

use crate::Result;

/// Returns the amount of parameters the flat buffer of `params` holds.
pub fn num_params<P: LayerParams + ?Sized>(params: &P) -> Result<usize> {
    Ok(params.layout()?.size())
}

/// Unrolls the parameters into a newly allocated flat buffer.
///
/// # Arguments
/// * `params` - The weights and biases to unroll.
///
/// # Returns
/// The flat buffer or an error if the weights and biases don't pair up.
pub fn unroll<P: LayerParams + ?Sized>(params: &P) -> Result<Vec<f64>> {
    let layout = params.layout()?;
    let mut flat = vec![0.; layout.size()];
    write_flat(params, &layout, &mut flat);

    debug!(nparams = flat.len(); "unrolled parameters");
    Ok(flat)
}

/// Unrolls the parameters onto a caller provided flat buffer.
///
/// # Arguments
/// * `params` - The weights and biases to unroll.
/// * `flat` - The destination, its length must be exactly the amount of parameters.
///
/// # Returns
/// A `SizeMismatch` error if `flat` has the wrong length, nothing is written in that case.
pub fn unroll_into<P: LayerParams + ?Sized>(params: &P, flat: &mut [f64]) -> Result<()> {
    let layout = params.layout()?;
    layout.validate(flat.len())?;
    write_flat(params, &layout, flat);

    debug!(nparams = flat.len(); "unrolled parameters into buffer");
    Ok(())
}

/// Rolls a flat buffer back into the already shaped weights and biases.
///
/// # Arguments
/// * `params` - The destination weights and biases, their shapes dictate the layout.
/// * `flat` - The flat parameters.
///
/// # Returns
/// A `SizeMismatch` error if `flat` does not hold exactly the amount of parameters the shapes
/// imply, nothing is written in that case.
pub fn roll<P: LayerParams + ?Sized>(params: &mut P, flat: &[f64]) -> Result<()> {
    let layout = params.layout()?;
    layout.validate(flat.len())?;

    let (weights, biases) = params.params_mut();
    for ((w, b), block) in weights.iter_mut().zip(biases).zip(layout.blocks()) {
        w.assign(&ArrayView2::from_shape(block.w_dim, &flat[block.w.clone()])?);
        b.assign(&ArrayView1::from(&flat[block.b.clone()]));
    }

    debug!(nparams = flat.len(); "rolled parameters");
    Ok(())
}

fn write_flat<P: LayerParams + ?Sized>(params: &P, layout: &ParameterLayout, flat: &mut [f64]) {
    let layers = params.weights().iter().zip(params.biases());

    for ((w, b), block) in layers.zip(layout.blocks()) {
        flat[block.w.clone()]
            .iter_mut()
            .zip(w.iter())
            .for_each(|(dst, &src)| *dst = src);

        flat[block.b.clone()]
            .iter_mut()
            .zip(b.iter())
            .for_each(|(dst, &src)| *dst = src);
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array1, Array2, array};

    use super::*;
    use crate::MlErr;

    type Params = (Vec<Array2<f64>>, Vec<Array1<f64>>);

    fn example() -> Params {
        let weights = vec![array![[2., 3.]], array![[2., 3., 4.], [5., 6., 7.]]];
        let biases = vec![array![5.], array![7., 8.]];
        (weights, biases)
    }

    fn zeroed_like(params: &Params) -> Params {
        let weights = params.0.iter().map(|w| Array2::zeros(w.dim())).collect();
        let biases = params.1.iter().map(|b| Array1::zeros(b.len())).collect();
        (weights, biases)
    }

    #[test]
    fn unroll_order() {
        let params = example();

        assert_eq!(num_params(&params).unwrap(), 11);
        assert_eq!(
            unroll(&params).unwrap(),
            [2., 3., 2., 3., 4., 5., 6., 7., 5., 7., 8.]
        );
    }

    #[test]
    fn unroll_transposed_view_is_row_major() {
        let w = array![[1., 2.], [3., 4.]].reversed_axes();
        let params = (vec![w], vec![array![0., 0.]]);

        assert_eq!(unroll(&params).unwrap(), [1., 3., 2., 4., 0., 0.]);
    }

    #[test]
    fn unroll_into_wrong_length() {
        let params = example();
        let mut flat = vec![0.; 10];

        let err = unroll_into(&params, &mut flat).unwrap_err();
        assert!(matches!(
            err,
            MlErr::SizeMismatch {
                got: 10,
                expected: 11,
                ..
            }
        ));
    }

    #[test]
    fn roll_wrong_length() {
        let params = example();
        let mut target = zeroed_like(&params);

        let mut flat = unroll(&params).unwrap();
        flat.push(1.);

        assert!(roll(&mut target, &flat).is_err());
        assert!(target.0.iter().all(|w| w.iter().all(|&x| x == 0.)));
    }

    #[test]
    fn unpaired_biases() {
        let (weights, mut biases) = example();
        biases.pop();

        let err = unroll(&(weights, biases)).unwrap_err();
        assert!(matches!(
            err,
            MlErr::SizeMismatch {
                what: "bias vectors",
                got: 1,
                expected: 2,
            }
        ));
    }

    #[test]
    fn mismatched_bias_length() {
        let (weights, _) = example();
        let mut params = (weights, vec![array![5.], array![7., 8., 9.]]);

        assert!(matches!(
            unroll(&params),
            Err(MlErr::SizeMismatch {
                what: "bias vector",
                ..
            })
        ));
        assert!(roll(&mut params, &[0.; 12]).is_err());
        assert_eq!(params.1[1], array![7., 8., 9.]);
    }

    #[test]
    fn roll_unroll() {
        let params = example();
        let mut target = zeroed_like(&params);

        let mut flat = vec![0.; num_params(&params).unwrap()];
        unroll_into(&params, &mut flat).unwrap();
        roll(&mut target, &flat).unwrap();

        assert_eq!(target, params);
    }
}
