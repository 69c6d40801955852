use ndarray::{Array, ArrayBase, Data, DataMut, Dimension};

use crate::{MlErr, Result};

/// A value an activation function can be evaluated on.
///
/// Scalars map to a scalar, arrays of any rank map elementwise to an owned `f64` array of the
/// same shape.
pub trait Elementwise {
    type Output;

    /// Maps `f` over every element.
    fn map_elements<F>(self, f: F) -> Self::Output
    where
        F: Fn(f64) -> f64;
}

impl Elementwise for f64 {
    type Output = f64;

    fn map_elements<F>(self, f: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        f(self)
    }
}

impl Elementwise for f32 {
    type Output = f64;

    fn map_elements<F>(self, f: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        f(self.into())
    }
}

impl<A, S, D> Elementwise for &ArrayBase<S, D>
where
    A: Copy + Into<f64>,
    S: Data<Elem = A>,
    D: Dimension,
{
    type Output = Array<f64, D>;

    fn map_elements<F>(self, f: F) -> Array<f64, D>
    where
        F: Fn(f64) -> f64,
    {
        self.mapv(|z| f(z.into()))
    }
}

/// Maps `f` over every element of `z`, writing the results onto `res`.
///
/// # Arguments
/// * `z` - The input array.
/// * `res` - The output array, it must have the exact same shape as `z`.
/// * `f` - The scalar function.
///
/// # Returns
/// An error if the shapes of `z` and `res` differ, `res` is left untouched in that case.
pub fn map_into<A, S, T, D, F>(z: &ArrayBase<S, D>, res: &mut ArrayBase<T, D>, f: F) -> Result<()>
where
    A: Copy + Into<f64>,
    S: Data<Elem = A>,
    T: DataMut<Elem = f64>,
    D: Dimension,
    F: Fn(f64) -> f64,
{
    if z.shape() != res.shape() {
        return Err(MlErr::ShapeMismatch {
            what: "activation output",
            got: res.shape().to_vec(),
            expected: z.shape().to_vec(),
        });
    }

    res.zip_mut_with(z, |r, &z| *r = f(z.into()));
    Ok(())
}
