use std::iter;

use log::{debug, info};
use ndarray::{Array, Array1, Array2, ArrayView1, ArrayView2, Axis, Dimension};
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::Uniform;

use super::activations::ActFn;
use crate::{MlErr, Result, roll::LayerParams};

/// The range `randomize` samples parameters from.
const DEFAULT_INIT_RANGE: (f64, f64) = (-0.1, 0.1);

/// A fully connected feed-forward multilayer perceptron.
///
/// Layer `i` maps `shape[i]` inputs onto `shape[i + 1]` outputs through a weight matrix of shape
/// `[shape[i + 1], shape[i]]` and a bias vector of length `shape[i + 1]`. Inputs are normalized
/// as `(x - input_subtract) / input_divide` before entering the first layer. Every layer but the
/// last one is activated with the hidden activation, the last one with the output activation.
#[derive(Clone, Debug, PartialEq)]
pub struct Mlp {
    input_subtract: Array1<f64>,
    input_divide: Array1<f64>,
    weights: Vec<Array2<f64>>,
    biases: Vec<Array1<f64>>,
    hidden_activation: ActFn,
    output_activation: ActFn,
}

impl Mlp {
    /// Creates a new `Mlp` with every weight and bias set to zero.
    ///
    /// # Arguments
    /// * `shape` - The input size, followed by the size of every hidden layer and the output size.
    ///
    /// # Returns
    /// A new `Mlp` instance or an error if the shape has less than two entries or a zero entry.
    pub fn new(shape: &[usize]) -> Result<Self> {
        check_shape(shape)?;

        let weights = shape
            .windows(2)
            .map(|dim| Array2::zeros((dim[1], dim[0])))
            .collect();

        let biases = shape[1..].iter().map(|&size| Array1::zeros(size)).collect();

        debug!("created mlp of shape {shape:?}");
        Ok(Self {
            input_subtract: Array1::zeros(shape[0]),
            input_divide: Array1::ones(shape[0]),
            weights,
            biases,
            hidden_activation: ActFn::default(),
            output_activation: ActFn::default(),
        })
    }

    /// Sets the hidden layers' activation function.
    pub fn with_hidden_activation(mut self, act_fn: ActFn) -> Self {
        self.hidden_activation = act_fn;
        self
    }

    /// Sets the output layer's activation function.
    pub fn with_output_activation(mut self, act_fn: ActFn) -> Self {
        self.output_activation = act_fn;
        self
    }

    /// Returns the input size, followed by the size of every hidden layer and the output size.
    pub fn shape(&self) -> Vec<usize> {
        iter::once(self.input_size())
            .chain(self.biases.iter().map(|b| b.len()))
            .collect()
    }

    pub fn input_size(&self) -> usize {
        self.input_subtract.len()
    }

    pub fn output_size(&self) -> usize {
        self.biases.last().map_or(0, |b| b.len())
    }

    pub fn weights(&self) -> &[Array2<f64>] {
        &self.weights
    }

    pub fn biases(&self) -> &[Array1<f64>] {
        &self.biases
    }

    pub fn input_subtract(&self) -> &Array1<f64> {
        &self.input_subtract
    }

    pub fn input_divide(&self) -> &Array1<f64> {
        &self.input_divide
    }

    pub fn hidden_activation(&self) -> ActFn {
        self.hidden_activation
    }

    pub fn output_activation(&self) -> ActFn {
        self.output_activation
    }

    pub fn set_hidden_activation(&mut self, act_fn: ActFn) {
        self.hidden_activation = act_fn;
    }

    pub fn set_output_activation(&mut self, act_fn: ActFn) {
        self.output_activation = act_fn;
    }

    /// Reshapes the network, every parameter and the input normalization are reset.
    ///
    /// # Arguments
    /// * `shape` - The new shape.
    ///
    /// # Returns
    /// An error if the shape is invalid, the network is left untouched in that case.
    pub fn resize(&mut self, shape: &[usize]) -> Result<()> {
        let resized = Self::new(shape)?
            .with_hidden_activation(self.hidden_activation)
            .with_output_activation(self.output_activation);

        debug!("resized mlp from {:?} to {shape:?}", self.shape());
        *self = resized;
        Ok(())
    }

    /// Replaces every weight matrix.
    ///
    /// # Arguments
    /// * `weights` - One matrix per layer, each one with the shape of the one it replaces.
    ///
    /// # Returns
    /// An error if the amount of matrices or any of their shapes mismatch.
    pub fn set_weights(&mut self, weights: &[Array2<f64>]) -> Result<()> {
        check_all_shapes("weight matrix", &self.weights, weights)?;
        self.weights.clone_from_slice(weights);
        Ok(())
    }

    /// Replaces every bias vector.
    ///
    /// # Arguments
    /// * `biases` - One vector per layer, each one with the length of the one it replaces.
    ///
    /// # Returns
    /// An error if the amount of vectors or any of their lengths mismatch.
    pub fn set_biases(&mut self, biases: &[Array1<f64>]) -> Result<()> {
        check_all_shapes("bias vector", &self.biases, biases)?;
        self.biases.clone_from_slice(biases);
        Ok(())
    }

    /// Sets every weight to `value`.
    pub fn set_weights_const(&mut self, value: f64) {
        self.weights.iter_mut().for_each(|w| w.fill(value));
    }

    /// Sets every bias to `value`.
    pub fn set_biases_const(&mut self, value: f64) {
        self.biases.iter_mut().for_each(|b| b.fill(value));
    }

    /// Sets the values subtracted from the input before it enters the network.
    ///
    /// # Returns
    /// An error if `input_subtract` is not of the input size.
    pub fn set_input_subtraction(&mut self, input_subtract: Array1<f64>) -> Result<()> {
        check_shape_of("input subtraction", &self.input_subtract, &input_subtract)?;
        self.input_subtract = input_subtract;
        Ok(())
    }

    /// Sets the values the input gets divided by, right after the subtraction.
    ///
    /// # Returns
    /// An error if `input_divide` is not of the input size.
    pub fn set_input_division(&mut self, input_divide: Array1<f64>) -> Result<()> {
        check_shape_of("input division", &self.input_divide, &input_divide)?;
        self.input_divide = input_divide;
        Ok(())
    }

    pub fn set_input_subtraction_const(&mut self, value: f64) {
        self.input_subtract.fill(value);
    }

    pub fn set_input_division_const(&mut self, value: f64) {
        self.input_divide.fill(value);
    }

    /// Samples every weight and bias uniformly from `[-0.1, 0.1)`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        let (low, high) = DEFAULT_INIT_RANGE;
        self.randomize_in(rng, low, high)
    }

    /// Samples every weight and bias uniformly from `[low, high)`.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `low` - The inclusive lower limit.
    /// * `high` - The exclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low >= high or not finite).
    pub fn randomize_in<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        low: f64,
        high: f64,
    ) -> Result<()> {
        let distribution = Uniform::new(low, high)?;

        for w in &mut self.weights {
            *w = Array2::random_using(w.dim(), &distribution, rng);
        }

        for b in &mut self.biases {
            *b = Array1::random_using(b.len(), &distribution, rng);
        }

        info!("randomized mlp parameters in [{low}, {high})");
        Ok(())
    }

    /// Makes a forward pass of a single sample through the network.
    ///
    /// # Arguments
    /// * `x` - The input sample.
    ///
    /// # Returns
    /// The network's output or an error if `x` is not of the input size.
    pub fn forward(&self, x: ArrayView1<f64>) -> Result<Array1<f64>> {
        let y = self.forward_batch(x.insert_axis(Axis(0)))?;
        Ok(y.index_axis_move(Axis(0), 0))
    }

    /// Makes a forward pass of a batch through the network.
    ///
    /// # Arguments
    /// * `x` - The input data, one sample per row.
    ///
    /// # Returns
    /// The network's output, one row per sample, or an error if the rows are not of the input
    /// size.
    pub fn forward_batch(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.input_size() {
            return Err(MlErr::SizeMismatch {
                what: "input features",
                got: x.ncols(),
                expected: self.input_size(),
            });
        }

        let mut a = (&x - &self.input_subtract) / &self.input_divide;
        let nlayers = self.weights.len();

        for (i, (w, b)) in self.weights.iter().zip(&self.biases).enumerate() {
            let act_fn = if i + 1 == nlayers {
                &self.output_activation
            } else {
                &self.hidden_activation
            };

            let z = a.dot(&w.t()) + b;
            a = act_fn.f(&z);
        }

        Ok(a)
    }

    /// Compares this network with `other` up to a tolerance.
    ///
    /// Two values `x` and `y` are considered similar if `|x - y| <= a_epsilon + r_epsilon * |y|`.
    ///
    /// # Arguments
    /// * `other` - The network to compare with.
    /// * `r_epsilon` - The relative tolerance.
    /// * `a_epsilon` - The absolute tolerance.
    ///
    /// # Returns
    /// Whether both networks have the same shape and activations and similar parameters.
    pub fn is_similar_to(&self, other: &Mlp, r_epsilon: f64, a_epsilon: f64) -> bool {
        let close = |a: &Array1<f64>, b: &Array1<f64>| all_close(a, b, r_epsilon, a_epsilon);

        self.shape() == other.shape()
            && self.hidden_activation == other.hidden_activation
            && self.output_activation == other.output_activation
            && close(&self.input_subtract, &other.input_subtract)
            && close(&self.input_divide, &other.input_divide)
            && iter::zip(&self.weights, &other.weights)
                .all(|(a, b)| all_close(a, b, r_epsilon, a_epsilon))
            && iter::zip(&self.biases, &other.biases).all(|(a, b)| close(a, b))
    }
}

impl LayerParams for Mlp {
    fn weights(&self) -> &[Array2<f64>] {
        &self.weights
    }

    fn biases(&self) -> &[Array1<f64>] {
        &self.biases
    }

    fn params_mut(&mut self) -> (&mut [Array2<f64>], &mut [Array1<f64>]) {
        (&mut self.weights, &mut self.biases)
    }
}

fn check_shape(shape: &[usize]) -> Result<()> {
    if shape.len() < 2 {
        return Err(MlErr::InvalidShape(format!(
            "expected at least an input and an output size, got {shape:?}"
        )));
    }

    if shape.contains(&0) {
        return Err(MlErr::InvalidShape(format!(
            "every layer must have at least one unit, got {shape:?}"
        )));
    }

    Ok(())
}

fn check_shape_of<D: Dimension>(
    what: &'static str,
    current: &Array<f64, D>,
    new: &Array<f64, D>,
) -> Result<()> {
    if current.shape() != new.shape() {
        return Err(MlErr::ShapeMismatch {
            what,
            got: new.shape().to_vec(),
            expected: current.shape().to_vec(),
        });
    }

    Ok(())
}

fn check_all_shapes<D: Dimension>(
    what: &'static str,
    current: &[Array<f64, D>],
    new: &[Array<f64, D>],
) -> Result<()> {
    if current.len() != new.len() {
        return Err(MlErr::SizeMismatch {
            what: "layers",
            got: new.len(),
            expected: current.len(),
        });
    }

    iter::zip(current, new).try_for_each(|(current, new)| check_shape_of(what, current, new))
}

fn all_close<D: Dimension>(
    a: &Array<f64, D>,
    b: &Array<f64, D>,
    r_epsilon: f64,
    a_epsilon: f64,
) -> bool {
    a.shape() == b.shape()
        && iter::zip(a, b).all(|(&x, &y)| (x - y).abs() <= a_epsilon + r_epsilon * y.abs())
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn new_is_zeroed() {
        let mlp = Mlp::new(&[2, 3, 1]).unwrap();

        assert_eq!(mlp.shape(), [2, 3, 1]);
        assert_eq!(mlp.input_size(), 2);
        assert_eq!(mlp.output_size(), 1);
        assert_eq!(mlp.weights()[0].dim(), (3, 2));
        assert_eq!(mlp.weights()[1].dim(), (1, 3));
        assert!(mlp.weights().iter().all(|w| w.iter().all(|&x| x == 0.)));
        assert_eq!(mlp.input_divide(), &array![1., 1.]);
        assert_eq!(mlp.hidden_activation(), ActFn::tanh());
        assert_eq!(mlp.output_activation(), ActFn::tanh());
    }

    #[test]
    fn invalid_shapes() {
        assert!(matches!(Mlp::new(&[3]), Err(MlErr::InvalidShape(_))));
        assert!(matches!(Mlp::new(&[3, 0, 1]), Err(MlErr::InvalidShape(_))));
    }

    #[test]
    fn resize_keeps_activations() {
        let mut mlp = Mlp::new(&[2, 1])
            .unwrap()
            .with_hidden_activation(ActFn::logistic());
        mlp.set_weights_const(1.);

        mlp.resize(&[4, 3, 2]).unwrap();

        assert_eq!(mlp.shape(), [4, 3, 2]);
        assert_eq!(mlp.hidden_activation(), ActFn::logistic());
        assert!(mlp.weights().iter().all(|w| w.iter().all(|&x| x == 0.)));
        assert!(mlp.resize(&[]).is_err());
        assert_eq!(mlp.shape(), [4, 3, 2]);
    }

    #[test]
    fn set_weights_checks_shapes() {
        let mut mlp = Mlp::new(&[2, 1]).unwrap();

        assert!(matches!(
            mlp.set_weights(&[array![[1., 2., 3.]]]),
            Err(MlErr::ShapeMismatch { .. })
        ));
        assert!(matches!(
            mlp.set_biases(&[array![1.], array![2.]]),
            Err(MlErr::SizeMismatch { .. })
        ));
        assert!(matches!(
            mlp.set_input_division(array![1.]),
            Err(MlErr::ShapeMismatch { .. })
        ));

        mlp.set_weights(&[array![[1., 2.]]]).unwrap();
        assert_eq!(mlp.weights()[0], array![[1., 2.]]);
    }

    #[test]
    fn forward_linear_network() {
        let mut mlp = Mlp::new(&[2, 2, 1])
            .unwrap()
            .with_hidden_activation(ActFn::identity())
            .with_output_activation(ActFn::linear(2.));

        mlp.set_weights(&[array![[1., 0.], [0., 1.]], array![[1., -1.]]]).unwrap();
        mlp.set_biases(&[array![1., 0.], array![0.5]]).unwrap();
        mlp.set_input_subtraction(array![1., 1.]).unwrap();
        mlp.set_input_division_const(2.);

        // normalized: [1, 2], hidden: [2, 2], output: 2 * (0 + 0.5)
        let y = mlp.forward(array![3., 5.].view()).unwrap();
        assert_eq!(y, array![1.]);
    }

    #[test]
    fn forward_batch_rows_are_independent() {
        let mut mlp = Mlp::new(&[3, 4, 2]).unwrap();
        mlp.randomize(&mut StdRng::seed_from_u64(42)).unwrap();

        let x = array![[0.1, 0.2, 0.3], [-1., 0., 1.]];
        let y = mlp.forward_batch(x.view()).unwrap();

        assert_eq!(y.dim(), (2, 2));
        for (row, y_row) in x.rows().into_iter().zip(y.rows()) {
            let single = mlp.forward(row).unwrap();
            assert!(iter::zip(&single, y_row).all(|(a, b)| (a - b).abs() < 1e-12));
        }
    }

    #[test]
    fn forward_wrong_input_size() {
        let mlp = Mlp::new(&[3, 1]).unwrap();

        assert!(matches!(
            mlp.forward(array![1., 2.].view()),
            Err(MlErr::SizeMismatch {
                got: 2,
                expected: 3,
                ..
            })
        ));
    }

    #[test]
    fn randomize_within_range() {
        let mut mlp = Mlp::new(&[5, 4, 3]).unwrap();
        mlp.randomize_in(&mut StdRng::seed_from_u64(7), -0.5, 0.25).unwrap();

        let in_range = |x: &f64| (-0.5..0.25).contains(x);
        assert!(mlp.weights().iter().all(|w| w.iter().all(in_range)));
        assert!(mlp.biases().iter().all(|b| b.iter().all(in_range)));

        assert!(mlp.randomize_in(&mut StdRng::seed_from_u64(7), 1., 1.).is_err());
    }

    #[test]
    fn similarity() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut a = Mlp::new(&[3, 2]).unwrap();
        a.randomize(&mut rng).unwrap();

        let mut b = a.clone();
        assert_eq!(a, b);

        b.set_weights(&[&a.weights()[0] + 1e-9]).unwrap();
        assert_ne!(a, b);
        assert!(a.is_similar_to(&b, 1e-5, 1e-8));
        assert!(!a.is_similar_to(&b, 0., 0.));

        b.set_output_activation(ActFn::logistic());
        assert!(!a.is_similar_to(&b, 1e-5, 1e-8));
    }
}
