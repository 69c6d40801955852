use std::fmt::{self, Display};

use ndarray::{ArrayBase, Data, DataMut, Dimension};

use super::{Elementwise, Identity, Linear, Logistic, ScaledTanh, Tanh, broadcast};
use crate::Result;

/// An activation function.
///
/// Every method takes either a scalar or a reference to an array of any rank, see
/// [`Elementwise`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActFn {
    Identity(Identity),
    Linear(Linear),
    Tanh(Tanh),
    ScaledTanh(ScaledTanh),
    Logistic(Logistic),
}

impl ActFn {
    pub fn identity() -> Self {
        Self::Identity(Identity::new())
    }

    pub fn linear(c: f64) -> Self {
        Self::Linear(Linear::new(c))
    }

    pub fn tanh() -> Self {
        Self::Tanh(Tanh::new())
    }

    pub fn scaled_tanh(c: f64, m: f64) -> Self {
        Self::ScaledTanh(ScaledTanh::new(c, m))
    }

    pub fn logistic() -> Self {
        Self::Logistic(Logistic::new())
    }

    /// Looks an activation function up by its unique identifier.
    ///
    /// Parameterized variants are built with their default constants.
    ///
    /// # Arguments
    /// * `name` - A unique identifier, as returned by `unique_identifier`.
    ///
    /// # Returns
    /// The activation function or `None` if the identifier is unknown.
    pub fn from_name(name: &str) -> Option<Self> {
        let act_fn = match name {
            "identity" => Self::identity(),
            "linear" => Self::Linear(Linear::default()),
            "tanh" => Self::tanh(),
            "scaled_tanh" => Self::ScaledTanh(ScaledTanh::default()),
            "logistic" => Self::logistic(),
            _ => return None,
        };

        Some(act_fn)
    }

    /// Returns the identifier of this activation function's variant.
    pub fn unique_identifier(&self) -> &'static str {
        match self {
            Self::Identity(_) => "identity",
            Self::Linear(_) => "linear",
            Self::Tanh(_) => "tanh",
            Self::ScaledTanh(_) => "scaled_tanh",
            Self::Logistic(_) => "logistic",
        }
    }

    /// Same as `f`.
    pub fn apply<T: Elementwise>(&self, z: T) -> T::Output {
        self.f(z)
    }

    /// Computes the activated value of `z`.
    pub fn f<T: Elementwise>(&self, z: T) -> T::Output {
        z.map_elements(|z| self.f_scalar(z))
    }

    /// Computes the derivative of the activation at `z`.
    pub fn f_prime<T: Elementwise>(&self, z: T) -> T::Output {
        z.map_elements(|z| self.f_prime_scalar(z))
    }

    /// Computes the derivative of the activation given the already activated value `a = f(z)`.
    pub fn f_prime_from_f<T: Elementwise>(&self, a: T) -> T::Output {
        a.map_elements(|a| self.f_prime_from_f_scalar(a))
    }

    /// Computes the activated value of `z` onto `res`.
    ///
    /// # Arguments
    /// * `z` - The input array.
    /// * `res` - The output array, of the same shape as `z`.
    ///
    /// # Returns
    /// An error if the shapes differ.
    pub fn f_into<A, S, T, D>(&self, z: &ArrayBase<S, D>, res: &mut ArrayBase<T, D>) -> Result<()>
    where
        A: Copy + Into<f64>,
        S: Data<Elem = A>,
        T: DataMut<Elem = f64>,
        D: Dimension,
    {
        broadcast::map_into(z, res, |z| self.f_scalar(z))
    }

    /// Computes the derivative of the activation at `z` onto `res`.
    ///
    /// # Returns
    /// An error if the shapes differ.
    pub fn f_prime_into<A, S, T, D>(
        &self,
        z: &ArrayBase<S, D>,
        res: &mut ArrayBase<T, D>,
    ) -> Result<()>
    where
        A: Copy + Into<f64>,
        S: Data<Elem = A>,
        T: DataMut<Elem = f64>,
        D: Dimension,
    {
        broadcast::map_into(z, res, |z| self.f_prime_scalar(z))
    }

    /// Computes the derivative of the activation from the activated values `a` onto `res`.
    ///
    /// # Returns
    /// An error if the shapes differ.
    pub fn f_prime_from_f_into<A, S, T, D>(
        &self,
        a: &ArrayBase<S, D>,
        res: &mut ArrayBase<T, D>,
    ) -> Result<()>
    where
        A: Copy + Into<f64>,
        S: Data<Elem = A>,
        T: DataMut<Elem = f64>,
        D: Dimension,
    {
        broadcast::map_into(a, res, |a| self.f_prime_from_f_scalar(a))
    }

    fn f_scalar(&self, z: f64) -> f64 {
        match self {
            Self::Identity(a) => a.f(z),
            Self::Linear(a) => a.f(z),
            Self::Tanh(a) => a.f(z),
            Self::ScaledTanh(a) => a.f(z),
            Self::Logistic(a) => a.f(z),
        }
    }

    fn f_prime_scalar(&self, z: f64) -> f64 {
        match self {
            Self::Identity(a) => a.f_prime(z),
            Self::Linear(a) => a.f_prime(z),
            Self::Tanh(a) => a.f_prime(z),
            Self::ScaledTanh(a) => a.f_prime(z),
            Self::Logistic(a) => a.f_prime(z),
        }
    }

    fn f_prime_from_f_scalar(&self, y: f64) -> f64 {
        match self {
            Self::Identity(a) => a.f_prime_from_f(y),
            Self::Linear(a) => a.f_prime_from_f(y),
            Self::Tanh(a) => a.f_prime_from_f(y),
            Self::ScaledTanh(a) => a.f_prime_from_f(y),
            Self::Logistic(a) => a.f_prime_from_f(y),
        }
    }
}

/// Networks default to the hyperbolic tangent.
impl Default for ActFn {
    fn default() -> Self {
        Self::tanh()
    }
}

impl Display for ActFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity(a) => a.fmt(f),
            Self::Linear(a) => a.fmt(f),
            Self::Tanh(a) => a.fmt(f),
            Self::ScaledTanh(a) => a.fmt(f),
            Self::Logistic(a) => a.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};

    use super::*;

    fn all() -> [ActFn; 5] {
        [
            ActFn::identity(),
            ActFn::linear(0.3),
            ActFn::tanh(),
            ActFn::scaled_tanh(0.7, 1.3),
            ActFn::logistic(),
        ]
    }

    #[test]
    fn identifier_roundtrip() {
        for act_fn in all() {
            let found = ActFn::from_name(act_fn.unique_identifier()).unwrap();
            assert_eq!(found.unique_identifier(), act_fn.unique_identifier());
        }

        assert!(ActFn::from_name("relu").is_none());
    }

    #[test]
    fn equality_considers_parameters() {
        assert_eq!(ActFn::linear(0.5), ActFn::linear(0.5));
        assert_ne!(ActFn::linear(0.5), ActFn::linear(0.6));
        assert_ne!(ActFn::tanh(), ActFn::scaled_tanh(1., 1.));
    }

    #[test]
    fn apply_is_f() {
        let z = array![[-1., 0.], [0.5, 2.]];

        for act_fn in all() {
            assert_eq!(act_fn.apply(&z), act_fn.f(&z));
            assert_eq!(act_fn.apply(0.25_f64), act_fn.f(0.25_f64));
        }
    }

    #[test]
    fn into_variants_match_allocating_ones() {
        let z = array![[-1., 0.], [0.5, 2.]];
        let mut res = Array2::zeros(z.dim());

        for act_fn in all() {
            act_fn.f_into(&z, &mut res).unwrap();
            assert_eq!(res, act_fn.f(&z));

            act_fn.f_prime_into(&z, &mut res).unwrap();
            assert_eq!(res, act_fn.f_prime(&z));

            act_fn.f_prime_from_f_into(&z, &mut res).unwrap();
            assert_eq!(res, act_fn.f_prime_from_f(&z));
        }
    }

    #[test]
    fn display() {
        assert_eq!(ActFn::tanh().to_string(), "f(z) = tanh(z)");
        assert_eq!(ActFn::linear(2.).to_string(), "f(z) = 2 * z");
    }
}
