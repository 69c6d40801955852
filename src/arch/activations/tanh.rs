use std::fmt::{self, Display};

/// The hyperbolic tangent, `f(z) = tanh(z)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tanh;

impl Tanh {
    pub fn new() -> Self {
        Self
    }

    pub fn f(&self, z: f64) -> f64 {
        z.tanh()
    }

    pub fn f_prime(&self, z: f64) -> f64 {
        1. - z.tanh().powi(2)
    }

    /// The derivative in terms of the activated value `a = tanh(z)`.
    pub fn f_prime_from_f(&self, a: f64) -> f64 {
        1. - a * a
    }
}

impl Display for Tanh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f(z) = tanh(z)")
    }
}
