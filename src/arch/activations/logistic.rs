use std::fmt::{self, Display};

/// The logistic sigmoid, `f(z) = 1 / (1 + e^-z)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Logistic;

impl Logistic {
    pub fn new() -> Self {
        Self
    }

    pub fn f(&self, z: f64) -> f64 {
        1. / (1. + (-z).exp())
    }

    pub fn f_prime(&self, z: f64) -> f64 {
        let a = self.f(z);
        a * (1. - a)
    }

    /// The derivative in terms of the activated value `a = f(z)`.
    pub fn f_prime_from_f(&self, a: f64) -> f64 {
        a * (1. - a)
    }
}

impl Display for Logistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f(z) = 1 / (1 + e^-z)")
    }
}
