use std::fmt::{self, Display};

/// `f(z) = z`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Identity;

impl Identity {
    pub fn new() -> Self {
        Self
    }

    pub fn f(&self, z: f64) -> f64 {
        z
    }

    pub fn f_prime(&self, _z: f64) -> f64 {
        1.
    }

    pub fn f_prime_from_f(&self, _a: f64) -> f64 {
        1.
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f(z) = z")
    }
}
