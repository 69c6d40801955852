use std::fmt::{self, Display};

/// A linear activation, `f(z) = c * z`.
///
/// Prefer `Identity` when `c` would be `1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Linear {
    c: f64,
}

impl Linear {
    /// Creates a new `Linear`.
    ///
    /// # Arguments
    /// * `c` - The multiplication factor.
    ///
    /// # Returns
    /// A new `Linear` instance.
    pub fn new(c: f64) -> Self {
        Self { c }
    }

    /// Returns the multiplication factor.
    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn f(&self, z: f64) -> f64 {
        self.c * z
    }

    pub fn f_prime(&self, _z: f64) -> f64 {
        self.c
    }

    pub fn f_prime_from_f(&self, _a: f64) -> f64 {
        self.c
    }
}

impl Default for Linear {
    fn default() -> Self {
        Self::new(1.)
    }
}

impl Display for Linear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f(z) = {} * z", self.c)
    }
}
