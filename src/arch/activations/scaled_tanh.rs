use std::fmt::{self, Display};

/// A scaled hyperbolic tangent, `f(z) = c * tanh(m * z)`.
///
/// The default constants are LeCun's, `c = 1.7159` and `m = 2/3`, which make
/// `f(1) ~= 1` and `f(-1) ~= -1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaledTanh {
    c: f64,
    m: f64,
}

impl ScaledTanh {
    /// Creates a new `ScaledTanh`.
    ///
    /// # Arguments
    /// * `c` - The output scale.
    /// * `m` - The input scale.
    ///
    /// # Returns
    /// A new `ScaledTanh` instance.
    pub fn new(c: f64, m: f64) -> Self {
        Self { c, m }
    }

    /// Returns the output scale.
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Returns the input scale.
    pub fn m(&self) -> f64 {
        self.m
    }

    pub fn f(&self, z: f64) -> f64 {
        self.c * (self.m * z).tanh()
    }

    pub fn f_prime(&self, z: f64) -> f64 {
        self.c * self.m * (1. - (self.m * z).tanh().powi(2))
    }

    /// The derivative in terms of the activated value `a = c * tanh(m * z)`.
    pub fn f_prime_from_f(&self, a: f64) -> f64 {
        self.c * self.m * (1. - (a / self.c).powi(2))
    }
}

impl Default for ScaledTanh {
    fn default() -> Self {
        Self::new(1.7159, 2. / 3.)
    }
}

impl Display for ScaledTanh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f(z) = {} * tanh({} * z)", self.c, self.m)
    }
}
