use std::{
    error::Error,
    fmt::{self, Display},
};

use ndarray::ShapeError;
use rand_distr::uniform::Error as UniformError;

/// The result type used in the entire machine module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine module's error type.
#[derive(Debug)]
pub enum MlErr {
    /// A length does not match the one implied by the target layout.
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// An array's shape does not match the one it is paired with.
    ShapeMismatch {
        what: &'static str,
        got: Vec<usize>,
        expected: Vec<usize>,
    },
    /// A network shape that cannot describe any layer.
    InvalidShape(String),
    /// A sampling range uniform initialization cannot draw from.
    InvalidRange(String),
    /// A configuration that failed to parse.
    Config(serde_json::Error),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch for {what}, got {got} and expected {expected}"
            ),
            MlErr::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a shape mismatch for {what}, got {got:?} and expected {expected:?}"
            ),
            MlErr::InvalidShape(msg) => write!(f, "Invalid network shape: {msg}"),
            MlErr::InvalidRange(msg) => write!(f, "Invalid sampling range: {msg}"),
            MlErr::Config(e) => write!(f, "Failed to parse the configuration: {e}"),
        }
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MlErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value)
    }
}

impl From<UniformError> for MlErr {
    fn from(value: UniformError) -> Self {
        Self::InvalidRange(value.to_string())
    }
}

impl From<ShapeError> for MlErr {
    fn from(value: ShapeError) -> Self {
        Self::InvalidShape(value.to_string())
    }
}
