//! Multilayer perceptrons with pluggable activation functions, plus the packing of their
//! parameters into a single flat buffer for optimizers that work on flat vectors.

pub mod arch;
pub mod config;
pub mod error;
pub mod roll;

pub use arch::{Mlp, activations::ActFn};
pub use config::{ActFnConfig, InitConfig, MlpConfig};
pub use error::{MlErr, Result};
pub use roll::{LayerParams, ParameterLayout, num_params, roll, unroll, unroll_into};
