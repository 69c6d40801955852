pub mod activations;
mod mlp;

pub use mlp::Mlp;
