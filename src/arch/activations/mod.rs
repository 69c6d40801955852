mod act_fn;
mod broadcast;
mod identity;
mod linear;
mod logistic;
mod scaled_tanh;
mod tanh;

pub use act_fn::ActFn;
pub use broadcast::Elementwise;
pub use identity::Identity;
pub use linear::Linear;
pub use logistic::Logistic;
pub use scaled_tanh::ScaledTanh;
pub use tanh::Tanh;
