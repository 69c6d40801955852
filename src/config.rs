use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Mlp, Result,
    arch::activations::{ActFn, Linear, ScaledTanh},
};

/// Activation function specification.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActFnConfig {
    Identity,
    Linear {
        #[serde(default = "default_linear_c")]
        c: f64,
    },
    #[default]
    Tanh,
    ScaledTanh {
        #[serde(default = "default_scaled_tanh_c")]
        c: f64,
        #[serde(default = "default_scaled_tanh_m")]
        m: f64,
    },
    Logistic,
}

fn default_linear_c() -> f64 {
    Linear::default().c()
}

fn default_scaled_tanh_c() -> f64 {
    ScaledTanh::default().c()
}

fn default_scaled_tanh_m() -> f64 {
    ScaledTanh::default().m()
}

impl From<ActFnConfig> for ActFn {
    fn from(value: ActFnConfig) -> Self {
        match value {
            ActFnConfig::Identity => ActFn::identity(),
            ActFnConfig::Linear { c } => ActFn::linear(c),
            ActFnConfig::Tanh => ActFn::tanh(),
            ActFnConfig::ScaledTanh { c, m } => ActFn::scaled_tanh(c, m),
            ActFnConfig::Logistic => ActFn::logistic(),
        }
    }
}

/// Uniform parameter initialization in `[low, high)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitConfig {
    pub low: f64,
    pub high: f64,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            low: -0.1,
            high: 0.1,
        }
    }
}

/// A multilayer perceptron specification.
///
/// ```json
/// {
///     "shape": [4, 8, 2],
///     "hidden_activation": { "kind": "scaled_tanh" },
///     "output_activation": { "kind": "linear", "c": 0.5 },
///     "init": { "low": -0.2, "high": 0.2 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpConfig {
    pub shape: Vec<usize>,
    #[serde(default)]
    pub hidden_activation: ActFnConfig,
    #[serde(default)]
    pub output_activation: ActFnConfig,
    /// Leaves every parameter at zero when absent.
    #[serde(default)]
    pub init: Option<InitConfig>,
}

impl MlpConfig {
    /// Parses a configuration from its json representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the network this configuration describes.
    ///
    /// # Arguments
    /// * `rng` - The random number generator used for initialization, if any.
    ///
    /// # Returns
    /// The network or an error if the shape or the initialization range are invalid.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Mlp> {
        let mut mlp = Mlp::new(&self.shape)?
            .with_hidden_activation(self.hidden_activation.into())
            .with_output_activation(self.output_activation.into());

        if let Some(InitConfig { low, high }) = self.init {
            mlp.randomize_in(rng, low, high)?;
        }

        info!(
            hidden = mlp.hidden_activation().unique_identifier(),
            output = mlp.output_activation().unique_identifier();
            "built mlp of shape {:?}", self.shape
        );
        Ok(mlp)
    }
}
