use serde::{Serialize, Deserialize};

use crate::activation::ActivationFunction;
use crate::error::{Error, Result};

/// Largest number of nodes a single layer may hold.
pub const MAX_NODES_PER_LAYER: usize = 50;
/// Largest number of layers a network may have, input and output included.
pub const MAX_NUM_LAYERS: usize = 20;

fn default_learning_rate() -> f64 {
    0.1
}

/// Describes the network to build: topology plus training hyperparameters.
///
/// Settings are consumed by [`Network::create`](crate::Network::create) and
/// are not retained by the network. They can be kept on disk as JSON; trained
/// weights never are.
///
/// Fields:
/// - `layer_sizes`   — node count per layer, input layer first
/// - `learning_rate` — step size applied to every weight update
/// - `momentum`      — fraction of the previous delta blended into the new one
/// - `activation`    — non-linearity of every non-input layer
/// - `seed`          — fixes the initial weights when set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSettings {
    pub layer_sizes: Vec<usize>,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default)]
    pub momentum: f64,
    #[serde(default)]
    pub activation: ActivationFunction,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetworkSettings {
    /// Settings for `layer_sizes` with default hyperparameters
    /// (learning rate 0.1, no momentum, sigmoid, unseeded).
    pub fn new(layer_sizes: impl Into<Vec<usize>>) -> NetworkSettings {
        NetworkSettings {
            layer_sizes: layer_sizes.into(),
            learning_rate: default_learning_rate(),
            momentum: 0.0,
            activation: ActivationFunction::default(),
            seed: None,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn with_activation(mut self, activation: ActivationFunction) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the topology bounds and hyperparameters.
    pub fn validate(&self) -> Result<()> {
        let num_layers = self.layer_sizes.len();
        if num_layers < 2 {
            return Err(Error::InvalidTopology(format!(
                "a network needs at least 2 layers, got {num_layers}"
            )));
        }
        if num_layers > MAX_NUM_LAYERS {
            return Err(Error::InvalidTopology(format!(
                "{num_layers} layers exceed the maximum of {MAX_NUM_LAYERS}"
            )));
        }
        for (index, &size) in self.layer_sizes.iter().enumerate() {
            if size == 0 || size > MAX_NODES_PER_LAYER {
                return Err(Error::InvalidTopology(format!(
                    "layer {index} has {size} nodes, expected 1..={MAX_NODES_PER_LAYER}"
                )));
            }
        }

        validate_hyperparameters(self.learning_rate, self.momentum)
    }

    /// Serializes the settings to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes settings from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSettings> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Both values must be finite.
pub(crate) fn validate_hyperparameters(learning_rate: f64, momentum: f64) -> Result<()> {
    if !learning_rate.is_finite() {
        return Err(Error::InvalidHyperparameter(format!(
            "learning rate must be finite, got {learning_rate}"
        )));
    }
    if !momentum.is_finite() {
        return Err(Error::InvalidHyperparameter(format!(
            "momentum must be finite, got {momentum}"
        )));
    }
    Ok(())
}
