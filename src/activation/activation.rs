use serde::{Serialize, Deserialize};

/// Non-linearity applied to every non-input node.
///
/// Chosen once when the network is built and stored on it; the input layer
/// never has an activation applied.
///
/// Sigmoid lies in (0, 1) mathematically, but in f64 it rounds to exactly
/// `1.0` for inputs from about 37 up and to exactly `0.0` below about -710,
/// so computed outputs are only guaranteed to lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActivationFunction {
    ReLU,
    #[default]
    Sigmoid,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => x.max(0.0),
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }

    /// Derivative with respect to the pre-activation value `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
        }
    }
}
