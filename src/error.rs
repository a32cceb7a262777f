use thiserror::Error;

use crate::activation::ActivationFunction;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building, evaluating or training a network.
#[derive(Error, Debug)]
pub enum Error {
    /// Layer count or a layer size is outside the configured bounds.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// Learning rate or momentum is not a usable number.
    #[error("invalid hyperparameter: {0}")]
    InvalidHyperparameter(String),

    /// The system allocator could not provide the arena block.
    #[error("could not allocate an arena of {requested} bytes")]
    AllocationFailure { requested: usize },

    /// A bump allocation did not fit in the arena.
    #[error("arena out of memory: requested {requested} bytes, {remaining} remaining")]
    OutOfMemory { requested: usize, remaining: usize },

    /// Input length differs from the input layer size.
    #[error("input has {actual} values but the input layer has {expected} nodes")]
    InputSizeMismatch { expected: usize, actual: usize },

    /// Expected output length differs from the output layer size.
    #[error("expected output has {actual} values but the output layer has {expected} nodes")]
    ExpectedOutputSizeMismatch { expected: usize, actual: usize },

    /// Training inputs and expected outputs do not pair up.
    #[error("{inputs} inputs but {outputs} expected outputs")]
    DatasetLengthMismatch { inputs: usize, outputs: usize },

    /// A node in the next layer has no synapse at the index being backpropagated.
    #[error("layer {layer} node {node} has no synapse {synapse}")]
    TopologyInvariantViolation {
        layer: usize,
        node: usize,
        synapse: usize,
    },

    /// Training only supports sigmoid networks.
    #[error("training is not supported for {0:?} networks")]
    UnsupportedActivation(ActivationFunction),

    /// Layer, node or synapse index does not exist.
    #[error("no synapse at layer {layer}, node {node}, index {synapse}")]
    IndexOutOfRange {
        layer: usize,
        node: usize,
        synapse: usize,
    },

    /// More values than a fixed-capacity value vector can hold.
    #[error("{requested} values exceed the capacity of {capacity}")]
    CapacityExceeded { capacity: usize, requested: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
