//! A small feed-forward neural network whose layers, nodes and synapses are
//! all carved out of one fixed-size arena.
//!
//! Build a [`Network`] from [`NetworkSettings`], run inference with
//! [`Network::forward_propagate`] and train a sigmoid network one example at
//! a time with [`Network::learn`] (gradient descent with momentum).
//!
//! ```rust
//! use arena_nn::{Network, NetworkSettings, Values};
//!
//! # fn main() -> arena_nn::Result<()> {
//! let settings = NetworkSettings::new(vec![2, 5, 1])
//!     .with_learning_rate(0.4)
//!     .with_seed(1);
//! let mut network = Network::create(&settings)?;
//!
//! let input = Values::from_slice(&[1.0, 0.0])?;
//! let target = Values::from_slice(&[1.0])?;
//! let error = network.learn(&input, &target)?;
//! assert!(error >= 0.0);
//!
//! let output = network.forward_propagate(&input)?;
//! assert_eq!(output.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod arena;
pub mod error;
pub mod loss;
pub mod network;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use arena::arena::Arena;
pub use error::{Error, Result};
pub use loss::mse::MseLoss;
pub use network::network::{Network, NetworkState};
pub use network::settings::{NetworkSettings, MAX_NODES_PER_LAYER, MAX_NUM_LAYERS};
pub use network::values::{Input, Output, Values};
pub use network::view::{LayerView, NodeView, SynapseView};
pub use optim::momentum::Momentum;
pub use train::trainer::train_network;
