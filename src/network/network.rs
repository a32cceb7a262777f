use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::activation::ActivationFunction;
use crate::arena::Arena;
use crate::error::{Error, Result};
use crate::network::layout::{self, LayerTable, SynapseHandle};
use crate::network::settings::{validate_hyperparameters, NetworkSettings};
use crate::network::view::{LayerView, Layers};

/// Lifecycle of a built network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkState {
    /// Built; node activations hold no pass yet.
    Ready,
    /// At least one forward pass has run; activations reflect the latest one.
    Evaluated,
}

/// A feed-forward network whose layers, nodes and synapses all live in one arena.
///
/// Dropping the network (or calling [`Network::free`]) releases the arena.
/// Views returned by [`Network::layer`] borrow the network and cannot
/// outlive it.
#[derive(Debug)]
pub struct Network {
    pub(crate) arena: Arena,
    pub(crate) table: LayerTable,
    pub(crate) activation: ActivationFunction,
    pub(crate) state: NetworkState,
    pub(crate) learning_rate: f64,
    pub(crate) momentum: f64,
}

impl Network {
    /// Builds a network from `settings`.
    ///
    /// Weights come from `StdRng` seeded with `settings.seed` when one is set,
    /// otherwise from the thread-local RNG.
    pub fn create(settings: &NetworkSettings) -> Result<Network> {
        match settings.seed {
            Some(seed) => Network::create_with_rng(settings, &mut StdRng::seed_from_u64(seed)),
            None => Network::create_with_rng(settings, &mut rand::thread_rng()),
        }
    }

    /// Builds a network drawing its initial weights from `rng`.
    pub fn create_with_rng<R: Rng + ?Sized>(
        settings: &NetworkSettings,
        rng: &mut R,
    ) -> Result<Network> {
        settings.validate()?;

        let bytes = layout::footprint(&settings.layer_sizes);
        let mut arena = Arena::create(bytes)?;
        let table = layout::carve(&mut arena, settings, rng)?;

        debug!(
            layer_sizes = ?settings.layer_sizes,
            bytes,
            activation = ?settings.activation,
            "network built"
        );

        Ok(Network {
            arena,
            table,
            activation: settings.activation,
            state: NetworkState::Ready,
            learning_rate: settings.learning_rate,
            momentum: settings.momentum,
        })
    }

    /// Releases the arena. Equivalent to dropping the network.
    pub fn free(self) {
        debug!(bytes = self.arena.capacity(), "network freed");
        drop(self);
    }

    pub fn num_layers(&self) -> usize {
        self.table.len()
    }

    /// Node count of every layer, input first.
    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers().map(|layer| layer.len()).collect()
    }

    pub fn input_size(&self) -> usize {
        self.layer_size(0)
    }

    pub fn output_size(&self) -> usize {
        self.layer_size(self.num_layers() - 1)
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub fn state(&self) -> NetworkState {
        self.state
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    /// Replaces the learning rate and momentum used by later `learn` calls.
    ///
    /// Non-finite values are rejected with [`Error::InvalidHyperparameter`]
    /// and leave the current pair in place.
    pub fn set_hyperparameters(&mut self, learning_rate: f64, momentum: f64) -> Result<()> {
        validate_hyperparameters(learning_rate, momentum)?;
        self.learning_rate = learning_rate;
        self.momentum = momentum;
        Ok(())
    }

    /// The arena backing this network, for byte accounting.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Read-only view of layer `index`.
    pub fn layer(&self, index: usize) -> Option<LayerView<'_>> {
        self.table
            .layer(index)
            .map(|handle| LayerView::new(&self.arena, index, handle))
    }

    /// Iterates over all layers, input first.
    pub fn layers(&self) -> Layers<'_> {
        Layers::new(&self.arena, self.table)
    }

    /// Overwrites one synapse weight. The delta is left untouched.
    pub fn set_synapse_weight(
        &mut self,
        layer: usize,
        node: usize,
        synapse: usize,
        weight: f64,
    ) -> Result<()> {
        let handle = self.synapse_handle(layer, node, synapse)?;
        handle.set_weight(&mut self.arena, weight);
        Ok(())
    }

    /// Overwrites all incoming weights of one node.
    pub fn set_node_weights(&mut self, layer: usize, node: usize, weights: &[f64]) -> Result<()> {
        let count = self
            .layer(layer)
            .and_then(|l| l.node(node))
            .map(|n| n.synapse_count());
        if count != Some(weights.len()) {
            return Err(Error::IndexOutOfRange {
                layer,
                node,
                synapse: weights.len(),
            });
        }
        for (k, &weight) in weights.iter().enumerate() {
            self.set_synapse_weight(layer, node, k, weight)?;
        }
        Ok(())
    }

    fn layer_size(&self, index: usize) -> usize {
        self.table
            .layer(index)
            .map_or(0, |handle| handle.size(&self.arena))
    }

    fn synapse_handle(&self, layer: usize, node: usize, synapse: usize) -> Result<SynapseHandle> {
        self.table
            .layer(layer)
            .and_then(|l| l.node(&self.arena, node))
            .and_then(|n| n.synapse(&self.arena, synapse))
            .ok_or(Error::IndexOutOfRange {
                layer,
                node,
                synapse,
            })
    }
}
