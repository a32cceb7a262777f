use tracing::trace;

use crate::activation::ActivationFunction;
use crate::arena::Arena;
use crate::error::{Error, Result};
use crate::loss::mse::MseLoss;
use crate::network::layout::LayerTable;
use crate::network::{Input, Network, Output};
use crate::optim::momentum::Momentum;

impl Network {
    /// One stochastic training step on a single input/expected-output pair.
    ///
    /// Re-runs the forward pass, computes a momentum-blended delta for every
    /// synapse (output layer first, then hidden layers back to layer 1),
    /// then moves every weight by `delta * learning_rate`. Returns the mean
    /// squared error of the forward pass.
    ///
    /// Only sigmoid networks can be trained. Size errors are reported before
    /// anything in the network changes, and a cross-layer index error is
    /// reported before any weight changes.
    pub fn learn(&mut self, input: &Input, expected: &Output) -> Result<f64> {
        if self.activation != ActivationFunction::Sigmoid {
            return Err(Error::UnsupportedActivation(self.activation));
        }
        let output_size = self.output_size();
        if expected.len() != output_size {
            return Err(Error::ExpectedOutputSizeMismatch {
                expected: output_size,
                actual: expected.len(),
            });
        }

        let output = self.forward_propagate(input)?;
        let optimizer = Momentum::new(self.learning_rate, self.momentum);
        let last = self.table.len() - 1;

        output_deltas(&mut self.arena, self.table, last, expected, &optimizer);
        for layer_index in (1..last).rev() {
            hidden_deltas(&mut self.arena, self.table, layer_index, &optimizer)?;
        }
        apply_deltas(&mut self.arena, self.table, &optimizer);

        let error = MseLoss::loss(&output, expected);
        trace!(error, "learn step");
        Ok(error)
    }
}

/// σ'(x) from the pre-activation stored on a node.
#[inline]
fn sigmoid_derivative(pre_activation: f64) -> f64 {
    ActivationFunction::Sigmoid.derivative(pre_activation)
}

fn output_deltas(
    arena: &mut Arena,
    table: LayerTable,
    last: usize,
    expected: &[f64],
    optimizer: &Momentum,
) {
    let layer = table.layer_at(last);
    let previous = table.layer_at(last - 1);

    for (i, &target) in expected.iter().enumerate() {
        let node = layer.node_at(arena, i);
        let cost_gradient = MseLoss::derivative(node.activation(arena), target);
        let activation_gradient = sigmoid_derivative(node.pre_activation(arena));

        for j in 0..node.synapse_count(arena) {
            let input_contribution = previous.node_at(arena, j).activation(arena);
            let raw = cost_gradient * activation_gradient * input_contribution;
            let synapse = node.synapse_at(arena, j);
            let delta = optimizer.blend(raw, synapse.delta(arena));
            synapse.set_delta(arena, delta);
        }
    }
}

/// Deltas for hidden layer `layer_index`, reading the already updated deltas
/// of the layer after it.
///
/// A node's downstream influence is the sum of delta × weight over the
/// synapses that leave it, averaged over the size of the next layer.
fn hidden_deltas(
    arena: &mut Arena,
    table: LayerTable,
    layer_index: usize,
    optimizer: &Momentum,
) -> Result<()> {
    let layer = table.layer_at(layer_index);
    let previous = table.layer_at(layer_index - 1);
    let next = table.layer_at(layer_index + 1);
    let next_size = next.size(arena);

    for i in 0..layer.size(arena) {
        let node = layer.node_at(arena, i);

        let mut influence = 0.0;
        for k in 0..next_size {
            let outgoing = next.node_at(arena, k).synapse(arena, i).ok_or(
                Error::TopologyInvariantViolation {
                    layer: layer_index + 1,
                    node: k,
                    synapse: i,
                },
            )?;
            influence += outgoing.delta(arena) * outgoing.weight(arena);
        }
        influence /= next_size as f64;

        let gradient = influence * sigmoid_derivative(node.pre_activation(arena));
        for j in 0..node.synapse_count(arena) {
            let raw = gradient * previous.node_at(arena, j).activation(arena);
            let synapse = node.synapse_at(arena, j);
            let delta = optimizer.blend(raw, synapse.delta(arena));
            synapse.set_delta(arena, delta);
        }
    }
    Ok(())
}

fn apply_deltas(arena: &mut Arena, table: LayerTable, optimizer: &Momentum) {
    for layer_index in 1..table.len() {
        let layer = table.layer_at(layer_index);
        for i in 0..layer.size(arena) {
            let node = layer.node_at(arena, i);
            for j in 0..node.synapse_count(arena) {
                let synapse = node.synapse_at(arena, j);
                let weight = optimizer.step(synapse.weight(arena), synapse.delta(arena));
                synapse.set_weight(arena, weight);
            }
        }
    }
}
