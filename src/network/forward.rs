use tracing::warn;

use crate::error::{Error, Result};
use crate::network::network::{Network, NetworkState};
use crate::network::values::{Input, Output, Values};

impl Network {
    /// Forward pass; stores pre-activations and activations on every node for backprop.
    ///
    /// Input values are copied into the input layer as-is. Each later node
    /// takes the weighted sum of the previous layer's activations and passes
    /// it through the network's activation function. Weights are only read.
    ///
    /// Fails with [`Error::InputSizeMismatch`] without touching the network
    /// when `input` does not match the input layer.
    pub fn forward_propagate(&mut self, input: &Input) -> Result<Output> {
        let expected = self.input_size();
        if input.len() != expected {
            warn!(expected, actual = input.len(), "input size does not match the input layer");
            return Err(Error::InputSizeMismatch {
                expected,
                actual: input.len(),
            });
        }

        let arena = &mut self.arena;
        let mut previous = self.table.layer_at(0);
        for (j, &value) in input.iter().enumerate() {
            let node = previous.node_at(arena, j);
            node.set_pre_activation(arena, value);
            node.set_activation(arena, value);
        }

        for layer_index in 1..self.table.len() {
            let layer = self.table.layer_at(layer_index);
            for i in 0..layer.size(arena) {
                let node = layer.node_at(arena, i);
                // Synapse k connects to node k of the previous layer.
                let mut sum = 0.0;
                for k in 0..node.synapse_count(arena) {
                    let weight = node.synapse_at(arena, k).weight(arena);
                    sum += weight * previous.node_at(arena, k).activation(arena);
                }
                node.set_pre_activation(arena, sum);
                node.set_activation(arena, self.activation.function(sum));
            }
            previous = layer;
        }

        self.state = NetworkState::Evaluated;
        Ok(self.read_output())
    }

    /// Activations of the output layer as left by the most recent pass.
    pub(crate) fn read_output(&self) -> Output {
        let mut output = Values::empty();
        if let Some(layer) = self.layer(self.num_layers() - 1) {
            output.resize(layer.len());
            for (slot, node) in output.as_mut_slice().iter_mut().zip(layer.nodes()) {
                *slot = node.activation();
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use crate::activation::ActivationFunction;
    use crate::error::Error;
    use crate::network::{Network, NetworkSettings, NetworkState, Values};

    fn xor_relu() -> Network {
        let settings = NetworkSettings::new(vec![2, 2, 1]).with_activation(ActivationFunction::ReLU);
        let mut network = Network::create(&settings).unwrap();
        network.set_node_weights(1, 0, &[10.0, -10.0]).unwrap();
        network.set_node_weights(1, 1, &[-10.0, 10.0]).unwrap();
        network.set_node_weights(2, 0, &[10.0, 10.0]).unwrap();
        network
    }

    #[test]
    fn manual_relu_weights_give_exact_output() {
        let mut network = xor_relu();
        let output = network.forward_propagate(&Values::from_slice(&[1.0, 0.0]).unwrap()).unwrap();
        // Hidden activations are 10 and 0; the output sums 10 * 10 + 10 * 0.
        assert_eq!(output.as_slice(), &[100.0]);

        let output = network.forward_propagate(&Values::from_slice(&[0.0, 1.0]).unwrap()).unwrap();
        assert_eq!(output.as_slice(), &[100.0]);
        let output = network.forward_propagate(&Values::from_slice(&[1.0, 1.0]).unwrap()).unwrap();
        assert_eq!(output.as_slice(), &[0.0]);
    }

    #[test]
    fn nodes_keep_pre_activation_and_activation() {
        let mut network = xor_relu();
        network.forward_propagate(&Values::from_slice(&[1.0, 0.0]).unwrap()).unwrap();

        let hidden = network.layer(1).unwrap();
        assert_eq!(hidden.node(0).unwrap().pre_activation(), 10.0);
        assert_eq!(hidden.node(0).unwrap().activation(), 10.0);
        assert_eq!(hidden.node(1).unwrap().pre_activation(), -10.0);
        assert_eq!(hidden.node(1).unwrap().activation(), 0.0);
        assert_eq!(network.layer(0).unwrap().activations(), vec![1.0, 0.0]);
        assert_eq!(network.state(), NetworkState::Evaluated);
    }

    #[test]
    fn mismatched_input_is_rejected_and_state_untouched() {
        let mut network = xor_relu();
        let err = network
            .forward_propagate(&Values::from_slice(&[1.0, 0.0, 1.0]).unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::InputSizeMismatch { expected: 2, actual: 3 }));
        assert_eq!(network.state(), NetworkState::Ready);
        assert_eq!(network.layer(0).unwrap().activations(), vec![0.0, 0.0]);

        assert!(network.forward_propagate(&Values::empty()).is_err());
    }

    #[test]
    fn sigmoid_output_for_zero_input_is_one_half() {
        let mut network = Network::create(&NetworkSettings::new(vec![3, 4, 2])).unwrap();
        let output = network.forward_propagate(&Values::from_slice(&[0.0; 3]).unwrap()).unwrap();
        // Hidden nodes sit at 0.5, so the output is sigmoid of half the weight sum.
        for (i, &value) in output.iter().enumerate() {
            let node = network.layer(2).unwrap().node(i).unwrap();
            let half_sum: f64 = node.synapses().map(|s| s.weight() * 0.5).sum();
            assert!((value - ActivationFunction::Sigmoid.function(half_sum)).abs() < 1e-12);
        }
    }
}
