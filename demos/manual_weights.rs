//! Hand-wires a 2-2-1 ReLU network and prints every node and synapse.

use arena_nn::{ActivationFunction, Network, NetworkSettings, Values};
use tracing_subscriber::EnvFilter;

fn main() -> arena_nn::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    //   I1 - A \
    //      X    O
    //   I2 - B /
    let settings = NetworkSettings::new(vec![2, 2, 1]).with_activation(ActivationFunction::ReLU);
    let mut network = Network::create(&settings)?;
    network.set_node_weights(1, 0, &[10.0, -10.0])?;
    network.set_node_weights(1, 1, &[-10.0, 10.0])?;
    network.set_node_weights(2, 0, &[10.0, 10.0])?;

    let output = network.forward_propagate(&Values::from_slice(&[1.0, 0.0])?)?;

    for layer in network.layers() {
        for (j, node) in layer.nodes().enumerate() {
            println!("\tNode {} {}: {:.4}", layer.index(), j, node.activation());
            for (k, synapse) in node.synapses().enumerate() {
                println!("\t\tSynapse {}: {:.4}", k, synapse.weight());
            }
        }
    }

    println!("Result:");
    for (i, value) in output.iter().enumerate() {
        println!("\t{i}: {value:.3}");
    }

    network.free();
    Ok(())
}
