use arena_nn::{Network, NetworkSettings, Values, train_network};
use tracing_subscriber::EnvFilter;

fn main() -> arena_nn::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = NetworkSettings::new(vec![2, 5, 1])
        .with_learning_rate(0.4)
        .with_momentum(0.0);
    let mut network = Network::create(&settings)?;

    let inputs = vec![
        Values::from_slice(&[0.0, 0.0])?,
        Values::from_slice(&[1.0, 0.0])?,
        Values::from_slice(&[0.0, 1.0])?,
        Values::from_slice(&[1.0, 1.0])?,
    ];
    let expected_outputs = vec![
        Values::from_slice(&[0.0])?,
        Values::from_slice(&[1.0])?,
        Values::from_slice(&[1.0])?,
        Values::from_slice(&[0.0])?,
    ];

    let epochs = 12_500;
    for epoch in 0..epochs {
        let loss = train_network(&mut network, &inputs, &expected_outputs)?;
        if epoch % 1000 == 0 {
            println!("Epoch {epoch}: loss = {loss:.6}");
        }
    }

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.forward_propagate(input)?[0]);
    }
    Ok(())
}
