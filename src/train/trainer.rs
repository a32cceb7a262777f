use crate::error::{Error, Result};
use crate::network::{Input, Network, Output};

/// Runs one `learn` step per input/expected pair, in order, and returns the
/// mean of the per-pair errors.
///
/// Stops at the first failing pair; weights updated by earlier pairs stay updated.
pub fn train_network(
    network: &mut Network,
    inputs: &[Input],
    expected_outputs: &[Output],
) -> Result<f64> {
    if inputs.len() != expected_outputs.len() {
        return Err(Error::DatasetLengthMismatch {
            inputs: inputs.len(),
            outputs: expected_outputs.len(),
        });
    }
    if inputs.is_empty() {
        return Ok(0.0);
    }

    let mut total_loss = 0.0;
    for (input, expected) in inputs.iter().zip(expected_outputs.iter()) {
        total_loss += network.learn(input, expected)?;
    }

    Ok(total_loss / inputs.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{NetworkSettings, Values};

    fn pairs() -> (Vec<Values>, Vec<Values>) {
        let inputs = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]
            .iter()
            .map(|v| Values::from_slice(v).unwrap())
            .collect();
        let outputs = [[0.0], [1.0], [1.0], [1.0]]
            .iter()
            .map(|v| Values::from_slice(v).unwrap())
            .collect();
        (inputs, outputs)
    }

    #[test]
    fn epoch_loss_falls_on_or() {
        let settings = NetworkSettings::new(vec![2, 3, 1])
            .with_learning_rate(0.5)
            .with_seed(5);
        let mut network = Network::create(&settings).unwrap();
        let (inputs, outputs) = pairs();

        let first = train_network(&mut network, &inputs, &outputs).unwrap();
        let mut last = first;
        for _ in 0..2000 {
            last = train_network(&mut network, &inputs, &outputs).unwrap();
        }
        assert!(last < first);
    }

    #[test]
    fn mismatched_pair_counts_are_rejected() {
        let mut network = Network::create(&NetworkSettings::new(vec![2, 1])).unwrap();
        let (inputs, outputs) = pairs();
        assert!(matches!(
            train_network(&mut network, &inputs, &outputs[..3]),
            Err(Error::DatasetLengthMismatch { inputs: 4, outputs: 3 })
        ));
    }

    #[test]
    fn empty_dataset_has_zero_loss() {
        let mut network = Network::create(&NetworkSettings::new(vec![2, 1])).unwrap();
        assert_eq!(train_network(&mut network, &[], &[]).unwrap(), 0.0);
    }
}
