pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²)
    ///
    /// Both slices must be non-empty and of equal length; debug builds assert
    /// it. In release builds extra trailing values are ignored and empty
    /// input yields NaN.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        debug_assert_eq!(
            predicted.len(),
            expected.len(),
            "MSE over slices of different lengths"
        );
        debug_assert!(!predicted.is_empty(), "MSE over an empty slice");
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n
    }

    /// Gradient of the squared error for one output: 2 * (predicted - expected)
    #[inline]
    pub fn derivative(predicted: f64, expected: f64) -> f64 {
        2.0 * (predicted - expected)
    }
}
