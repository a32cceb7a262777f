/// Gradient descent with momentum, applied one synapse at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Momentum {
    pub learning_rate: f64,
    pub momentum: f64,
}

impl Momentum {
    pub fn new(learning_rate: f64, momentum: f64) -> Momentum {
        Momentum { learning_rate, momentum }
    }

    /// New delta: this step's raw gradient plus `momentum` times the previous delta.
    ///
    /// Only the previous delta carries over, so nothing accumulates beyond one step.
    #[inline]
    pub fn blend(&self, raw: f64, previous: f64) -> f64 {
        raw + self.momentum * previous
    }

    /// Weight after descending along `delta`.
    #[inline]
    pub fn step(&self, weight: f64, delta: f64) -> f64 {
        weight - delta * self.learning_rate
    }
}
