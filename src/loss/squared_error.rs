/// Half squared error, `1/2 * sum_k (y_k - t_k)^2`, the per-sample error the
/// training loops minimise.
pub struct SquaredErrorLoss;

impl SquaredErrorLoss {
    /// Scalar loss summed over output units.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(y, t)| 0.5 * (y - t).powi(2))
            .sum()
    }

    /// Per-output gradient: predicted - expected
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(y, t)| y - t)
            .collect()
    }
}
