pub mod batch;
pub mod online;
pub mod report;

pub use batch::train_batch;
pub use online::train_online;
pub use report::{StopReason, TrainReport};

use crate::activation::activation::ActivationFunction;
use crate::loss::squared_error::SquaredErrorLoss;
use crate::math::matrix::Matrix;
use crate::network::params::Parameters;

/// Mean over samples of the per-sample half squared error.
pub fn mean_error(
    params: &Parameters,
    inputs: &Matrix,
    targets: &Matrix,
    output_activation: ActivationFunction,
) -> f64 {
    if inputs.rows == 0 {
        return 0.0;
    }
    let total: f64 = inputs.data.iter().zip(targets.data.iter())
        .map(|(x, t)| {
            let pass = params.forward(x, output_activation);
            SquaredErrorLoss::loss(&pass.output, t)
        })
        .sum();
    total / inputs.rows as f64
}

/// How often the loops emit a `debug!` progress line.
pub(crate) fn log_interval(max_itr: usize) -> usize {
    (max_itr / 10).max(1)
}
