use std::time::Instant;

use log::debug;
use rand::Rng;

use crate::math::matrix::Matrix;
use crate::network::config::MlpConfig;
use crate::network::params::Parameters;
use crate::train::report::{StopReason, TrainReport};
use crate::train::{log_interval, mean_error};

/// Stochastic (online) gradient descent on already-normalized data.
///
/// Runs exactly `config.max_itr` updates. Each one draws a sample index
/// uniformly from `[0, N)` with replacement and applies that sample's
/// unaveraged gradient scaled by `config.learning_rate`.
pub fn train_online<R: Rng + ?Sized>(
    params: &mut Parameters,
    inputs: &Matrix,
    targets: &Matrix,
    config: &MlpConfig,
    rng: &mut R,
) -> TrainReport {
    assert_eq!(inputs.rows, targets.rows, "inputs and targets must have equal length");
    assert!(inputs.rows > 0, "inputs must not be empty");

    let t_start = Instant::now();
    let n = inputs.rows;
    let act = config.output_activation;
    let every = log_interval(config.max_itr);

    for itr in 1..=config.max_itr {
        let index = rng.gen_range(0..n);
        let x = inputs.row(index);
        let t = targets.row(index);

        let pass = params.forward(x, act);
        let grads = params.backward(x, t, &pass, act);
        params.apply_gradients(&grads, config.learning_rate);

        if itr % every == 0 && log::log_enabled!(log::Level::Debug) {
            debug!(
                "online iteration {itr}/{}: mean error {:.6e}",
                config.max_itr,
                mean_error(params, inputs, targets, act)
            );
        }
    }

    TrainReport {
        iterations: config.max_itr,
        final_error: mean_error(params, inputs, targets, act),
        stop_reason: StopReason::IterationCap,
        elapsed_ms: t_start.elapsed().as_millis() as u64,
    }
}
