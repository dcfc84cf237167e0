use std::time::Instant;

use log::{debug, warn};

use crate::loss::squared_error::SquaredErrorLoss;
use crate::math::matrix::Matrix;
use crate::network::config::MlpConfig;
use crate::network::params::{Gradients, Parameters};
use crate::train::report::{StopReason, TrainReport};
use crate::train::{log_interval, mean_error};

/// Full-batch gradient descent on already-normalized data.
///
/// Each iteration runs forward and backward over every sample, averages the
/// gradients and the error over N, and takes one step of size
/// `config.learning_rate`. The run stops early once
/// `previous_error - error < config.threshold`; the reference error starts
/// at +infinity so the first iteration never stops.
///
/// `inputs` and `targets` must be non-empty with matching row counts and
/// widths equal to the parameter shapes.
pub fn train_batch(
    params: &mut Parameters,
    inputs: &Matrix,
    targets: &Matrix,
    config: &MlpConfig,
) -> TrainReport {
    assert_eq!(inputs.rows, targets.rows, "inputs and targets must have equal length");
    assert!(inputs.rows > 0, "inputs must not be empty");

    let t_start = Instant::now();
    let n = inputs.rows as f64;
    let act = config.output_activation;
    let every = log_interval(config.max_itr);

    let mut old_err = f64::INFINITY;
    let mut last_err = None;
    let mut iterations = 0;
    let mut stop_reason = StopReason::IterationCap;

    for itr in 1..=config.max_itr {
        let mut acc = Gradients::zeros_like(params);
        let mut err = 0.0;

        for (x, t) in inputs.data.iter().zip(targets.data.iter()) {
            let pass = params.forward(x, act);
            let grads = params.backward(x, t, &pass, act);
            acc += &grads;
            err += SquaredErrorLoss::loss(&pass.output, t);
        }

        acc.scale(1.0 / n);
        err /= n;

        let delta_err = old_err - err;
        old_err = err;
        last_err = Some(err);
        iterations = itr;

        params.apply_gradients(&acc, config.learning_rate);

        if itr % every == 0 {
            debug!("batch iteration {itr}/{}: mean error {err:.6e}", config.max_itr);
        }

        if delta_err < config.threshold {
            stop_reason = if delta_err < 0.0 {
                warn!(
                    "mean error increased at iteration {itr} ({:.6e} -> {err:.6e}); \
                     learning rate {} may be too large",
                    err + delta_err,
                    config.learning_rate
                );
                StopReason::ErrorIncreased
            } else {
                StopReason::Converged
            };
            break;
        }
    }

    let final_error = match last_err {
        Some(err) => err,
        None => mean_error(params, inputs, targets, act),
    };

    TrainReport {
        iterations,
        final_error,
        stop_reason,
        elapsed_ms: t_start.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn and_gate() -> (Matrix, Matrix) {
        let x = Matrix::from_data(vec![
            vec![-1.0, -1.0],
            vec![-1.0, 1.0],
            vec![1.0, -1.0],
            vec![1.0, 1.0],
        ]).unwrap();
        let t = Matrix::column(&[0.0, 0.0, 0.0, 1.0]);
        (x, t)
    }

    #[test]
    fn zero_iterations_leave_weights_untouched() {
        let (x, t) = and_gate();
        let mut rng = StdRng::seed_from_u64(3);
        let mut params = Parameters::random(2, 3, 1, &mut rng);
        let before = params.clone();
        let config = MlpConfig::default().with_max_itr(0);

        let report = train_batch(&mut params, &x, &t, &config);
        assert_eq!(report.iterations, 0);
        assert_eq!(report.stop_reason, StopReason::IterationCap);
        assert_eq!(params, before);
        assert_eq!(
            report.final_error,
            mean_error(&params, &x, &t, ActivationFunction::Sigmoid)
        );
    }

    #[test]
    fn huge_threshold_stops_after_second_iteration() {
        let (x, t) = and_gate();
        let mut rng = StdRng::seed_from_u64(3);
        let mut params = Parameters::random(2, 3, 1, &mut rng);
        let config = MlpConfig::default()
            .with_max_itr(1000)
            .with_learning_rate(0.1)
            .with_threshold(1e6);

        let report = train_batch(&mut params, &x, &t, &config);
        assert_eq!(report.iterations, 2);
        assert_ne!(report.stop_reason, StopReason::IterationCap);
    }
}
