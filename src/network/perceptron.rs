use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{MlpError, Result};
use crate::math::matrix::Matrix;
use crate::network::config::MlpConfig;
use crate::network::params::Parameters;
use crate::normalize::normalizer::Normalizer;
use crate::train::batch::train_batch;
use crate::train::online::train_online;
use crate::train::report::TrainReport;

/// Two-layer perceptron: D inputs → H sigmoid hidden units → O outputs.
///
/// `fit` / `fit_online` capture the normalizer, draw fresh weights and train.
/// D and O are fixed by the first fit; `predict`, `discr` and `score` reuse
/// the captured statistics and never recompute them from their own input.
#[derive(Debug, Clone)]
pub struct MultilayerPerceptron {
    config: MlpConfig,
    normalizer: Option<Normalizer>,
    params: Option<Parameters>,
    rng: StdRng,
}

impl MultilayerPerceptron {
    pub fn new(config: MlpConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(MultilayerPerceptron { config, normalizer: None, params: None, rng })
    }

    /// Rebuilds a trained model from a normalizer and weights, e.g. ones
    /// produced by another model's `normalizer()` / `parameters()`.
    pub fn from_parts(config: MlpConfig, normalizer: Normalizer, params: Parameters) -> Result<Self> {
        if params.hidden_units() != config.hidden_units {
            return Err(MlpError::mismatch("hidden units", config.hidden_units, params.hidden_units()));
        }
        if params.w_output.rows != params.hidden_units() {
            return Err(MlpError::mismatch("output weight rows", params.hidden_units(), params.w_output.rows));
        }
        if normalizer.dim() != params.input_dim() || normalizer.std.len() != normalizer.dim() {
            return Err(MlpError::mismatch("normalizer feature count", params.input_dim(), normalizer.dim()));
        }
        let mut mlp = MultilayerPerceptron::new(config)?;
        mlp.normalizer = Some(normalizer);
        mlp.params = Some(params);
        Ok(mlp)
    }

    pub fn config(&self) -> &MlpConfig {
        &self.config
    }

    pub fn normalizer(&self) -> Option<&Normalizer> {
        self.normalizer.as_ref()
    }

    pub fn parameters(&self) -> Option<&Parameters> {
        self.params.as_ref()
    }

    pub fn is_trained(&self) -> bool {
        self.params.is_some()
    }

    pub fn input_dim(&self) -> Option<usize> {
        self.params.as_ref().map(Parameters::input_dim)
    }

    pub fn output_dim(&self) -> Option<usize> {
        self.params.as_ref().map(Parameters::output_dim)
    }

    /// Batch gradient descent with early stopping on `config.threshold`.
    pub fn fit(&mut self, x: &Matrix, t: &Matrix) -> Result<TrainReport> {
        let inputs = self.prepare(x, t)?;
        info!(
            "fit: N={} D={} H={} O={} output={} max_itr={} eta_0={}",
            x.rows, x.cols, self.config.hidden_units, t.cols,
            self.config.output_activation, self.config.max_itr, self.config.learning_rate
        );

        let params = self.params.as_mut().ok_or(MlpError::NotTrained)?;
        let report = train_batch(params, &inputs, t, &self.config);

        info!(
            "fit finished after {} iterations ({:?}), mean error {:.6e}, {} ms",
            report.iterations, report.stop_reason, report.final_error, report.elapsed_ms
        );
        Ok(report)
    }

    /// Stochastic gradient descent: exactly `config.max_itr` single-sample
    /// updates on indices drawn with replacement.
    pub fn fit_online(&mut self, x: &Matrix, t: &Matrix) -> Result<TrainReport> {
        let inputs = self.prepare(x, t)?;
        info!(
            "fit_online: N={} D={} H={} O={} output={} max_itr={} eta_0={}",
            x.rows, x.cols, self.config.hidden_units, t.cols,
            self.config.output_activation, self.config.max_itr, self.config.learning_rate
        );

        let params = self.params.as_mut().ok_or(MlpError::NotTrained)?;
        let report = train_online(params, &inputs, t, &self.config, &mut self.rng);

        info!(
            "fit_online finished after {} iterations, mean error {:.6e}, {} ms",
            report.iterations, report.final_error, report.elapsed_ms
        );
        Ok(report)
    }

    /// Raw output activations, one row per sample (N×O).
    pub fn predict(&self, x: &Matrix) -> Result<Matrix> {
        let (normalizer, params) = self.trained()?;
        if x.cols != params.input_dim() && x.rows > 0 {
            return Err(MlpError::mismatch("predict feature count", params.input_dim(), x.cols));
        }
        x.check_shape("predict row length")?;

        let data = x.data.iter()
            .map(|row| {
                let xn = normalizer.normalize_row(row);
                params.forward(&xn, self.config.output_activation).output
            })
            .collect();
        Ok(Matrix { rows: x.rows, cols: params.output_dim(), data })
    }

    /// Output activations for a single raw sample.
    pub fn predict_one(&self, x: &[f64]) -> Result<Vec<f64>> {
        let (normalizer, params) = self.trained()?;
        if x.len() != params.input_dim() {
            return Err(MlpError::mismatch("predict feature count", params.input_dim(), x.len()));
        }
        let xn = normalizer.normalize_row(x);
        Ok(params.forward(&xn, self.config.output_activation).output)
    }

    /// Thresholded predictions: 1 where the activation is strictly above 0.5.
    pub fn discr(&self, x: &Matrix) -> Result<Matrix> {
        Ok(self.predict(x)?.map(threshold))
    }

    /// Per-unit correctness: 1 where `discr(x)` equals `t`, 0 elsewhere.
    /// Take `.mean()` of the result for an accuracy.
    pub fn score(&self, x: &Matrix, t: &Matrix) -> Result<Matrix> {
        let decisions = self.discr(x)?;
        check_targets(&decisions, t)?;
        Ok(decisions.zip_map(t, |d, t| if d == t { 1.0 } else { 0.0 }))
    }

    /// Mean of `|predict(x) - t|` over every sample and output unit.
    pub fn mean_absolute_error(&self, x: &Matrix, t: &Matrix) -> Result<f64> {
        let y = self.predict(x)?;
        check_targets(&y, t)?;
        Ok(y.zip_map(t, |y, t| (y - t).abs()).mean())
    }

    fn trained(&self) -> Result<(&Normalizer, &Parameters)> {
        match (&self.normalizer, &self.params) {
            (Some(normalizer), Some(params)) => Ok((normalizer, params)),
            _ => Err(MlpError::NotTrained),
        }
    }

    /// Validates shapes, captures the normalizer, draws fresh weights and
    /// returns the normalized inputs.
    fn prepare(&mut self, x: &Matrix, t: &Matrix) -> Result<Matrix> {
        x.check_shape("fit input row length")?;
        t.check_shape("fit target row length")?;
        if x.rows != t.rows {
            return Err(MlpError::mismatch("fit sample count (X rows vs T rows)", x.rows, t.rows));
        }
        if x.rows == 0 {
            return Err(MlpError::EmptyData("training set has no samples".into()));
        }
        if x.cols == 0 {
            return Err(MlpError::EmptyData("training set has no features".into()));
        }
        if t.cols == 0 {
            return Err(MlpError::EmptyData("targets have no output units".into()));
        }
        if let Some(params) = &self.params {
            if x.cols != params.input_dim() {
                return Err(MlpError::mismatch("refit feature count", params.input_dim(), x.cols));
            }
            if t.cols != params.output_dim() {
                return Err(MlpError::mismatch("refit output count", params.output_dim(), t.cols));
            }
        }

        let normalizer = Normalizer::fit(x)?;
        let inputs = normalizer.normalize(x)?;
        self.normalizer = Some(normalizer);
        self.params = Some(Parameters::random(
            x.cols,
            self.config.hidden_units,
            t.cols,
            &mut self.rng,
        ));
        Ok(inputs)
    }
}

#[inline]
fn threshold(y: f64) -> f64 {
    if y > 0.5 { 1.0 } else { 0.0 }
}

fn check_targets(predicted: &Matrix, t: &Matrix) -> Result<()> {
    t.check_shape("target row length")?;
    if t.rows != predicted.rows {
        return Err(MlpError::mismatch("target sample count", predicted.rows, t.rows));
    }
    if t.cols != predicted.cols && t.rows > 0 {
        return Err(MlpError::mismatch("target output count", predicted.cols, t.cols));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strict() {
        assert_eq!(threshold(0.5), 0.0);
        assert_eq!(threshold(0.5000001), 1.0);
        assert_eq!(threshold(0.0), 0.0);
    }

    #[test]
    fn untrained_model_reports_not_trained() {
        let mlp = MultilayerPerceptron::new(MlpConfig::default().with_seed(0)).unwrap();
        let x = Matrix::zeros(1, 2);
        assert!(matches!(mlp.predict(&x), Err(MlpError::NotTrained)));
        assert!(matches!(mlp.discr(&x), Err(MlpError::NotTrained)));
        assert!(matches!(mlp.score(&x, &Matrix::zeros(1, 1)), Err(MlpError::NotTrained)));
        assert!(!mlp.is_trained());
    }

    #[test]
    fn fit_rejects_row_mismatch() {
        let mut mlp = MultilayerPerceptron::new(MlpConfig::default().with_seed(0)).unwrap();
        let x = Matrix::zeros(3, 2);
        let t = Matrix::zeros(2, 1);
        assert!(matches!(
            mlp.fit(&x, &t),
            Err(MlpError::DimensionMismatch { expected: 3, actual: 2, .. })
        ));
        assert!(!mlp.is_trained());
    }

    #[test]
    fn fit_rejects_ragged_rows() {
        let x = Matrix { rows: 2, cols: 5, data: vec![vec![0.0, 1.0], vec![1.0, 0.0]] };
        let t = Matrix::column(&[0.0, 1.0]);
        for online in [false, true] {
            let mut mlp = MultilayerPerceptron::new(
                MlpConfig::default().with_seed(0).with_max_itr(10),
            ).unwrap();
            let res = if online { mlp.fit_online(&x, &t) } else { mlp.fit(&x, &t) };
            assert!(matches!(res, Err(MlpError::DimensionMismatch { expected: 5, actual: 2, .. })));
            assert!(!mlp.is_trained());
        }
    }
}
