use rand::Rng;
use std::ops::AddAssign;

use crate::activation::activation::ActivationFunction;
use crate::loss::squared_error::SquaredErrorLoss;
use crate::math::matrix::Matrix;

/// The two weight matrices of the network.
///
/// - `w_hidden`: D×H, input → hidden
/// - `w_output`: H×O, hidden → output
///
/// Shapes are fixed at allocation; training only mutates values in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub w_hidden: Matrix,
    pub w_output: Matrix,
}

/// Result of one forward pass: the output activations `y` (length O) and the
/// hidden activations `h` (length H) that the backward pass needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPass {
    pub output: Vec<f64>,
    pub hidden: Vec<f64>,
}

/// Per-sample (or accumulated) error gradients w.r.t. both weight matrices,
/// not yet scaled by the learning rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub w_output: Matrix,
    pub w_hidden: Matrix,
}

impl Parameters {
    /// Both matrices drawn uniformly from [-1, 1).
    pub fn random<R: Rng + ?Sized>(
        input_dim: usize,
        hidden_units: usize,
        output_dim: usize,
        rng: &mut R,
    ) -> Parameters {
        let w_hidden = Matrix::random(input_dim, hidden_units, rng);
        let w_output = Matrix::random(hidden_units, output_dim, rng);
        Parameters { w_hidden, w_output }
    }

    #[inline]
    pub fn input_dim(&self) -> usize {
        self.w_hidden.rows
    }

    #[inline]
    pub fn hidden_units(&self) -> usize {
        self.w_hidden.cols
    }

    #[inline]
    pub fn output_dim(&self) -> usize {
        self.w_output.cols
    }

    /// Forward pass for one (already normalized) sample.
    ///
    /// Panics if `x.len()` differs from the input dimension.
    pub fn forward(&self, x: &[f64], output_activation: ActivationFunction) -> ForwardPass {
        assert_eq!(
            x.len(),
            self.input_dim(),
            "input len {} does not match input_dim {}",
            x.len(),
            self.input_dim()
        );

        let hidden_pre = weighted_sums(x, &self.w_hidden);
        let hidden = ActivationFunction::Sigmoid.activate(&hidden_pre);

        let output_pre = weighted_sums(&hidden, &self.w_output);
        let output = output_activation.activate(&output_pre);

        ForwardPass { output, hidden }
    }

    /// Backpropagates the half squared error of one sample.
    ///
    /// `delta_o` comes from the output activation's own derivative, which for
    /// sigmoid is `(y - t) * y * (1 - y)`; the hidden layer is always sigmoid.
    pub fn backward(
        &self,
        x: &[f64],
        target: &[f64],
        pass: &ForwardPass,
        output_activation: ActivationFunction,
    ) -> Gradients {
        assert_eq!(
            target.len(),
            self.output_dim(),
            "target len {} does not match output_dim {}",
            target.len(),
            self.output_dim()
        );

        let d_output = SquaredErrorLoss::derivative(&pass.output, target);
        let delta_o = output_activation.backprop(&pass.output, &d_output);
        let w_output = Matrix::outer(&pass.hidden, &delta_o);

        // dL/dh_j = sum_k delta_o[k] * w_o[j, k]
        let d_hidden: Vec<f64> = self.w_output.data.iter()
            .map(|w_row| w_row.iter().zip(delta_o.iter()).map(|(w, d)| w * d).sum())
            .collect();
        let delta_h = ActivationFunction::Sigmoid.backprop(&pass.hidden, &d_hidden);
        let w_hidden = Matrix::outer(x, &delta_h);

        Gradients { w_output, w_hidden }
    }

    /// Plain gradient descent: `w -= learning_rate * grad` for both matrices.
    pub fn apply_gradients(&mut self, grads: &Gradients, learning_rate: f64) {
        self.w_output.sub_scaled(&grads.w_output, learning_rate);
        self.w_hidden.sub_scaled(&grads.w_hidden, learning_rate);
    }
}

impl Gradients {
    pub fn zeros_like(params: &Parameters) -> Gradients {
        Gradients {
            w_output: Matrix::zeros(params.w_output.rows, params.w_output.cols),
            w_hidden: Matrix::zeros(params.w_hidden.rows, params.w_hidden.cols),
        }
    }

    pub fn scale(&mut self, factor: f64) {
        self.w_output.scale(factor);
        self.w_hidden.scale(factor);
    }
}

impl AddAssign<&Gradients> for Gradients {
    fn add_assign(&mut self, rhs: &Gradients) {
        self.w_output += &rhs.w_output;
        self.w_hidden += &rhs.w_hidden;
    }
}

/// `z[j] = sum_i input[i] * weights[i, j]`.
fn weighted_sums(input: &[f64], weights: &Matrix) -> Vec<f64> {
    let mut z = vec![0.0; weights.cols];
    for (&x, w_row) in input.iter().zip(weights.data.iter()) {
        for (zj, &w) in z.iter_mut().zip(w_row.iter()) {
            *zj += x * w;
        }
    }
    z
}
