use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MlpError;

/// Vector activation applied to a layer's pre-activation sums.
///
/// The hidden layer always uses `Sigmoid`; the output layer is selected at
/// construction time from this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    /// Independent logistic squashing per unit, `1 / (1 + e^-z)`.
    #[default]
    Sigmoid,
    /// `exp(z_k) / sum exp(z_k')` over the whole vector.
    Softmax,
}

impl ActivationFunction {
    pub fn activate(&self, z: &[f64]) -> Vec<f64> {
        match self {
            ActivationFunction::Sigmoid => z.iter().map(|&x| sigmoid(x)).collect(),
            ActivationFunction::Softmax => softmax(z),
        }
    }

    /// Back-propagates `upstream = dL/dy` through the activation, given the
    /// cached outputs `y`, and returns `dL/dz`.
    ///
    /// Sigmoid: `g_k * y_k * (1 - y_k)`.
    /// Softmax: the full Jacobian product `y_k * (g_k - sum_j g_j * y_j)`.
    pub fn backprop(&self, y: &[f64], upstream: &[f64]) -> Vec<f64> {
        debug_assert_eq!(y.len(), upstream.len());
        match self {
            ActivationFunction::Sigmoid => y.iter().zip(upstream.iter())
                .map(|(&y, &g)| g * y * (1.0 - y))
                .collect(),
            ActivationFunction::Softmax => {
                let dot: f64 = y.iter().zip(upstream.iter()).map(|(&y, &g)| y * g).sum();
                y.iter().zip(upstream.iter())
                    .map(|(&y, &g)| y * (g - dot))
                    .collect()
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::Softmax => "softmax",
        }
    }
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActivationFunction {
    type Err = MlpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sigmoid" => Ok(ActivationFunction::Sigmoid),
            "softmax" => Ok(ActivationFunction::Softmax),
            other => Err(MlpError::InvalidConfig(format!(
                "unknown output activation '{other}', expected 'sigmoid' or 'softmax'"
            ))),
        }
    }
}

/// Smallest distance a sigmoid output keeps from 0 and from 1.
pub const SIGMOID_MARGIN: f64 = f64::EPSILON;

/// Logistic sigmoid. Splits on the sign of `x` so `exp` never overflows, and
/// clamps to `[SIGMOID_MARGIN, 1 - SIGMOID_MARGIN]` so saturated units keep a
/// non-zero `y * (1 - y)` derivative.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    let y = if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let z = x.exp();
        z / (1.0 + z)
    };
    y.clamp(SIGMOID_MARGIN, 1.0 - SIGMOID_MARGIN)
}

/// Softmax with max-subtraction.
pub fn softmax(z: &[f64]) -> Vec<f64> {
    let max = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = z.iter().map(|&x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
