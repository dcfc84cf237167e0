use serde::{Serialize, Deserialize};

use crate::error::{MlpError, Result};
use crate::math::matrix::Matrix;

/// Per-feature standardization statistics captured from training data.
///
/// A feature whose standard deviation is exactly zero keeps a divisor of `1`,
/// so constant columns are only centred, never scaled to NaN/Inf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Normalizer {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl Normalizer {
    /// Computes column means and population standard deviations of `x`.
    pub fn fit(x: &Matrix) -> Result<Normalizer> {
        x.check_shape("normalizer input row length")?;
        if x.rows == 0 {
            return Err(MlpError::EmptyData("cannot fit a normalizer on zero samples".into()));
        }

        let n = x.rows as f64;
        let mut mean = vec![0.0; x.cols];
        for row in &x.data {
            for (m, &v) in mean.iter_mut().zip(row.iter()) {
                *m += v;
            }
        }
        for m in mean.iter_mut() {
            *m /= n;
        }

        let mut std = vec![0.0; x.cols];
        for row in &x.data {
            for ((s, &v), &m) in std.iter_mut().zip(row.iter()).zip(mean.iter()) {
                let d = v - m;
                *s += d * d;
            }
        }
        for s in std.iter_mut() {
            *s = (*s / n).sqrt();
            if *s == 0.0 {
                *s = 1.0;
            }
        }

        Ok(Normalizer { mean, std })
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.mean.len()
    }

    /// Returns `(x - mean) / std` row by row.
    pub fn normalize(&self, x: &Matrix) -> Result<Matrix> {
        if x.cols != self.dim() && x.rows > 0 {
            return Err(MlpError::mismatch("normalize feature count", self.dim(), x.cols));
        }
        x.check_shape("normalize input row length")?;

        let data = x.data.iter()
            .map(|row| self.normalize_row(row))
            .collect();
        Ok(Matrix { rows: x.rows, cols: self.dim(), data })
    }

    pub fn normalize_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(self.std.iter()))
            .map(|(&v, (&m, &s))| (v - m) / s)
            .collect()
    }
}
