use rand::Rng;
use std::ops::AddAssign;

use crate::error::{MlpError, Result};

/// Dense row-major `f64` matrix. Row `i` is one sample (or one fan-in unit
/// for weight matrices).
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Uniform samples in [-1, 1).
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() * 2.0 - 1.0;
            }
        }

        res
    }

    /// Builds a matrix from per-sample rows. Every row must have the same
    /// length; an empty `data` gives a 0×0 matrix.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = data.first().map_or(0, Vec::len);
        for row in &data {
            if row.len() != cols {
                return Err(MlpError::mismatch("matrix row length", cols, row.len()));
            }
        }

        Ok(Matrix {
            rows: data.len(),
            cols,
            data
        })
    }

    /// Checks that `data` really is `rows` rows of `cols` values each. The
    /// fields are public, so a hand-built matrix can disagree with itself.
    pub fn check_shape(&self, context: &'static str) -> Result<()> {
        if self.data.len() != self.rows {
            return Err(MlpError::mismatch(context, self.rows, self.data.len()));
        }
        match self.data.iter().find(|row| row.len() != self.cols) {
            Some(row) => Err(MlpError::mismatch(context, self.cols, row.len())),
            None => Ok(()),
        }
    }

    /// N×1 matrix from a slice, e.g. a single binary target column.
    pub fn column(values: &[f64]) -> Matrix {
        Matrix {
            rows: values.len(),
            cols: 1,
            data: values.iter().map(|&v| vec![v]).collect()
        }
    }

    /// Outer product `a ⊗ b`, shape `a.len() × b.len()`.
    pub fn outer(a: &[f64], b: &[f64]) -> Matrix {
        Matrix {
            rows: a.len(),
            cols: b.len(),
            data: a.iter()
                .map(|&x| b.iter().map(|&y| x * y).collect())
                .collect()
        }
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i]
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect()
        }
    }

    /// Elementwise combination of two same-shape matrices.
    pub fn zip_map<F>(&self, other: &Matrix, functor: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64,
    {
        assert_eq!(self.shape(), other.shape(), "Matrices are of incorrect sizes");

        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().zip(other.data.iter())
                .map(|(a, b)| a.iter().zip(b.iter()).map(|(&x, &y)| functor(x, y)).collect())
                .collect()
        }
    }

    /// In-place `self -= factor * other`.
    pub fn sub_scaled(&mut self, other: &Matrix, factor: f64) {
        assert_eq!(self.shape(), other.shape(), "Matrices are of incorrect sizes");

        for (row, other_row) in self.data.iter_mut().zip(other.data.iter()) {
            for (x, &g) in row.iter_mut().zip(other_row.iter()) {
                *x -= factor * g;
            }
        }
    }

    pub fn scale(&mut self, factor: f64) {
        for row in &mut self.data {
            for x in row.iter_mut() {
                *x *= factor;
            }
        }
    }

    /// Mean over every element; `0.0` for an empty matrix.
    pub fn mean(&self) -> f64 {
        let count = self.rows * self.cols;
        if count == 0 {
            return 0.0;
        }
        self.data.iter().flatten().sum::<f64>() / count as f64
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().flatten().all(|x| x.is_finite())
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl AddAssign<&Matrix> for Matrix {
    fn add_assign(&mut self, rhs: &Matrix) {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        for (row, rhs_row) in self.data.iter_mut().zip(rhs.data.iter()) {
            for (x, &y) in row.iter_mut().zip(rhs_row.iter()) {
                *x += y;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_shape_catches_ragged_rows() {
        assert!(Matrix::zeros(3, 2).check_shape("m").is_ok());
        let ragged = Matrix { rows: 2, cols: 2, data: vec![vec![1.0, 2.0], vec![3.0]] };
        assert!(matches!(
            ragged.check_shape("m"),
            Err(MlpError::DimensionMismatch { expected: 2, actual: 1, .. })
        ));
        let short = Matrix { rows: 3, cols: 1, data: vec![vec![1.0]] };
        assert!(matches!(
            short.check_shape("m"),
            Err(MlpError::DimensionMismatch { expected: 3, actual: 1, .. })
        ));
    }
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_values_lie_in_half_open_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Matrix::random(20, 20, &mut rng);
        assert!(m.data.iter().flatten().all(|&x| (-1.0..1.0).contains(&x)));
    }

    #[test]
    fn from_data_rejects_ragged_rows() {
        let err = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, MlpError::DimensionMismatch { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn from_data_accepts_empty() {
        let m = Matrix::from_data(vec![]).unwrap();
        assert_eq!(m.shape(), (0, 0));
        assert_eq!(m.mean(), 0.0);
    }

    #[test]
    fn outer_product_shape_and_values() {
        let m = Matrix::outer(&[1.0, 2.0], &[3.0, 4.0, 5.0]);
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.data[1], vec![6.0, 8.0, 10.0]);
    }

    #[test]
    fn sub_scaled_and_add_assign() {
        let mut a = Matrix::from_data(vec![vec![1.0, 1.0]]).unwrap();
        let g = Matrix::from_data(vec![vec![2.0, -2.0]]).unwrap();
        a.sub_scaled(&g, 0.5);
        assert_eq!(a.data[0], vec![0.0, 2.0]);
        a += &g;
        assert_eq!(a.data[0], vec![2.0, 0.0]);
    }
}
