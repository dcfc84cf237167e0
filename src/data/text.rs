//! Plain-text dataset helpers.
//!
//! Supported format:
//! - one sample per line, numeric cells separated by spaces, tabs or commas
//! - blank lines are skipped
//! - every non-blank line must have the same number of cells
//!
//! The helpers below turn a labelled table into the per-class-pair feature
//! and target matrices that `MultilayerPerceptron` consumes.

use crate::error::{MlpError, Result};
use crate::math::matrix::Matrix;

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

pub fn load_whitespace(path: &str) -> Result<Matrix> {
    let text = std::fs::read_to_string(path)?;
    parse_whitespace(&text)
}

pub fn parse_whitespace(text: &str) -> Result<Matrix> {
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        let line_num = line_idx + 1;
        let cells: Vec<&str> = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|c| !c.is_empty())
            .collect();
        if cells.is_empty() {
            continue;
        }

        let values = cells.iter()
            .map(|c| c.parse::<f64>().map_err(|_| MlpError::Parse {
                line: line_num,
                message: format!("'{c}' is not a valid number"),
            }))
            .collect::<Result<Vec<f64>>>()?;

        if let Some(first) = rows.first() {
            if values.len() != first.len() {
                return Err(MlpError::Parse {
                    line: line_num,
                    message: format!(
                        "expected {} columns like the first row, got {}",
                        first.len(),
                        values.len()
                    ),
                });
            }
        }
        rows.push(values);
    }

    Matrix::from_data(rows)
}

// ---------------------------------------------------------------------------
// Shaping
// ---------------------------------------------------------------------------

/// Groups rows by the value in `label_col`, one matrix per entry of
/// `classes` (in that order), with the label column removed.
pub fn split_by_class(data: &Matrix, label_col: usize, classes: &[f64]) -> Result<Vec<Matrix>> {
    if label_col >= data.cols {
        return Err(MlpError::mismatch("label column index", data.cols, label_col));
    }

    let mut groups: Vec<Vec<Vec<f64>>> = vec![Vec::new(); classes.len()];
    for row in &data.data {
        if let Some(class_idx) = classes.iter().position(|&c| c == row[label_col]) {
            let features = row.iter()
                .enumerate()
                .filter(|&(i, _)| i != label_col)
                .map(|(_, &v)| v)
                .collect();
            groups[class_idx].push(features);
        }
    }

    Ok(groups.into_iter()
        .map(|rows| Matrix { rows: rows.len(), cols: data.cols - 1, data: rows })
        .collect())
}

/// Appends a constant `1.0` column.
pub fn append_bias(m: &Matrix) -> Matrix {
    Matrix {
        rows: m.rows,
        cols: m.cols + 1,
        data: m.data.iter()
            .map(|row| {
                let mut r = row.clone();
                r.push(1.0);
                r
            })
            .collect(),
    }
}

/// Rows of `a` followed by rows of `b`.
pub fn stack_rows(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.cols != b.cols && a.rows > 0 && b.rows > 0 {
        return Err(MlpError::mismatch("stack_rows column count", a.cols, b.cols));
    }
    let cols = if a.rows > 0 { a.cols } else { b.cols };
    let mut data = a.data.clone();
    data.extend(b.data.iter().cloned());
    Ok(Matrix { rows: a.rows + b.rows, cols, data })
}

/// `(n_zeros + n_ones)×1` target column: `n_zeros` zeros, then `n_ones` ones.
pub fn binary_targets(n_zeros: usize, n_ones: usize) -> Matrix {
    let values: Vec<f64> = std::iter::repeat(0.0).take(n_zeros)
        .chain(std::iter::repeat(1.0).take(n_ones))
        .collect();
    Matrix::column(&values)
}

// ---------------------------------------------------------------------------
// Built-in toy datasets
// ---------------------------------------------------------------------------

/// XOR: 4 samples, 2 inputs, 1 output. Not linearly separable.
pub fn builtin_xor() -> (Matrix, Matrix) {
    let inputs = Matrix {
        rows: 4,
        cols: 2,
        data: vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
        ],
    };
    (inputs, Matrix::column(&[0.0, 1.0, 1.0, 0.0]))
}

/// The label equals the first input: 4 samples, linearly separable.
pub fn builtin_first_input() -> (Matrix, Matrix) {
    let (inputs, _) = builtin_xor();
    (inputs, Matrix::column(&[0.0, 0.0, 1.0, 1.0]))
}
