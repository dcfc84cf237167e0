use thiserror::Error;

/// Everything that can go wrong when configuring, training or querying a
/// `MultilayerPerceptron`, or when loading its inputs from disk.
#[derive(Debug, Error)]
pub enum MlpError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("model not trained: call fit() or fit_online() first")]
    NotTrained,

    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("empty data: {0}")]
    EmptyData(String),

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MlpError>;

impl MlpError {
    pub(crate) fn mismatch(context: &'static str, expected: usize, actual: usize) -> Self {
        MlpError::DimensionMismatch { context, expected, actual }
    }
}
