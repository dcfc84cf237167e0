use serde::{Serialize, Deserialize};

/// Why a training run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// All `max_itr` iterations ran.
    IterationCap,
    /// The mean error decreased by less than the configured threshold.
    Converged,
    /// The mean error went up, which also trips the threshold check.
    ErrorIncreased,
}

/// Summary returned by `fit` and `fit_online`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainReport {
    /// Number of weight updates performed.
    pub iterations: usize,
    /// Mean half squared error over the training set (normalized inputs).
    ///
    /// For batch training this is the error of the last iteration, measured
    /// before that iteration's update; for online training it is measured
    /// after the final update.
    pub final_error: f64,
    pub stop_reason: StopReason,
    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,
}

impl TrainReport {
    pub fn converged(&self) -> bool {
        self.stop_reason == StopReason::Converged
    }
}
