use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{MlpError, Result};

/// Construction parameters for a `MultilayerPerceptron`.
///
/// Fields:
/// - `hidden_units`      — number of sigmoid units in the single hidden layer
/// - `max_itr`           — iteration cap for both training loops
/// - `learning_rate`     — fixed gradient-descent step size (`eta_0`)
/// - `threshold`         — batch training stops once the decrease in mean
///                         error drops below this value
/// - `output_activation` — `sigmoid` or `softmax`
/// - `seed`              — fixes weight initialisation and sample draws
///
/// Can be saved to / loaded from JSON. Trained weights are never part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MlpConfig {
    pub hidden_units: usize,
    pub max_itr: usize,
    pub learning_rate: f64,
    pub threshold: f64,
    pub output_activation: ActivationFunction,
    pub seed: Option<u64>,
}

impl Default for MlpConfig {
    fn default() -> Self {
        MlpConfig {
            hidden_units: 5,
            max_itr: 100_000,
            learning_rate: 1.0,
            threshold: 1e-10,
            output_activation: ActivationFunction::Sigmoid,
            seed: None,
        }
    }
}

impl MlpConfig {
    pub fn with_hidden_units(mut self, hidden_units: usize) -> Self {
        self.hidden_units = hidden_units;
        self
    }

    pub fn with_max_itr(mut self, max_itr: usize) -> Self {
        self.max_itr = max_itr;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_output_activation(mut self, activation: ActivationFunction) -> Self {
        self.output_activation = activation;
        self
    }

    /// Selects the output activation by name; anything other than
    /// `"sigmoid"` or `"softmax"` is rejected.
    pub fn with_output_activation_name(self, name: &str) -> Result<Self> {
        Ok(self.with_output_activation(name.parse()?))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.hidden_units == 0 {
            return Err(MlpError::InvalidConfig("hidden_units must be > 0".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(MlpError::InvalidConfig(format!(
                "learning_rate must be finite and > 0, got {}",
                self.learning_rate
            )));
        }
        if !(self.threshold.is_finite() && self.threshold >= 0.0) {
            return Err(MlpError::InvalidConfig(format!(
                "threshold must be finite and >= 0, got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a config written by `save_json` (or by hand).
    /// An unknown `output_activation` name is reported as `InvalidConfig`.
    pub fn load_json(path: &str) -> Result<MlpConfig> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<MlpConfig> {
        let config: MlpConfig = serde_json::from_str(json).map_err(|e| {
            if e.is_data() {
                MlpError::InvalidConfig(e.to_string())
            } else {
                MlpError::Json(e)
            }
        })?;
        config.validate()?;
        Ok(config)
    }
}
