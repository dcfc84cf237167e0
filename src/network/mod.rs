pub mod config;
pub mod params;
pub mod perceptron;

pub use config::MlpConfig;
pub use params::{ForwardPass, Gradients, Parameters};
pub use perceptron::MultilayerPerceptron;
