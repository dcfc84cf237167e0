pub mod error;
pub mod math;
pub mod activation;
pub mod normalize;
pub mod loss;
pub mod network;
pub mod train;
pub mod data;

// Convenience re-exports
pub use error::{MlpError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use normalize::normalizer::Normalizer;
pub use network::config::MlpConfig;
pub use network::params::{ForwardPass, Gradients, Parameters};
pub use network::perceptron::MultilayerPerceptron;
pub use train::report::{StopReason, TrainReport};
