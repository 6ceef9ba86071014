//! Tech-fit library: job and candidate fit scoring

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod predictor;
pub mod processing;

pub use config::Config;
pub use error::{Result, TechFitError};
pub use predictor::Predictor;
pub use processing::scoring::Prediction;
