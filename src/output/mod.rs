//! Rendering of predictions for console and JSON consumers

pub mod formatter;

pub use formatter::{PredictionFormatter, ScoreReport};
