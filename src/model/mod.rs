//! Model artifacts: TF-IDF vectorizer, linear classifier, persistence,
//! and the offline train/dataset tooling

pub mod artifacts;
pub mod classifier;
pub mod dataset;
pub mod tfidf;
pub mod trainer;
