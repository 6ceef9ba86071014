//! Linear classifier artifacts and their inference capabilities

use serde::{Deserialize, Serialize};

/// Squash a raw margin into `[0, 1]`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Calibrated logistic model with direct probability output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    /// Probability of the positive class for one feature row.
    pub fn predict_probability(&self, features: &[f64]) -> f64 {
        sigmoid(margin(&self.weights, self.intercept, features))
    }
}

/// Margin-only linear scorer, e.g. an uncalibrated SVM export. Offers no
/// probabilities; callers squash the decision score themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginScorer {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl MarginScorer {
    /// Signed distance from the decision boundary.
    pub fn decision_score(&self, features: &[f64]) -> f64 {
        margin(&self.weights, self.intercept, features)
    }
}

/// A persisted classifier offers exactly one of two inference
/// capabilities; consumers select per variant instead of probing for a
/// missing method at call time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    Probabilistic(LogisticRegression),
    Scoring(MarginScorer),
}

impl ClassifierArtifact {
    /// Input width the classifier was trained for.
    pub fn n_features(&self) -> usize {
        match self {
            ClassifierArtifact::Probabilistic(model) => model.weights.len(),
            ClassifierArtifact::Scoring(model) => model.weights.len(),
        }
    }
}

fn margin(weights: &[f64], intercept: f64, features: &[f64]) -> f64 {
    let dot: f64 = weights.iter().zip(features.iter()).map(|(w, x)| w * x).sum();
    dot + intercept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_midpoint_and_bounds() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(10.0) > 0.999);
        assert!(sigmoid(-10.0) < 0.001);
    }

    #[test]
    fn test_logistic_probability() {
        let model = LogisticRegression {
            weights: vec![1.0, -1.0],
            intercept: 0.0,
        };

        assert_eq!(model.predict_probability(&[0.0, 0.0]), 0.5);
        assert!(model.predict_probability(&[5.0, 0.0]) > 0.99);
        assert!(model.predict_probability(&[0.0, 5.0]) < 0.01);
    }

    #[test]
    fn test_margin_scorer_decision() {
        let model = MarginScorer {
            weights: vec![2.0],
            intercept: -1.0,
        };

        assert_eq!(model.decision_score(&[0.5]), 0.0);
        assert_eq!(model.decision_score(&[1.0]), 1.0);
    }

    #[test]
    fn test_artifact_width_and_roundtrip() {
        let artifact = ClassifierArtifact::Probabilistic(LogisticRegression {
            weights: vec![0.3, 0.7],
            intercept: 0.1,
        });
        assert_eq!(artifact.n_features(), 2);

        let json = serde_json::to_string(&artifact).unwrap();
        assert!(json.contains("\"kind\":\"probabilistic\""));

        let back: ClassifierArtifact = serde_json::from_str(&json).unwrap();
        assert_eq!(back.n_features(), 2);
    }
}
