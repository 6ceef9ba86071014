//! Prediction orchestration with tiered fallback
//!
//! The predictor sequences baseline scoring, feature construction,
//! feature-width reconciliation and model inference. Every failure
//! point degrades to the baseline answer instead of surfacing an error.

use crate::model::artifacts::ModelContext;
use crate::model::classifier::{sigmoid, ClassifierArtifact};
use crate::processing::features::build_features;
use crate::processing::scoring::{baseline_predict, classify, round4, Prediction, ScoreSource};
use crate::processing::skills::SkillCatalog;
use log::{debug, warn};

/// Scores job/CV pairs, preferring the trained model and falling back to
/// the skill-overlap baseline whenever the model path is unavailable or
/// fails. Holds only read-only state and is safe to share across
/// concurrent requests.
pub struct Predictor {
    catalog: SkillCatalog,
    model: Option<ModelContext>,
}

impl Predictor {
    pub fn new(catalog: SkillCatalog, model: Option<ModelContext>) -> Self {
        Self { catalog, model }
    }

    /// A predictor with no model loaded; every answer comes from the
    /// baseline.
    pub fn baseline_only(catalog: SkillCatalog) -> Self {
        Self::new(catalog, None)
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    /// Score a pair. Always returns a well-formed prediction; the
    /// `fonte` field says which path produced it and `erro` carries an
    /// advisory summary when the model path degraded.
    pub fn score(&self, job_text: &str, cv_text: &str, threshold: f64) -> Prediction {
        // Stage 1: the baseline always runs and is the response floor.
        let mut prediction = baseline_predict(&self.catalog, job_text, cv_text, threshold);

        // Stage 2: without a loaded model the baseline is the answer.
        let Some(model) = &self.model else {
            debug!("no model loaded, answering from baseline");
            return prediction;
        };

        // Stage 3: feature construction may fail (e.g. an unfitted
        // vectorizer); recover with an advisory note.
        let (features, cosine) =
            match build_features(&model.vectorizer, &self.catalog, job_text, cv_text) {
                Ok(built) => built,
                Err(e) => {
                    warn!("feature construction failed, falling back to baseline: {e}");
                    prediction.erro = Some(format!("falha_features: {e}"));
                    return prediction;
                }
            };

        // Stage 4: reconcile the row width with what the classifier was
        // trained for.
        let features = reconcile_width(features, model.classifier.n_features());

        // Stage 5: inference, per the classifier's capability.
        let probability = match &model.classifier {
            ClassifierArtifact::Probabilistic(m) => m.predict_probability(&features),
            ClassifierArtifact::Scoring(m) => sigmoid(m.decision_score(&features)),
        };

        if !probability.is_finite() {
            warn!("model produced a non-finite probability, falling back to baseline");
            prediction.erro = Some(format!("falha_modelo: probabilidade invalida ({probability})"));
            return prediction;
        }

        // Stage 6: merge the model fields next to the baseline ones.
        prediction.score_modelo = Some(round4(probability));
        prediction.similaridade_tfidf = Some(round4(cosine));
        prediction.classificacao_modelo = Some(classify(probability, threshold));
        prediction.fonte = ScoreSource::Modelo;
        prediction
    }
}

/// Align a feature row with the width the classifier expects: surplus
/// trailing columns are cut, missing ones zero-padded. Width drift
/// between training and serving is adapted silently, logged at warn.
fn reconcile_width(mut features: Vec<f64>, expected: usize) -> Vec<f64> {
    let expected = if expected == 0 { features.len() } else { expected };
    if features.len() != expected {
        warn!(
            "feature width {} does not match classifier width {}, reconciling",
            features.len(),
            expected
        );
        features.resize(expected, 0.0);
    }
    features
}
