//! Offline fitting of the TF-IDF vectorizer and logistic classifier

use crate::config::TrainingConfig;
use crate::error::{Result, TechFitError};
use crate::model::artifacts::ModelContext;
use crate::model::classifier::{sigmoid, ClassifierArtifact, LogisticRegression};
use crate::model::tfidf::{cosine_similarity, TfidfParams, TfidfVectorizer};
use crate::processing::scoring::ratio;
use crate::processing::skills::SkillCatalog;
use crate::processing::text_normalizer::normalize;
use log::info;
use serde::{Deserialize, Serialize};

/// One labeled job/CV pair from the offline dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingPair {
    pub vaga_texto: String,
    pub cv_texto: String,
    pub label: u8,
    #[serde(default)]
    pub label_source: LabelSource,
}

/// Where a pair's label came from. Weak labels are produced upstream by
/// dataset tooling we do not control; their presence only matters for
/// the leakage guard below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSource {
    #[default]
    Status,
    Weak,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingSummary {
    pub pairs: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub f1: f64,
    pub feature_width: usize,
    pub vocabulary: usize,
}

/// Fit the vectorizer and classifier on labeled pairs.
///
/// Leakage guard: when any pair is weak-labeled (its label was derived
/// from skill overlap), the skill-ratio column is excluded and the
/// model is trained on the cosine column alone.
pub fn train(
    pairs: &[TrainingPair],
    config: &TrainingConfig,
    catalog: &SkillCatalog,
) -> Result<(ModelContext, TrainingSummary)> {
    if pairs.len() < 8 {
        return Err(TechFitError::Training(format!(
            "need at least 8 labeled pairs, got {}",
            pairs.len()
        )));
    }

    let has_weak = pairs.iter().any(|p| p.label_source == LabelSource::Weak);
    if has_weak {
        info!("leakage guard: weak labels present, training on the tf-idf cosine only");
    } else {
        info!("training on tf-idf cosine + skill-ratio");
    }

    let normalized: Vec<(String, String)> = pairs
        .iter()
        .map(|p| (normalize(&p.vaga_texto), normalize(&p.cv_texto)))
        .collect();

    let mut corpus = Vec::with_capacity(normalized.len() * 2);
    corpus.extend(normalized.iter().map(|(job, _)| job.clone()));
    corpus.extend(normalized.iter().map(|(_, cv)| cv.clone()));

    let vectorizer = TfidfVectorizer::fit(
        &corpus,
        TfidfParams {
            min_df: config.min_df,
            max_df: config.max_df,
            max_features: config.max_features,
        },
    );

    let mut rows = Vec::with_capacity(normalized.len());
    let mut labels = Vec::with_capacity(normalized.len());
    for (pair, (job_norm, cv_norm)) in pairs.iter().zip(normalized.iter()) {
        let job_vec = vectorizer
            .transform(job_norm)
            .map_err(|e| TechFitError::Training(format!("feature construction failed: {e}")))?;
        let cv_vec = vectorizer
            .transform(cv_norm)
            .map_err(|e| TechFitError::Training(format!("feature construction failed: {e}")))?;
        let cosine = cosine_similarity(&job_vec, &cv_vec);

        let row = if has_weak {
            vec![cosine]
        } else {
            let required = catalog.extract_skills(job_norm);
            let possessed = catalog.extract_skills(cv_norm);
            vec![cosine, ratio(&required, &possessed)]
        };
        rows.push(row);
        labels.push(pair.label.min(1) as f64);
    }

    // Deterministic 75/25 split, every fourth pair held out.
    let mut train_rows = Vec::new();
    let mut train_labels = Vec::new();
    let mut test_rows = Vec::new();
    let mut test_labels = Vec::new();
    for (index, (row, label)) in rows.iter().zip(labels.iter()).enumerate() {
        if index % 4 == 3 {
            test_rows.push(row.clone());
            test_labels.push(*label);
        } else {
            train_rows.push(row.clone());
            train_labels.push(*label);
        }
    }

    let model = fit_logistic(&train_rows, &train_labels, config)?;
    let f1 = f1_score(&model, &test_rows, &test_labels);
    info!("held-out F1: {:.4}", f1);

    let summary = TrainingSummary {
        pairs: pairs.len(),
        train_size: train_rows.len(),
        test_size: test_rows.len(),
        f1,
        feature_width: model.weights.len(),
        vocabulary: vectorizer.vocabulary_len(),
    };

    let context = ModelContext {
        vectorizer,
        classifier: ClassifierArtifact::Probabilistic(model),
    };
    Ok((context, summary))
}

/// Batch gradient descent with balanced class weights. Deterministic:
/// zero initialization, fixed epoch count, no shuffling.
fn fit_logistic(
    rows: &[Vec<f64>],
    labels: &[f64],
    config: &TrainingConfig,
) -> Result<LogisticRegression> {
    let n = rows.len();
    let positives = labels.iter().filter(|l| **l > 0.5).count();
    let negatives = n - positives;
    if positives == 0 || negatives == 0 {
        return Err(TechFitError::Training(
            "training data must contain both classes".to_string(),
        ));
    }

    let width = rows[0].len();
    let weight_pos = n as f64 / (2.0 * positives as f64);
    let weight_neg = n as f64 / (2.0 * negatives as f64);

    let mut weights = vec![0.0; width];
    let mut intercept = 0.0;

    for _ in 0..config.epochs {
        let mut grad_w = vec![0.0; width];
        let mut grad_b = 0.0;

        for (row, label) in rows.iter().zip(labels.iter()) {
            let margin: f64 =
                weights.iter().zip(row.iter()).map(|(w, x)| w * x).sum::<f64>() + intercept;
            let class_weight = if *label > 0.5 { weight_pos } else { weight_neg };
            let residual = class_weight * (sigmoid(margin) - label);

            for (g, x) in grad_w.iter_mut().zip(row.iter()) {
                *g += residual * x;
            }
            grad_b += residual;
        }

        for (w, g) in weights.iter_mut().zip(grad_w.iter()) {
            *w -= config.learning_rate * g / n as f64;
        }
        intercept -= config.learning_rate * grad_b / n as f64;
    }

    Ok(LogisticRegression { weights, intercept })
}

fn f1_score(model: &LogisticRegression, rows: &[Vec<f64>], labels: &[f64]) -> f64 {
    let mut true_pos = 0usize;
    let mut false_pos = 0usize;
    let mut false_neg = 0usize;

    for (row, label) in rows.iter().zip(labels.iter()) {
        let predicted = model.predict_probability(row) >= 0.5;
        let actual = *label > 0.5;
        match (predicted, actual) {
            (true, true) => true_pos += 1,
            (true, false) => false_pos += 1,
            (false, true) => false_neg += 1,
            (false, false) => {}
        }
    }

    let denom = 2 * true_pos + false_pos + false_neg;
    if denom == 0 {
        0.0
    } else {
        2.0 * true_pos as f64 / denom as f64
    }
}
