//! Skill-overlap baseline scoring and the unified prediction shape

use crate::processing::skills::SkillCatalog;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Decision threshold applied when the caller does not supply one.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Two-valued fit classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Atende")]
    Atende,
    #[serde(rename = "Não atende")]
    NaoAtende,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Atende => write!(f, "Atende"),
            Verdict::NaoAtende => write!(f, "Não atende"),
        }
    }
}

/// Which scoring path produced the final answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    Baseline,
    Modelo,
}

impl fmt::Display for ScoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreSource::Baseline => write!(f, "baseline"),
            ScoreSource::Modelo => write!(f, "modelo"),
        }
    }
}

/// Unified scoring response. The baseline fields are always present; the
/// model fields are merged in only when model inference succeeds and
/// never overwrite the baseline ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub score_baseline: f64,
    pub classificacao_baseline: Verdict,
    pub skills_vaga: Vec<String>,
    pub skills_cv: Vec<String>,
    pub skills_match: Vec<String>,
    pub threshold: f64,
    pub fonte: ScoreSource,

    /// Advisory summary of a degraded model path, never a hard failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub erro: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_modelo: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similaridade_tfidf: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classificacao_modelo: Option<Verdict>,
}

/// Fraction of required skills the candidate possesses. An empty
/// required set yields 0.0, not an error.
pub fn ratio(required: &HashSet<String>, possessed: &HashSet<String>) -> f64 {
    if required.is_empty() {
        return 0.0;
    }
    required.intersection(possessed).count() as f64 / required.len() as f64
}

/// Inclusive comparison: a score exactly at the threshold still passes.
pub fn classify(score: f64, threshold: f64) -> Verdict {
    if score >= threshold {
        Verdict::Atende
    } else {
        Verdict::NaoAtende
    }
}

pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Skill-overlap scoring of a job/CV pair. This is the irreducible
/// fallback floor of the whole pipeline: it cannot fail.
pub fn baseline_predict(
    catalog: &SkillCatalog,
    job_text: &str,
    cv_text: &str,
    threshold: f64,
) -> Prediction {
    let required = catalog.extract_skills(job_text);
    let possessed = catalog.extract_skills(cv_text);
    let score = ratio(&required, &possessed);

    let mut skills_match: Vec<String> = required.intersection(&possessed).cloned().collect();
    let mut skills_vaga: Vec<String> = required.into_iter().collect();
    let mut skills_cv: Vec<String> = possessed.into_iter().collect();
    skills_vaga.sort();
    skills_cv.sort();
    skills_match.sort();

    Prediction {
        score_baseline: round4(score),
        classificacao_baseline: classify(score, threshold),
        skills_vaga,
        skills_cv,
        skills_match,
        threshold,
        fonte: ScoreSource::Baseline,
        erro: None,
        score_modelo: None,
        similaridade_tfidf: None,
        classificacao_modelo: None,
    }
}
