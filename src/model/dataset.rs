//! Offline dataset construction from the three raw JSON collections
//!
//! Joins jobs, applicants and prospect links into labeled training
//! pairs. Labels come exclusively from the prospect status string;
//! links without a readable status are dropped rather than weak-labeled
//! from skills, so the trainer's skill-ratio feature never rests on a
//! label derived from itself.

use crate::error::{Result, TechFitError};
use crate::model::trainer::{LabelSource, TrainingPair};
use crate::processing::text_normalizer::normalize;
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub jobs: usize,
    pub candidates: usize,
    pub links: usize,
    pub labeled: usize,
    pub positives: usize,
    pub negatives: usize,
    pub skipped_unlabeled: usize,
    pub skipped_missing_text: usize,
}

/// Build labeled pairs out of the three raw collections.
pub async fn build_dataset(
    vagas_path: &Path,
    applicants_path: &Path,
    prospects_path: &Path,
) -> Result<(Vec<TrainingPair>, DatasetSummary)> {
    let vagas = read_top_level_map(vagas_path).await?;
    let applicants = read_top_level_map(applicants_path).await?;
    let prospects = read_top_level_map(prospects_path).await?;

    let job_texts: HashMap<String, String> = vagas
        .iter()
        .map(|(job_id, record)| (job_id.clone(), record_text(record)))
        .collect();

    // Applicants are keyed by their professional code when present,
    // falling back to the top-level key.
    let mut candidate_texts: HashMap<String, String> = HashMap::new();
    for (top_key, record) in &applicants {
        let candidate_id = record
            .pointer("/infos_basicas/codigo_profissional")
            .and_then(Value::as_str)
            .map(|code| code.to_string())
            .unwrap_or_else(|| top_key.clone());
        candidate_texts.insert(candidate_id, record_text(record));
    }

    info!(
        "mapped {} jobs and {} candidates",
        job_texts.len(),
        candidate_texts.len()
    );

    let mut pairs = Vec::new();
    let mut links = 0usize;
    let mut skipped_unlabeled = 0usize;
    let mut skipped_missing_text = 0usize;
    let mut positives = 0usize;
    let mut negatives = 0usize;

    for (job_id, record) in &prospects {
        let Some(entries) = record.get("prospects").and_then(Value::as_array) else {
            continue;
        };
        for prospect in entries {
            let Some(candidate_id) = prospect.get("codigo").and_then(Value::as_str) else {
                continue;
            };
            links += 1;

            let job_text = job_texts.get(job_id).map(String::as_str).unwrap_or("");
            let cv_text = candidate_texts
                .get(candidate_id)
                .map(String::as_str)
                .unwrap_or("");
            if job_text.is_empty() || cv_text.is_empty() {
                skipped_missing_text += 1;
                continue;
            }

            let Some(label) = label_from_status(prospect) else {
                skipped_unlabeled += 1;
                continue;
            };

            if label == 1 {
                positives += 1;
            } else {
                negatives += 1;
            }
            pairs.push(TrainingPair {
                vaga_texto: job_text.to_string(),
                cv_texto: cv_text.to_string(),
                label,
                label_source: LabelSource::Status,
            });
        }
    }

    debug!(
        "links: {links}, labeled: {} (1s={positives} | 0s={negatives})",
        pairs.len()
    );

    let summary = DatasetSummary {
        jobs: job_texts.len(),
        candidates: candidate_texts.len(),
        links,
        labeled: pairs.len(),
        positives,
        negatives,
        skipped_unlabeled,
        skipped_missing_text,
    };
    Ok((pairs, summary))
}

async fn read_top_level_map(path: &Path) -> Result<HashMap<String, Value>> {
    let raw = fs::read_to_string(path).await.map_err(|e| {
        TechFitError::Dataset(format!("cannot read {}: {}", path.display(), e))
    })?;
    let value: Value = serde_json::from_str(&raw)?;

    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        _ => Err(TechFitError::Dataset(format!(
            "{} must be a JSON object at the top level",
            path.display()
        ))),
    }
}

/// Concatenate every textual field of a record, depth first, into one
/// normalized blob.
fn record_text(record: &Value) -> String {
    let mut parts = Vec::new();
    collect_text(record, &mut parts);
    normalize(&parts.join(" "))
}

fn collect_text(value: &Value, parts: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        }
        Value::Number(n) => parts.push(n.to_string()),
        Value::Array(items) => {
            for item in items {
                collect_text(item, parts);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                collect_text(item, parts);
            }
        }
        _ => {}
    }
}

/// Read a prospect's status into a label. Rejection markers are checked
/// first so that "não aprovado" never counts as an approval.
fn label_from_status(prospect: &Value) -> Option<u8> {
    let status = ["situacao_candidato", "status", "situacao"]
        .iter()
        .find_map(|key| prospect.get(*key).and_then(Value::as_str))
        .unwrap_or("");
    let status = normalize(status);
    if status.is_empty() {
        return None;
    }

    const NEGATIVE: &[&str] = &["reprov", "descart", "negado", "nao aprovado"];
    const POSITIVE: &[&str] = &["contrat", "aprov", "hired", "finalista", "selecion"];

    if NEGATIVE.iter().any(|marker| status.contains(marker)) {
        return Some(0);
    }
    if POSITIVE.iter().any(|marker| status.contains(marker)) {
        return Some(1);
    }
    None
}
