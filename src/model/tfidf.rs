//! Fitted TF-IDF vectorization over normalized text

use crate::error::{Result, TechFitError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// Fitting knobs for the vectorizer. Defaults mirror the values the
/// training pipeline has always used.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TfidfParams {
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Maximum fraction of documents a term may appear in.
    pub max_df: f64,
    /// Upper bound on vocabulary size, most frequent terms win.
    pub max_features: usize,
}

impl Default for TfidfParams {
    fn default() -> Self {
        Self {
            min_df: 2,
            max_df: 0.95,
            max_features: 50_000,
        }
    }
}

/// Fitted TF-IDF state: vocabulary indices plus smoothed idf weights.
///
/// The persisted shape is the classic one, a term → column map and one
/// idf value per column, so artifacts stay readable and diffable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fit vocabulary and idf weights on a corpus of normalized documents.
    pub fn fit(corpus: &[String], params: TfidfParams) -> Self {
        let n_docs = corpus.len();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in corpus {
            let unique: HashSet<&str> = tokenize(doc).collect();
            for token in unique {
                *doc_freq.entry(token.to_string()).or_insert(0) += 1;
            }
        }

        let max_df_limit = params.max_df * n_docs as f64;
        let mut terms: Vec<(String, usize)> = doc_freq
            .into_iter()
            .filter(|(_, df)| *df >= params.min_df && (*df as f64) <= max_df_limit)
            .collect();

        // Keep the most document-frequent terms when over budget, then
        // index the surviving vocabulary alphabetically so column order
        // is deterministic across fits.
        if terms.len() > params.max_features {
            terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            terms.truncate(params.max_features);
        }
        terms.sort_by(|a, b| a.0.cmp(&b.0));

        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (index, (term, df)) in terms.into_iter().enumerate() {
            idf.push((((1 + n_docs) as f64) / ((1 + df) as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Self { vocabulary, idf }
    }

    /// Map normalized text into the fitted vector space as an
    /// l2-normalized tf·idf row.
    pub fn transform(&self, text: &str) -> Result<Vec<f64>> {
        if self.vocabulary.is_empty() {
            return Err(TechFitError::Vectorizer(
                "vocabulary is empty, vectorizer was not fitted".to_string(),
            ));
        }

        let mut row = vec![0.0; self.idf.len()];
        for token in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(token) {
                row[index] += self.idf[index];
            }
        }

        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in row.iter_mut() {
                *value /= norm;
            }
        }

        Ok(row)
    }

    /// Vocabulary size, which is also the width of transformed rows.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Tokens of two or more characters, the vectorizer's unit of counting.
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.unicode_words().filter(|w| w.len() >= 2)
}

/// Cosine similarity between two vectors of the same space.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(docs: &[&str]) -> Vec<String> {
        docs.iter().map(|d| d.to_string()).collect()
    }

    fn loose_params() -> TfidfParams {
        TfidfParams {
            min_df: 1,
            max_df: 1.0,
            max_features: 50_000,
        }
    }

    #[test]
    fn test_fit_and_transform() {
        let docs = corpus(&[
            "python sql aws",
            "python docker kubernetes",
            "sql relatorios excel",
        ]);
        let vectorizer = TfidfVectorizer::fit(&docs, loose_params());

        assert!(vectorizer.vocabulary_len() >= 6);

        let row = vectorizer.transform("python sql").unwrap();
        assert_eq!(row.len(), vectorizer.vocabulary_len());

        let norm: f64 = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_identical_texts_have_unit_cosine() {
        let docs = corpus(&["python sql aws", "docker kubernetes linux"]);
        let vectorizer = TfidfVectorizer::fit(&docs, loose_params());

        let a = vectorizer.transform("python aws").unwrap();
        let b = vectorizer.transform("python aws").unwrap();
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_texts_have_zero_cosine() {
        let docs = corpus(&["python sql", "docker kubernetes"]);
        let vectorizer = TfidfVectorizer::fit(&docs, loose_params());

        let a = vectorizer.transform("python sql").unwrap();
        let b = vectorizer.transform("docker kubernetes").unwrap();
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_unfitted_transform_fails() {
        let vectorizer = TfidfVectorizer::fit(&[], TfidfParams::default());
        assert!(vectorizer.transform("python").is_err());
    }

    #[test]
    fn test_min_df_filters_rare_terms() {
        let docs = corpus(&["python sql", "python docker", "python aws"]);
        let params = TfidfParams {
            min_df: 2,
            max_df: 1.0,
            max_features: 50_000,
        };
        let vectorizer = TfidfVectorizer::fit(&docs, params);

        // Only "python" appears in two or more documents.
        assert_eq!(vectorizer.vocabulary_len(), 1);
    }

    #[test]
    fn test_max_df_filters_ubiquitous_terms() {
        let docs = corpus(&[
            "python sql",
            "python docker",
            "python aws",
            "python linux",
        ]);
        let params = TfidfParams {
            min_df: 1,
            max_df: 0.95,
            max_features: 50_000,
        };
        let vectorizer = TfidfVectorizer::fit(&docs, params);

        let row = vectorizer.transform("python").unwrap();
        // "python" is in every document and must have been dropped.
        assert!(row.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_unknown_tokens_produce_zero_row() {
        let docs = corpus(&["python sql", "docker aws"]);
        let vectorizer = TfidfVectorizer::fit(&docs, loose_params());

        let row = vectorizer.transform("cobol fortran").unwrap();
        assert!(row.iter().all(|v| *v == 0.0));
        assert_eq!(cosine_similarity(&row, &row), 0.0);
    }
}
