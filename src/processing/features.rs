//! Feature construction for the trained model path

use crate::error::Result;
use crate::model::tfidf::{cosine_similarity, TfidfVectorizer};
use crate::processing::scoring::ratio;
use crate::processing::skills::SkillCatalog;
use crate::processing::text_normalizer::normalize;

/// Width of the feature row produced here. Training may narrow the row
/// to the cosine column alone; serving always emits both.
pub const FEATURE_WIDTH: usize = 2;

/// Build the `[cosine, skill_ratio]` row for a job/CV pair, returning
/// the bare cosine alongside so callers can report it without
/// re-deriving. Transform failures propagate untouched.
pub fn build_features(
    vectorizer: &TfidfVectorizer,
    catalog: &SkillCatalog,
    job_text: &str,
    cv_text: &str,
) -> Result<(Vec<f64>, f64)> {
    let job_norm = normalize(job_text);
    let cv_norm = normalize(cv_text);

    let job_vec = vectorizer.transform(&job_norm)?;
    let cv_vec = vectorizer.transform(&cv_norm)?;
    let cosine = cosine_similarity(&job_vec, &cv_vec);

    let required = catalog.extract_skills(&job_norm);
    let possessed = catalog.extract_skills(&cv_norm);
    let skill_ratio = ratio(&required, &possessed);

    Ok((vec![cosine, skill_ratio], cosine))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tfidf::TfidfParams;

    fn fitted_vectorizer() -> TfidfVectorizer {
        let corpus = vec![
            "procuramos python sql e aws".to_string(),
            "3 anos com python e aws docker basico".to_string(),
            "vaga de analista de dados".to_string(),
        ];
        TfidfVectorizer::fit(
            &corpus,
            TfidfParams {
                min_df: 1,
                max_df: 1.0,
                max_features: 50_000,
            },
        )
    }

    #[test]
    fn test_feature_row_shape() {
        let vectorizer = fitted_vectorizer();
        let catalog = SkillCatalog::new();

        let (row, cosine) = build_features(
            &vectorizer,
            &catalog,
            "Procuramos Python, SQL e AWS",
            "3 anos com Python e AWS; Docker básico",
        )
        .unwrap();

        assert_eq!(row.len(), FEATURE_WIDTH);
        assert_eq!(row[0], cosine);
        assert!((row[1] - 2.0 / 3.0).abs() < 1e-9);
        assert!(cosine > 0.0 && cosine <= 1.0);
    }

    #[test]
    fn test_empty_texts_yield_zero_features() {
        let vectorizer = fitted_vectorizer();
        let catalog = SkillCatalog::new();

        let (row, cosine) = build_features(&vectorizer, &catalog, "", "").unwrap();
        assert_eq!(row, vec![0.0, 0.0]);
        assert_eq!(cosine, 0.0);
    }

    #[test]
    fn test_unfitted_vectorizer_error_propagates() {
        let vectorizer = TfidfVectorizer::fit(&[], TfidfParams::default());
        let catalog = SkillCatalog::new();

        assert!(build_features(&vectorizer, &catalog, "python", "python").is_err());
    }
}
