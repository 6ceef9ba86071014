//! Persistence of the fitted vectorizer/classifier pair

use crate::config::Config;
use crate::error::{Result, TechFitError};
use crate::model::classifier::ClassifierArtifact;
use crate::model::tfidf::TfidfVectorizer;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Fully-loaded model state handed to the predictor. Constructed once,
/// never mutated afterwards; concurrent scorers may share it freely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelContext {
    pub vectorizer: TfidfVectorizer,
    pub classifier: ClassifierArtifact,
}

/// Locates and (de)serializes the two artifacts in a directory. The
/// classifier and vectorizer live in separate JSON files so either can
/// be inspected or swapped on its own.
pub struct ArtifactStore {
    model_path: PathBuf,
    vectorizer_path: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: &Path, model_file: &str, vectorizer_file: &str) -> Self {
        Self {
            model_path: dir.join(model_file),
            vectorizer_path: dir.join(vectorizer_file),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.artifacts.artifacts_dir,
            &config.artifacts.model_file,
            &config.artifacts.vectorizer_file,
        )
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn vectorizer_path(&self) -> &Path {
        &self.vectorizer_path
    }

    /// Both artifact files are present on disk.
    pub fn exists(&self) -> bool {
        self.model_path.exists() && self.vectorizer_path.exists()
    }

    /// Strict load of both artifacts.
    pub async fn load(&self) -> Result<ModelContext> {
        let classifier_json = fs::read_to_string(&self.model_path).await.map_err(|e| {
            TechFitError::ArtifactLoading(format!(
                "cannot read {}: {}",
                self.model_path.display(),
                e
            ))
        })?;
        let vectorizer_json = fs::read_to_string(&self.vectorizer_path).await.map_err(|e| {
            TechFitError::ArtifactLoading(format!(
                "cannot read {}: {}",
                self.vectorizer_path.display(),
                e
            ))
        })?;

        let classifier: ClassifierArtifact = serde_json::from_str(&classifier_json)?;
        let vectorizer: TfidfVectorizer = serde_json::from_str(&vectorizer_json)?;

        Ok(ModelContext {
            vectorizer,
            classifier,
        })
    }

    /// Startup policy: try to load the pair, degrade to baseline-only on
    /// any failure. Missing artifacts are an expected state, not an
    /// error.
    pub async fn try_load(&self) -> Option<ModelContext> {
        if !self.exists() {
            info!("artifacts not found, running with baseline only");
            return None;
        }

        match self.load().await {
            Ok(context) => {
                info!(
                    "model and vectorizer loaded (vocabulary: {}, features: {})",
                    context.vectorizer.vocabulary_len(),
                    context.classifier.n_features()
                );
                Some(context)
            }
            Err(e) => {
                warn!("failed to load artifacts, running with baseline only: {e}");
                None
            }
        }
    }

    /// Persist both artifacts, creating the directory if needed.
    pub async fn save(&self, context: &ModelContext) -> Result<()> {
        if let Some(parent) = self.model_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let classifier_json = serde_json::to_string_pretty(&context.classifier)?;
        let vectorizer_json = serde_json::to_string_pretty(&context.vectorizer)?;

        fs::write(&self.model_path, classifier_json).await?;
        fs::write(&self.vectorizer_path, vectorizer_json).await?;

        info!(
            "artifacts saved to {} and {}",
            self.model_path.display(),
            self.vectorizer_path.display()
        );
        Ok(())
    }

    /// Delete any artifact files present.
    pub async fn remove(&self) -> Result<()> {
        for path in [&self.model_path, &self.vectorizer_path] {
            if path.exists() {
                fs::remove_file(path).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::classifier::LogisticRegression;
    use crate::model::tfidf::TfidfParams;

    fn sample_context() -> ModelContext {
        let corpus = vec![
            "python sql aws".to_string(),
            "python docker linux".to_string(),
        ];
        ModelContext {
            vectorizer: TfidfVectorizer::fit(
                &corpus,
                TfidfParams {
                    min_df: 1,
                    max_df: 1.0,
                    max_features: 50_000,
                },
            ),
            classifier: ClassifierArtifact::Probabilistic(LogisticRegression {
                weights: vec![1.2, 0.4],
                intercept: -0.3,
            }),
        }
    }

    #[tokio::test]
    async fn test_save_and_load_pair() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path(), "model.json", "tfidf.json");

        assert!(!store.exists());
        store.save(&sample_context()).await.unwrap();
        assert!(store.exists());

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.classifier.n_features(), 2);
        assert!(loaded.vectorizer.vocabulary_len() > 0);
    }

    #[tokio::test]
    async fn test_try_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path(), "model.json", "tfidf.json");

        assert!(store.try_load().await.is_none());
    }

    #[tokio::test]
    async fn test_try_load_corrupt_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path(), "model.json", "tfidf.json");

        tokio::fs::write(store.model_path(), "not json").await.unwrap();
        tokio::fs::write(store.vectorizer_path(), "{}").await.unwrap();

        assert!(store.try_load().await.is_none());
    }
}
