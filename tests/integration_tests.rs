//! Integration tests for the tech-fit scoring pipeline

use std::path::Path;
use tech_fit::input::manager::InputManager;
use tech_fit::model::artifacts::{ArtifactStore, ModelContext};
use tech_fit::model::classifier::{ClassifierArtifact, LogisticRegression};
use tech_fit::model::tfidf::{TfidfParams, TfidfVectorizer};
use tech_fit::predictor::Predictor;
use tech_fit::processing::scoring::{ScoreSource, Verdict, DEFAULT_THRESHOLD};
use tech_fit::processing::skills::SkillCatalog;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/vaga.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("Python"));
    assert!(text.contains("AWS"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/cv.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("João Silva"));
    assert!(text.contains("Python"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains('#'));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/vaga.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/cv.xyz")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager
        .extract_text(Path::new("tests/fixtures/nonexistent.txt"))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_baseline_scoring_from_files() {
    let mut manager = InputManager::new();
    let job_text = manager
        .extract_text(Path::new("tests/fixtures/vaga.txt"))
        .await
        .unwrap();
    let cv_text = manager
        .extract_text(Path::new("tests/fixtures/cv.md"))
        .await
        .unwrap();

    let predictor = Predictor::baseline_only(SkillCatalog::new());
    let prediction = predictor.score(&job_text, &cv_text, DEFAULT_THRESHOLD);

    assert_eq!(prediction.fonte, ScoreSource::Baseline);
    assert_eq!(prediction.skills_vaga, vec!["aws", "python", "sql"]);
    assert_eq!(prediction.skills_match, vec!["aws", "python"]);
    assert!((prediction.score_baseline - 0.6667).abs() < 1e-9);
    assert_eq!(prediction.classificacao_baseline, Verdict::Atende);
    assert!(prediction.score_modelo.is_none());
}

#[tokio::test]
async fn test_model_scoring_with_saved_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path(), "model.json", "tfidf.json");

    let corpus = vec![
        "procuramos profissional com python sql e aws".to_string(),
        "desenvolvedor com 3 anos de experiencia em python e aws".to_string(),
        "vaga de analista com excel e power bi".to_string(),
        "chef de cozinha com experiencia em confeitaria".to_string(),
    ];
    let context = ModelContext {
        vectorizer: TfidfVectorizer::fit(
            &corpus,
            TfidfParams {
                min_df: 1,
                max_df: 1.0,
                max_features: 50_000,
            },
        ),
        classifier: ClassifierArtifact::Probabilistic(LogisticRegression {
            weights: vec![1.5, 1.5],
            intercept: -1.0,
        }),
    };
    store.save(&context).await.unwrap();

    // A fresh load must behave exactly like the in-memory context.
    let loaded = store.try_load().await.expect("artifacts should load");
    let predictor = Predictor::new(SkillCatalog::new(), Some(loaded));

    let mut manager = InputManager::new();
    let job_text = manager
        .extract_text(Path::new("tests/fixtures/vaga.txt"))
        .await
        .unwrap();
    let cv_text = manager
        .extract_text(Path::new("tests/fixtures/cv.md"))
        .await
        .unwrap();

    let prediction = predictor.score(&job_text, &cv_text, DEFAULT_THRESHOLD);

    assert_eq!(prediction.fonte, ScoreSource::Modelo);
    assert!(prediction.score_modelo.is_some());
    assert!(prediction.similaridade_tfidf.is_some());
    assert!(prediction.erro.is_none());
    // Baseline fields survive the merge untouched.
    assert!((prediction.score_baseline - 0.6667).abs() < 1e-9);
    assert_eq!(prediction.skills_match, vec!["aws", "python"]);
}

#[test]
fn test_prediction_json_contract() {
    let predictor = Predictor::baseline_only(SkillCatalog::new());
    let prediction = predictor.score(
        "Procuramos Python, SQL e AWS",
        "3 anos com Python e AWS; Docker básico",
        DEFAULT_THRESHOLD,
    );

    let value = serde_json::to_value(&prediction).unwrap();
    let object = value.as_object().unwrap();

    for key in [
        "score_baseline",
        "classificacao_baseline",
        "skills_vaga",
        "skills_cv",
        "skills_match",
        "threshold",
        "fonte",
    ] {
        assert!(object.contains_key(key), "missing field: {key}");
    }
    assert_eq!(object["fonte"], "baseline");
    assert_eq!(object["classificacao_baseline"], "Atende");
    // Absent model fields are omitted entirely.
    assert!(!object.contains_key("score_modelo"));
    assert!(!object.contains_key("erro"));
}
