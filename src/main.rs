//! Tech-fit: job and candidate fit scoring tool

mod cli;
mod config;
mod error;
mod input;
mod model;
mod output;
mod predictor;
mod processing;

use clap::Parser;
use cli::{ArtifactAction, Cli, Commands, ConfigAction};
use config::Config;
use error::{Result, TechFitError};
use input::manager::InputManager;
use log::{error, info};
use model::artifacts::{ArtifactStore, ModelContext};
use model::classifier::ClassifierArtifact;
use model::dataset::build_dataset;
use model::trainer::{train, TrainingPair};
use output::formatter::{PredictionFormatter, ScoreReport};
use predictor::Predictor;
use processing::skills::SkillCatalog;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Score {
            job,
            cv,
            threshold,
            output,
            save,
            baseline_only,
            detailed,
        } => {
            score_command(
                &config,
                job,
                cv,
                threshold,
                &output,
                save,
                baseline_only,
                detailed,
            )
            .await
        }

        Commands::Train { pairs, out_dir } => train_command(&config, &pairs, out_dir).await,

        Commands::Dataset {
            vagas,
            applicants,
            prospects,
            out,
        } => {
            let (pairs, summary) = build_dataset(&vagas, &applicants, &prospects).await?;
            tokio::fs::write(&out, serde_json::to_string_pretty(&pairs)?).await?;

            println!("📦 Dataset salvo em {}", out.display());
            println!(
                "  vagas: {} | candidatos: {} | links: {}",
                summary.jobs, summary.candidates, summary.links
            );
            println!(
                "  pares rotulados: {} (1s={} | 0s={})",
                summary.labeled, summary.positives, summary.negatives
            );
            println!(
                "  descartados: {} sem rótulo, {} sem texto",
                summary.skipped_unlabeled, summary.skipped_missing_text
            );
            Ok(())
        }

        Commands::Artifacts { action } => artifacts_command(&config, action).await,

        Commands::Config { action } => config_command(&config, action),
    }
}

#[allow(clippy::too_many_arguments)]
async fn score_command(
    config: &Config,
    job: PathBuf,
    cv: PathBuf,
    threshold: Option<f64>,
    output: &str,
    save: Option<PathBuf>,
    baseline_only: bool,
    detailed: bool,
) -> Result<()> {
    cli::validate_file_extension(&job, &["txt", "md"])
        .map_err(|e| TechFitError::InvalidInput(format!("Job description file: {}", e)))?;
    cli::validate_file_extension(&cv, &["txt", "md"])
        .map_err(|e| TechFitError::InvalidInput(format!("CV file: {}", e)))?;

    let output_format = cli::parse_output_format(output).map_err(TechFitError::InvalidInput)?;

    // The core tolerates empty text; an empty file here is a user
    // mistake and gets rejected up front.
    let mut input_manager = InputManager::new();
    let job_text = input_manager.extract_text(&job).await?;
    let cv_text = input_manager.extract_text(&cv).await?;

    if job_text.trim().is_empty() {
        return Err(TechFitError::InvalidInput(format!(
            "Job description is empty: {}",
            job.display()
        )));
    }
    if cv_text.trim().is_empty() {
        return Err(TechFitError::InvalidInput(format!(
            "CV is empty: {}",
            cv.display()
        )));
    }

    let threshold = threshold
        .unwrap_or(config.scoring.default_threshold)
        .clamp(0.0, 1.0);

    let catalog = SkillCatalog::new();
    let model = if baseline_only {
        info!("model disabled by --baseline-only");
        None
    } else {
        ArtifactStore::from_config(config).try_load().await
    };

    let predictor = Predictor::new(catalog, model);
    let prediction = predictor.score(&job_text, &cv_text, threshold);

    let formatter = PredictionFormatter::new(config.output.color_output);
    println!("{}", formatter.render(&prediction, output_format, detailed)?);

    if let Some(save_path) = save {
        let report = ScoreReport {
            generated_at: chrono::Utc::now(),
            job_path: job.to_string_lossy().to_string(),
            cv_path: cv.to_string_lossy().to_string(),
            prediction: &prediction,
        };
        tokio::fs::write(&save_path, serde_json::to_string_pretty(&report)?).await?;
        println!("💾 Relatório salvo em {}", save_path.display());
    }

    Ok(())
}

async fn train_command(
    config: &Config,
    pairs_path: &PathBuf,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    let raw = tokio::fs::read_to_string(pairs_path).await.map_err(|e| {
        TechFitError::Training(format!("cannot read {}: {}", pairs_path.display(), e))
    })?;
    let pairs: Vec<TrainingPair> = serde_json::from_str(&raw)?;

    println!("🔧 Treinando com {} pares...", pairs.len());
    let catalog = SkillCatalog::new();
    let (context, summary) = train(&pairs, &config.training, &catalog)?;

    let store = match out_dir {
        Some(dir) => ArtifactStore::new(
            &dir,
            &config.artifacts.model_file,
            &config.artifacts.vectorizer_file,
        ),
        None => ArtifactStore::from_config(config),
    };
    store.save(&context).await?;

    println!("✅ Artifacts salvos:");
    println!("  modelo:      {}", store.model_path().display());
    println!("  vetorizador: {}", store.vectorizer_path().display());
    println!(
        "  treino/teste: {}/{} | F1: {:.4}",
        summary.train_size, summary.test_size, summary.f1
    );
    println!(
        "  vocabulário: {} termos | features: {}",
        summary.vocabulary, summary.feature_width
    );
    Ok(())
}

async fn artifacts_command(config: &Config, action: ArtifactAction) -> Result<()> {
    let store = ArtifactStore::from_config(config);

    match action {
        ArtifactAction::Info => {
            println!("Artifacts:");
            println!("  modelo:      {}", store.model_path().display());
            println!("  vetorizador: {}", store.vectorizer_path().display());

            if !store.exists() {
                println!("  estado: não treinado (apenas baseline disponível)");
                return Ok(());
            }

            let ModelContext {
                vectorizer,
                classifier,
            } = store.load().await?;
            let kind = match &classifier {
                ClassifierArtifact::Probabilistic(_) => "probabilistic",
                ClassifierArtifact::Scoring(_) => "scoring",
            };
            println!(
                "  estado: treinado | vocabulário: {} | tipo: {} | features: {}",
                vectorizer.vocabulary_len(),
                kind,
                classifier.n_features()
            );
        }
        ArtifactAction::Remove => {
            store.remove().await?;
            println!("🗑️  Artifacts removidos");
        }
    }
    Ok(())
}

fn config_command(config: &Config, action: Option<ConfigAction>) -> Result<()> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let content = toml::to_string_pretty(config).map_err(|e| {
                TechFitError::Configuration(format!("Failed to serialize config: {}", e))
            })?;
            println!("{content}");
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("Configuração restaurada para os padrões");
        }
        ConfigAction::Path => {
            println!("{}", Config::config_path().display());
        }
    }
    Ok(())
}
