//! CLI interface for the tech-fit scoring tool

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tech-fit")]
#[command(about = "Job and candidate fit scoring")]
#[command(
    long_about = "Score how well a CV matches a job description using a skill-overlap baseline and, when trained artifacts are available, a TF-IDF linear model"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a CV against a job description
    Score {
        /// Path to the job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Path to the CV file (TXT, MD)
        #[arg(long)]
        cv: PathBuf,

        /// Decision threshold in [0, 1]
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save the full report to a file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Skip the trained model even when artifacts exist
        #[arg(long)]
        baseline_only: bool,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,
    },

    /// Fit the TF-IDF vectorizer and classifier from labeled pairs
    Train {
        /// Path to the labeled pairs file (JSON array)
        #[arg(short, long)]
        pairs: PathBuf,

        /// Directory to write artifacts to (defaults to the configured one)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Build labeled training pairs from the three raw collections
    Dataset {
        /// Path to the jobs collection (JSON)
        #[arg(long)]
        vagas: PathBuf,

        /// Path to the applicants collection (JSON)
        #[arg(long)]
        applicants: PathBuf,

        /// Path to the prospects collection (JSON)
        #[arg(long)]
        prospects: PathBuf,

        /// Where to write the labeled pairs (JSON)
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Inspect or remove the persisted artifacts
    Artifacts {
        #[command(subcommand)]
        action: ArtifactAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ArtifactAction {
    /// Show artifact locations and their fitted shapes
    Info,

    /// Delete the persisted artifacts
    Remove,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
