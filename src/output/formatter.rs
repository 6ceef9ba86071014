//! Prediction formatting: colored console output and JSON

use crate::config::OutputFormat;
use crate::error::Result;
use crate::processing::scoring::{Prediction, ScoreSource, Verdict};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

/// Envelope written by `--save`: the prediction plus where it came from
/// and when it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub job_path: String,
    pub cv_path: String,
    #[serde(flatten)]
    pub prediction: &'a Prediction,
}

pub struct PredictionFormatter {
    color: bool,
}

impl PredictionFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn render(
        &self,
        prediction: &Prediction,
        format: OutputFormat,
        detailed: bool,
    ) -> Result<String> {
        match format {
            OutputFormat::Console => Ok(self.console(prediction, detailed)),
            OutputFormat::Json => self.json(prediction),
        }
    }

    pub fn json(&self, prediction: &Prediction) -> Result<String> {
        Ok(serde_json::to_string_pretty(prediction)?)
    }

    fn console(&self, prediction: &Prediction, detailed: bool) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "\n📊 Fit Score ({})\n\n",
            self.paint_source(prediction.fonte)
        ));

        out.push_str(&format!(
            "  Baseline: {:.4}  →  {}\n",
            prediction.score_baseline,
            self.paint_verdict(prediction.classificacao_baseline)
        ));

        if let (Some(score), Some(verdict)) =
            (prediction.score_modelo, prediction.classificacao_modelo)
        {
            out.push_str(&format!(
                "  Modelo:   {:.4}  →  {}\n",
                score,
                self.paint_verdict(verdict)
            ));
        }
        if let Some(cosine) = prediction.similaridade_tfidf {
            out.push_str(&format!("  Similaridade TF-IDF: {:.4}\n", cosine));
        }

        out.push_str(&format!("  Threshold: {:.2}\n", prediction.threshold));

        out.push_str(&format!(
            "\n  💼 Skills da vaga ({}): {}\n",
            prediction.skills_vaga.len(),
            prediction.skills_vaga.join(", ")
        ));
        out.push_str(&format!(
            "  📄 Skills do CV ({}): {}\n",
            prediction.skills_cv.len(),
            prediction.skills_cv.join(", ")
        ));
        out.push_str(&format!(
            "  ✅ Skills em comum ({}): {}\n",
            prediction.skills_match.len(),
            prediction.skills_match.join(", ")
        ));

        if let Some(erro) = &prediction.erro {
            let line = format!("\n  ⚠️  Modelo degradado: {erro}\n");
            out.push_str(&if self.color {
                line.yellow().to_string()
            } else {
                line
            });
        }

        if detailed {
            out.push_str(&format!(
                "\n  Fonte da resposta: {}\n",
                prediction.fonte
            ));
        }

        out
    }

    fn paint_verdict(&self, verdict: Verdict) -> String {
        if !self.color {
            return verdict.to_string();
        }
        match verdict {
            Verdict::Atende => verdict.to_string().green().bold().to_string(),
            Verdict::NaoAtende => verdict.to_string().red().bold().to_string(),
        }
    }

    fn paint_source(&self, source: ScoreSource) -> String {
        if !self.color {
            return source.to_string();
        }
        match source {
            ScoreSource::Modelo => source.to_string().cyan().to_string(),
            ScoreSource::Baseline => source.to_string().normal().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::scoring::{baseline_predict, DEFAULT_THRESHOLD};
    use crate::processing::skills::SkillCatalog;

    fn sample_prediction() -> Prediction {
        baseline_predict(
            &SkillCatalog::new(),
            "Procuramos Python, SQL e AWS",
            "3 anos com Python e AWS; Docker básico",
            DEFAULT_THRESHOLD,
        )
    }

    #[test]
    fn test_json_keeps_field_names() {
        let formatter = PredictionFormatter::new(false);
        let json = formatter.json(&sample_prediction()).unwrap();

        assert!(json.contains("\"score_baseline\""));
        assert!(json.contains("\"classificacao_baseline\""));
        assert!(json.contains("\"skills_vaga\""));
        assert!(json.contains("\"fonte\": \"baseline\""));
        // Model fields are absent, not null, on the baseline path.
        assert!(!json.contains("score_modelo"));
        assert!(!json.contains("erro"));
    }

    #[test]
    fn test_console_output_mentions_skills() {
        let formatter = PredictionFormatter::new(false);
        let text = formatter.console(&sample_prediction(), true);

        assert!(text.contains("aws, python, sql"));
        assert!(text.contains("Atende"));
        assert!(text.contains("0.6667"));
    }

    #[test]
    fn test_report_envelope_serializes_flat() {
        let prediction = sample_prediction();
        let report = ScoreReport {
            generated_at: Utc::now(),
            job_path: "vaga.txt".to_string(),
            cv_path: "cv.md".to_string(),
            prediction: &prediction,
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"job_path\""));
        assert!(json.contains("\"score_baseline\""));
    }
}
