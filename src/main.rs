//! cvsense: CV and job description alignment scoring tool

mod advice;
mod audit;
mod cli;
mod config;
mod error;
mod input;
mod output;
mod processing;
mod vocabulary;

use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::{CvSenseError, Result};
use input::manager::InputManager;
use log::{error, info, warn};
use output::formatter::ReportGenerator;
use output::report::{AnalysisReport, ReportMetadata};
use processing::extractor::SkillExtractor;
use processing::keywords::KeyphraseExtractor;
use processing::semantic::{self, StaticEmbedder};
use std::path::{Path, PathBuf};
use std::process;
use vocabulary::SkillVocabulary;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config) {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Align {
            cv,
            jd,
            vocabulary,
            model,
            detailed,
            output,
            save,
            no_semantic,
            no_audit,
        } => {
            info!("Starting CV alignment analysis");

            cli::validate_file_extension(&cv, &["pdf", "txt", "md"])
                .map_err(|e| CvSenseError::InvalidInput(format!("CV file: {}", e)))?;
            cli::validate_file_extension(&jd, &["txt", "md"])
                .map_err(|e| CvSenseError::InvalidInput(format!("Job description file: {}", e)))?;

            let output_format =
                cli::parse_output_format(&output).map_err(CvSenseError::InvalidInput)?;

            let mut input_manager = InputManager::new();
            let cv_text = input_manager.extract_text(&cv)?;
            let jd_text = input_manager.extract_text(&jd)?;
            info!(
                "Extracted {} chars from CV, {} chars from JD",
                cv_text.len(),
                jd_text.len()
            );

            if detailed {
                println!("CV parse preview (as an ATS would read it):");
                println!("{}\n", input::parse_preview(&cv_text, input::PREVIEW_MAX_CHARS));
            }

            let vocab = load_vocabulary(vocabulary.as_deref(), &config)?;
            info!(
                "Skill vocabulary loaded: {} canonical skills",
                vocab.skill_count()
            );

            let extractor = SkillExtractor::new(&vocab, &config.matching)?;
            let cv_skills = extractor.extract(&cv_text);
            let jd_skills = extractor.extract(&jd_text);

            let match_result = processing::matcher::analyse(&cv_skills, &jd_skills, &vocab);

            let (semantic_coverage, embedding_model) = if no_semantic {
                (None, None)
            } else {
                run_semantic_stage(&config, model.as_deref(), &jd_text, &cv_text)
            };

            let audit_report = if no_audit {
                None
            } else {
                audit_if_pdf(&cv)
            };

            let suggestions =
                advice::suggestions::suggest(&match_result, &vocab, audit_report.as_ref());
            let narrative = advice::narrative::narrate(&match_result);

            let report = AnalysisReport {
                match_result,
                semantic: semantic_coverage,
                audit: audit_report,
                suggestions,
                narrative,
                metadata: ReportMetadata::new(
                    &cv.display().to_string(),
                    &jd.display().to_string(),
                    embedding_model,
                ),
            };

            let generator = ReportGenerator::new(config.output.color_output, detailed);
            println!("{}", generator.generate(&report, output_format)?);

            if let Some(save_path) = save {
                generator.save_to_file(&report, &save_path)?;
                println!("Report saved to {}", save_path.display());
            }
        }

        Commands::Audit { cv } => {
            cli::validate_file_extension(&cv, &["pdf"])
                .map_err(|e| CvSenseError::InvalidInput(format!("CV file: {}", e)))?;

            let auditor = audit::LayoutAuditor::new();
            let report = match audit::pdf::scan_pdf(&cv) {
                Ok(source) => auditor.audit(&source),
                Err(e) => {
                    let file_name = cv
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| cv.display().to_string());
                    auditor.audit_failure(&file_name, &e.to_string())
                }
            };

            println!("Layout audit: {}", report.file_name);
            println!(
                "Pages: {} | Fonts: {} | Tables: {} | Images: {}",
                report.pages, report.font_family_count, report.tables, report.images
            );
            if report.warnings.is_empty() {
                println!("No layout warnings.");
            } else {
                for warning in &report.warnings {
                    println!("  • {}", warning);
                }
            }
        }

        Commands::Config => {
            println!("Current Configuration\n");
            println!(
                "Skills bank: {}",
                config
                    .vocabulary
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "built-in".to_string())
            );
            println!("Models directory: {}", config.models.models_dir.display());
            println!("Embedding model: {}", config.models.embedding_model);
            println!("\nMatching:");
            println!(
                "  Fuzzy rescue threshold: {:.1}",
                config.matching.fuzzy_rescue_threshold
            );
            println!("  Max n-gram: {}", config.matching.max_ngram);
            println!(
                "  Semantic threshold: {:.2}",
                config.matching.semantic_threshold
            );
            println!("  Keyphrases per document: {}", config.matching.keyphrase_top_n);
        }
    }

    Ok(())
}

fn load_vocabulary(override_path: Option<&Path>, config: &Config) -> Result<SkillVocabulary> {
    match override_path.or(config.vocabulary.path.as_deref()) {
        Some(path) => SkillVocabulary::from_path(path),
        None => SkillVocabulary::builtin(),
    }
}

/// Run keyphrase extraction and semantic coverage when a usable embedding
/// model is available; otherwise skip the stage with a warning.
fn run_semantic_stage(
    config: &Config,
    model_override: Option<&str>,
    jd_text: &str,
    cv_text: &str,
) -> (
    Option<processing::semantic::SemanticCoverage>,
    Option<String>,
) {
    let model_path = model_override
        .map(PathBuf::from)
        .unwrap_or_else(|| config.embedding_model_path());

    let embedder = match StaticEmbedder::load(&model_path) {
        Ok(embedder) => embedder,
        Err(e) => {
            warn!(
                "Semantic coverage skipped, embedding model unavailable ({}): {}",
                model_path.display(),
                e
            );
            return (None, None);
        }
    };

    let keyphrases = KeyphraseExtractor::new();
    let jd_phrases = keyphrases.extract(jd_text, config.matching.keyphrase_top_n);
    let cv_phrases: Vec<String> = keyphrases
        .extract(cv_text, config.matching.keyphrase_top_n)
        .into_iter()
        .map(|(phrase, _)| phrase)
        .collect();

    let coverage = semantic::cover(
        &embedder,
        &jd_phrases,
        &cv_phrases,
        config.matching.semantic_threshold,
    );

    (Some(coverage), Some(model_path.display().to_string()))
}

fn audit_if_pdf(cv: &Path) -> Option<audit::LayoutAuditReport> {
    let is_pdf = cv
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf {
        info!("Layout audit skipped: CV is not a PDF");
        return None;
    }

    let auditor = audit::LayoutAuditor::new();
    let report = match audit::pdf::scan_pdf(cv) {
        Ok(source) => auditor.audit(&source),
        Err(e) => {
            let file_name = cv
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| cv.display().to_string());
            auditor.audit_failure(&file_name, &e.to_string())
        }
    };
    Some(report)
}
