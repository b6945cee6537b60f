//! CLI interface for cvsense

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cvsense")]
#[command(about = "CV and job description alignment scoring tool")]
#[command(
    long_about = "Score how well a CV covers a job description using a skill vocabulary, fuzzy keyword rescue, semantic phrase coverage, and an ATS layout audit"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a CV against a job description
    Align {
        /// Path to CV file (PDF, TXT, MD)
        #[arg(short, long)]
        cv: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        jd: PathBuf,

        /// Path to a custom skills bank JSON file
        #[arg(long)]
        vocabulary: Option<PathBuf>,

        /// Embedding model directory or repo id for semantic coverage
        #[arg(short, long)]
        model: Option<String>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Skip semantic phrase coverage (vocabulary matching only)
        #[arg(long)]
        no_semantic: bool,

        /// Skip the PDF layout audit
        #[arg(long)]
        no_audit: bool,
    },

    /// Run only the ATS layout audit on a PDF CV
    Audit {
        /// Path to CV file (PDF)
        #[arg(short, long)]
        cv: PathBuf,
    },

    /// Show current configuration
    Config,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert!(parse_output_format("Console").is_ok());
        assert!(parse_output_format("md").is_ok());
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_extension_validation() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("cv"), &["pdf"]).is_err());
    }
}
