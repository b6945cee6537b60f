//! Output formatters with console, JSON and Markdown support

use crate::config::OutputFormat;
use crate::error::{CvSenseError, Result};
use crate::output::report::AnalysisReport;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering analysis reports.
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and rich presentation
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for downstream tooling
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for shareable reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!(
                "\n{} {}\n",
                prefix.color(color).bold(),
                title.color(color).bold()
            )
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = match score as u32 {
            90..=100 => ("EXCELLENT", Color::Green),
            80..=89 => ("VERY GOOD", Color::BrightGreen),
            70..=79 => ("GOOD", Color::Yellow),
            60..=69 => ("FAIR", Color::BrightYellow),
            50..=59 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("CV ALIGNMENT ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | CV: {} | JD: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.cv_file,
            report.metadata.jd_file
        ));

        let result = &report.match_result;
        output.push_str(&self.format_header("Match Score", 2));
        output.push_str(&format!(
            "Overall: {:.2}% {}\n",
            result.score,
            self.format_score_badge(result.score)
        ));

        if !result.category_breakdown.is_empty() {
            output.push_str(&self.format_header("Category Coverage", 3));
            for (category, coverage) in &result.category_breakdown {
                output.push_str(&format!(
                    "  {:<28} {}/{} ({:.0}%)\n",
                    category.replace('_', " "),
                    coverage.matched,
                    coverage.jd_total,
                    coverage.coverage_pct()
                ));
            }
        }

        if !result.matched.is_empty() {
            output.push_str(&self.format_header("Matched Skills", 3));
            output.push_str(&format!(
                "  {}\n",
                self.colorize(&result.matched.join(", "), Color::Green)
            ));
        }
        if !result.missing.is_empty() {
            output.push_str(&self.format_header("Missing Skills", 3));
            output.push_str(&format!(
                "  {}\n",
                self.colorize(&result.missing.join(", "), Color::Yellow)
            ));
        }
        if self.detailed && !result.extra.is_empty() {
            output.push_str(&self.format_header("Extra CV Skills", 3));
            output.push_str(&format!("  {}\n", result.extra.join(", ")));
        }

        if let Some(semantic) = &report.semantic {
            output.push_str(&self.format_header("Semantic Coverage", 2));
            output.push_str(&format!(
                "Score: {:.2}% ({} phrases covered, {} uncovered)\n",
                semantic.score,
                semantic.matched.len(),
                semantic.missing.len()
            ));
            if self.detailed {
                for phrase_match in &semantic.matched {
                    output.push_str(&format!(
                        "  {} ~ {} ({:.2})\n",
                        phrase_match.jd_phrase, phrase_match.cv_phrase, phrase_match.similarity
                    ));
                }
                if !semantic.missing.is_empty() {
                    output.push_str(&format!(
                        "  Uncovered: {}\n",
                        self.colorize(&semantic.missing.join(", "), Color::Yellow)
                    ));
                }
            }
        }

        if let Some(audit) = &report.audit {
            output.push_str(&self.format_header("Layout Audit", 2));
            output.push_str(&format!(
                "Pages: {} | Fonts: {} | Tables: {} | Images: {}\n",
                audit.pages, audit.font_family_count, audit.tables, audit.images
            ));
            if audit.warnings.is_empty() {
                output.push_str(&format!(
                    "{}\n",
                    self.colorize("No layout warnings.", Color::Green)
                ));
            } else {
                for warning in &audit.warnings {
                    output.push_str(&format!(
                        "  • {}\n",
                        self.colorize(warning, Color::Yellow)
                    ));
                }
            }
        }

        if !report.suggestions.is_empty() {
            output.push_str(&self.format_header("Suggestions", 2));
            for (i, suggestion) in report.suggestions.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, suggestion));
            }
        }

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "{}\n",
            self.colorize(&report.narrative, Color::Cyan)
        ));

        output.push_str(&format!(
            "\nGenerated by cvsense v{}\n",
            report.metadata.engine_version
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        let result = &report.match_result;

        output.push_str("# CV Alignment Report\n\n");
        output.push_str(&format!("**Overall Score:** {:.2}%\n\n", result.score));

        if !result.category_breakdown.is_empty() {
            output.push_str("## Category Coverage\n\n");
            output.push_str("| Category | Matched | Required | Coverage |\n");
            output.push_str("|----------|---------|----------|----------|\n");
            for (category, coverage) in &result.category_breakdown {
                output.push_str(&format!(
                    "| {} | {} | {} | {:.0}% |\n",
                    category.replace('_', " "),
                    coverage.matched,
                    coverage.jd_total,
                    coverage.coverage_pct()
                ));
            }
            output.push('\n');
        }

        output.push_str("## Skills\n\n");
        output.push_str(&format!(
            "- **Matched:** {}\n",
            join_or_none(&result.matched)
        ));
        output.push_str(&format!(
            "- **Missing:** {}\n",
            join_or_none(&result.missing)
        ));
        output.push_str(&format!("- **Extra:** {}\n\n", join_or_none(&result.extra)));

        if let Some(semantic) = &report.semantic {
            output.push_str("## Semantic Coverage\n\n");
            output.push_str(&format!("**Score:** {:.2}%\n\n", semantic.score));
            if !semantic.matched.is_empty() {
                output.push_str("| JD Phrase | Closest CV Phrase | Similarity |\n");
                output.push_str("|-----------|-------------------|------------|\n");
                for phrase_match in &semantic.matched {
                    output.push_str(&format!(
                        "| {} | {} | {:.2} |\n",
                        phrase_match.jd_phrase, phrase_match.cv_phrase, phrase_match.similarity
                    ));
                }
                output.push('\n');
            }
            if !semantic.missing.is_empty() {
                output.push_str(&format!(
                    "**Uncovered phrases:** {}\n\n",
                    semantic.missing.join(", ")
                ));
            }
        }

        if let Some(audit) = &report.audit {
            output.push_str("## Layout Audit\n\n");
            output.push_str(&format!(
                "Pages: {} | Fonts: {} | Tables: {} | Images: {}\n\n",
                audit.pages, audit.font_family_count, audit.tables, audit.images
            ));
            if audit.warnings.is_empty() {
                output.push_str("No layout warnings.\n\n");
            } else {
                for warning in &audit.warnings {
                    output.push_str(&format!("- ⚠️ {}\n", warning));
                }
                output.push('\n');
            }
        }

        if !report.suggestions.is_empty() {
            output.push_str("## Suggestions\n\n");
            for (i, suggestion) in report.suggestions.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, suggestion));
            }
            output.push('\n');
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!("{}\n", report.narrative));

        if self.include_metadata {
            output.push_str(&format!(
                "\n---\n*Generated by cvsense v{} on {} | CV: {} | JD: {}*\n",
                report.metadata.engine_version,
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.cv_file,
                report.metadata.jd_file
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// Coordinates the individual formatters.
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn generate(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }

    /// Write the report to a file, picking the format from the extension
    /// (`.json`, `.md`; anything else gets uncolored console text).
    pub fn save_to_file(&self, report: &AnalysisReport, path: &Path) -> Result<()> {
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => OutputFormat::Json,
            Some("md") | Some("markdown") => OutputFormat::Markdown,
            _ => OutputFormat::Console,
        };

        let content = if format == OutputFormat::Console {
            ConsoleFormatter::new(false, self.console_formatter.detailed).format_report(report)?
        } else {
            self.generate(report, format)?
        };

        std::fs::write(path, content).map_err(|e| {
            CvSenseError::OutputFormatting(format!(
                "Failed to write report to '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
