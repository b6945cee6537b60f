//! Turns missing skills, category gaps and layout warnings into ranked,
//! deduplicated recommendations.

use crate::audit::LayoutAuditReport;
use crate::processing::matcher::MatchResult;
use crate::vocabulary::{CategoryTag, SkillVocabulary};
use std::collections::HashSet;

/// Missing-skill advice is capped so the list stays readable.
const MAX_SKILL_SUGGESTIONS: usize = 10;
const TARGET_SCORE: f64 = 90.0;
const TOP_MISSING_FOR_TARGET: usize = 3;

/// Category-specific advice template; `{skill}` is substituted.
fn template_for(tag: CategoryTag) -> &'static str {
    match tag {
        CategoryTag::DataEngineeringCore => {
            "Add a bullet under Experience showing {skill} used to build or maintain data pipelines, including orchestration and monitoring."
        }
        CategoryTag::Mlops => {
            "Mention {skill} for experiment tracking or model registry and how it integrated with CI/CD."
        }
        CategoryTag::CloudAzure => {
            "Include {skill} in a project bullet (ingestion, processing, storage, security)."
        }
        CategoryTag::DeepLearning => {
            "Add a quantified achievement using {skill} (e.g., trained a model improving F1 by X%)."
        }
        CategoryTag::Nlp => {
            "Show a use case with {skill} (NER, text classification, RAG) and its outcome."
        }
        CategoryTag::GenaiLlms => {
            "Add a line about {skill} for LLM apps (prompting, tools, serving)."
        }
        CategoryTag::DatabasesWarehousingBi => {
            "Include {skill} for reporting/analytics with a performance or cost outcome."
        }
        CategoryTag::TestingCiCdDevops => {
            "Note CI/CD with {skill} for model or data pipeline deployments."
        }
        CategoryTag::General => "Add {skill} with a concrete project/result bullet.",
    }
}

/// Layout warnings map to fixes by keyword; a warning can trigger more
/// than one fix.
fn layout_fixes(warning: &str) -> Vec<&'static str> {
    let w = warning.to_lowercase();
    let mut fixes = Vec::new();
    if w.contains("multi-column") {
        fixes.push("Switch to a single-column layout; ATS parsers read top-to-bottom.");
    }
    if w.contains("font") {
        fixes.push("Reduce to 1-2 fonts; use common families (Arial/Calibri).");
    }
    if w.contains("tables") {
        fixes.push("Replace tables with simple bullet points and plain text.");
    }
    if w.contains("images") {
        fixes.push("Remove icons/images; ensure all content is text.");
    }
    if w.contains("longer than 2 pages") {
        fixes.push("Trim to 1-2 pages focusing on recent, relevant work.");
    }
    if w.contains("contact info") {
        fixes.push("Place email and phone in the header in plain text.");
    }
    if w.contains("missing key sections") {
        fixes.push("Ensure Summary, Skills, Experience, Education sections exist as headings.");
    }
    fixes
}

/// Build the ordered suggestion list: missing-skill advice first, then
/// layout fixes, then the target-score line. Duplicates are removed
/// preserving first occurrence.
pub fn suggest(
    result: &MatchResult,
    vocab: &SkillVocabulary,
    audit: Option<&LayoutAuditReport>,
) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();

    for skill in result.missing.iter().take(MAX_SKILL_SUGGESTIONS) {
        let tag = vocab
            .category_of(skill)
            .map(|c| vocab.tag_of(c))
            .unwrap_or(CategoryTag::General);
        suggestions.push(template_for(tag).replace("{skill}", skill));
    }

    if let Some(audit) = audit {
        for warning in &audit.warnings {
            for fix in layout_fixes(warning) {
                suggestions.push(fix.to_string());
            }
        }
    }

    if result.score < TARGET_SCORE && !result.missing.is_empty() {
        let top: Vec<&str> = result
            .missing
            .iter()
            .take(TOP_MISSING_FOR_TARGET)
            .map(|s| s.as_str())
            .collect();
        suggestions.push(format!(
            "To reach 90%+, add evidence for: {}.",
            top.join(", ")
        ));
    }

    let mut seen = HashSet::new();
    suggestions
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
