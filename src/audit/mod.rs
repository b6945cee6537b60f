//! Document layout auditing
//!
//! Inspects structural signals of the CV source document (columns, fonts,
//! tables, images, headings, contact info) and emits warnings correlated
//! with ATS parseability. Each heuristic is computed independently; a
//! failed extraction on one page contributes zero to that page and is
//! surfaced as a warning instead of aborting the audit.

pub mod pdf;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Character positions below this count are too small a sample for
/// column detection.
const MIN_CHARS_FOR_COLUMNS: usize = 100;
const COLUMN_BIN_WIDTH: f32 = 20.0;
const MAX_FONT_FAMILIES: usize = 4;
const MAX_PAGES: usize = 2;
const MAX_FILENAME_LEN: usize = 60;

const SECTION_HEADS: &[&str] = &[
    "summary",
    "profile",
    "objective",
    "skills",
    "technical skills",
    "core skills",
    "experience",
    "work experience",
    "employment",
    "projects",
    "publications",
    "education",
    "certifications",
    "awards",
];

const ESSENTIAL_SECTIONS: &[&str] = &["summary", "skills", "experience", "education"];

/// A single positioned character from the source document.
#[derive(Debug, Clone)]
pub struct TextChar {
    pub x: f32,
    pub font_name: Option<String>,
}

/// Per-facet scan outcome for one page. A facet that failed to extract
/// carries the reason instead of data.
#[derive(Debug, Clone)]
pub struct PageScan {
    pub chars: Result<Vec<TextChar>, String>,
    pub tables: Result<usize, String>,
    pub images: Result<usize, String>,
}

/// Structured handle over the original source document, produced by the
/// ingestion side (see [`pdf`] for the PDF scanner).
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub file_name: String,
    pub pages: Vec<PageScan>,
    /// Full extracted text, or the reason extraction failed.
    pub text: Result<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactPresence {
    pub email: bool,
    pub phone: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionPresence {
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutAuditReport {
    pub file_name: String,
    pub pages: usize,
    pub tables: usize,
    pub images: usize,
    pub font_family_count: usize,
    pub multi_column: bool,
    pub contacts: ContactPresence,
    pub sections: SectionPresence,
    pub filename_issues: Vec<String>,
    pub warnings: Vec<String>,
}

pub struct LayoutAuditor {
    email_regex: Regex,
    phone_regex: Regex,
}

impl Default for LayoutAuditor {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutAuditor {
    pub fn new() -> Self {
        let email_regex =
            Regex::new(r"\b[\w.\-]+@[\w.\-]+\.\w+\b").expect("Invalid email regex");
        let phone_regex = Regex::new(r"\+?\d[\d\-\s()]{6,}\d").expect("Invalid phone regex");
        Self {
            email_regex,
            phone_regex,
        }
    }

    /// Audit a scanned source document. Never fails: degraded pages are
    /// reported as warnings and contribute zero to the counts.
    pub fn audit(&self, doc: &SourceDocument) -> LayoutAuditReport {
        let mut warnings = Vec::new();

        let mut tables = 0;
        let mut images = 0;
        let mut all_chars: Vec<&TextChar> = Vec::new();

        for (idx, page) in doc.pages.iter().enumerate() {
            let page_no = idx + 1;
            match &page.chars {
                Ok(chars) => all_chars.extend(chars.iter()),
                Err(reason) => {
                    warnings.push(format!("Page {}: character scan failed: {}", page_no, reason))
                }
            }
            match &page.tables {
                Ok(count) => tables += count,
                Err(reason) => {
                    warnings.push(format!("Page {}: table scan failed: {}", page_no, reason))
                }
            }
            match &page.images {
                Ok(count) => images += count,
                Err(reason) => {
                    warnings.push(format!("Page {}: image scan failed: {}", page_no, reason))
                }
            }
        }

        let text = match &doc.text {
            Ok(text) => text.clone(),
            Err(reason) => {
                warnings.push(format!("Text extraction failed: {}", reason));
                String::new()
            }
        };

        let multi_column = detect_columns(&all_chars);
        let font_family_count = font_variety(&all_chars);
        let contacts = ContactPresence {
            email: self.email_regex.is_match(&text),
            phone: self.phone_regex.is_match(&text),
        };
        let sections = detect_sections(&text);
        let filename_issues = filename_hygiene(&doc.file_name);

        if multi_column {
            warnings.push(
                "Detected multi-column layout. Some ATS parsers struggle with columns.".to_string(),
            );
        }
        if font_family_count > MAX_FONT_FAMILIES {
            warnings
                .push("Many font families detected. Keep fonts minimal (<= 3).".to_string());
        }
        if tables > 0 {
            warnings.push("Tables detected. Prefer simple bullet points for ATS.".to_string());
        }
        if images > 0 {
            warnings.push("Images/icons detected. ATS may ignore image text.".to_string());
        }
        if doc.pages.len() > MAX_PAGES {
            warnings.push("Resume longer than 2 pages.".to_string());
        }
        if !contacts.email || !contacts.phone {
            warnings.push("Contact info not clearly detected (email/phone).".to_string());
        }
        let missing_essentials: Vec<&str> = ESSENTIAL_SECTIONS
            .iter()
            .filter(|s| !sections.found.iter().any(|f| f == *s))
            .copied()
            .collect();
        if !missing_essentials.is_empty() {
            warnings.push(format!(
                "Missing key sections: {}.",
                missing_essentials.join(", ")
            ));
        }

        LayoutAuditReport {
            file_name: doc.file_name.clone(),
            pages: doc.pages.len(),
            tables,
            images,
            font_family_count,
            multi_column,
            contacts,
            sections,
            filename_issues,
            warnings,
        }
    }

    /// Report for a document that could not be opened at all: all-zero
    /// structural counts plus a descriptive warning.
    pub fn audit_failure(&self, file_name: &str, reason: &str) -> LayoutAuditReport {
        LayoutAuditReport {
            file_name: file_name.to_string(),
            pages: 0,
            tables: 0,
            images: 0,
            font_family_count: 0,
            multi_column: false,
            contacts: ContactPresence {
                email: false,
                phone: false,
            },
            sections: SectionPresence {
                found: Vec::new(),
                missing: SECTION_HEADS.iter().map(|s| s.to_string()).collect(),
            },
            filename_issues: filename_hygiene(file_name),
            warnings: vec![format!("Document read error: {}", reason)],
        }
    }
}

/// Bucket character x-origins into fixed-width bins; two or more dominant
/// bins read as a multi-column layout.
fn detect_columns(chars: &[&TextChar]) -> bool {
    if chars.len() < MIN_CHARS_FOR_COLUMNS {
        return false;
    }

    let mut bins: HashMap<i32, usize> = HashMap::new();
    for c in chars {
        let key = (c.x / COLUMN_BIN_WIDTH) as i32;
        *bins.entry(key).or_insert(0) += 1;
    }

    let peak_floor = (chars.len() as f32 * 0.02).max(20.0) as usize;
    let peaks = bins.values().filter(|&&v| v > peak_floor).count();
    peaks >= 2
}

/// Count distinct font families, stripping the subset prefix PDF
/// producers prepend ("ABCDEF+Helvetica" -> "Helvetica").
fn font_variety(chars: &[&TextChar]) -> usize {
    let mut families: Vec<&str> = chars
        .iter()
        .filter_map(|c| c.font_name.as_deref())
        .map(|f| f.rsplit('+').next().unwrap_or(f))
        .collect();
    families.sort();
    families.dedup();
    families.len()
}

fn detect_sections(text: &str) -> SectionPresence {
    let lower = text.to_lowercase();
    let mut found = Vec::new();
    let mut missing = Vec::new();
    for head in SECTION_HEADS {
        if lower.contains(head) {
            found.push(head.to_string());
        } else {
            missing.push(head.to_string());
        }
    }
    SectionPresence { found, missing }
}

fn filename_hygiene(file_name: &str) -> Vec<String> {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    let mut issues = Vec::new();
    if base.contains(' ') {
        issues.push("Filename contains spaces. Prefer hyphens/underscores.".to_string());
    }
    if !base.to_lowercase().ends_with(".pdf") {
        issues.push("Resume should be a PDF.".to_string());
    }
    if base.len() > MAX_FILENAME_LEN {
        issues.push("Filename is long; shorten for ATS friendliness.".to_string());
    }
    issues
}
