//! Report structure combining all analysis results

use crate::audit::LayoutAuditReport;
use crate::processing::matcher::MatchResult;
use crate::processing::semantic::SemanticCoverage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Complete analysis of one CV against one JD.
///
/// Semantic coverage and the layout audit are optional: the first needs a
/// local embedding model, the second needs a PDF input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub match_result: MatchResult,
    pub semantic: Option<SemanticCoverage>,
    pub audit: Option<LayoutAuditReport>,
    pub suggestions: Vec<String>,
    pub narrative: String,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub engine_version: String,
    pub cv_file: String,
    pub jd_file: String,
    /// Embedding model used for semantic coverage, when that stage ran.
    pub embedding_model: Option<String>,
}

impl ReportMetadata {
    pub fn new(cv_file: &str, jd_file: &str, embedding_model: Option<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            cv_file: cv_file.to_string(),
            jd_file: jd_file.to_string(),
            embedding_model,
        }
    }
}
