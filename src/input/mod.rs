//! Document ingestion
//! Handles file detection, text extraction, and input management

pub mod manager;
pub mod text_extractor;

/// Default character budget for the simulated ATS parse preview.
pub const PREVIEW_MAX_CHARS: usize = 2500;

/// Plain-text preview of an extracted document, the way an ATS would see
/// it: trimmed to `max_chars` on a character boundary with an ellipsis.
pub fn parse_preview(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(max_chars).collect();
    format!("{} ...", cut)
}
