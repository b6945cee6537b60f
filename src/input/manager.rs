//! Input manager for handling different file types

use crate::error::{CvSenseError, Result};
use crate::input::text_extractor::{
    MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::info;
use std::collections::HashMap;
use std::path::Path;

/// Input formats the pipeline accepts, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileType {
    Pdf,
    Text,
    Markdown,
}

fn detect_file_type(path: &Path) -> Result<FileType> {
    let extension = path.extension().and_then(|ext| ext.to_str()).ok_or_else(|| {
        CvSenseError::InvalidInput(format!("File has no extension: {}", path.display()))
    })?;

    match extension.to_lowercase().as_str() {
        "pdf" => Ok(FileType::Pdf),
        "txt" => Ok(FileType::Text),
        "md" => Ok(FileType::Markdown),
        other => Err(CvSenseError::UnsupportedFormat(format!(
            "Unsupported file type '{}' for: {}",
            other,
            path.display()
        ))),
    }
}

pub struct InputManager {
    cache: HashMap<String, String>,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    pub fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if let Some(cached_text) = self.cache.get(&path_str) {
            info!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        if !path.exists() {
            return Err(CvSenseError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match detect_file_type(path)? {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path)?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path)?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path)?
            }
        };

        self.cache.insert(path_str, text.clone());

        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
