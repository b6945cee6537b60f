//! cvsense library
//!
//! Scores how well a CV covers the requirements of a job description:
//! vocabulary-driven skill extraction with fuzzy rescue, weighted match
//! scoring, embedding-based semantic phrase coverage, an ATS-oriented PDF
//! layout audit, and recruiter-style suggestions.

pub mod advice;
pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod vocabulary;

pub use config::Config;
pub use error::{CvSenseError, Result};
