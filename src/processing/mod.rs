//! Skill extraction, matching and scoring module

pub mod extractor;
pub mod fuzzy;
pub mod keywords;
pub mod matcher;
pub mod normalizer;
pub mod semantic;
