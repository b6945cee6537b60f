//! Suggestion and narrative synthesis

pub mod narrative;
pub mod suggestions;
