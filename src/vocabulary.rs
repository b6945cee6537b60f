//! Skill vocabulary: canonical skills grouped by category, synonym aliases,
//! and per-category importance weights.
//!
//! The vocabulary is loaded once at startup and shared read-only for the
//! rest of the process. Malformed banks are a startup-time configuration
//! error, never a per-request one.

use crate::error::{CvSenseError, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

const BUILTIN_BANK: &str = include_str!("../data/skills_bank.json");

/// Closed set of category tags that suggestion templates bind to.
///
/// Bound from free-form category names at vocabulary load so a bank with
/// unrecognized categories degrades to `General` instead of silently
/// missing its template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryTag {
    DataEngineeringCore,
    Mlops,
    CloudAzure,
    DeepLearning,
    Nlp,
    GenaiLlms,
    DatabasesWarehousingBi,
    TestingCiCdDevops,
    General,
}

impl CategoryTag {
    pub fn from_name(name: &str) -> Self {
        match name {
            "data_engineering_core" => CategoryTag::DataEngineeringCore,
            "mlops" => CategoryTag::Mlops,
            "cloud_azure" => CategoryTag::CloudAzure,
            "deep_learning" => CategoryTag::DeepLearning,
            "nlp" => CategoryTag::Nlp,
            "genai_llms" => CategoryTag::GenaiLlms,
            "databases_warehousing_bi" => CategoryTag::DatabasesWarehousingBi,
            "testing_ci_cd_devops" => CategoryTag::TestingCiCdDevops,
            _ => CategoryTag::General,
        }
    }
}

/// On-disk shape of a skills bank.
#[derive(Debug, Deserialize)]
struct RawBank {
    skills: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    synonyms: BTreeMap<String, String>,
}

/// Immutable reference vocabulary shared by extractors and scorers.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    categories: BTreeMap<String, BTreeSet<String>>,
    synonyms: HashMap<String, String>,
    category_weights: HashMap<String, f64>,
    /// Reverse index skill -> owning category, built once at load time.
    category_of: HashMap<String, String>,
    tags: HashMap<String, CategoryTag>,
}

impl SkillVocabulary {
    /// Load the skills bank shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_BANK)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawBank = serde_json::from_str(json)
            .map_err(|e| CvSenseError::Vocabulary(format!("Malformed skills bank: {}", e)))?;

        let mut categories: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut category_of: HashMap<String, String> = HashMap::new();

        for (category, skills) in &raw.skills {
            let mut set = BTreeSet::new();
            for skill in skills {
                let skill = skill.trim().to_lowercase();
                if skill.is_empty() {
                    return Err(CvSenseError::Vocabulary(format!(
                        "Empty skill entry in category '{}'",
                        category
                    )));
                }
                if let Some(owner) = category_of.get(&skill) {
                    return Err(CvSenseError::Vocabulary(format!(
                        "Skill '{}' appears in both '{}' and '{}'",
                        skill, owner, category
                    )));
                }
                category_of.insert(skill.clone(), category.clone());
                set.insert(skill);
            }
            categories.insert(category.clone(), set);
        }

        let mut synonyms = HashMap::new();
        for (alias, target) in &raw.synonyms {
            let alias = alias.trim().to_lowercase();
            let target = target.trim().to_lowercase();
            if !category_of.contains_key(&target) {
                return Err(CvSenseError::Vocabulary(format!(
                    "Synonym '{}' maps to '{}', which is not a canonical skill",
                    alias, target
                )));
            }
            synonyms.insert(alias, target);
        }

        let category_weights = categories
            .keys()
            .map(|c| (c.clone(), default_weight(c)))
            .collect();

        let tags = categories
            .keys()
            .map(|c| (c.clone(), CategoryTag::from_name(c)))
            .collect();

        Ok(Self {
            categories,
            synonyms,
            category_weights,
            category_of,
            tags,
        })
    }

    /// Map an alias (lower-cased) to its canonical form, falling back to
    /// identity when no mapping exists.
    pub fn resolve(&self, term: &str) -> String {
        let t = term.trim().to_lowercase();
        self.synonyms.get(&t).cloned().unwrap_or(t)
    }

    /// The category owning a canonical skill, if any.
    pub fn category_of(&self, skill: &str) -> Option<&str> {
        self.category_of.get(skill).map(|s| s.as_str())
    }

    /// Importance weight of a skill's owning category; 1.0 for skills
    /// outside the bank.
    pub fn weight_of(&self, skill: &str) -> f64 {
        self.category_of(skill)
            .and_then(|c| self.category_weights.get(c))
            .copied()
            .unwrap_or(1.0)
    }

    pub fn tag_of(&self, category: &str) -> CategoryTag {
        self.tags.get(category).copied().unwrap_or(CategoryTag::General)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.categories.iter()
    }

    pub fn canonical_skills(&self) -> impl Iterator<Item = &String> {
        self.categories.values().flatten()
    }

    pub fn aliases(&self) -> impl Iterator<Item = &String> {
        self.synonyms.keys()
    }

    pub fn skill_count(&self) -> usize {
        self.categories.values().map(|s| s.len()).sum()
    }
}

/// Per-category importance weights; categories outside this table score 1.0.
fn default_weight(category: &str) -> f64 {
    match category {
        "mlops" | "data_engineering_core" | "cloud_azure" => 2.0,
        "ml_core" | "deep_learning" | "genai_llms" => 1.8,
        "time_series" | "nlp" | "computer_vision" => 1.6,
        "programming_languages" | "cloud_aws" | "cloud_gcp" => 1.5,
        "recommenders" | "databases_warehousing_bi" => 1.4,
        "data_quality_governance" | "testing_ci_cd_devops" => 1.3,
        "data_frame_and_compute" | "metrics_eval" => 1.2,
        "security_governance_ops" => 1.1,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_bank_loads() {
        let vocab = SkillVocabulary::builtin().unwrap();
        assert!(vocab.skill_count() > 100);
        assert_eq!(vocab.category_of("python"), Some("programming_languages"));
        assert_eq!(vocab.resolve("sklearn"), "scikit-learn");
    }

    #[test]
    fn test_resolve_falls_back_to_identity() {
        let vocab = SkillVocabulary::builtin().unwrap();
        assert_eq!(vocab.resolve("Quantum Widgets"), "quantum widgets");
    }

    #[test]
    fn test_weight_lookup() {
        let vocab = SkillVocabulary::builtin().unwrap();
        assert_eq!(vocab.weight_of("mlflow"), 2.0);
        assert_eq!(vocab.weight_of("python"), 1.5);
        assert_eq!(vocab.weight_of("not-in-bank"), 1.0);
    }

    #[test]
    fn test_missing_skills_field_is_fatal() {
        let err = SkillVocabulary::from_json_str(r#"{"synonyms": {}}"#).unwrap_err();
        assert!(matches!(err, CvSenseError::Vocabulary(_)));
    }

    #[test]
    fn test_duplicate_skill_across_categories_is_fatal() {
        let json = r#"{"skills": {"a": ["python"], "b": ["python"]}}"#;
        let err = SkillVocabulary::from_json_str(json).unwrap_err();
        assert!(matches!(err, CvSenseError::Vocabulary(_)));
    }

    #[test]
    fn test_dangling_synonym_target_is_fatal() {
        let json = r#"{"skills": {"a": ["python"]}, "synonyms": {"py": "snake"}}"#;
        let err = SkillVocabulary::from_json_str(json).unwrap_err();
        assert!(matches!(err, CvSenseError::Vocabulary(_)));
    }

    #[test]
    fn test_category_tags_bind_at_load() {
        let vocab = SkillVocabulary::builtin().unwrap();
        assert_eq!(vocab.tag_of("mlops"), CategoryTag::Mlops);
        assert_eq!(vocab.tag_of("tools_editors"), CategoryTag::General);
        assert_eq!(vocab.tag_of("never heard of it"), CategoryTag::General);
    }
}
