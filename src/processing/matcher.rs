//! Matching and scoring of extracted skill sets

use crate::vocabulary::SkillVocabulary;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Result of comparing a CV skill set against a JD skill set.
///
/// Skill lists are lexicographically sorted for deterministic reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Weighted match score, 0-100, rounded to two decimals.
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
    pub jd_skills: Vec<String>,
    pub cv_skills: Vec<String>,
    pub category_breakdown: BTreeMap<String, CategoryCoverage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCoverage {
    pub jd_total: usize,
    pub matched: usize,
}

impl CategoryCoverage {
    pub fn coverage_pct(&self) -> f64 {
        if self.jd_total == 0 {
            0.0
        } else {
            100.0 * self.matched as f64 / self.jd_total as f64
        }
    }
}

/// Compare two canonical skill sets and compute the weighted match score.
///
/// `matched = jd ∩ cv`, `missing = jd − cv`, `extra = cv − jd`. The score
/// weighs each JD skill by its category weight; an empty JD skill set
/// scores 0, not undefined. The breakdown only reports categories with at
/// least one JD skill.
pub fn analyse(
    cv_skills: &BTreeSet<String>,
    jd_skills: &BTreeSet<String>,
    vocab: &SkillVocabulary,
) -> MatchResult {
    let matched: BTreeSet<String> = jd_skills.intersection(cv_skills).cloned().collect();
    let missing: BTreeSet<String> = jd_skills.difference(cv_skills).cloned().collect();
    let extra: BTreeSet<String> = cv_skills.difference(jd_skills).cloned().collect();

    let denom: f64 = jd_skills.iter().map(|s| vocab.weight_of(s)).sum();
    let score = if denom > 0.0 {
        let num: f64 = matched.iter().map(|s| vocab.weight_of(s)).sum();
        (100.0 * num / denom * 100.0).round() / 100.0
    } else {
        0.0
    };

    let mut category_breakdown = BTreeMap::new();
    for (category, skills) in vocab.categories() {
        let jd_total = jd_skills.iter().filter(|s| skills.contains(*s)).count();
        if jd_total == 0 {
            continue;
        }
        let matched_count = matched.iter().filter(|s| skills.contains(*s)).count();
        category_breakdown.insert(
            category.clone(),
            CategoryCoverage {
                jd_total,
                matched: matched_count,
            },
        );
    }

    MatchResult {
        score,
        matched: matched.into_iter().collect(),
        missing: missing.into_iter().collect(),
        extra: extra.into_iter().collect(),
        jd_skills: jd_skills.iter().cloned().collect(),
        cv_skills: cv_skills.iter().cloned().collect(),
        category_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_set_algebra() {
        let vocab = SkillVocabulary::builtin().unwrap();
        let cv = set(&["python", "pandas", "docker"]);
        let jd = set(&["python", "spark", "docker", "mlflow"]);

        let result = analyse(&cv, &jd, &vocab);

        assert_eq!(result.matched, vec!["docker", "python"]);
        assert_eq!(result.missing, vec!["mlflow", "spark"]);
        assert_eq!(result.extra, vec!["pandas"]);

        // matched ∪ missing == jd, matched ∩ missing == ∅
        let mut reunion: Vec<String> = result
            .matched
            .iter()
            .chain(result.missing.iter())
            .cloned()
            .collect();
        reunion.sort();
        assert_eq!(reunion, result.jd_skills);
    }

    #[test]
    fn test_equal_weights_score() {
        // two JD skills of equal weight, one matched -> 50.0
        let vocab = SkillVocabulary::from_json_str(
            r#"{"skills": {"general": ["python", "sql"]}, "synonyms": {}}"#,
        )
        .unwrap();
        let result = analyse(&set(&["python"]), &set(&["python", "sql"]), &vocab);
        assert_eq!(result.score, 50.0);
    }

    #[test]
    fn test_full_match_scores_100() {
        let vocab = SkillVocabulary::builtin().unwrap();
        let jd = set(&["python", "mlflow"]);
        let result = analyse(&jd, &jd, &vocab);
        assert_eq!(result.score, 100.0);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_empty_jd_scores_zero() {
        let vocab = SkillVocabulary::builtin().unwrap();
        let result = analyse(&set(&["python"]), &BTreeSet::new(), &vocab);
        assert_eq!(result.score, 0.0);
        assert!(result.category_breakdown.is_empty());
        assert_eq!(result.extra, vec!["python"]);
    }

    #[test]
    fn test_weighted_score() {
        // mlflow (mlops, 2.0) missing; python (languages, 1.5) matched
        let vocab = SkillVocabulary::builtin().unwrap();
        let result = analyse(&set(&["python"]), &set(&["python", "mlflow"]), &vocab);
        let expected = (100.0 * 1.5 / 3.5 * 100.0_f64).round() / 100.0;
        assert_eq!(result.score, expected);
        assert!(result.score > 0.0 && result.score < 100.0);
    }

    #[test]
    fn test_breakdown_skips_absent_categories() {
        let vocab = SkillVocabulary::builtin().unwrap();
        let result = analyse(
            &set(&["python", "tableau"]),
            &set(&["python", "mlflow"]),
            &vocab,
        );

        assert!(result.category_breakdown.contains_key("programming_languages"));
        assert!(result.category_breakdown.contains_key("mlops"));
        // tableau is CV-only; its category has no JD presence
        assert!(!result.category_breakdown.contains_key("databases_warehousing_bi"));
        for coverage in result.category_breakdown.values() {
            assert!(coverage.jd_total > 0);
        }
    }

    #[test]
    fn test_breakdown_counts() {
        let vocab = SkillVocabulary::builtin().unwrap();
        let result = analyse(
            &set(&["python", "sql"]),
            &set(&["python", "sql", "scala"]),
            &vocab,
        );
        let languages = &result.category_breakdown["programming_languages"];
        assert_eq!(languages.jd_total, 3);
        assert_eq!(languages.matched, 2);
    }
}
