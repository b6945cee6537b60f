//! Skill extraction against the controlled vocabulary
//!
//! Two phases: exact whole-word phrase matching over every canonical skill
//! and synonym alias (Aho-Corasick, overlapping so phrases nested inside
//! longer phrases still count), then a fuzzy-rescue pass that tests only
//! the skills the exact phase missed against 1..n-token windows of the
//! text. Rescue is scoped to missing skills to bound cost and avoid false
//! positives on terms already found.

use crate::config::MatchingConfig;
use crate::processing::fuzzy::token_set_ratio;
use crate::processing::normalizer::TextNormalizer;
use crate::vocabulary::SkillVocabulary;
use aho_corasick::AhoCorasick;
use crate::error::{CvSenseError, Result};
use std::collections::BTreeSet;

pub struct SkillExtractor<'v> {
    vocab: &'v SkillVocabulary,
    normalizer: TextNormalizer,
    phrase_matcher: AhoCorasick,
    phrases: Vec<String>,
    fuzzy_threshold: f64,
    max_ngram: usize,
}

impl<'v> SkillExtractor<'v> {
    pub fn new(vocab: &'v SkillVocabulary, matching: &MatchingConfig) -> Result<Self> {
        let mut phrases: Vec<String> = vocab
            .canonical_skills()
            .chain(vocab.aliases())
            .cloned()
            .collect();
        phrases.sort();
        phrases.dedup();

        let phrase_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&phrases)
            .map_err(|e| {
                CvSenseError::TextProcessing(format!("Failed to build phrase matcher: {}", e))
            })?;

        Ok(Self {
            vocab,
            normalizer: TextNormalizer::new(),
            phrase_matcher,
            phrases,
            fuzzy_threshold: matching.fuzzy_rescue_threshold,
            max_ngram: matching.max_ngram,
        })
    }

    /// Extract the canonical skill set found in `text`. Unmatched input
    /// yields an empty set; nothing here errors per request.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let norm = self.normalizer.normalize_for_matching(text);
        if norm.is_empty() {
            return BTreeSet::new();
        }

        let mut found = self.exact_phrase_hits(&norm);

        let missing: Vec<&String> = self
            .vocab
            .canonical_skills()
            .filter(|s| !found.contains(*s))
            .collect();
        for skill in self.fuzzy_rescue(&norm, &missing) {
            found.insert(skill);
        }

        found
    }

    fn exact_phrase_hits(&self, norm: &str) -> BTreeSet<String> {
        let mut hits = BTreeSet::new();
        let bytes = norm.as_bytes();

        for mat in self.phrase_matcher.find_overlapping_iter(norm) {
            // whole-word occurrence: no alphanumeric neighbor on either side
            let before_ok =
                mat.start() == 0 || !bytes[mat.start() - 1].is_ascii_alphanumeric();
            let after_ok =
                mat.end() == norm.len() || !bytes[mat.end()].is_ascii_alphanumeric();
            if before_ok && after_ok {
                let phrase = &self.phrases[mat.pattern().as_usize()];
                hits.insert(self.vocab.resolve(phrase));
            }
        }

        hits
    }

    /// Rescue near-miss spellings ("ml flow" -> "mlflow") for skills the
    /// exact phase did not find.
    fn fuzzy_rescue(&self, norm: &str, missing: &[&String]) -> Vec<String> {
        if missing.is_empty() {
            return Vec::new();
        }

        let tokens: Vec<&str> = norm.split(' ').filter(|t| !t.is_empty()).collect();
        let mut grams: BTreeSet<String> = BTreeSet::new();
        for n in 1..=self.max_ngram {
            for window in tokens.windows(n) {
                grams.insert(window.join(" "));
            }
        }

        let mut rescued = Vec::new();
        for skill in missing {
            for gram in &grams {
                if token_set_ratio(skill, gram) >= self.fuzzy_threshold {
                    rescued.push((*skill).clone());
                    break;
                }
            }
        }
        rescued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn extractor(vocab: &SkillVocabulary) -> SkillExtractor<'_> {
        SkillExtractor::new(vocab, &Config::default().matching).unwrap()
    }

    #[test]
    fn test_exact_extraction() {
        let vocab = SkillVocabulary::builtin().unwrap();
        let extractor = extractor(&vocab);

        let skills = extractor.extract("Experienced with Python, SQL and Power BI dashboards.");
        assert!(skills.contains("python"));
        assert!(skills.contains("sql"));
        assert!(skills.contains("power bi"));
    }

    #[test]
    fn test_synonyms_canonicalized() {
        let vocab = SkillVocabulary::builtin().unwrap();
        let extractor = extractor(&vocab);

        let skills = extractor.extract("We deploy sklearn models on k8s clusters.");
        assert!(skills.contains("scikit-learn"));
        assert!(skills.contains("kubernetes"));
        assert!(!skills.contains("sklearn"));
        assert!(!skills.contains("k8s"));
    }

    #[test]
    fn test_word_boundaries_respected() {
        let vocab = SkillVocabulary::builtin().unwrap();
        let extractor = extractor(&vocab);

        let skills = extractor.extract("Heavy pyspark user");
        assert!(skills.contains("pyspark"));
        // "spark" only occurs embedded in "pyspark"
        assert!(!skills.contains("spark"));
    }

    #[test]
    fn test_fuzzy_rescue_of_spacing_variant() {
        let vocab = SkillVocabulary::builtin().unwrap();
        let extractor = extractor(&vocab);

        let skills = extractor.extract("Experiment tracking with ml flow in production");
        assert!(skills.contains("mlflow"));
    }

    #[test]
    fn test_empty_and_unmatched_input() {
        let vocab = SkillVocabulary::builtin().unwrap();
        let extractor = extractor(&vocab);

        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("gardening and watercolor painting").is_empty());
    }

    #[test]
    fn test_single_skill_bank() {
        let vocab = SkillVocabulary::from_json_str(
            r#"{"skills": {"languages": ["python"]}, "synonyms": {}}"#,
        )
        .unwrap();
        let extractor = extractor(&vocab);

        let jd = extractor.extract("Requires Python and SQL");
        let cv = extractor.extract("5 years Python experience");
        assert_eq!(jd.into_iter().collect::<Vec<_>>(), vec!["python"]);
        assert_eq!(cv.into_iter().collect::<Vec<_>>(), vec!["python"]);
    }
}
