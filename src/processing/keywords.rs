//! Open-vocabulary keyphrase extraction
//!
//! Feeds the semantic coverage path with phrases that are not limited to
//! the fixed skill bank. Frequency-based: stop words split the token
//! stream into runs, every 1-3 gram of a run is a candidate, and longer
//! phrases get a length bonus. Weights are normalized to [0, 1].

use crate::processing::normalizer::TextNormalizer;
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

const MAX_PHRASE_TOKENS: usize = 3;

pub struct KeyphraseExtractor {
    normalizer: TextNormalizer,
    stop_words: HashSet<&'static str>,
}

impl Default for KeyphraseExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyphraseExtractor {
    pub fn new() -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            stop_words: stop_words(),
        }
    }

    /// Extract up to `top_n` keyphrases as `(phrase, weight)` pairs,
    /// sorted by weight descending. Weights are in `[0, 1]` relative to
    /// the strongest phrase.
    pub fn extract(&self, text: &str, top_n: usize) -> Vec<(String, f32)> {
        let norm = self.normalizer.normalize(text);
        if norm.is_empty() || top_n == 0 {
            return Vec::new();
        }

        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut run: Vec<String> = Vec::new();

        for word in norm.unicode_words() {
            let keep = word.len() > 1
                && word.chars().any(|c| c.is_alphabetic())
                && !self.stop_words.contains(word);
            if keep {
                run.push(word.to_string());
            } else {
                self.count_run(&run, &mut counts);
                run.clear();
            }
        }
        self.count_run(&run, &mut counts);

        let mut scored: Vec<(String, f32)> = counts
            .into_iter()
            .map(|(phrase, count)| {
                let tokens = phrase.split(' ').count();
                (phrase, (count * tokens) as f32)
            })
            .collect();

        // deterministic order: score desc, then alphabetical
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(top_n);

        let max_score = scored.first().map(|(_, s)| *s).unwrap_or(1.0);
        scored
            .into_iter()
            .map(|(phrase, score)| (phrase, score / max_score))
            .collect()
    }

    fn count_run(&self, run: &[String], counts: &mut HashMap<String, usize>) {
        for n in 1..=MAX_PHRASE_TOKENS.min(run.len()) {
            for window in run.windows(n) {
                *counts.entry(window.join(" ")).or_insert(0) += 1;
            }
        }
    }
}

fn stop_words() -> HashSet<&'static str> {
    [
        "a", "an", "and", "are", "as", "at", "be", "been", "but", "by", "can", "could",
        "did", "do", "does", "for", "from", "had", "has", "have", "he", "her", "his",
        "how", "if", "in", "into", "is", "it", "its", "may", "might", "more", "most",
        "must", "no", "not", "of", "on", "or", "our", "out", "over", "own", "she",
        "should", "so", "some", "such", "than", "that", "the", "their", "them", "then",
        "there", "these", "they", "this", "those", "through", "to", "under", "until",
        "up", "was", "we", "well", "were", "what", "when", "where", "which", "while",
        "who", "will", "with", "would", "you", "your", "years", "year", "using", "use",
        "used", "including", "etc", "ability", "strong", "plus", "required", "preferred",
        "experience", "work", "working", "knowledge", "skills", "team", "role",
    ]
    .into_iter()
    .collect()
}
