//! Semantic coverage scoring for open-vocabulary keyphrases
//!
//! Complements the fixed-vocabulary matcher: JD and CV keyphrases are
//! embedded, each JD phrase is paired with its highest-similarity CV
//! phrase, and coverage is the importance-weighted fraction of JD phrases
//! whose best similarity clears the threshold.

use crate::error::{CvSenseError, Result};
use model2vec_rs::model::StaticModel;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A pre-trained embedding function, loaded once and read-only thereafter.
///
/// Output vectors must correspond one-to-one, in order, with the input
/// phrase list.
pub trait Embedder {
    fn embed(&self, texts: &[String]) -> Vec<Vec<f32>>;
}

/// Model2Vec-backed embedder.
pub struct StaticEmbedder {
    model: StaticModel,
}

impl StaticEmbedder {
    pub fn load(model_path: &Path) -> Result<Self> {
        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        )
        .map_err(|e| CvSenseError::Embedding(format!("Failed to load embedding model: {}", e)))?;
        Ok(Self { model })
    }
}

impl Embedder for StaticEmbedder {
    fn embed(&self, texts: &[String]) -> Vec<Vec<f32>> {
        self.model.encode(texts)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseMatch {
    pub jd_phrase: String,
    pub cv_phrase: String,
    pub similarity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticCoverage {
    pub matched: Vec<PhraseMatch>,
    pub missing: Vec<String>,
    /// Importance-weighted coverage, 0-100, rounded to two decimals.
    pub score: f64,
}

impl SemanticCoverage {
    fn empty() -> Self {
        Self {
            matched: Vec::new(),
            missing: Vec::new(),
            score: 0.0,
        }
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Score how well weighted JD keyphrases are covered by CV keyphrases.
///
/// Empty inputs are well-defined results, not errors: no JD phrases
/// scores 0 with empty lists; no CV phrases reports every JD phrase
/// missing (checked before any embedding happens).
pub fn cover(
    embedder: &dyn Embedder,
    jd_phrases: &[(String, f32)],
    cv_phrases: &[String],
    threshold: f32,
) -> SemanticCoverage {
    if jd_phrases.is_empty() {
        return SemanticCoverage::empty();
    }
    if cv_phrases.is_empty() {
        return SemanticCoverage {
            matched: Vec::new(),
            missing: jd_phrases.iter().map(|(p, _)| p.clone()).collect(),
            score: 0.0,
        };
    }

    let jd_texts: Vec<String> = jd_phrases.iter().map(|(p, _)| p.clone()).collect();
    let jd_vectors = embedder.embed(&jd_texts);
    let cv_vectors = embedder.embed(cv_phrases);

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut covered_weight = 0.0f64;
    let total_weight: f64 = jd_phrases.iter().map(|(_, w)| *w as f64).sum();

    for (i, (phrase, weight)) in jd_phrases.iter().enumerate() {
        let mut best_sim = f32::MIN;
        let mut best_idx = 0;
        for (j, cv_vec) in cv_vectors.iter().enumerate() {
            let sim = cosine_similarity(&jd_vectors[i], cv_vec);
            if sim > best_sim {
                best_sim = sim;
                best_idx = j;
            }
        }

        if best_sim >= threshold {
            covered_weight += *weight as f64;
            matched.push(PhraseMatch {
                jd_phrase: phrase.clone(),
                cv_phrase: cv_phrases[best_idx].clone(),
                similarity: best_sim,
            });
        } else {
            missing.push(phrase.clone());
        }
    }

    let score = if total_weight > 0.0 {
        (100.0 * covered_weight / total_weight * 100.0).round() / 100.0
    } else {
        0.0
    };

    SemanticCoverage {
        matched,
        missing,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Deterministic embedder mapping known phrases to fixed vectors.
    struct StubEmbedder {
        vectors: HashMap<String, Vec<f32>>,
    }

    impl StubEmbedder {
        fn new(entries: &[(&str, [f32; 3])]) -> Self {
            let vectors = entries
                .iter()
                .map(|(p, v)| (p.to_string(), v.to_vec()))
                .collect();
            Self { vectors }
        }
    }

    impl Embedder for StubEmbedder {
        fn embed(&self, texts: &[String]) -> Vec<Vec<f32>> {
            texts
                .iter()
                .map(|t| self.vectors.get(t).cloned().unwrap_or_else(|| vec![0.0; 3]))
                .collect()
        }
    }

    fn weighted(phrases: &[(&str, f32)]) -> Vec<(String, f32)> {
        phrases.iter().map(|(p, w)| (p.to_string(), *w)).collect()
    }

    #[test]
    fn test_empty_jd_scores_zero() {
        let embedder = StubEmbedder::new(&[]);
        let result = cover(&embedder, &[], &["rust".to_string()], 0.7);
        assert_eq!(result.score, 0.0);
        assert!(result.matched.is_empty());
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_empty_cv_reports_all_missing() {
        let embedder = StubEmbedder::new(&[]);
        let jd = weighted(&[("stream processing", 1.0), ("cost control", 0.5)]);
        let result = cover(&embedder, &jd, &[], 0.7);

        assert_eq!(result.score, 0.0);
        assert!(result.matched.is_empty());
        assert_eq!(result.missing, vec!["stream processing", "cost control"]);
    }

    #[test]
    fn test_partition_and_score() {
        let embedder = StubEmbedder::new(&[
            ("stream processing", [1.0, 0.0, 0.0]),
            ("kafka streams", [0.9, 0.1, 0.0]),
            ("cost control", [0.0, 1.0, 0.0]),
        ]);
        let jd = weighted(&[("stream processing", 1.0), ("cost control", 1.0)]);
        let cv = vec!["kafka streams".to_string()];

        let result = cover(&embedder, &jd, &cv, 0.7);

        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched[0].jd_phrase, "stream processing");
        assert_eq!(result.matched[0].cv_phrase, "kafka streams");
        assert_eq!(result.missing, vec!["cost control"]);
        // each JD phrase lands in exactly one of matched/missing
        assert_eq!(result.matched.len() + result.missing.len(), jd.len());
        assert_eq!(result.score, 50.0);
    }

    #[test]
    fn test_importance_weighting() {
        let embedder = StubEmbedder::new(&[
            ("stream processing", [1.0, 0.0, 0.0]),
            ("cost control", [0.0, 1.0, 0.0]),
        ]);
        let jd = weighted(&[("stream processing", 0.8), ("cost control", 0.2)]);
        let cv = vec!["stream processing".to_string()];

        let result = cover(&embedder, &jd, &cv, 0.7);
        assert_eq!(result.score, 80.0);
    }

    #[test]
    fn test_threshold_gates_coverage() {
        let embedder = StubEmbedder::new(&[
            ("stream processing", [1.0, 0.0, 0.0]),
            ("batch jobs", [0.5, 0.5, 0.0]),
        ]);
        let jd = weighted(&[("stream processing", 1.0)]);
        let cv = vec!["batch jobs".to_string()];

        let strict = cover(&embedder, &jd, &cv, 0.9);
        assert!(strict.matched.is_empty());

        let loose = cover(&embedder, &jd, &cv, 0.5);
        assert_eq!(loose.matched.len(), 1);
    }

    #[test]
    fn test_cosine_similarity_edges() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }
}
