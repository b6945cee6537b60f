//! Token-set string similarity used by the fuzzy-rescue pass.

use std::collections::BTreeSet;
use strsim::normalized_levenshtein;

/// Plain similarity ratio on a 0-100 scale.
fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    normalized_levenshtein(a, b) * 100.0
}

/// Token-set similarity ratio (0-100).
///
/// Tokens are split on whitespace and deduplicated; the score is the best
/// ratio among the intersection string, intersection + each side's
/// remainder, and the two combined strings. A shared token subset scores
/// 100 regardless of extra tokens on the other side. Spacing variants
/// ("ml flow" vs "mlflow") are caught by also comparing the despaced
/// forms.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    let sect = intersection.join(" ");
    let sect_a = join_parts(&sect, &only_a);
    let sect_b = join_parts(&sect, &only_b);

    let mut best = ratio(&sect_a, &sect_b);
    if !sect.is_empty() {
        best = best.max(ratio(&sect, &sect_a));
        best = best.max(ratio(&sect, &sect_b));
    }

    let despaced_a: String = a.split_whitespace().collect();
    let despaced_b: String = b.split_whitespace().collect();
    best.max(ratio(&despaced_a, &despaced_b))
}

fn join_parts(sect: &str, rest: &[&str]) -> String {
    let mut out = sect.to_string();
    for token in rest {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings() {
        assert_eq!(token_set_ratio("python", "python"), 100.0);
        assert_eq!(token_set_ratio("data pipelines", "data pipelines"), 100.0);
    }

    #[test]
    fn test_token_subset_scores_full() {
        assert_eq!(
            token_set_ratio("data pipelines", "pipelines data monitoring"),
            100.0
        );
    }

    #[test]
    fn test_spacing_variant_rescued() {
        assert!(token_set_ratio("mlflow", "ml flow") >= 92.0);
    }

    #[test]
    fn test_unrelated_strings_score_low() {
        assert!(token_set_ratio("python", "marketing") < 50.0);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(token_set_ratio("", "python"), 0.0);
        assert_eq!(token_set_ratio("python", ""), 0.0);
        assert_eq!(token_set_ratio("", ""), 0.0);
    }

    #[test]
    fn test_near_miss_below_threshold() {
        // one edit on a short word stays under the default 92 threshold
        assert!(token_set_ratio("python", "pythong") < 92.0);
    }
}
