//! Recruiter-style prose summary of a match result

use crate::processing::matcher::MatchResult;

const STRENGTHS_SHOWN: usize = 6;
const GAPS_SHOWN: usize = 5;
const WEAK_COVERAGE_CEILING: f64 = 90.0;
const BROAD_JD_SKILLS: usize = 25;

fn prettify(category: &str) -> String {
    category.replace('_', " ")
}

/// Compose a short recruiter-voice paragraph: overall score, strongest and
/// weakest category, headline strengths and gaps, and a closing verdict.
pub fn narrate(result: &MatchResult) -> String {
    let mut sentences = vec![format!(
        "This CV aligns at {:.0}% with the role requirements.",
        result.score
    )];

    let mut best: Option<(&String, f64)> = None;
    let mut weakest: Option<(&String, f64)> = None;
    for (category, coverage) in &result.category_breakdown {
        let pct = coverage.coverage_pct();
        if best.map_or(true, |(_, b)| pct > b) {
            best = Some((category, pct));
        }
        if weakest.map_or(true, |(_, w)| pct < w) {
            weakest = Some((category, pct));
        }
    }

    if let Some((category, pct)) = best {
        sentences.push(format!(
            "Strong coverage in {} ({:.0}%).",
            prettify(category),
            pct
        ));
    }
    if let Some((category, pct)) = weakest {
        if pct < WEAK_COVERAGE_CEILING {
            sentences.push(format!(
                "Lower coverage in {} ({:.0}%).",
                prettify(category),
                pct
            ));
        }
    }

    if !result.matched.is_empty() {
        let strengths: Vec<&str> = result
            .matched
            .iter()
            .take(STRENGTHS_SHOWN)
            .map(|s| s.as_str())
            .collect();
        sentences.push(format!("Key strengths: {}.", strengths.join(", ")));
    }
    if !result.missing.is_empty() {
        let gaps: Vec<&str> = result
            .missing
            .iter()
            .take(GAPS_SHOWN)
            .map(|s| s.as_str())
            .collect();
        sentences.push(format!("To improve fit, add evidence for: {}.", gaps.join(", ")));
    }

    if result.jd_skills.len() >= BROAD_JD_SKILLS && result.score >= 85.0 {
        sentences.push(
            "Overall, this profile is well-suited; minor additions can push it above 90%."
                .to_string(),
        );
    } else if result.score < 70.0 {
        sentences.push(
            "Significant gaps remain; focus on core tools and platform coverage mentioned in the JD."
                .to_string(),
        );
    }

    sentences.join(" ")
}
