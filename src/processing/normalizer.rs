//! Text normalization
//!
//! Strips noise (URLs, emails, phone-like digit runs, 4-digit years, junk
//! punctuation) and collapses whitespace. Normalization is idempotent:
//! running it on already-normalized text returns the text unchanged.

use regex::Regex;

pub struct TextNormalizer {
    url_regex: Regex,
    email_regex: Regex,
    phone_regex: Regex,
    year_regex: Regex,
    junk_regex: Regex,
    non_matchable_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let url_regex = Regex::new(r"https?://\S+|www\.\S+").expect("Invalid URL regex");

        let email_regex =
            Regex::new(r"\b[\w.\-]+@[\w.\-]+\.\w+\b").expect("Invalid email regex");

        let phone_regex = Regex::new(r"\+?\d[\d\-\s()]{6,}\d").expect("Invalid phone regex");

        // 4-digit years 1900-2099
        let year_regex = Regex::new(r"\b(19|20)\d{2}\b").expect("Invalid year regex");

        let junk_regex = Regex::new(r"[•·●■▪➤▶►\t]").expect("Invalid junk regex");

        let non_matchable_regex =
            Regex::new(r"[^a-z0-9\-+./ ]").expect("Invalid character class regex");

        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        Self {
            url_regex,
            email_regex,
            phone_regex,
            year_regex,
            junk_regex,
            non_matchable_regex,
            whitespace_regex,
        }
    }

    /// Normalize raw document text: lower-case, replace noise with spaces,
    /// normalize hyphen variants, collapse whitespace.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut t = text.to_lowercase();
        t = t.replace(['\u{2013}', '\u{2014}'], "-");
        t = self.url_regex.replace_all(&t, " ").into_owned();
        t = self.email_regex.replace_all(&t, " ").into_owned();
        // junk separators become spaces before the phone pass runs, so a
        // digit run split by bullets or tabs is caught on the first
        // application rather than the second
        t = self.junk_regex.replace_all(&t, " ").into_owned();
        t = self.whitespace_regex.replace_all(&t, " ").into_owned();
        t = self.phone_regex.replace_all(&t, " ").into_owned();
        t = self.year_regex.replace_all(&t, " ").into_owned();
        self.whitespace_regex.replace_all(&t, " ").trim().to_string()
    }

    /// Stricter variant used for skill matching: additionally drops every
    /// character outside `[a-z0-9\-+./ ]`.
    pub fn normalize_for_matching(&self, text: &str) -> String {
        let t = self.normalize(text);
        let t = self.non_matchable_regex.replace_all(&t, " ").into_owned();
        let t = self.whitespace_regex.replace_all(&t, " ").into_owned();
        // stripping punctuation can expose digit runs that now look like
        // phone numbers or bare years
        let t = self.phone_regex.replace_all(&t, " ").into_owned();
        let t = self.year_regex.replace_all(&t, " ");
        self.whitespace_regex.replace_all(&t, " ").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_urls_emails_phones_years() {
        let normalizer = TextNormalizer::new();
        let text = "Contact jane.doe@example.com or +41 79 555 12 34, see https://example.com/cv (since 2019)";
        let cleaned = normalizer.normalize(text);

        assert!(!cleaned.contains("example.com"));
        assert!(!cleaned.contains("555"));
        assert!(!cleaned.contains("2019"));
        assert!(!cleaned.contains("https"));
    }

    #[test]
    fn test_hyphen_variants_and_bullets() {
        let normalizer = TextNormalizer::new();
        let cleaned = normalizer.normalize("• data\u{2013}driven \u{2014} pipelines\t");
        assert_eq!(cleaned, "data-driven - pipelines");
    }

    #[test]
    fn test_whitespace_collapsed_and_trimmed() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize("  a   b \n c  "), "a b c");
    }

    #[test]
    fn test_empty_input() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize_for_matching(""), "");
    }

    #[test]
    fn test_idempotent() {
        let normalizer = TextNormalizer::new();
        let samples = [
            "Senior Data Engineer — Python, Spark & Azure (2018-2023). Reach me at me@host.com",
            "• Built ETL pipelines with Airflow\n• Deployed on https://cloud.example.io",
            "plain already-clean text",
            "",
        ];
        for sample in samples {
            let once = normalizer.normalize(sample);
            assert_eq!(normalizer.normalize(&once), once);

            let strict = normalizer.normalize_for_matching(sample);
            assert_eq!(normalizer.normalize_for_matching(&strict), strict);
        }
    }

    #[test]
    fn test_idempotent_on_junk_separated_digits() {
        let normalizer = TextNormalizer::new();
        let samples = ["12•345•678", "fax\t12\t345\t678", "ref 12:345:678", "v_2019_final"];
        for sample in samples {
            let once = normalizer.normalize(sample);
            assert_eq!(normalizer.normalize(&once), once, "normalize({:?})", sample);

            let strict = normalizer.normalize_for_matching(sample);
            assert_eq!(
                normalizer.normalize_for_matching(&strict),
                strict,
                "normalize_for_matching({:?})",
                sample
            );
        }
    }

    #[test]
    fn test_bullet_separated_digits_removed_in_one_pass() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize("12•345•678"), "");
        assert_eq!(normalizer.normalize("fax\t12\t345\t678"), "fax");
    }

    #[test]
    fn test_matching_variant_drops_punctuation() {
        let normalizer = TextNormalizer::new();
        let cleaned = normalizer.normalize_for_matching("Python, SQL; C++ & CI/CD!");
        assert_eq!(cleaned, "python sql c++ ci/cd");
    }
}
