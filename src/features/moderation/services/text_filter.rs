use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Six or more characters in a row that are neither vowels nor whitespace.
    /// Applied to lowercased text, so digits and punctuation count as well.
    static ref CONSONANT_RUN_RE: Regex = Regex::new(r"[^aeiou\s]{6,}").unwrap();

    /// Uppercase run immediately followed by a lowercase run, e.g. "QWEasdf"
    static ref JUMBLED_CASE_RE: Regex = Regex::new(r"[A-Z]{3,}[a-z]{3,}").unwrap();
}

/// Known junk fragments, matched case-insensitively
const JUNK_SUBSTRINGS: &[&str] = &[
    "asdf",
    "qwerty",
    "uyrithjalfy",
    "sd;ao9fucgq3jbc",
    "lorem",
    "dummy",
];

const SHORT_MAX_TOKENS: usize = 2;
const SHORT_MAX_CHARS: usize = 10;

/// Local pre-filter for empty, garbled or trivially short report text.
///
/// Best effort only: no network calls, no guarantee against false negatives.
pub fn looks_like_gibberish(text: &str) -> bool {
    if text.is_empty() {
        return true;
    }

    let lowered = text.to_lowercase();

    if CONSONANT_RUN_RE.is_match(&lowered) {
        return true;
    }

    if JUMBLED_CASE_RE.is_match(text) {
        return true;
    }

    if text.split_whitespace().count() <= SHORT_MAX_TOKENS
        && text.chars().count() < SHORT_MAX_CHARS
    {
        return true;
    }

    JUNK_SUBSTRINGS.iter().any(|junk| lowered.contains(junk))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_gibberish() {
        assert!(looks_like_gibberish(""));
    }

    #[test]
    fn test_short_input_is_gibberish() {
        for text in ["hi", "a b", "pothole", "   ", "big hole"] {
            assert!(looks_like_gibberish(text), "{:?} should be flagged", text);
        }
    }

    #[test]
    fn test_short_rule_needs_both_conditions() {
        // Three tokens, still under ten characters
        assert!(!looks_like_gibberish("a bo ice"));
        // Two tokens, ten characters or more
        assert!(!looks_like_gibberish("overflowing bin"));
    }

    #[test]
    fn test_consonant_run_is_gibberish() {
        assert!(looks_like_gibberish("please fix xkcdfgh near the park"));
        assert!(looks_like_gibberish("call me at 5551234 about the road"));
    }

    #[test]
    fn test_jumbled_case_is_gibberish() {
        assert!(looks_like_gibberish("the ROAdway near here is broken"));
        // Lowercase alone does not trigger the rule
        assert!(!looks_like_gibberish("the roadway near here is broken"));
    }

    #[test]
    fn test_denylist_is_case_insensitive() {
        assert!(looks_like_gibberish("This is a Lorem ipsum report"));
        assert!(looks_like_gibberish("garbage pile near DUMMY site"));
        assert!(looks_like_gibberish("the road qwerty is broken"));
    }

    #[test]
    fn test_real_report_passes() {
        assert!(!looks_like_gibberish("Large pothole on Main Street"));
        assert!(!looks_like_gibberish(
            "Garbage has not been collected for two weeks near the market"
        ));
    }
}
