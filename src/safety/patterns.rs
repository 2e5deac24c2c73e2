use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref IP_SHAPED: Regex = Regex::new(r"\b\d{1,3}(?:\.\d{1,3}){3}\b").unwrap();
    static ref ALNUM_RUN: Regex = Regex::new(r"[A-Za-z0-9]{32,}").unwrap();
    static ref DIGIT_RUN: Regex = Regex::new(r"\d{10,}").unwrap();
    static ref DASH_LETTER_DASH: Regex = Regex::new(r"(?i)-[a-z]-").unwrap();
}

const REPEAT_THRESHOLD: usize = 5;

/// A long run that mixes letters and digits reads as a generated token.
fn has_random_token(text: &str) -> bool {
    ALNUM_RUN.find_iter(text).any(|m| {
        let run = m.as_str();
        run.chars().any(|c| c.is_ascii_digit()) && run.chars().any(|c| c.is_ascii_alphabetic())
    })
}

// The regex crate has no backreferences, so repeats are counted by hand.
fn has_repeated_chars(text: &str) -> bool {
    let mut previous = None;
    let mut run = 0;
    for c in text.chars() {
        if Some(c) == previous {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }
        if run >= REPEAT_THRESHOLD {
            return true;
        }
    }
    false
}

/// Names of the suspicious patterns found in `text`.
pub fn suspicious_patterns(text: &str) -> Vec<&'static str> {
    let mut found = Vec::new();
    if IP_SHAPED.is_match(text) {
        found.push("IP address");
    }
    if has_random_token(text) {
        found.push("random-looking token");
    }
    if has_repeated_chars(text) {
        found.push("repeated characters");
    }
    if DIGIT_RUN.is_match(text) {
        found.push("long digit sequence");
    }
    if DASH_LETTER_DASH.is_match(text) {
        found.push("dash-letter-dash");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_urls() {
        assert!(suspicious_patterns("https://example.com").is_empty());
        assert!(suspicious_patterns("https://google.com/search?q=rust+lang").is_empty());
        assert!(suspicious_patterns("https://example.tk?redirect=http://bad.com").is_empty());
    }

    #[test]
    fn test_each_pattern() {
        assert_eq!(suspicious_patterns("http://10.0.0.1/admin"), vec!["IP address"]);
        assert_eq!(
            suspicious_patterns("https://x.com/a8f3k29dj38fk20dk39fj20dk39fk20dk3"),
            vec!["random-looking token"]
        );
        assert_eq!(
            suspicious_patterns("https://freeeeee.com"),
            vec!["repeated characters"]
        );
        assert_eq!(
            suspicious_patterns("https://example.com/id/12345678901"),
            vec!["long digit sequence"]
        );
        assert_eq!(
            suspicious_patterns("https://pay-p-al.com"),
            vec!["dash-letter-dash"]
        );
    }

    #[test]
    fn test_long_plain_word_is_not_a_token() {
        assert!(!has_random_token("abcdefghijklmnopqrstuvwxyzabcdefghij"));
        assert!(!has_repeated_chars("aaaa"));
        assert!(has_repeated_chars("aaaaa"));
    }
}
