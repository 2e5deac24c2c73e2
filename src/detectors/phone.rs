use super::{strip_prefix_ignore_case, Detector};
use crate::content::{ParsedData, PhoneContent};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref INTERNATIONAL: Regex = Regex::new(r"^\+\d{5,17}$").unwrap();
    static ref DOMESTIC: Regex = Regex::new(r"^\d{10,15}$").unwrap();
}

const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 17;

/// Keeps digits and a single leading `+`.
pub fn normalize_phone(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut normalized = String::with_capacity(trimmed.len());
    if trimmed.starts_with('+') {
        normalized.push('+');
    }
    normalized.extend(trimmed.chars().filter(|c| c.is_ascii_digit()));
    normalized
}

/// Display form: NANP numbers get `(555) 123-4567`, everything else stays normalized.
pub fn format_phone(normalized: &str) -> String {
    let digits = normalized.trim_start_matches('+');
    let international = normalized.starts_with('+');

    match digits.len() {
        10 if !international => format!(
            "({}) {}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..]
        ),
        11 if digits.starts_with('1') => format!(
            "+1 ({}) {}-{}",
            &digits[1..4],
            &digits[4..7],
            &digits[7..]
        ),
        _ => normalized.to_string(),
    }
}

pub struct PhoneDetector;

impl Default for PhoneDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoneDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for PhoneDetector {
    fn detect(&self, input: &str) -> Option<ParsedData> {
        let (candidate, explicit) = match strip_prefix_ignore_case(input, "tel:") {
            Some(rest) => (rest.trim(), true),
            None => (input, false),
        };

        let phone = normalize_phone(candidate);
        let digit_count = phone.trim_start_matches('+').len();
        if digit_count < MIN_DIGITS {
            return None;
        }

        let recognized = INTERNATIONAL.is_match(&phone)
            || DOMESTIC.is_match(&phone)
            || (explicit && digit_count <= MAX_DIGITS);
        if !recognized {
            return None;
        }

        Some(ParsedData::Phone(PhoneContent {
            formatted: format_phone(&phone),
            phone,
        }))
    }

    fn name(&self) -> &str {
        "phone"
    }
}
