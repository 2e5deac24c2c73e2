use super::{strip_prefix_ignore_case, Detector};
use crate::content::{EmailContent, ParsedData};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // `:` and `;` never appear unquoted in an address but always do in scheme payloads.
    static ref EMAIL_ADDRESS: Regex = Regex::new(r"^[^\s@:;]+@[^\s@:;]+\.[^\s@:;]+$").unwrap();
}

pub fn is_email_address(candidate: &str) -> bool {
    EMAIL_ADDRESS.is_match(candidate)
}

/// Handles both `mailto:` URIs and bare addresses.
pub struct EmailDetector;

impl Default for EmailDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailDetector {
    pub fn new() -> Self {
        Self
    }

    fn parse_mailto(&self, rest: &str) -> Option<EmailContent> {
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };

        let email = urlencoding::decode(path).ok()?.trim().to_string();
        if !is_email_address(&email) {
            return None;
        }

        let mut subject = None;
        let mut body = None;
        if let Some(query) = query {
            for (key, value) in ::url::form_urlencoded::parse(query.as_bytes()) {
                match key.to_lowercase().as_str() {
                    "subject" if subject.is_none() => subject = Some(value.into_owned()),
                    "body" if body.is_none() => body = Some(value.into_owned()),
                    _ => {}
                }
            }
        }

        Some(EmailContent {
            email,
            subject,
            body,
        })
    }
}

impl Detector for EmailDetector {
    fn detect(&self, input: &str) -> Option<ParsedData> {
        if let Some(rest) = strip_prefix_ignore_case(input, "mailto:") {
            return self.parse_mailto(rest).map(ParsedData::Email);
        }

        if is_email_address(input) {
            return Some(ParsedData::Email(EmailContent {
                email: input.to_string(),
                subject: None,
                body: None,
            }));
        }

        None
    }

    fn name(&self) -> &str {
        "email"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(input: &str) -> Option<EmailContent> {
        match EmailDetector::new().detect(input) {
            Some(ParsedData::Email(content)) => Some(content),
            _ => None,
        }
    }

    #[test]
    fn test_mailto_with_subject_and_body() {
        let content = detect("mailto:test@example.com?subject=Hello&body=World").unwrap();
        assert_eq!(content.email, "test@example.com");
        assert_eq!(content.subject.as_deref(), Some("Hello"));
        assert_eq!(content.body.as_deref(), Some("World"));
    }

    #[test]
    fn test_mailto_decodes_parameters() {
        let content =
            detect("MAILTO:test%40example.com?subject=Hello%20there&body=Line%201%0ALine%202")
                .unwrap();
        assert_eq!(content.email, "test@example.com");
        assert_eq!(content.subject.as_deref(), Some("Hello there"));
        assert_eq!(content.body.as_deref(), Some("Line 1\nLine 2"));
    }

    #[test]
    fn test_mailto_without_query() {
        let content = detect("mailto:someone@example.org").unwrap();
        assert_eq!(content.email, "someone@example.org");
        assert!(content.subject.is_none());
        assert!(content.body.is_none());
    }

    #[test]
    fn test_mailto_with_invalid_address() {
        assert!(detect("mailto:not-an-address").is_none());
        assert!(detect("mailto:?subject=hi").is_none());
    }

    #[test]
    fn test_bare_address() {
        let content = detect("user.name+tag@mail.example.co.uk").unwrap();
        assert_eq!(content.email, "user.name+tag@mail.example.co.uk");
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        assert!(detect("user@localhost").is_none());
        assert!(detect("@example.com").is_none());
        assert!(detect("user@").is_none());
        assert!(detect("user@@example.com").is_none());
        assert!(detect("contact me at user@example.com").is_none());
    }

    #[test]
    fn test_scheme_payloads_with_at_sign_are_not_addresses() {
        assert!(detect("WIFI:T:WPA;S:guest@hotel.com;P:pw12345678;H:false;;").is_none());
        assert!(detect("smsto:5551234567:mail@me.com").is_none());
        assert!(detect("sms:5551234567?body=mail@me.com").is_none());
        assert!(detect("tel:555@example.com").is_none());
    }
}
