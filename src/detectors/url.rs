use super::Detector;
use crate::content::{ParsedData, UrlContent};
use ::url::Url;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Scheme is mandatory; bare domains are left to the text fallback.
    static ref WEB_URL: Regex = Regex::new(r"(?i)^https?://[^\s/$.?#][^\s]*$").unwrap();
}

pub struct UrlDetector;

impl Default for UrlDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for UrlDetector {
    fn detect(&self, input: &str) -> Option<ParsedData> {
        if !WEB_URL.is_match(input) {
            return None;
        }

        let parsed = match Url::parse(input) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::debug!("URL-shaped input failed to parse: {e}");
                return None;
            }
        };
        let domain = parsed.host_str()?.to_string();

        Some(ParsedData::Url(UrlContent {
            url: input.to_string(),
            domain,
            protocol: parsed.scheme().to_string(),
        }))
    }

    fn name(&self) -> &str {
        "url"
    }
}
