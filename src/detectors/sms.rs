use super::{strip_prefix_ignore_case, Detector};
use crate::content::{ParsedData, SmsContent};

/// `sms:<phone>?body=<message>` and `smsto:<phone>:<message>`.
pub struct SmsDetector;

impl Default for SmsDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SmsDetector {
    pub fn new() -> Self {
        Self
    }

    fn parse_sms_uri(&self, rest: &str) -> Option<SmsContent> {
        let (phone, query) = match rest.split_once('?') {
            Some((phone, query)) => (phone, Some(query)),
            None => (rest, None),
        };

        let phone = phone.trim();
        if phone.is_empty() {
            return None;
        }

        let message = query.and_then(|query| {
            ::url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key.eq_ignore_ascii_case("body"))
                .map(|(_, value)| value.into_owned())
        });

        Some(SmsContent {
            phone: phone.to_string(),
            message: message.filter(|m| !m.is_empty()),
        })
    }

    // smsto: carries the message raw after the second colon.
    fn parse_smsto(&self, rest: &str) -> Option<SmsContent> {
        let (phone, message) = match rest.split_once(':') {
            Some((phone, message)) => (phone, Some(message)),
            None => (rest, None),
        };

        let phone = phone.trim();
        if phone.is_empty() {
            return None;
        }

        Some(SmsContent {
            phone: phone.to_string(),
            message: message.filter(|m| !m.is_empty()).map(str::to_string),
        })
    }
}

impl Detector for SmsDetector {
    fn detect(&self, input: &str) -> Option<ParsedData> {
        let parsed = if let Some(rest) = strip_prefix_ignore_case(input, "smsto:") {
            self.parse_smsto(rest)
        } else if let Some(rest) = strip_prefix_ignore_case(input, "sms:") {
            self.parse_sms_uri(rest)
        } else {
            None
        };

        parsed.map(ParsedData::Sms)
    }

    fn name(&self) -> &str {
        "sms"
    }
}
