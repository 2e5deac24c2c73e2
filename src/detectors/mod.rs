pub mod email;
pub mod phone;
pub mod sms;
pub mod text;
pub mod url;
pub mod vcard;
pub mod wifi;

use crate::content::ParsedData;

pub use self::email::EmailDetector;
pub use self::phone::PhoneDetector;
pub use self::sms::SmsDetector;
pub use self::text::TextDetector;
pub use self::url::UrlDetector;
pub use self::vcard::VCardDetector;
pub use self::wifi::WifiDetector;

/// Recognizes one content class in trimmed input.
///
/// Returning `None` means "not mine"; the classifier moves on to the next
/// detector in priority order.
pub trait Detector: Send + Sync {
    fn detect(&self, input: &str) -> Option<ParsedData>;
    fn name(&self) -> &str;
}

/// Detectors in priority order: URL, Email, SMS, WiFi, vCard, Phone, Text.
///
/// The prefixed formats run ahead of Phone, which would otherwise claim the
/// digits inside them.
pub fn default_detectors() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(UrlDetector::new()),
        Box::new(EmailDetector::new()),
        Box::new(SmsDetector::new()),
        Box::new(WifiDetector::new()),
        Box::new(VCardDetector::new()),
        Box::new(PhoneDetector::new()),
        Box::new(TextDetector::new()),
    ]
}

/// Case-insensitive prefix strip that never splits a multi-byte char.
pub(crate) fn strip_prefix_ignore_case<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let head = input.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&input[prefix.len()..])
    } else {
        None
    }
}
