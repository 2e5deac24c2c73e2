use super::Detector;
use crate::content::{ParsedData, VCardContent};

const BEGIN_MARKER: &str = "BEGIN:VCARD";
const END_MARKER: &str = "END:VCARD";

/// Value after the first colon of a content line, trimmed; `None` when empty.
fn property_value(line: &str) -> Option<String> {
    let (_, value) = line.split_once(':')?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Uppercased property name with parameters and any `itemN.` group stripped.
fn property_name(line: &str) -> Option<String> {
    let end = line.find(|c: char| c == ':' || c == ';')?;
    let name = &line[..end];
    let name = name.rsplit('.').next().unwrap_or(name);
    Some(name.to_ascii_uppercase())
}

/// `N:Last;First;Middle;Prefix;Suffix` rendered as `First Last`.
fn structured_name(value: &str) -> Option<String> {
    let mut parts = value.split(';').map(str::trim);
    let last = parts.next().unwrap_or("");
    let first = parts.next().unwrap_or("");
    let name = [first, last]
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn set_once(slot: &mut Option<String>, value: Option<String>) {
    if slot.is_none() {
        *slot = value;
    }
}

/// Minimal vCard 3.0 reader: FN, ORG, TEL, EMAIL and URL properties.
pub struct VCardDetector;

impl Default for VCardDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl VCardDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for VCardDetector {
    fn detect(&self, input: &str) -> Option<ParsedData> {
        if !input.contains(BEGIN_MARKER) || !input.contains(END_MARKER) {
            return None;
        }

        let mut card = VCardContent::default();
        let mut fallback_name = None;

        for line in input.lines() {
            let line = line.trim();
            let name = match property_name(line) {
                Some(name) => name,
                None => continue,
            };

            match name.as_str() {
                "FN" => set_once(&mut card.name, property_value(line)),
                "N" => {
                    if let Some(value) = property_value(line) {
                        set_once(&mut fallback_name, structured_name(&value));
                    }
                }
                "ORG" => set_once(&mut card.organization, property_value(line)),
                "URL" => set_once(&mut card.url, property_value(line)),
                "TEL" => set_once(&mut card.phone, property_value(line)),
                "EMAIL" => set_once(&mut card.email, property_value(line)),
                _ => {}
            }
        }

        if card.name.is_none() {
            card.name = fallback_name;
        }

        if card.is_empty() {
            log::debug!("vCard markers present but no fields extracted");
            return None;
        }

        Some(ParsedData::VCard(card))
    }

    fn name(&self) -> &str {
        "vcard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(input: &str) -> Option<VCardContent> {
        match VCardDetector::new().detect(input) {
            Some(ParsedData::VCard(content)) => Some(content),
            _ => None,
        }
    }

    #[test]
    fn test_full_card() {
        let input = "BEGIN:VCARD\nVERSION:3.0\nFN:Ada Lovelace\nORG:Engines Ltd\nTEL:+441234567890\nEMAIL:ada@example.com\nURL:https://ada.example.com\nEND:VCARD";
        let card = detect(input).unwrap();
        assert_eq!(card.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(card.organization.as_deref(), Some("Engines Ltd"));
        assert_eq!(card.phone.as_deref(), Some("+441234567890"));
        assert_eq!(card.email.as_deref(), Some("ada@example.com"));
        assert_eq!(card.url.as_deref(), Some("https://ada.example.com"));
    }

    #[test]
    fn test_parameterized_properties_and_crlf() {
        let input = "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Bob\r\nTEL;TYPE=WORK:555-0100\r\nitem1.EMAIL;TYPE=INTERNET:bob@example.com\r\nEND:VCARD\r\n";
        let card = detect(input).unwrap();
        assert_eq!(card.name.as_deref(), Some("Bob"));
        assert_eq!(card.phone.as_deref(), Some("555-0100"));
        assert_eq!(card.email.as_deref(), Some("bob@example.com"));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let input = "BEGIN:VCARD\nTEL;TYPE=CELL:111\nTEL;TYPE=HOME:222\nEND:VCARD";
        let card = detect(input).unwrap();
        assert_eq!(card.phone.as_deref(), Some("111"));
    }

    #[test]
    fn test_structured_name_fallback() {
        let input = "BEGIN:VCARD\nVERSION:3.0\nN:Lovelace;Ada;;;\nEND:VCARD";
        let card = detect(input).unwrap();
        assert_eq!(card.name.as_deref(), Some("Ada Lovelace"));

        let input = "BEGIN:VCARD\nN:Lovelace;Ada\nFN:Countess\nEND:VCARD";
        assert_eq!(detect(input).unwrap().name.as_deref(), Some("Countess"));
    }

    #[test]
    fn test_empty_card_is_no_match() {
        assert!(detect("BEGIN:VCARD\nEND:VCARD").is_none());
        assert!(detect("BEGIN:VCARD\nVERSION:3.0\nFN:\nEND:VCARD").is_none());
    }

    #[test]
    fn test_requires_both_markers() {
        assert!(detect("BEGIN:VCARD\nFN:Ada").is_none());
        assert!(detect("FN:Ada\nEND:VCARD").is_none());
    }

    #[test]
    fn test_values_do_not_look_like_properties() {
        let input = "BEGIN:VCARD\nVERSION:3.0\nFN:Ada\nTITLE:Hotel: Manager\nNOTE:Reach me by email: later\nTEL:+15551234567\nEMAIL:ada@example.com\nEND:VCARD";
        let card = detect(input).unwrap();
        assert_eq!(card.phone.as_deref(), Some("+15551234567"));
        assert_eq!(card.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        assert!(detect("begin:vcard\nFN:Ada\nend:vcard").is_none());
        // Property names themselves are case-insensitive.
        let card = detect("BEGIN:VCARD\nfn:Ada\ntel:555-0100\nEND:VCARD").unwrap();
        assert_eq!(card.name.as_deref(), Some("Ada"));
        assert_eq!(card.phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn test_property_name() {
        assert_eq!(property_name("item1.EMAIL;TYPE=INTERNET:a@b.co").as_deref(), Some("EMAIL"));
        assert_eq!(property_name("TEL;TYPE=WORK:555").as_deref(), Some("TEL"));
        assert_eq!(property_name("TITLE:Hotel: Manager").as_deref(), Some("TITLE"));
        assert_eq!(property_name("no separator").as_deref(), None);
    }
}
