use crate::actions::{actions_for, Action};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Url,
    Email,
    Phone,
    Sms,
    Wifi,
    VCard,
    Text,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Url => "url",
            ContentType::Email => "email",
            ContentType::Phone => "phone",
            ContentType::Sms => "sms",
            ContentType::Wifi => "wifi",
            ContentType::VCard => "vcard",
            ContentType::Text => "text",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlContent {
    pub url: String,
    pub domain: String,
    pub protocol: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailContent {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneContent {
    /// Digits with an optional leading `+`
    pub phone: String,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsContent {
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WifiSecurity {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "nopass")]
    NoPass,
}

impl WifiSecurity {
    pub fn as_str(&self) -> &'static str {
        match self {
            WifiSecurity::Wpa => "WPA",
            WifiSecurity::Wep => "WEP",
            WifiSecurity::NoPass => "nopass",
        }
    }

    /// Maps a `T:` value from a WIFI payload. Empty, WPA2, WPA3 and SAE all collapse to WPA.
    pub fn from_wire(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("nopass") {
            WifiSecurity::NoPass
        } else if value.eq_ignore_ascii_case("WEP") {
            WifiSecurity::Wep
        } else {
            WifiSecurity::Wpa
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiContent {
    pub ssid: String,
    pub password: String,
    pub security: WifiSecurity,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VCardContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl VCardContent {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.organization.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.url.is_none()
    }

    /// Present fields as `Label: value` pairs, in card order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Name", &self.name),
            ("Organization", &self.organization),
            ("Phone", &self.phone),
            ("Email", &self.email),
            ("URL", &self.url),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub text: String,
}

/// Structured fields extracted by a detector, tagged by content type.
///
/// Serializes as `{"type": "...", "parsedData": {...}}`, which is also the
/// shape a history store keeps and hands back to [`ParsedContent::rehydrate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "parsedData", rename_all = "lowercase")]
pub enum ParsedData {
    Url(UrlContent),
    Email(EmailContent),
    Phone(PhoneContent),
    Sms(SmsContent),
    Wifi(WifiContent),
    VCard(VCardContent),
    Text(TextContent),
}

impl ParsedData {
    pub fn content_type(&self) -> ContentType {
        match self {
            ParsedData::Url(_) => ContentType::Url,
            ParsedData::Email(_) => ContentType::Email,
            ParsedData::Phone(_) => ContentType::Phone,
            ParsedData::Sms(_) => ContentType::Sms,
            ParsedData::Wifi(_) => ContentType::Wifi,
            ParsedData::VCard(_) => ContentType::VCard,
            ParsedData::Text(_) => ContentType::Text,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        ParsedData::Text(TextContent { text: text.into() })
    }
}

/// Classification result: content type, extracted fields and the actions a UI offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedContent {
    #[serde(flatten)]
    pub data: ParsedData,
    pub actions: Vec<Action>,
}

impl ParsedContent {
    /// Rebuilds a full result from stored fields. Actions are never persisted.
    pub fn rehydrate(data: ParsedData) -> Self {
        let actions = actions_for(&data);
        Self { data, actions }
    }

    pub fn content_type(&self) -> ContentType {
        self.data.content_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_data_serializes_with_type_tag() {
        let data = ParsedData::Wifi(WifiContent {
            ssid: "Home".to_string(),
            password: String::new(),
            security: WifiSecurity::NoPass,
            hidden: true,
        });

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["type"], "wifi");
        assert_eq!(json["parsedData"]["ssid"], "Home");
        assert_eq!(json["parsedData"]["security"], "nopass");
        assert_eq!(json["parsedData"]["hidden"], true);
    }

    #[test]
    fn test_rehydrate_regenerates_actions() {
        let stored = r#"{"type":"vcard","parsedData":{"name":"Ada","phone":"+15551234567"}}"#;
        let data: ParsedData = serde_json::from_str(stored).unwrap();
        let content = ParsedContent::rehydrate(data);

        assert_eq!(content.content_type(), ContentType::VCard);
        let labels: Vec<&str> = content.actions.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, vec!["Call", "Copy Contact"]);
    }

    #[test]
    fn test_parsed_content_json_shape() {
        let content = ParsedContent::rehydrate(ParsedData::text("hello"));
        let json = serde_json::to_value(&content).unwrap();

        assert_eq!(json["type"], "text");
        assert_eq!(json["parsedData"]["text"], "hello");
        assert_eq!(json["actions"][0]["label"], "Copy Text");
    }

    #[test]
    fn test_wifi_security_from_wire() {
        assert_eq!(WifiSecurity::from_wire("WPA2"), WifiSecurity::Wpa);
        assert_eq!(WifiSecurity::from_wire("wep"), WifiSecurity::Wep);
        assert_eq!(WifiSecurity::from_wire("nopass"), WifiSecurity::NoPass);
        assert_eq!(WifiSecurity::from_wire(""), WifiSecurity::Wpa);
    }

    #[test]
    fn test_vcard_fields_skip_missing() {
        let card = VCardContent {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(
            card.fields(),
            vec![("Name", "Ada"), ("Email", "ada@example.com")]
        );
        assert!(!card.is_empty());
        assert!(VCardContent::default().is_empty());
    }
}
