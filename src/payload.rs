use crate::actions::{mailto_target, sms_target};
use crate::content::{ParsedData, VCardContent, WifiContent, WifiSecurity};
use crate::detectors::email::is_email_address;
use crate::detectors::phone::normalize_phone;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use url::Url;

/// Form fields for one payload, as a generator UI would collect them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PayloadRequest {
    Url {
        url: String,
    },
    Email {
        email: String,
        #[serde(default)]
        subject: Option<String>,
        #[serde(default)]
        body: Option<String>,
    },
    Phone {
        phone: String,
    },
    Sms {
        phone: String,
        #[serde(default)]
        message: Option<String>,
    },
    Wifi {
        ssid: String,
        #[serde(default)]
        password: String,
        #[serde(default)]
        security: WifiSecurity,
        #[serde(default)]
        hidden: bool,
    },
    VCard {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        organization: Option<String>,
        #[serde(default)]
        phone: Option<String>,
        #[serde(default)]
        email: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
    Text {
        text: String,
    },
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn escape_wifi(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '\\' || c == ';' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub fn wifi_payload(wifi: &WifiContent) -> String {
    format!(
        "WIFI:T:{};S:{};P:{};H:{};;",
        wifi.security.as_str(),
        escape_wifi(&wifi.ssid),
        escape_wifi(&wifi.password),
        wifi.hidden
    )
}

pub fn vcard_payload(card: &VCardContent) -> String {
    let mut lines = vec!["BEGIN:VCARD".to_string(), "VERSION:3.0".to_string()];
    if let Some(name) = &card.name {
        lines.push(format!("FN:{}", name));
    }
    if let Some(org) = &card.organization {
        lines.push(format!("ORG:{}", org));
    }
    if let Some(phone) = &card.phone {
        lines.push(format!("TEL:{}", phone));
    }
    if let Some(email) = &card.email {
        lines.push(format!("EMAIL:{}", email));
    }
    if let Some(url) = &card.url {
        lines.push(format!("URL:{}", url));
    }
    lines.push("END:VCARD".to_string());
    lines.join("\n")
}

impl ParsedData {
    /// Wire form of the parsed fields; classifying it again yields the same type.
    pub fn to_payload(&self) -> String {
        match self {
            ParsedData::Url(content) => content.url.clone(),
            ParsedData::Email(content) => mailto_target(
                &content.email,
                content.subject.as_deref(),
                content.body.as_deref(),
            ),
            ParsedData::Phone(content) => format!("tel:{}", content.phone),
            ParsedData::Sms(content) => sms_target(&content.phone, content.message.as_deref()),
            ParsedData::Wifi(content) => wifi_payload(content),
            ParsedData::VCard(content) => vcard_payload(content),
            ParsedData::Text(content) => content.text.clone(),
        }
    }
}

/// Builds and validates the string to encode.
pub fn build_payload(request: &PayloadRequest, max_length: usize) -> anyhow::Result<String> {
    let payload = match request {
        PayloadRequest::Url { url } => {
            let url = url.trim();
            let parsed = Url::parse(url).with_context(|| format!("Invalid URL: {}", url))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                bail!("URL must use http or https: {}", url);
            }
            url.to_string()
        }
        PayloadRequest::Email {
            email,
            subject,
            body,
        } => {
            let email = email.trim();
            if !is_email_address(email) {
                bail!("Invalid email address: {}", email);
            }
            mailto_target(email, non_empty(subject), non_empty(body))
        }
        PayloadRequest::Phone { phone } => {
            let normalized = normalize_phone(phone);
            if normalized.trim_start_matches('+').len() < 7 {
                bail!("Phone number needs at least 7 digits: {}", phone);
            }
            format!("tel:{}", normalized)
        }
        PayloadRequest::Sms { phone, message } => {
            let normalized = normalize_phone(phone);
            if normalized.trim_start_matches('+').is_empty() {
                bail!("SMS requires a phone number");
            }
            sms_target(&normalized, non_empty(message))
        }
        PayloadRequest::Wifi {
            ssid,
            password,
            security,
            hidden,
        } => {
            if ssid.is_empty() {
                bail!("WiFi network name is required");
            }
            if *security != WifiSecurity::NoPass && password.is_empty() {
                bail!("A password is required for {} networks", security.as_str());
            }
            let password = if *security == WifiSecurity::NoPass {
                String::new()
            } else {
                password.clone()
            };
            wifi_payload(&WifiContent {
                ssid: ssid.clone(),
                password,
                security: *security,
                hidden: *hidden,
            })
        }
        PayloadRequest::VCard {
            name,
            organization,
            phone,
            email,
            url,
        } => {
            let card = VCardContent {
                name: non_empty(name).map(str::to_string),
                organization: non_empty(organization).map(str::to_string),
                phone: non_empty(phone).map(str::to_string),
                email: non_empty(email).map(str::to_string),
                url: non_empty(url).map(str::to_string),
            };
            if card.is_empty() {
                bail!("A contact card needs at least one field");
            }
            vcard_payload(&card)
        }
        PayloadRequest::Text { text } => {
            if text.trim().is_empty() {
                bail!("Text content is empty");
            }
            text.clone()
        }
    };

    if payload.chars().count() > max_length {
        bail!(
            "Payload is {} characters, the limit is {}",
            payload.chars().count(),
            max_length
        );
    }

    Ok(payload)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ErrorCorrection {
    L,
    #[default]
    M,
    Q,
    H,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeOptions {
    pub size: u32,
    pub margin: u32,
    pub error_correction: ErrorCorrection,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            size: 256,
            margin: 4,
            error_correction: ErrorCorrection::M,
        }
    }
}

/// Turns a payload string into image bytes. Implemented outside this crate.
pub trait QrEncoder {
    fn encode(&self, payload: &str, options: &EncodeOptions) -> anyhow::Result<Vec<u8>>;
}

pub fn render_payload(
    encoder: &dyn QrEncoder,
    payload: &str,
    options: &EncodeOptions,
    max_length: usize,
) -> anyhow::Result<Vec<u8>> {
    if payload.is_empty() {
        bail!("Nothing to encode");
    }
    if payload.chars().count() > max_length {
        bail!("Payload exceeds {} characters", max_length);
    }
    encoder
        .encode(payload, options)
        .context("QR encoder failed")
}
