use crate::content::{
    EmailContent, ParsedData, PhoneContent, SmsContent, TextContent, UrlContent, VCardContent,
    WifiContent,
};
use serde::{Deserialize, Serialize};

/// Side effect the UI performs when an action fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    OpenUrl,
    OpenTel,
    OpenMailto,
    OpenSms,
    CopyText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCommand {
    pub kind: ActionKind,
    /// Navigation target for the `Open*` kinds, clipboard text for `CopyText`
    pub payload: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionVariant {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub label: String,
    pub command: ActionCommand,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<ActionVariant>,
}

impl Action {
    fn open(label: &str, kind: ActionKind, target: String, icon: &str) -> Self {
        Self {
            label: label.to_string(),
            command: ActionCommand {
                kind,
                payload: target,
            },
            icon: icon.to_string(),
            variant: Some(ActionVariant::Primary),
        }
    }

    fn copy(label: &str, text: &str) -> Self {
        Self {
            label: label.to_string(),
            command: ActionCommand {
                kind: ActionKind::CopyText,
                payload: text.to_string(),
            },
            icon: "copy".to_string(),
            variant: Some(ActionVariant::Secondary),
        }
    }
}

/// Builds the ordered action list for parsed content.
pub fn actions_for(data: &ParsedData) -> Vec<Action> {
    match data {
        ParsedData::Url(url) => url_actions(url),
        ParsedData::Email(email) => email_actions(email),
        ParsedData::Phone(phone) => phone_actions(phone),
        ParsedData::Sms(sms) => sms_actions(sms),
        ParsedData::Wifi(wifi) => wifi_actions(wifi),
        ParsedData::VCard(card) => vcard_actions(card),
        ParsedData::Text(text) => text_actions(text),
    }
}

fn url_actions(content: &UrlContent) -> Vec<Action> {
    vec![
        Action::open(
            "Open Link",
            ActionKind::OpenUrl,
            content.url.clone(),
            "external-link",
        ),
        Action::copy("Copy URL", &content.url),
    ]
}

fn email_actions(content: &EmailContent) -> Vec<Action> {
    vec![
        Action::open(
            "Send Email",
            ActionKind::OpenMailto,
            mailto_target(
                &content.email,
                content.subject.as_deref(),
                content.body.as_deref(),
            ),
            "mail",
        ),
        Action::copy("Copy Email", &content.email),
    ]
}

fn phone_actions(content: &PhoneContent) -> Vec<Action> {
    vec![
        Action::open(
            "Call",
            ActionKind::OpenTel,
            format!("tel:{}", content.phone),
            "phone",
        ),
        Action::copy("Copy Number", &content.phone),
    ]
}

fn sms_actions(content: &SmsContent) -> Vec<Action> {
    vec![
        Action::open(
            "Send SMS",
            ActionKind::OpenSms,
            sms_target(&content.phone, content.message.as_deref()),
            "message",
        ),
        Action::copy("Copy Number", &content.phone),
    ]
}

// Browsers cannot join a network programmatically, so WiFi only offers copies.
fn wifi_actions(content: &WifiContent) -> Vec<Action> {
    vec![
        Action::copy("Copy Network Name", &content.ssid),
        Action::copy("Copy Password", &content.password),
    ]
}

fn vcard_actions(content: &VCardContent) -> Vec<Action> {
    let mut actions = Vec::new();

    if let Some(phone) = &content.phone {
        actions.push(Action::open(
            "Call",
            ActionKind::OpenTel,
            format!("tel:{}", phone),
            "phone",
        ));
    }
    if let Some(email) = &content.email {
        actions.push(Action::open(
            "Send Email",
            ActionKind::OpenMailto,
            mailto_target(email, None, None),
            "mail",
        ));
    }
    if let Some(url) = &content.url {
        actions.push(Action::open(
            "Visit Website",
            ActionKind::OpenUrl,
            url.clone(),
            "globe",
        ));
    }

    let summary = content
        .fields()
        .iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect::<Vec<_>>()
        .join("\n");
    actions.push(Action::copy("Copy Contact", &summary));

    actions
}

fn text_actions(content: &TextContent) -> Vec<Action> {
    vec![Action::copy("Copy Text", &content.text)]
}

/// `mailto:` target with percent-encoded subject/body query parameters.
pub fn mailto_target(email: &str, subject: Option<&str>, body: Option<&str>) -> String {
    let mut params = Vec::new();
    if let Some(subject) = subject.filter(|s| !s.is_empty()) {
        params.push(format!("subject={}", urlencoding::encode(subject)));
    }
    if let Some(body) = body.filter(|b| !b.is_empty()) {
        params.push(format!("body={}", urlencoding::encode(body)));
    }

    if params.is_empty() {
        format!("mailto:{}", email)
    } else {
        format!("mailto:{}?{}", email, params.join("&"))
    }
}

pub fn sms_target(phone: &str, message: Option<&str>) -> String {
    match message.filter(|m| !m.is_empty()) {
        Some(message) => format!("sms:{}?body={}", phone, urlencoding::encode(message)),
        None => format!("sms:{}", phone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::WifiSecurity;

    fn labels(actions: &[Action]) -> Vec<&str> {
        actions.iter().map(|a| a.label.as_str()).collect()
    }

    #[test]
    fn test_url_actions() {
        let actions = actions_for(&ParsedData::Url(UrlContent {
            url: "https://example.com".to_string(),
            domain: "example.com".to_string(),
            protocol: "https".to_string(),
        }));

        assert_eq!(labels(&actions), vec!["Open Link", "Copy URL"]);
        assert_eq!(actions[0].command.kind, ActionKind::OpenUrl);
        assert_eq!(actions[0].command.payload, "https://example.com");
        assert_eq!(actions[0].variant, Some(ActionVariant::Primary));
        assert_eq!(actions[1].command.kind, ActionKind::CopyText);
    }

    #[test]
    fn test_email_actions_include_subject_and_body() {
        let actions = actions_for(&ParsedData::Email(EmailContent {
            email: "test@example.com".to_string(),
            subject: Some("Hello there".to_string()),
            body: Some("World".to_string()),
        }));

        assert_eq!(labels(&actions), vec!["Send Email", "Copy Email"]);
        assert_eq!(
            actions[0].command.payload,
            "mailto:test@example.com?subject=Hello%20there&body=World"
        );
        assert_eq!(actions[1].command.payload, "test@example.com");
    }

    #[test]
    fn test_phone_and_sms_actions() {
        let phone = actions_for(&ParsedData::Phone(PhoneContent {
            phone: "+15551234567".to_string(),
            formatted: "+1 (555) 123-4567".to_string(),
        }));
        assert_eq!(labels(&phone), vec!["Call", "Copy Number"]);
        assert_eq!(phone[0].command.payload, "tel:+15551234567");

        let sms = actions_for(&ParsedData::Sms(SmsContent {
            phone: "5551234567".to_string(),
            message: Some("on my way".to_string()),
        }));
        assert_eq!(labels(&sms), vec!["Send SMS", "Copy Number"]);
        assert_eq!(sms[0].command.kind, ActionKind::OpenSms);
        assert_eq!(sms[0].command.payload, "sms:5551234567?body=on%20my%20way");

        let bare = actions_for(&ParsedData::Sms(SmsContent {
            phone: "5551234567".to_string(),
            message: None,
        }));
        assert_eq!(bare[0].command.payload, "sms:5551234567");
    }

    #[test]
    fn test_wifi_actions_only_copy() {
        let actions = actions_for(&ParsedData::Wifi(WifiContent {
            ssid: "MyNetwork".to_string(),
            password: "secret".to_string(),
            security: WifiSecurity::Wpa,
            hidden: false,
        }));

        assert_eq!(labels(&actions), vec!["Copy Network Name", "Copy Password"]);
        assert!(actions
            .iter()
            .all(|a| a.command.kind == ActionKind::CopyText));
        assert_eq!(actions[1].command.payload, "secret");
    }

    #[test]
    fn test_vcard_actions_are_conditional() {
        let full = VCardContent {
            name: Some("Ada Lovelace".to_string()),
            organization: Some("Engines Ltd".to_string()),
            phone: Some("+441234567890".to_string()),
            email: Some("ada@example.com".to_string()),
            url: Some("https://ada.example.com".to_string()),
        };
        let actions = actions_for(&ParsedData::VCard(full));
        assert_eq!(
            labels(&actions),
            vec!["Call", "Send Email", "Visit Website", "Copy Contact"]
        );
        assert_eq!(
            actions[3].command.payload,
            "Name: Ada Lovelace\nOrganization: Engines Ltd\nPhone: +441234567890\nEmail: ada@example.com\nURL: https://ada.example.com"
        );

        let name_only = actions_for(&ParsedData::VCard(VCardContent {
            name: Some("Ada".to_string()),
            ..Default::default()
        }));
        assert_eq!(labels(&name_only), vec!["Copy Contact"]);
        assert_eq!(name_only[0].command.payload, "Name: Ada");
    }

    #[test]
    fn test_text_actions() {
        let actions = actions_for(&ParsedData::text("line one\nline two"));
        assert_eq!(labels(&actions), vec!["Copy Text"]);
        assert_eq!(actions[0].command.payload, "line one\nline two");
    }

    #[test]
    fn test_action_serializes_as_descriptor() {
        let action = Action::copy("Copy Text", "hi");
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["command"]["kind"], "copy-text");
        assert_eq!(json["command"]["payload"], "hi");
        assert_eq!(json["variant"], "secondary");
    }
}
