use super::Detector;
use crate::content::{ParsedData, WifiContent, WifiSecurity};

const WIFI_PREFIX: &str = "WIFI:";

/// Splits on `delimiter` outside backslash escapes. Escapes are kept in the pieces.
fn split_unescaped(input: &str, delimiter: char, limit: usize) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (idx, ch) in input.char_indices() {
        if parts.len() + 1 == limit {
            break;
        }
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
        } else if ch == delimiter {
            parts.push(&input[start..idx]);
            start = idx + ch.len_utf8();
        }
    }
    parts.push(&input[start..]);
    parts
}

fn unescape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next) => result.push(next),
                None => result.push('\\'),
            }
        } else {
            result.push(ch);
        }
    }
    result
}

/// Reader for `WIFI:T:<security>;S:<ssid>;P:<password>;H:<hidden>;;`.
pub struct WifiDetector;

impl Default for WifiDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl WifiDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for WifiDetector {
    fn detect(&self, input: &str) -> Option<ParsedData> {
        let body = input.strip_prefix(WIFI_PREFIX)?;

        let mut ssid = None;
        let mut password = None;
        let mut security = None;
        let mut hidden = false;

        for pair in split_unescaped(body, ';', usize::MAX) {
            if pair.is_empty() {
                continue;
            }
            let kv = split_unescaped(pair, ':', 2);
            let (key, value) = match kv.as_slice() {
                [key, value] => (*key, unescape(value)),
                _ => continue,
            };

            match key {
                "T" => security = Some(WifiSecurity::from_wire(&value)),
                "S" => ssid = Some(value),
                "P" => password = Some(value),
                "H" => hidden = value == "true",
                other => log::debug!("Ignoring unknown WIFI field: {other}"),
            }
        }

        let ssid = ssid.filter(|s| !s.is_empty())?;

        Some(ParsedData::Wifi(WifiContent {
            ssid,
            password: password.unwrap_or_default(),
            security: security.unwrap_or_default(),
            hidden,
        }))
    }

    fn name(&self) -> &str {
        "wifi"
    }
}
