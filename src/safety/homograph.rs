use serde::Serialize;

/// Scripts that matter for hostname spoofing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Script {
    Latin,
    Cyrillic,
    Greek,
    Arabic,
}

// Characters that render like ASCII letters in most fonts.
const LOOKALIKES: &[char] = &[
    '\u{0430}', // Cyrillic а
    '\u{0435}', // Cyrillic е
    '\u{043E}', // Cyrillic о
    '\u{0440}', // Cyrillic р
    '\u{0441}', // Cyrillic с
    '\u{0443}', // Cyrillic у
    '\u{0445}', // Cyrillic х
    '\u{0455}', // Cyrillic ѕ
    '\u{0456}', // Cyrillic і
    '\u{0458}', // Cyrillic ј
    '\u{04BB}', // Cyrillic һ
    '\u{0501}', // Cyrillic ԁ
    '\u{051B}', // Cyrillic ԛ
    '\u{051D}', // Cyrillic ԝ
    '\u{03B1}', // Greek α
    '\u{03BF}', // Greek ο
    '\u{03C1}', // Greek ρ
    '\u{03BD}', // Greek ν
    '\u{0131}', // dotless ı
    '\u{0261}', // script ɡ
    '\u{217C}', // small roman numeral fifty ⅼ
    '\u{FF41}', // fullwidth ａ
    '\u{FF4F}', // fullwidth ｏ
];

pub fn script_of(c: char) -> Option<Script> {
    match c {
        'a'..='z' | 'A'..='Z' => Some(Script::Latin),
        '\u{00C0}'..='\u{024F}' if c != '\u{00D7}' && c != '\u{00F7}' => Some(Script::Latin),
        '\u{0370}'..='\u{03FF}' | '\u{1F00}'..='\u{1FFF}' => Some(Script::Greek),
        '\u{0400}'..='\u{04FF}' | '\u{0500}'..='\u{052F}' => Some(Script::Cyrillic),
        '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}' | '\u{08A0}'..='\u{08FF}' => {
            Some(Script::Arabic)
        }
        _ => None,
    }
}

/// Distinct scripts present in `text`, sorted.
pub fn scripts_in(text: &str) -> Vec<Script> {
    let mut scripts: Vec<Script> = text.chars().filter_map(script_of).collect();
    scripts.sort();
    scripts.dedup();
    scripts
}

pub fn lookalikes_in(text: &str) -> Vec<char> {
    let mut found: Vec<char> = text.chars().filter(|c| LOOKALIKES.contains(c)).collect();
    found.dedup();
    found
}

/// Heuristic only: mixed scripts or a known lookalike character. Not a full
/// Unicode confusables skeleton check.
pub fn is_homograph_suspect(hostname: &str) -> bool {
    if hostname.is_ascii() {
        return false;
    }
    scripts_in(hostname).len() >= 2 || !lookalikes_in(hostname).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_detection() {
        assert_eq!(scripts_in("example.com"), vec![Script::Latin]);
        assert_eq!(scripts_in("пример"), vec![Script::Cyrillic]);
        assert_eq!(scripts_in("ελλάδα"), vec![Script::Greek]);
        assert_eq!(scripts_in("مثال"), vec![Script::Arabic]);
        assert_eq!(
            scripts_in("p\u{0430}ypal"),
            vec![Script::Latin, Script::Cyrillic]
        );
        assert!(scripts_in("123-456").is_empty());
    }

    #[test]
    fn test_mixed_script_hostname() {
        // Cyrillic а in an otherwise Latin name
        assert!(is_homograph_suspect("p\u{0430}ypal.com"));
        // Greek ο
        assert!(is_homograph_suspect("g\u{03BF}\u{03BF}gle.com"));
    }

    #[test]
    fn test_lookalike_without_latin() {
        assert!(is_homograph_suspect("\u{0440}\u{0443}\u{0441}"));
        assert_eq!(lookalikes_in("\u{0430}\u{0430}b"), vec!['\u{0430}']);
    }

    #[test]
    fn test_clean_hostnames() {
        assert!(!is_homograph_suspect("example.com"));
        assert!(!is_homograph_suspect("münchen.de"));
        assert!(!is_homograph_suspect("xn--80ak6aa92e.com"));
    }
}
