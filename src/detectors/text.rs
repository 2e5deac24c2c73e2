use super::Detector;
use crate::content::ParsedData;

/// Fallback: always matches, including the empty string.
pub struct TextDetector;

impl Default for TextDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for TextDetector {
    fn detect(&self, input: &str) -> Option<ParsedData> {
        Some(ParsedData::text(input))
    }

    fn name(&self) -> &str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_matches() {
        let detector = TextDetector::new();
        assert_eq!(detector.detect(""), Some(ParsedData::text("")));
        assert_eq!(
            detector.detect("line one\n  line two"),
            Some(ParsedData::text("line one\n  line two"))
        );
    }
}
