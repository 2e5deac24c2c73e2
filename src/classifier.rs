use crate::content::{ParsedContent, ParsedData};
use crate::detectors::{default_detectors, Detector};
use std::panic::{self, AssertUnwindSafe};

/// Runs detectors in priority order and builds the result from the first match.
pub struct ContentClassifier {
    detectors: Vec<Box<dyn Detector>>,
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentClassifier {
    pub fn new() -> Self {
        Self::with_detectors(default_detectors())
    }

    /// Custom detector chain. Text is always appended as the last resort, so
    /// the chain does not need to end with a catch-all.
    pub fn with_detectors(detectors: Vec<Box<dyn Detector>>) -> Self {
        Self { detectors }
    }

    pub fn detector_names(&self) -> Vec<&str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Classifies raw content. Never fails: anything unexpected degrades to text.
    pub fn classify(&self, raw: &str) -> ParsedContent {
        let input = raw.trim();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let data = self.detect(input);
            ParsedContent::rehydrate(data)
        }));

        match result {
            Ok(content) => content,
            Err(_) => {
                log::error!("Classification failed, falling back to text");
                ParsedContent::rehydrate(ParsedData::text(input))
            }
        }
    }

    /// Missing input is the empty string.
    pub fn classify_opt(&self, raw: Option<&str>) -> ParsedContent {
        self.classify(raw.unwrap_or(""))
    }

    /// Only JSON strings carry content; every other value is treated as empty.
    pub fn classify_value(&self, raw: &serde_json::Value) -> ParsedContent {
        self.classify_opt(raw.as_str())
    }

    fn detect(&self, input: &str) -> ParsedData {
        for detector in &self.detectors {
            let attempt = panic::catch_unwind(AssertUnwindSafe(|| detector.detect(input)));
            match attempt {
                Ok(Some(data)) => {
                    log::debug!("Content matched by {} detector", detector.name());
                    return data;
                }
                Ok(None) => {}
                Err(_) => {
                    log::warn!(
                        "{} detector panicked, treating as no match",
                        detector.name()
                    );
                }
            }
        }

        ParsedData::text(input)
    }
}
