pub mod actions;
pub mod cache;
pub mod classifier;
pub mod config;
pub mod content;
pub mod detectors;
pub mod payload;
pub mod safety;


/// Longest payload a QR code can carry (alphanumeric mode, lowest correction).
pub const MAX_CONTENT_LENGTH: usize = 4296;

pub use actions::{Action, ActionCommand, ActionKind, ActionVariant};
pub use cache::{AnalysisCache, CachedInspector};
pub use classifier::ContentClassifier;
pub use config::Config;
pub use content::{ContentType, ParsedContent, ParsedData, WifiSecurity};
pub use detectors::Detector;
pub use payload::{build_payload, render_payload, EncodeOptions, PayloadRequest, QrEncoder};
pub use safety::{check_url_safety, RiskLevel, SecurityAnalysis, UrlSafetyChecker};

/// Classifies `raw` with the default detector chain.
pub fn classify(raw: &str) -> ParsedContent {
    ContentClassifier::new().classify(raw)
}
