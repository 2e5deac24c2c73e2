pub mod homograph;
pub mod lists;
pub mod patterns;

pub use lists::SafetyLists;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use url::{Host, Url};

lazy_static! {
    static ref IPV4_LITERAL: Regex = Regex::new(r"^\d{1,3}(?:\.\d{1,3}){3}$").unwrap();
    static ref IPV6_LITERAL: Regex = Regex::new(r"^\[?[0-9A-Fa-f:.]*:[0-9A-Fa-f:.]*\]?$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Verdict on a URL. Warnings and recommendations are appended in lockstep,
/// in the order the checks ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityAnalysis {
    pub is_safe: bool,
    pub risk_level: RiskLevel,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl SecurityAnalysis {
    fn high_risk(warning: &str, recommendation: &str) -> Self {
        Self {
            is_safe: false,
            risk_level: RiskLevel::High,
            warnings: vec![warning.to_string()],
            recommendations: vec![recommendation.to_string()],
        }
    }
}

/// One triggered check.
struct Finding {
    warning: String,
    recommendation: String,
    risk: RiskLevel,
}

impl Finding {
    fn new(risk: RiskLevel, warning: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Self {
            warning: warning.into(),
            recommendation: recommendation.into(),
            risk,
        }
    }
}

/// Accumulates findings while the checks run.
struct Assessment {
    warnings: Vec<String>,
    recommendations: Vec<String>,
    risk: RiskLevel,
    forced_high: bool,
    is_safe: bool,
}

impl Assessment {
    fn new() -> Self {
        Self {
            warnings: Vec::new(),
            recommendations: Vec::new(),
            risk: RiskLevel::Low,
            forced_high: false,
            is_safe: false,
        }
    }

    fn record(&mut self, finding: Finding) {
        log::debug!("URL check triggered: {}", finding.warning);
        if finding.risk == RiskLevel::High {
            self.forced_high = true;
        }
        self.risk = self.risk.max(finding.risk);
        self.warnings.push(finding.warning);
        self.recommendations.push(finding.recommendation);
    }

    fn into_analysis(self) -> SecurityAnalysis {
        SecurityAnalysis {
            is_safe: self.is_safe,
            risk_level: self.risk,
            warnings: self.warnings,
            recommendations: self.recommendations,
        }
    }
}

/// Host as written in the input. The `url` crate stores IDN hosts as punycode,
/// which hides the script mix the homograph check looks for.
fn raw_hostname(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let authority = rest.split(&['/', '?', '#'][..]).next()?;
    let host_port = authority.rsplit('@').next()?;
    if host_port.starts_with('[') {
        return host_port.split_inclusive(']').next();
    }
    host_port.split(':').next()
}

/// Heuristic URL risk scoring.
pub struct UrlSafetyChecker {
    lists: SafetyLists,
}

impl Default for UrlSafetyChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlSafetyChecker {
    pub fn new() -> Self {
        Self::with_lists(SafetyLists::default())
    }

    pub fn with_lists(lists: SafetyLists) -> Self {
        Self { lists }
    }

    pub fn lists(&self) -> &SafetyLists {
        &self.lists
    }

    /// Scores `url`. Never fails; an unusable URL is reported as high risk.
    pub fn check(&self, url: &str) -> SecurityAnalysis {
        let url = url.trim();
        if url.is_empty() {
            return SecurityAnalysis::high_risk(
                "Empty URL provided",
                "Provide a valid URL to analyze",
            );
        }

        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::debug!("Rejecting unparseable URL {url}: {e}");
                return SecurityAnalysis::high_risk(
                    "Invalid URL format",
                    "Verify the URL is complete and correctly formatted",
                );
            }
        };

        match panic::catch_unwind(AssertUnwindSafe(|| self.run_checks(url, &parsed))) {
            Ok(analysis) => analysis,
            Err(_) => {
                log::error!("URL safety analysis failed for {url}");
                SecurityAnalysis::high_risk(
                    "Security analysis failed",
                    "Treat this URL with caution and verify it manually",
                )
            }
        }
    }

    fn run_checks(&self, url: &str, parsed: &Url) -> SecurityAnalysis {
        let hostname = parsed.host_str().unwrap_or("").to_lowercase();
        let mut assessment = Assessment::new();

        let structural: [(&str, &dyn Fn() -> Option<Finding>); 6] = [
            ("protocol", &|| self.check_protocol(parsed)),
            ("shortener", &|| self.check_shortener(&hostname)),
            ("ip-address", &|| self.check_ip_address(parsed, &hostname)),
            ("suspicious-tld", &|| self.check_tld(&hostname)),
            ("redirect-params", &|| self.check_redirect_params(parsed)),
            ("subdomain-depth", &|| self.check_subdomain_depth(&hostname)),
        ];
        for (name, check) in structural.iter() {
            if let Some(finding) = run_check(name, check) {
                assessment.record(finding);
            }
        }

        // Aggregate the structural checks before the content checks run.
        if assessment.warnings.is_empty() {
            assessment.risk = RiskLevel::Low;
            assessment.is_safe = parsed.scheme() == "https";
        } else if assessment.warnings.len() >= 3 || assessment.forced_high {
            assessment.risk = RiskLevel::High;
            assessment.is_safe = false;
        } else {
            assessment.risk = RiskLevel::Medium;
            assessment.is_safe = false;
        }

        let content: [(&str, &dyn Fn() -> Option<Finding>); 3] = [
            ("keywords", &|| self.check_keywords(url)),
            ("patterns", &|| self.check_patterns(url)),
            ("homograph", &|| self.check_homograph(url, &hostname)),
        ];
        for (name, check) in content.iter() {
            if let Some(finding) = run_check(name, check) {
                assessment.record(finding);
                assessment.is_safe = false;
            }
        }

        if assessment.risk != RiskLevel::High
            && parsed.scheme() == "https"
            && self.lists.is_safe_domain(&hostname)
        {
            log::debug!("{hostname} is a known safe domain");
            assessment.is_safe = true;
            assessment.risk = RiskLevel::Low;
        }

        assessment.into_analysis()
    }

    fn check_protocol(&self, parsed: &Url) -> Option<Finding> {
        match parsed.scheme() {
            "https" => None,
            "http" => Some(Finding::new(
                RiskLevel::Medium,
                "This URL does not use HTTPS encryption",
                "Avoid entering passwords or personal data on sites without HTTPS",
            )),
            other => Some(Finding::new(
                RiskLevel::Medium,
                format!("Unsupported protocol: {}:", other),
                "Only open links that use http or https",
            )),
        }
    }

    fn check_shortener(&self, hostname: &str) -> Option<Finding> {
        self.lists.is_shortener(hostname).then(|| {
            Finding::new(
                RiskLevel::Medium,
                "This URL uses a link shortener that hides its real destination",
                "Expand the short link with a preview service before opening it",
            )
        })
    }

    fn check_ip_address(&self, parsed: &Url, hostname: &str) -> Option<Finding> {
        let is_ip = matches!(parsed.host(), Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)))
            || IPV4_LITERAL.is_match(hostname)
            || (hostname.contains(':') && IPV6_LITERAL.is_match(hostname));

        is_ip.then(|| {
            Finding::new(
                RiskLevel::High,
                "This URL uses an IP address instead of a domain name",
                "Legitimate sites rarely link to raw IP addresses; verify the source",
            )
        })
    }

    fn check_tld(&self, hostname: &str) -> Option<Finding> {
        self.lists.suspicious_tld(hostname).map(|tld| {
            Finding::new(
                RiskLevel::Medium,
                format!(
                    "The .{} domain extension is frequently used for abuse",
                    tld.to_lowercase()
                ),
                "Be cautious with sites on low-cost or free domain extensions",
            )
        })
    }

    fn check_redirect_params(&self, parsed: &Url) -> Option<Finding> {
        let found = parsed
            .query_pairs()
            .find(|(name, _)| self.lists.is_redirect_param(name))
            .map(|(name, _)| name.into_owned())?;

        Some(Finding::new(
            RiskLevel::Medium,
            format!("This URL contains a redirect parameter ({})", found),
            "Check where the redirect leads before continuing",
        ))
    }

    fn check_subdomain_depth(&self, hostname: &str) -> Option<Finding> {
        let labels = hostname
            .trim_end_matches('.')
            .split('.')
            .filter(|l| !l.is_empty())
            .count();

        (labels > self.lists.max_subdomain_labels).then(|| {
            Finding::new(
                RiskLevel::Medium,
                format!("This URL has an unusually deep subdomain structure ({} levels)", labels),
                "Check the registered domain at the end of the hostname",
            )
        })
    }

    fn check_keywords(&self, url: &str) -> Option<Finding> {
        let keywords = self.lists.keywords_in(url);
        if keywords.is_empty() {
            return None;
        }
        Some(Finding::new(
            RiskLevel::High,
            format!("This URL contains suspicious keywords: {}", keywords.join(", ")),
            "Do not download files or enter credentials from this link",
        ))
    }

    fn check_patterns(&self, url: &str) -> Option<Finding> {
        let found = patterns::suspicious_patterns(url);
        if found.is_empty() {
            return None;
        }
        Some(Finding::new(
            RiskLevel::High,
            format!("This URL contains suspicious patterns: {}", found.join(", ")),
            "Verify the link with the sender before opening it",
        ))
    }

    fn check_homograph(&self, url: &str, hostname: &str) -> Option<Finding> {
        let raw = raw_hostname(url).unwrap_or(hostname);
        homograph::is_homograph_suspect(raw).then(|| {
            Finding::new(
                RiskLevel::High,
                "This domain mixes characters from different scripts (possible homograph attack)",
                "Type the address manually instead of following this link",
            )
        })
    }
}

/// Runs one check; a panicking check is skipped and the rest still run.
fn run_check(name: &str, check: &dyn Fn() -> Option<Finding>) -> Option<Finding> {
    match panic::catch_unwind(AssertUnwindSafe(check)) {
        Ok(finding) => finding,
        Err(_) => {
            log::warn!("URL check {name} failed, skipping");
            None
        }
    }
}

/// Scores `url` with the built-in lists.
pub fn check_url_safety(url: &str) -> SecurityAnalysis {
    UrlSafetyChecker::new().check(url)
}
