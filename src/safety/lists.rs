use serde::{Deserialize, Serialize};

/// Reference lists consulted by the URL risk checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyLists {
    pub shorteners: Vec<String>,
    /// Bare TLDs without the leading dot
    pub suspicious_tlds: Vec<String>,
    pub redirect_params: Vec<String>,
    pub suspicious_keywords: Vec<String>,
    pub safe_domains: Vec<String>,
    pub max_subdomain_labels: usize,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for SafetyLists {
    fn default() -> Self {
        Self {
            shorteners: strings(&[
                "bit.ly",
                "tinyurl.com",
                "t.co",
                "goo.gl",
                "ow.ly",
                "short.link",
                "is.gd",
                "v.gd",
                "tiny.cc",
                "rb.gy",
                "cutt.ly",
                "shorturl.at",
                "buff.ly",
                "rebrand.ly",
                "bl.ink",
                "s.id",
                "u.to",
            ]),
            suspicious_tlds: strings(&[
                "tk", "ml", "ga", "cf", "gq", "xyz", "top", "click", "download", "zip", "mov",
                "review", "country", "kim", "work", "party", "racing", "stream", "loan", "men",
                "bid", "win", "date", "faith", "science", "cricket", "accountant", "icu", "buzz",
                "rest",
            ]),
            redirect_params: strings(&[
                "redirect",
                "redirect_url",
                "redirect_uri",
                "redirecturl",
                "return",
                "return_url",
                "returnurl",
                "return_to",
                "next",
                "goto",
                "dest",
                "destination",
                "continue",
                "forward",
                "target",
                "out",
                "url",
            ]),
            suspicious_keywords: strings(&[
                "malware",
                "phishing",
                "exploit",
                "virus",
                "trojan",
                "ransomware",
                "spyware",
                "keylogger",
                "botnet",
                "backdoor",
                "rootkit",
                "warez",
                "keygen",
                "crack",
                "hack",
                "free-bitcoin",
                "verify-account",
                "account-suspended",
                "login-verify",
                "secure-update",
            ]),
            safe_domains: strings(&[
                "google.com",
                "youtube.com",
                "github.com",
                "microsoft.com",
                "apple.com",
                "amazon.com",
                "wikipedia.org",
                "mozilla.org",
                "cloudflare.com",
                "linkedin.com",
                "facebook.com",
                "instagram.com",
                "twitter.com",
                "x.com",
                "stackoverflow.com",
                "paypal.com",
                "dropbox.com",
                "netflix.com",
                "reddit.com",
                "zoom.us",
            ]),
            max_subdomain_labels: 4,
        }
    }
}

impl SafetyLists {
    pub fn is_shortener(&self, hostname: &str) -> bool {
        matches_domain_list(hostname, &self.shorteners)
    }

    pub fn is_safe_domain(&self, hostname: &str) -> bool {
        matches_domain_list(hostname, &self.safe_domains)
    }

    pub fn suspicious_tld<'a>(&self, hostname: &'a str) -> Option<&'a str> {
        let tld = hostname.trim_end_matches('.').rsplit('.').next()?;
        self.suspicious_tlds
            .iter()
            .any(|s| s.trim_start_matches('.').eq_ignore_ascii_case(tld))
            .then_some(tld)
    }

    pub fn is_redirect_param(&self, name: &str) -> bool {
        self.redirect_params
            .iter()
            .any(|p| p.eq_ignore_ascii_case(name))
    }

    /// Keywords found anywhere in `text`, compared lowercase.
    pub fn keywords_in<'a>(&'a self, text: &str) -> Vec<&'a str> {
        let lower = text.to_lowercase();
        self.suspicious_keywords
            .iter()
            .filter(|k| lower.contains(&k.to_lowercase()))
            .map(|k| k.as_str())
            .collect()
    }
}

/// Exact match or subdomain match (`mail.example.com` matches `example.com`).
pub fn matches_domain_list(domain: &str, domain_list: &[String]) -> bool {
    let domain_lower = domain.trim_end_matches('.').to_lowercase();
    if domain_lower.is_empty() {
        return false;
    }

    domain_list.iter().any(|pattern| {
        let pattern_lower = pattern.to_lowercase();
        domain_lower == pattern_lower || domain_lower.ends_with(&format!(".{}", pattern_lower))
    })
}
