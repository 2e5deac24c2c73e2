use crate::safety::SafetyLists;
use crate::MAX_CONTENT_LENGTH;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub cache: CacheConfig,
    pub safety: SafetyLists,
    pub payload: PayloadConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub max_entries: usize,
    pub ttl_seconds: u64,
    /// Sweep expired entries every this many inserts
    pub cleanup_interval: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 100,
            ttl_seconds: 300, // 5 minutes
            cleanup_interval: 25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadConfig {
    pub max_length: usize,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            max_length: MAX_CONTENT_LENGTH,
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.logging
            .level
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "cache:\n  enabled: false\nsafety:\n  safe_domains:\n    - example.org\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert!(!config.cache.enabled);
        assert_eq!(config.cache.max_entries, 100);
        assert_eq!(config.safety.safe_domains, vec!["example.org".to_string()]);
        assert!(!config.safety.shorteners.is_empty());
        assert_eq!(config.payload.max_length, 4296);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("qr-inspect-config-{}.yaml", std::process::id()));
        let path = path.to_str().unwrap();

        let mut config = Config::default();
        config.logging.level = "debug".to_string();
        config.to_file(path).unwrap();

        let loaded = Config::from_file(path).unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(loaded, config);
        assert_eq!(loaded.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(Config::from_file("/nonexistent/qr-inspect.yaml").is_err());
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let mut config = Config::default();
        config.logging.level = "chatty".to_string();
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }
}
