use crate::error::Result;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const API_URL_ENV: &str = "QUICKTHINK_API_URL";
pub const AUTH_URL_ENV: &str = "SUPABASE_URL";
pub const AUTH_KEY_ENV: &str = "SUPABASE_KEY";

pub const KEYS: [&str; 4] = ["api-url", "auth-url", "auth-key", "timeout"];

/// Configuration for quickthink, stored in `config.json` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuickThinkConfig {
    /// Base URL of the deck service
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Base URL of the auth service
    #[serde(default)]
    pub auth_url: Option<String>,

    /// Public API key sent to the auth service
    #[serde(default)]
    pub auth_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for QuickThinkConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            auth_url: None,
            auth_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl QuickThinkConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: QuickThinkConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Apply environment overrides. `lookup` is `std::env::var` in production.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = present(API_URL_ENV) {
            self.api_url = url;
        }
        if let Some(url) = present(AUTH_URL_ENV) {
            self.auth_url = Some(url);
        }
        if let Some(key) = present(AUTH_KEY_ENV) {
            self.auth_key = Some(key);
        }
        self
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api-url" => Some(self.api_url.clone()),
            "auth-url" => Some(self.auth_url.clone().unwrap_or_default()),
            "auth-key" => Some(self.auth_key.clone().unwrap_or_default()),
            "timeout" => Some(self.timeout_secs.to_string()),
            _ => None,
        }
    }

    /// Set a key from its string form. Empty values unset the optional keys.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        match key {
            "api-url" => {
                self.api_url = parse_url(value)?;
            }
            "auth-url" => {
                self.auth_url = if value.is_empty() {
                    None
                } else {
                    Some(parse_url(value)?)
                };
            }
            "auth-key" => {
                self.auth_key = (!value.is_empty()).then(|| value.to_string());
            }
            "timeout" => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| format!("Invalid timeout: {}", value))?;
                if secs == 0 {
                    return Err("Timeout must be at least 1 second".to_string());
                }
                self.timeout_secs = secs;
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }

    /// Auth service coordinates, when both are configured.
    pub fn auth(&self) -> Option<(&str, &str)> {
        match (&self.auth_url, &self.auth_key) {
            (Some(url), Some(key)) => Some((url.as_str(), key.as_str())),
            _ => None,
        }
    }
}

fn parse_url(value: &str) -> std::result::Result<String, String> {
    let url = Url::parse(value).map_err(|e| format!("Invalid URL {}: {}", value, e))?;
    if url.cannot_be_a_base() {
        return Err(format!("Invalid URL {}: not a base URL", value));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = QuickThinkConfig::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.auth().is_none());
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = QuickThinkConfig::load(temp.path().join("missing")).unwrap();
        assert_eq!(config, QuickThinkConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let mut config = QuickThinkConfig::default();
        config.set("api-url", "https://decks.example.test").unwrap();
        config.set("timeout", "5").unwrap();
        config.save(temp.path()).unwrap();

        let loaded = QuickThinkConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.api_url, "https://decks.example.test");
        assert_eq!(loaded.timeout_secs, 5);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            r#"{"auth_url": "https://auth.example.test"}"#,
        )
        .unwrap();

        let loaded = QuickThinkConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.api_url, "http://localhost:8000");
        assert_eq!(loaded.auth_url.as_deref(), Some("https://auth.example.test"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = QuickThinkConfig::default();
        assert!(config.set("api-url", "localhost").is_err());
        assert!(config.set("timeout", "soon").is_err());
        assert!(config.set("timeout", "0").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, QuickThinkConfig::default());
    }

    #[test]
    fn test_empty_value_unsets_auth() {
        let mut config = QuickThinkConfig::default();
        config.set("auth-key", "anon").unwrap();
        assert_eq!(config.get("auth-key").as_deref(), Some("anon"));
        config.set("auth-key", "").unwrap();
        assert_eq!(config.auth_key, None);
    }

    #[test]
    fn test_env_overrides() {
        let config = QuickThinkConfig::default().with_overrides(|key| match key {
            API_URL_ENV => Some("http://127.0.0.1:9000".to_string()),
            AUTH_URL_ENV => Some("https://auth.example.test".to_string()),
            AUTH_KEY_ENV => Some("  ".to_string()),
            _ => None,
        });

        assert_eq!(config.api_url, "http://127.0.0.1:9000");
        assert_eq!(config.auth_url.as_deref(), Some("https://auth.example.test"));
        assert_eq!(config.auth_key, None);
        assert!(config.auth().is_none());
    }
}
