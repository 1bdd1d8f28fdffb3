// ⚙️ Configuration - everything comes from the process environment
//
// Only the advisor credential matters; without it the app still runs and the
// advisor answers with a fixed apology.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Completion API key; `None` disables outbound calls
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        AdvisorConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub advisor: AdvisorConfig,

    /// Where the TUI writes its log file
    pub log_dir: PathBuf,

    /// Server listen address
    pub bind: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            advisor: AdvisorConfig::default(),
            log_dir: PathBuf::from("logs"),
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the real environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (tests pass a map instead of touching the environment)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = AppConfig::default();

        let timeout_secs = match non_empty("HOMEHUB_TIMEOUT_SECS") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "ignoring invalid HOMEHUB_TIMEOUT_SECS");
                DEFAULT_TIMEOUT_SECS
            }),
            None => DEFAULT_TIMEOUT_SECS,
        };

        AppConfig {
            advisor: AdvisorConfig {
                api_key: non_empty("API_KEY").or_else(|| non_empty("GEMINI_API_KEY")),
                model: non_empty("HOMEHUB_MODEL").unwrap_or(defaults.advisor.model),
                api_base: non_empty("HOMEHUB_API_BASE")
                    .map(|base| base.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.advisor.api_base),
                timeout_secs,
            },
            log_dir: non_empty("HOMEHUB_LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir),
            bind: non_empty("HOMEHUB_BIND").unwrap_or(defaults.bind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = config_from(&[]);
        assert!(config.advisor.api_key.is_none());
        assert_eq!(config.advisor.model, DEFAULT_MODEL);
        assert_eq!(config.advisor.api_base, DEFAULT_API_BASE);
        assert_eq!(config.advisor.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.bind, DEFAULT_BIND);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_api_key_fallback_and_blank() {
        let config = config_from(&[("API_KEY", "  "), ("GEMINI_API_KEY", "g-123")]);
        assert_eq!(config.advisor.api_key.as_deref(), Some("g-123"));

        let config = config_from(&[("API_KEY", "primary"), ("GEMINI_API_KEY", "g-123")]);
        assert_eq!(config.advisor.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOMEHUB_MODEL", "gemini-2.0-pro"),
            ("HOMEHUB_API_BASE", "http://127.0.0.1:9999/v1/"),
            ("HOMEHUB_TIMEOUT_SECS", "5"),
            ("HOMEHUB_BIND", "127.0.0.1:8080"),
        ]);
        assert_eq!(config.advisor.model, "gemini-2.0-pro");
        assert_eq!(config.advisor.api_base, "http://127.0.0.1:9999/v1");
        assert_eq!(config.advisor.timeout_secs, 5);
        assert_eq!(config.bind, "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let config = config_from(&[("HOMEHUB_TIMEOUT_SECS", "soon")]);
        assert_eq!(config.advisor.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_api_key_is_never_serialized() {
        let config = config_from(&[("API_KEY", "secret")]);
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
