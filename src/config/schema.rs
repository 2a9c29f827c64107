//! Configuration schema and defaults for opsdeck.
//!
//! Defines the TOML-serializable application configuration with sections
//! `[http]`, `[logbook]`, `[web]`, and `[storage]`. Every field has a
//! built-in default; users only set the values they want to override.
//!
//! This is the *application* layer (timeouts, addresses, paths). The
//! dashboard's own settings — API bases, table names, categories — live in
//! the durable key/value store and are edited through the dashboard, not
//! this file.

use serde::{Deserialize, Serialize};

use crate::client::DEFAULT_TIMEOUT_MS;
use crate::logbook::DEFAULT_CAP;

/// Top-level opsdeck configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub logbook: LogbookConfig,
    pub web: WebConfig,
    pub storage: StorageConfig,
}

/// Outbound HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Fixed per-call timeout (milliseconds).
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Logbook retention settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogbookConfig {
    /// Maximum retained entries (most recent kept).
    pub cap: usize,
}

impl Default for LogbookConfig {
    fn default() -> Self {
        Self { cap: DEFAULT_CAP }
    }
}

/// Embedded web dashboard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Listen address for `opsdeck web`.
    pub addr: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9760".to_string(),
        }
    }
}

/// State storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for the state file. Empty means `~/.opsdeck/`.
    pub dir: String,
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl AppConfig {
    /// Annotated default config file content, written by
    /// `opsdeck config init`.
    pub fn default_toml() -> String {
        r#"# opsdeck Configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (OPSDECK_*)
#   2. Project config (.opsdeck.toml in current directory)
#   3. User global config (~/.opsdeck/config.toml)
#   4. Built-in defaults

[http]
timeout_ms = 9000       # Fixed per-call timeout for outbound requests

[logbook]
cap = 600               # Most-recent log entries retained

[web]
addr = "127.0.0.1:9760" # Listen address for the embedded dashboard

[storage]
dir = ""                # State directory; empty means ~/.opsdeck/
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = AppConfig::default();
        assert_eq!(config.http.timeout_ms, 9000);
        assert_eq!(config.logbook.cap, 600);
        assert_eq!(config.web.addr, "127.0.0.1:9760");
        assert!(config.storage.dir.is_empty());
    }

    #[test]
    fn deserialize_minimal_toml() {
        let config: AppConfig = toml::from_str("[http]\ntimeout_ms = 5000\n").unwrap();
        assert_eq!(config.http.timeout_ms, 5000);
        assert_eq!(config.logbook.cap, 600);
    }

    #[test]
    fn empty_toml_produces_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.http.timeout_ms, 9000);
    }

    #[test]
    fn default_toml_parses_back() {
        let config: AppConfig = toml::from_str(&AppConfig::default_toml()).unwrap();
        assert_eq!(config.http.timeout_ms, 9000);
        assert_eq!(config.web.addr, "127.0.0.1:9760");
    }
}
