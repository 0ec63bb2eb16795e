//! Client configuration from environment variables.
//!
//! `.env.local` and `.env` in the working directory are loaded first (local
//! overrides win), then:
//!
//! | variable | default |
//! |---|---|
//! | `JACKPOT_WS_URL` | `ws://localhost:22201/v1/ws` |
//! | `JACKPOT_FOLLOW_UP_DELAY_MS` | `700` |
//! | `JACKPOT_DEFAULT_JACKPOT` | `800` |
//! | `JACKPOT_PLATFORM_INIT_DATA` | unset |

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_WS_URL: &str = "ws://localhost:22201/v1/ws";
pub const DEFAULT_FOLLOW_UP_DELAY_MS: u64 = 700;
/// Server does not send a jackpot yet.
pub const DEFAULT_JACKPOT: u64 = 800;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid socket URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub ws_url: String,
    /// Delay between `init-response` and the follow-up requests.
    pub follow_up_delay: Duration,
    pub default_jackpot: u64,
    pub platform_init_data: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ws_url: DEFAULT_WS_URL.to_string(),
            follow_up_delay: Duration::from_millis(DEFAULT_FOLLOW_UP_DELAY_MS),
            default_jackpot: DEFAULT_JACKPOT,
            platform_init_data: None,
        }
    }
}

impl ClientConfig {
    /// Load `.env.local` and `.env` from `dir` into the process environment.
    ///
    /// Variables already set are not overridden. A file that fails to parse
    /// is logged and skipped.
    pub fn load_env_files(dir: &Path) {
        for filename in [".env.local", ".env"] {
            let path = dir.join(filename);
            if !path.exists() {
                continue;
            }
            if let Err(e) = dotenvy::from_path(&path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load env file");
            }
        }
    }

    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let ws_url = lookup("JACKPOT_WS_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.ws_url);
        validate_ws_url(&ws_url)?;

        let follow_up_delay = parse_or_default(
            &lookup,
            "JACKPOT_FOLLOW_UP_DELAY_MS",
            DEFAULT_FOLLOW_UP_DELAY_MS,
        );
        let default_jackpot = parse_or_default(&lookup, "JACKPOT_DEFAULT_JACKPOT", DEFAULT_JACKPOT);

        let platform_init_data = lookup("JACKPOT_PLATFORM_INIT_DATA")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            ws_url,
            follow_up_delay: Duration::from_millis(follow_up_delay),
            default_jackpot,
            platform_init_data,
        })
    }
}

fn parse_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default, "Invalid number in config, using default");
            default
        }),
    }
}

fn validate_ws_url(raw: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "ws" | "wss" => Ok(()),
        other => Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.ws_url, "ws://localhost:22201/v1/ws");
        assert_eq!(config.follow_up_delay, Duration::from_millis(700));
        assert_eq!(config.default_jackpot, 800);
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("JACKPOT_WS_URL", "wss://games.example.com/v1/ws"),
            ("JACKPOT_FOLLOW_UP_DELAY_MS", "25"),
            ("JACKPOT_DEFAULT_JACKPOT", "1200"),
            ("JACKPOT_PLATFORM_INIT_DATA", "/tmp/init.json"),
        ]))
        .expect("config");

        assert_eq!(config.ws_url, "wss://games.example.com/v1/ws");
        assert_eq!(config.follow_up_delay, Duration::from_millis(25));
        assert_eq!(config.default_jackpot, 1200);
        assert_eq!(
            config.platform_init_data,
            Some(PathBuf::from("/tmp/init.json"))
        );
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("JACKPOT_FOLLOW_UP_DELAY_MS", "soon"),
            ("JACKPOT_DEFAULT_JACKPOT", "-1"),
        ]))
        .expect("config");

        assert_eq!(config.follow_up_delay, Duration::from_millis(700));
        assert_eq!(config.default_jackpot, 800);
    }

    #[test]
    fn test_rejects_non_socket_url() {
        let err = ClientConfig::from_lookup(lookup(&[("JACKPOT_WS_URL", "http://localhost")]))
            .expect_err("should reject");
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));

        assert!(ClientConfig::from_lookup(lookup(&[("JACKPOT_WS_URL", "not a url")])).is_err());
    }

    #[test]
    fn test_env_file_is_loaded() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(".env"),
            "JACKPOT_TEST_ONLY_MARKER=from-dotenv\n",
        )
        .expect("write");

        ClientConfig::load_env_files(dir.path());
        assert_eq!(
            std::env::var("JACKPOT_TEST_ONLY_MARKER").ok().as_deref(),
            Some("from-dotenv")
        );
    }

    #[test]
    fn test_malformed_env_file_does_not_stop_the_next_one() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(".env.local"), "this line is not an assignment\n")
            .expect("write");
        std::fs::write(
            dir.path().join(".env"),
            "JACKPOT_TEST_ONLY_AFTER_MALFORMED=loaded\n",
        )
        .expect("write");

        ClientConfig::load_env_files(dir.path());
        assert_eq!(
            std::env::var("JACKPOT_TEST_ONLY_AFTER_MALFORMED").ok().as_deref(),
            Some("loaded")
        );
    }
}
