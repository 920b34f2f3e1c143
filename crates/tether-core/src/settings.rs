//! Settings loading with environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`TetherSettings::default()`]
//! 2. If `~/.tether/settings.json` exists, merge its values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Only two addresses belong to this subsystem: the base URL of the HTTP
//! request endpoints and the base URL of the streaming endpoint. The
//! reconnect delay is exposed as a setting so deployments and tests can
//! tune it; the default matches the documented 2000 ms.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Env var overriding the HTTP API base URL.
pub const ENV_API_URL: &str = "TETHER_API_URL";
/// Env var overriding the WebSocket base URL.
pub const ENV_WS_URL: &str = "TETHER_WS_URL";
/// Env var overriding the reconnect delay in milliseconds.
pub const ENV_RECONNECT_DELAY_MS: &str = "TETHER_RECONNECT_DELAY_MS";

/// Errors that can occur when loading or parsing settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the settings file from disk.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to parse JSON in the settings file.
    #[error("failed to parse settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Client settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TetherSettings {
    /// Base URL of the HTTP request endpoints (`/api/chat`, `/api/confirm`).
    pub api_url: String,
    /// Base URL of the streaming endpoint (`/ws/agent`).
    pub ws_url: String,
    /// Delay between a connection closing and the reconnect attempt.
    pub reconnect_delay_ms: u64,
}

impl Default for TetherSettings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8001".to_owned(),
            ws_url: "ws://localhost:8001".to_owned(),
            reconnect_delay_ms: 2000,
        }
    }
}

/// Resolve the path to the settings file (`~/.tether/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_owned());
    PathBuf::from(home).join(".tether").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<TetherSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<TetherSettings> {
    let mut settings = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)?
    } else {
        debug!(?path, "settings file not found, using defaults");
        TetherSettings::default()
    };
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Apply `TETHER_*` environment variable overrides.
fn apply_env_overrides(settings: &mut TetherSettings) {
    if let Ok(url) = std::env::var(ENV_API_URL) {
        settings.api_url = url;
    }
    if let Ok(url) = std::env::var(ENV_WS_URL) {
        settings.ws_url = url;
    }
    if let Ok(delay) = std::env::var(ENV_RECONNECT_DELAY_MS) {
        if let Ok(ms) = delay.parse() {
            settings.reconnect_delay_ms = ms;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = load_settings_from_path(&path).unwrap();
        assert_eq!(settings.api_url, "http://localhost:8001");
        assert_eq!(settings.ws_url, "ws://localhost:8001");
        assert_eq!(settings.reconnect_delay_ms, 2000);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(f, r#"{{"apiUrl": "https://agent.example.com"}}"#).unwrap();
        let settings = load_settings_from_path(&path).unwrap();
        assert_eq!(settings.api_url, "https://agent.example.com");
        // Unspecified fields keep their defaults
        assert_eq!(settings.ws_url, "ws://localhost:8001");
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_settings_from_path(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn settings_serialize_camel_case() {
        let json = serde_json::to_value(TetherSettings::default()).unwrap();
        assert!(json.get("apiUrl").is_some());
        assert!(json.get("wsUrl").is_some());
        assert!(json.get("reconnectDelayMs").is_some());
    }

    #[test]
    fn settings_path_under_home() {
        let path = settings_path();
        assert!(path.ends_with(".tether/settings.json"));
    }
}
