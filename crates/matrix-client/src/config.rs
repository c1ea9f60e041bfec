//! Client configuration.
//!
//! Stored as TOML in the platform config directory. A missing file is not an
//! error; every field has a default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use matrix_model::ANONYMOUS_USER;

use crate::error::{ClientError, Result};

/// Base URL of a locally running backend.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Request timeout. Video deepfake detection is slow.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the analysis API.
    pub api_url: String,
    /// Base URL of the spot-the-fake game; falls back to `api_url`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_url: Option<String>,
    pub timeout_secs: u64,
    /// Identity sent with game votes.
    pub user_id: String,
    /// JSON file listing trusted news sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            game_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_id: ANONYMOUS_USER.to_string(),
            sources_file: None,
        }
    }
}

impl ClientConfig {
    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from a specific path; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ClientError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| ClientError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "Matrix", "matrix")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    pub fn validate(&self) -> Result<()> {
        for url in std::iter::once(&self.api_url).chain(self.game_url.as_ref()) {
            if !has_http_scheme(url) {
                return Err(ClientError::Config(format!(
                    "base URL must start with http:// or https://: {url}"
                )));
            }
        }
        if self.timeout_secs == 0 {
            return Err(ClientError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL of the game endpoints.
    pub fn game_base(&self) -> &str {
        self.game_url.as_deref().unwrap_or(&self.api_url)
    }
}

/// True if `url` has an `http://` or `https://` scheme, case-insensitively.
pub fn has_http_scheme(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    ["http://", "https://"]
        .iter()
        .any(|scheme| url.len() > scheme.len() && url.starts_with(scheme))
}

/// Join a base URL and an absolute endpoint path without doubling slashes.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
