//! Configuration management

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_REFRESH_MARGIN_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_TOKEN_URL};
use crate::errors::{MomentumError, Result};

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentumConfig {
    pub api: ApiSettings,
    pub auth: AuthSettings,
}

/// Backend endpoint settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    /// Sent verbatim as the `apikey` header.
    #[serde(skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// OAuth2 client-credentials settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSettings {
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
    pub resource: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// Tokens are refreshed once they are this close to expiry.
    #[serde(default = "default_refresh_margin_seconds")]
    pub refresh_margin_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

fn default_refresh_margin_seconds() -> u64 {
    DEFAULT_REFRESH_MARGIN_SECS
}

impl MomentumConfig {
    /// Build a configuration with default timeout, token URL and refresh margin.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            api: ApiSettings {
                base_url: base_url.into(),
                api_key: api_key.into(),
                timeout_seconds: DEFAULT_TIMEOUT_SECS,
            },
            auth: AuthSettings {
                client_id: client_id.into(),
                client_secret: client_secret.into(),
                resource: resource.into(),
                token_url: default_token_url(),
                refresh_margin_seconds: DEFAULT_REFRESH_MARGIN_SECS,
            },
        }
    }

    /// Reject empty required values and non-http(s) URLs.
    pub fn validate(&self) -> Result<()> {
        require("api.base_url", &self.api.base_url)?;
        require("api.api_key", &self.api.api_key)?;
        require("auth.client_id", &self.auth.client_id)?;
        require("auth.client_secret", &self.auth.client_secret)?;
        require("auth.resource", &self.auth.resource)?;
        require_http_url("api.base_url", &self.api.base_url)?;
        require_http_url("auth.token_url", &self.auth.token_url)?;

        if self.api.timeout_seconds == 0 {
            return Err(MomentumError::Config("api.timeout_seconds must be greater than zero".into()));
        }
        Ok(())
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }

    pub const fn refresh_margin(&self) -> Duration {
        Duration::from_secs(self.auth.refresh_margin_seconds)
    }
}

fn require(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MomentumError::Config(format!("{key} must not be empty")));
    }
    Ok(())
}

fn require_http_url(key: &str, value: &str) -> Result<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| MomentumError::Config(format!("{key} is not a valid URL ({value}): {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(MomentumError::Config(format!("{key} must use http or https, got {other}"))),
    }
}

impl fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("resource", &self.resource)
            .field("token_url", &self.token_url)
            .field("refresh_margin_seconds", &self.refresh_margin_seconds)
            .finish()
    }
}
