//! Runtime configuration for client apps.
//!
//! Aggregates the endpoints and keys needed to reach the three
//! collaborators: the note API, the auth service, and object storage.
//! All values are environment-driven; secret credentials never live in
//! source.

use std::env;

use crate::storage::S3Config;
use crate::{Error, Result};

const ENV_API_BASE_URL: &str = "ZUKAN_API_BASE_URL";
const ENV_AUTH_URL: &str = "ZUKAN_AUTH_URL";
const ENV_AUTH_API_KEY: &str = "ZUKAN_AUTH_API_KEY";

/// Auth collaborator endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub url: String,
    pub api_key: String,
}

/// Full client configuration.
///
/// Each collaborator section is optional as a whole; a partially set
/// section is an error so misconfiguration fails loudly at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the managed note API.
    pub api_base_url: Option<String>,
    /// Auth endpoint and public API key.
    pub auth: Option<AuthConfig>,
    /// S3-compatible media storage settings.
    pub storage: Option<S3Config>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = parse_config(|key| env::var(key).ok())?;
        config.storage = S3Config::from_env()?;
        Ok(config)
    }

    /// Whether every collaborator section is present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.api_base_url.is_some() && self.auth.is_some() && self.storage.is_some()
    }
}

fn parse_config(lookup: impl Fn(&str) -> Option<String>) -> Result<AppConfig> {
    let api_base_url = lookup(ENV_API_BASE_URL)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let auth_url = lookup(ENV_AUTH_URL)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    let auth_api_key = lookup(ENV_AUTH_API_KEY)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let auth = match (auth_url, auth_api_key) {
        (None, None) => None,
        (Some(url), Some(api_key)) => Some(AuthConfig { url, api_key }),
        (Some(_), None) => {
            return Err(Error::InvalidInput(format!(
                "Auth configuration is incomplete. Missing: {ENV_AUTH_API_KEY}"
            )));
        }
        (None, Some(_)) => {
            return Err(Error::InvalidInput(format!(
                "Auth configuration is incomplete. Missing: {ENV_AUTH_URL}"
            )));
        }
    };

    Ok(AppConfig {
        api_base_url,
        auth,
        storage: None,
    })
}
