//! Application services
//!
//! Explicitly constructed collaborator clients, wired from environment
//! configuration at startup and passed to the UI through context (no
//! ambient globals).

use std::sync::Arc;

use zukan_core::auth::{AuthClient, AuthSession, MemorySessionStore};
use zukan_core::config::AppConfig;
use zukan_core::data::ApiNoteStore;
use zukan_core::storage::{S3Config, S3MediaStore};
use zukan_core::sync::{NoteSynchronizer, PartialFailurePolicy};
use zukan_core::{Error, Result};

/// Concrete synchronizer type used by the desktop app.
pub type Synchronizer = NoteSynchronizer<ApiNoteStore, S3MediaStore>;

/// Collaborator clients shared by the whole app.
pub struct AppServices {
    api_base_url: String,
    auth: Arc<AuthClient<MemorySessionStore>>,
    storage_config: S3Config,
}

impl AppServices {
    /// Build all services from environment configuration.
    ///
    /// Fails when any collaborator section is missing; the app cannot
    /// do anything useful without all three.
    pub fn from_env() -> Result<Self> {
        let config = AppConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build all services from an explicit configuration.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let api_base_url = config.api_base_url.ok_or_else(|| {
            Error::InvalidInput("ZUKAN_API_BASE_URL is not configured".to_string())
        })?;
        let auth_config = config
            .auth
            .ok_or_else(|| Error::InvalidInput("Auth is not configured".to_string()))?;
        let storage_config = config
            .storage
            .ok_or_else(|| Error::InvalidInput("S3 storage is not configured".to_string()))?;

        let auth = AuthClient::new(
            auth_config.url,
            auth_config.api_key,
            MemorySessionStore::new(),
        )
        .map_err(|error| Error::Auth(error.to_string()))?;

        Ok(Self {
            api_base_url,
            auth: Arc::new(auth),
            storage_config,
        })
    }

    /// The auth collaborator client.
    #[must_use]
    pub fn auth(&self) -> Arc<AuthClient<MemorySessionStore>> {
        Arc::clone(&self.auth)
    }

    /// Build a synchronizer scoped to a signed-in session.
    ///
    /// The data client carries the session's access token; the storage
    /// paths are scoped by the session's owner identity.
    pub fn build_synchronizer(&self, session: &AuthSession) -> Result<Arc<Synchronizer>> {
        let data = ApiNoteStore::new(self.api_base_url.as_str(), session.access_token.as_str())?;
        let media = S3MediaStore::new(self.storage_config.clone());
        let synchronizer = NoteSynchronizer::new(
            Arc::new(data),
            Arc::new(media),
            session.identity(),
            PartialFailurePolicy::KeepRecord,
        )?;
        Ok(Arc::new(synchronizer))
    }
}
